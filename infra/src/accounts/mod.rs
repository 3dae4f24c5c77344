//! Account creation backends

mod memory;

pub use memory::{InMemoryAccountRegistry, StoredAccount};
