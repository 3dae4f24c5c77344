//! Domain layer containing the sign-up entities.

pub mod entities;

pub use entities::*;
