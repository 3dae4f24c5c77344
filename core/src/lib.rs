//! # Ocean Hazard Core
//!
//! Core domain layer for the Ocean Hazard sign-up flow. This crate contains
//! the domain entities, the verification session state machine and its
//! controller, the collaborator traits it calls out to, and error types.

pub mod domain;
pub mod errors;
pub mod services;

pub use domain::*;
pub use errors::*;
pub use services::*;
