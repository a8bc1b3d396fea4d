//! Shared types and models for the Coastal Hazard Reporter
//!
//! This crate holds everything that does not touch the network or the page:
//! domain types, validation, media staging rules, the submission state
//! machine and presentation helpers. It is used by the client services and,
//! through them, by the WASM bindings.

pub mod format;
pub mod media;
pub mod models;
pub mod notify;
pub mod sequence;
pub mod submission;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
