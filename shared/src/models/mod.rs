//! Domain models for the hazard reporter

mod geocode;
pub mod media;
mod report;
mod weather;

pub use geocode::*;
pub use media::*;
pub use report::*;
pub use weather::*;
