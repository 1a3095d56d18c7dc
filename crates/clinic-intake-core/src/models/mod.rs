//! Domain models for clinic intake validation.

mod issue;
mod patient;

pub use issue::*;
pub use patient::*;
