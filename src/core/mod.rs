//! Core record model, derived rates, and the submission gate.
//!
//! Everything in this module is synchronous and pure: callers re-run
//! [`derive_rates`] and [`evaluate`] after every mutation of a record.

mod config;
mod derived;
mod error;
mod types;
mod validation;

pub use config::*;
pub use derived::*;
pub use error::*;
pub use types::*;
pub use validation::*;
