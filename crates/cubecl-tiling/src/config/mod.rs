/// Logging config module.
pub mod logger;

mod base;

pub use base::*;
