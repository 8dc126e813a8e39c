//! Stride Utilities

mod layout_builders;

pub use layout_builders::*;
