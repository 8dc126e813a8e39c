mod base;
mod canonical;
mod dimension;
mod nested;
mod transform;

pub use base::*;
pub use nested::*;
