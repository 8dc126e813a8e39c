//! # Hierarchical Tiling Transforms for `CubeCL`
//!
//! A [`Tiling`] is an ordered sequence of [`Tile`]s. Each tile splits the trailing
//! dimensions of a shape into an outer part, kept in place, and an inner part,
//! appended at the end. Applying the tiles one after the other describes nested
//! blocking such as a warp tile followed by a thread tile.
//!
//! The crate converts shapes, strides and indices between the logical (untiled)
//! space and the tiled space, and derives reduced or canonical tilings.
//!
//! ```
//! use cubecl_tiling::{Tiling, dims};
//!
//! let tiling = Tiling::new([[2, 2]]).unwrap();
//! assert_eq!(tiling.tile_shape(&[4, 4]).unwrap(), dims![2, 2, 2, 2]);
//! assert_eq!(tiling.tile_indices(&[3, 1]).unwrap(), dims![1, 0, 1, 1]);
//! assert_eq!(tiling.untile_shape(&[2, 2, 2, 2]).unwrap(), dims![4, 4]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
extern crate derive_new;

pub(crate) const INLINE_DIMS: usize = 8;

/// Global configuration module.
pub mod config;
/// Error types.
pub mod errors;
/// Stride layout builders.
pub mod striding;

mod dims;
mod tile;
mod tiling;

pub use dims::*;
pub use errors::*;
pub use tile::*;
pub use tiling::*;

/// Reexport for use in macros
pub use smallvec::{SmallVec, smallvec};
