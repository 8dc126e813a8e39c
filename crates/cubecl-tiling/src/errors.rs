use alloc::vec::Vec;
use thiserror::Error;

/// Result type of every fallible tiling operation.
pub type Result<T> = core::result::Result<T, TilingError>;

/// Errors raised while building or applying a [`Tiling`](crate::Tiling).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TilingError {
    /// A tiled extent isn't divisible by its tile size.
    #[error("Tile {tile:?} does not divide the trailing dimensions of shape {shape:?}")]
    ShapeMismatch {
        /// The shape the tile was applied to.
        shape: Vec<i64>,
        /// The offending tile.
        tile: Vec<i64>,
    },

    /// The trailing dimensions of a tiled shape don't match the tile that produced them.
    #[error("Shape {shape:?} is not a valid result of applying tile {tile:?}")]
    InvalidTiledShape {
        /// The shape being untiled.
        shape: Vec<i64>,
        /// The tile expected at the end of the shape.
        tile: Vec<i64>,
    },

    /// A nested logical dimension can't be split by a tile size.
    #[error("Tile size {tile} does not apply to nested dimension {dims:?}")]
    NestedShapeMismatch {
        /// The sub-dimensions of the logical dimension.
        dims: Vec<i64>,
        /// The tile size applied to it.
        tile: i64,
    },

    /// The input has fewer dimensions than required.
    #[error("Expected at least {required} dimensions, got {actual}")]
    RankMismatch {
        /// Minimum number of dimensions needed.
        required: usize,
        /// Number of dimensions provided.
        actual: usize,
    },

    /// A shape and its strides don't have the same number of dimensions.
    #[error("Shape of rank {shape} paired with strides of rank {strides}")]
    LayoutRankMismatch {
        /// Rank of the shape.
        shape: usize,
        /// Rank of the strides.
        strides: usize,
    },

    /// An axis index falls outside the tiling rank.
    #[error("Invalid dimension {axis} for a tiling of rank {rank}")]
    InvalidAxis {
        /// The requested axis.
        axis: usize,
        /// The rank of the tiling.
        rank: usize,
    },

    /// A tile refers to more dimensions than the tile it's nested in.
    #[error("Tile #{index} has arity {arity}, larger than the arity {previous} of the tile before it")]
    NonNestedTiles {
        /// Position of the tile in the tiling.
        index: usize,
        /// Arity of the tile.
        arity: usize,
        /// Arity of the previous tile.
        previous: usize,
    },

    /// A dimension, stride or index no longer fits in an `i64` once scaled by a tile.
    #[error("Applying tile {tile:?} to {dims:?} overflows i64")]
    Overflow {
        /// The values being transformed.
        dims: Vec<i64>,
        /// The tile scaling them.
        tile: Vec<i64>,
    },

    /// A tile contains a non-positive size.
    #[error("Tile sizes must be positive, got {tile:?}")]
    MalformedTile {
        /// The rejected tile.
        tile: Vec<i64>,
    },
}
