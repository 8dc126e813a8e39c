use alloc::{vec, vec::Vec};

use super::transform::trailing;
use crate::{Dims, Result, Tiling, TilingError, dims};

/// The shape and strides of one materialization of a logical tensor, e.g. its global memory
/// or its shared memory layout.
#[derive(new, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LevelLayout {
    /// The logical shape at this level.
    pub shape: Dims,
    /// The strides matching `shape`.
    pub strides: Dims,
}

impl<S: AsRef<[i64]>, T: AsRef<[i64]>> From<(S, T)> for LevelLayout {
    fn from((shape, strides): (S, T)) -> Self {
        Self::new(
            Dims::from_slice(shape.as_ref()),
            Dims::from_slice(strides.as_ref()),
        )
    }
}

/// Tiled shapes and strides, one entry per input level or logical dimension.
pub type NestedShapeStrides = (Vec<Dims>, Vec<Dims>);

impl Tiling {
    /// Applies the same tiling to several materializations of a logical tensor.
    ///
    /// Returns the tiled shapes and the tiled strides of every level, in input order. If
    /// any level fails to tile, the whole call fails.
    pub fn tile_nested_shape_strides(&self, levels: &[LevelLayout]) -> Result<NestedShapeStrides> {
        let mut shapes = Vec::with_capacity(levels.len());
        let mut strides = Vec::with_capacity(levels.len());

        for level in levels {
            if level.shape.len() != level.strides.len() {
                return Err(TilingError::LayoutRankMismatch {
                    shape: level.shape.len(),
                    strides: level.strides.len(),
                });
            }

            shapes.push(self.tile_shape(&level.shape)?);
            strides.push(self.tile_strides(&level.strides)?);
        }

        Ok((shapes, strides))
    }

    /// A fused `tile_shape` and `tile_strides` for nested shapes.
    ///
    /// Every logical dimension is made of several physical sub-dimensions, major to minor,
    /// each with its own stride. For example a row-major `(128, 128)` array already split
    /// into `(64, 64)` blocks has the nested shape `((2, 64), (2, 64))` and the nested
    /// strides `((2 * 64 * 64, 64), (64 * 64, 1))`.
    ///
    /// A tile size is taken from the minor sub-dimensions first and may span several of them.
    /// Logical dimensions left without sub-dimensions are reported as `(1)`.
    pub fn tile_nested_layout<S, T>(&self, shape: &[S], strides: &[T]) -> Result<NestedShapeStrides>
    where
        S: AsRef<[i64]>,
        T: AsRef<[i64]>,
    {
        if shape.len() != strides.len() {
            return Err(TilingError::LayoutRankMismatch {
                shape: shape.len(),
                strides: strides.len(),
            });
        }

        let mut shape: Vec<Dims> = shape.iter().map(|d| Dims::from_slice(d.as_ref())).collect();
        let mut strides: Vec<Dims> = strides
            .iter()
            .map(|s| Dims::from_slice(s.as_ref()))
            .collect();

        for (dims, dim_strides) in shape.iter().zip(&strides) {
            if dims.len() != dim_strides.len() {
                return Err(TilingError::LayoutRankMismatch {
                    shape: dims.len(),
                    strides: dim_strides.len(),
                });
            }
        }

        for tile in self.tiles() {
            let start = trailing(shape.len(), tile.arity())?;
            let mut major = Vec::with_capacity(tile.arity());
            let mut minor = Vec::with_capacity(tile.arity());

            for ((dims, dim_strides), &t) in shape[start..]
                .iter()
                .zip(&strides[start..])
                .zip(tile.iter())
            {
                let (major_part, minor_part) = split_nested_dim(dims, dim_strides, t)?;
                major.push(major_part);
                minor.push(minor_part);
            }

            shape.truncate(start);
            strides.truncate(start);
            for (dims, dim_strides) in major.into_iter().chain(minor) {
                shape.push(dims);
                strides.push(dim_strides);
            }
        }

        for (dims, dim_strides) in shape.iter_mut().zip(strides.iter_mut()) {
            if dims.is_empty() {
                *dims = dims![1];
                *dim_strides = dims![1];
            }
        }

        Ok((shape, strides))
    }
}

type NestedDim = (Dims, Dims);

// Splits one nested logical dimension by `tile`, returning its (major, minor) parts.
fn split_nested_dim(dims: &[i64], strides: &[i64], tile: i64) -> Result<(NestedDim, NestedDim)> {
    let mismatch = || TilingError::NestedShapeMismatch {
        dims: dims.to_vec(),
        tile,
    };

    let (mut major_shape, mut major_strides) = (Dims::new(), Dims::new());
    let (mut minor_shape, mut minor_strides) = (Dims::new(), Dims::new());
    let mut remaining = tile;

    for (&d, &s) in dims.iter().rev().zip(strides.iter().rev()) {
        if d <= 0 {
            return Err(mismatch());
        }

        if d < remaining {
            // The whole sub-dimension fits in the tile, more are needed.
            if remaining % d != 0 {
                return Err(mismatch());
            }
            remaining /= d;
            minor_shape.push(d);
            minor_strides.push(s);
        } else if remaining != 1 {
            if d % remaining != 0 {
                return Err(mismatch());
            }
            minor_shape.push(remaining);
            minor_strides.push(s);
            if d != remaining {
                major_shape.push(d / remaining);
                let stride = s.checked_mul(remaining).ok_or_else(|| TilingError::Overflow {
                    dims: strides.to_vec(),
                    tile: vec![tile],
                })?;
                major_strides.push(stride);
            }
            remaining = 1;
        } else {
            major_shape.push(d);
            major_strides.push(s);
        }
    }

    if remaining != 1 {
        return Err(mismatch());
    }

    for part in [
        &mut major_shape,
        &mut major_strides,
        &mut minor_shape,
        &mut minor_strides,
    ] {
        part.reverse();
    }

    Ok(((major_shape, major_strides), (minor_shape, minor_strides)))
}
