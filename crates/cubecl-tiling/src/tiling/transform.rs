use crate::{Dims, Result, Tiling, TilingError, config::logger::TilingLogLevel};

/// Index of the first of the trailing `count` dimensions of a rank `rank` input.
pub(crate) fn trailing(rank: usize, count: usize) -> Result<usize> {
    rank.checked_sub(count).ok_or(TilingError::RankMismatch {
        required: count,
        actual: rank,
    })
}

pub(crate) fn overflow(dims: &[i64], tile: &[i64]) -> TilingError {
    TilingError::Overflow {
        dims: dims.to_vec(),
        tile: tile.to_vec(),
    }
}

pub(crate) fn log_transform(tiling: &Tiling, op: &str, input: &[i64], output: &[i64]) {
    if TilingLogLevel::logs_transforms() {
        log::trace!("{tiling}.{op}({input:?}) -> {output:?}");
    }
}

impl Tiling {
    /// Computes the shape of an array after tiling.
    ///
    /// Every tile replaces the trailing dimensions `d` it splits by `d / t` and appends the
    /// tile sizes `t` at the end, so the result has `shape.len() + self.total_arity()`
    /// dimensions.
    ///
    /// # Errors
    ///
    /// - [`TilingError::RankMismatch`] if a tile has more sizes than the current shape.
    /// - [`TilingError::ShapeMismatch`] if a dimension isn't divisible by its tile size.
    pub fn tile_shape(&self, shape: &[i64]) -> Result<Dims> {
        let mut tiled = Dims::from_slice(shape);

        for tile in self.tiles() {
            let start = trailing(tiled.len(), tile.arity())?;
            if tiled[start..].iter().zip(tile.iter()).any(|(d, t)| d % t != 0) {
                return Err(TilingError::ShapeMismatch {
                    shape: tiled.to_vec(),
                    tile: tile.to_vec(),
                });
            }

            for (d, t) in tiled[start..].iter_mut().zip(tile.iter()) {
                *d /= t;
            }
            tiled.extend_from_slice(tile);
        }

        log_transform(self, "tile_shape", shape, &tiled);
        Ok(tiled)
    }

    /// Computes the shape of an array before tiling from its tiled shape.
    ///
    /// Tiles are undone in reverse order, multiplying every outer dimension by its matching
    /// trailing tile dimension. The trailing dimensions must be exactly the tile sizes, so
    /// only shapes produced by [`Tiling::tile_shape`] are accepted.
    ///
    /// # Errors
    ///
    /// - [`TilingError::RankMismatch`] if the shape is too short for a tile.
    /// - [`TilingError::InvalidTiledShape`] if the trailing dimensions differ from the tile.
    /// - [`TilingError::Overflow`] if an untiled dimension doesn't fit in an `i64`.
    pub fn untile_shape(&self, shape: &[i64]) -> Result<Dims> {
        let untiled = self.untile_shape_inner(shape, true)?;
        log_transform(self, "untile_shape", shape, &untiled);
        Ok(untiled)
    }

    /// Like [`Tiling::untile_shape`], but multiplies the trailing dimensions back without
    /// comparing them to the tile.
    ///
    /// Only the rank and the arithmetic are checked, e.g. `(2, 2)` untiles `(2, 2, 4, 2)` to
    /// `(8, 4)` even though tiling `(8, 4)` gives `(4, 2, 2, 2)`.
    pub fn untile_shape_unchecked(&self, shape: &[i64]) -> Result<Dims> {
        let untiled = self.untile_shape_inner(shape, false)?;
        log_transform(self, "untile_shape_unchecked", shape, &untiled);
        Ok(untiled)
    }

    fn untile_shape_inner(&self, shape: &[i64], check_tiles: bool) -> Result<Dims> {
        let mut untiled = Dims::from_slice(shape);

        for tile in self.tiles().iter().rev() {
            let outer = trailing(untiled.len(), 2 * tile.arity())?;
            let inner = untiled.len() - tile.arity();

            if check_tiles && untiled[inner..] != tile[..] {
                return Err(TilingError::InvalidTiledShape {
                    shape: untiled.to_vec(),
                    tile: tile.to_vec(),
                });
            }

            for i in 0..tile.arity() {
                let dim = untiled[outer + i]
                    .checked_mul(untiled[inner + i])
                    .ok_or_else(|| overflow(&untiled, tile))?;
                untiled[outer + i] = dim;
            }
            untiled.truncate(inner);
        }

        Ok(untiled)
    }

    /// Computes the strides of an array after tiling.
    ///
    /// The outer dimension of a split keeps moving by whole tiles, so its stride is scaled by
    /// the tile size, while the appended inner dimension keeps the original stride. Only the
    /// rank of `strides` is checked, and that a scaled stride still fits in an `i64`.
    pub fn tile_strides(&self, strides: &[i64]) -> Result<Dims> {
        let mut tiled = Dims::from_slice(strides);

        for tile in self.tiles() {
            let start = trailing(tiled.len(), tile.arity())?;
            for (i, &t) in tile.iter().enumerate() {
                let stride = tiled[start + i];
                let scaled = stride
                    .checked_mul(t)
                    .ok_or_else(|| overflow(&tiled, tile))?;
                tiled.push(stride);
                tiled[start + i] = scaled;
            }
        }

        log_transform(self, "tile_strides", strides, &tiled);
        Ok(tiled)
    }

    /// Maps a logical index to its index in the tiled space.
    ///
    /// Every split coordinate `i` becomes `i / t` in place and `i % t` at the end.
    pub fn tile_indices(&self, indices: &[i64]) -> Result<Dims> {
        let mut tiled = Dims::from_slice(indices);

        for tile in self.tiles() {
            let start = trailing(tiled.len(), tile.arity())?;
            for (i, &t) in tile.iter().enumerate() {
                let index = tiled[start + i];
                tiled.push(index.rem_euclid(t));
                tiled[start + i] = index.div_euclid(t);
            }
        }

        log_transform(self, "tile_indices", indices, &tiled);
        Ok(tiled)
    }

    /// Maps an index of the tiled space back to the logical index, `outer * t + inner` for
    /// every split dimension.
    pub fn untile_indices(&self, indices: &[i64]) -> Result<Dims> {
        let mut untiled = Dims::from_slice(indices);

        for tile in self.tiles().iter().rev() {
            let outer = trailing(untiled.len(), 2 * tile.arity())?;
            let inner = untiled.len() - tile.arity();

            for (i, &t) in tile.iter().enumerate() {
                let index = untiled[outer + i]
                    .checked_mul(t)
                    .and_then(|index| index.checked_add(untiled[inner + i]))
                    .ok_or_else(|| overflow(&untiled, tile))?;
                untiled[outer + i] = index;
            }
            untiled.truncate(inner);
        }

        log_transform(self, "untile_indices", indices, &untiled);
        Ok(untiled)
    }
}
