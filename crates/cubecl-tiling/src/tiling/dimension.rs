use alloc::vec::Vec;

use crate::{Dims, Result, Tiling, TilingError, config::logger::TilingLogLevel, dims};

impl Tiling {
    /// The tile sizes applied to logical dimension `dim`, outermost tile first.
    ///
    /// `dim` is counted within the [rank](Tiling::rank) of the tiling. Only tiles reaching
    /// the dimension contribute.
    pub fn tile_dimension(&self, dim: usize) -> Result<Dims> {
        self.check_dimension(dim)?;

        Ok(self
            .tiles()
            .iter()
            .zip(self.dimension_positions(dim))
            .filter_map(|(tile, position)| position.map(|p| tile[p]))
            .collect())
    }

    /// Marks the dimensions of the tiled space that originate from logical dimension `dim`.
    ///
    /// The result has one entry per tiled dimension of the `rank` trailing logical
    /// dimensions, that is `rank + total_arity` entries.
    pub fn tiled_dimension_mask(&self, dim: usize) -> Result<Vec<bool>> {
        let rank = self.rank();
        if dim >= rank {
            return Err(TilingError::InvalidAxis { axis: dim, rank });
        }

        let mut strides = dims![1; rank];
        strides[dim] = 0;

        Ok(self
            .tile_strides(&strides)?
            .iter()
            .map(|&s| s == 0)
            .collect())
    }

    /// Returns a tiling with logical dimension `dim` removed.
    ///
    /// The size referring to `dim` is dropped from every tile reaching it. A tile left empty
    /// ends the tiling, since the tiles after it could only refer to that same dimension.
    pub fn remove_dimension(&self, dim: usize) -> Result<Tiling> {
        self.check_dimension(dim)?;

        let mut tiles = Vec::with_capacity(self.tiles().len());
        for (tile, position) in self.tiles().iter().zip(self.dimension_positions(dim)) {
            let tile = match position {
                Some(p) => tile.without(p),
                None => tile.clone(),
            };
            if tile.arity() == 0 {
                break;
            }
            tiles.push(tile);
        }

        let tiling = Tiling::from_tiles(tiles);
        if TilingLogLevel::logs_derivations() {
            log::debug!("{self}.remove_dimension({dim}) -> {tiling}");
        }

        Ok(tiling)
    }

    fn check_dimension(&self, dim: usize) -> Result<()> {
        let rank = self.rank();
        if dim >= rank {
            return Err(TilingError::InvalidAxis { axis: dim, rank });
        }

        self.check_nested()
    }

    // Position of `dim` inside every tile, `None` for tiles not reaching it.
    // Assumes a nested tiling.
    fn dimension_positions(&self, dim: usize) -> impl Iterator<Item = Option<usize>> + '_ {
        let mut position = dim as isize;
        let mut previous = self.rank();

        self.tiles().iter().map(move |tile| {
            position -= (previous - tile.arity()) as isize;
            previous = tile.arity();
            usize::try_from(position).ok()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_tile_dimension() {
        let tiling = Tiling::new([vec![64, 32], vec![16, 8], vec![4]]).unwrap();

        assert_eq!(tiling.tile_dimension(0).unwrap(), dims![64, 16]);
        assert_eq!(tiling.tile_dimension(1).unwrap(), dims![32, 8, 4]);
        assert_eq!(
            tiling.tile_dimension(2),
            Err(TilingError::InvalidAxis { axis: 2, rank: 2 })
        );
    }

    #[test]
    fn test_tile_dimension_non_nested() {
        let tiling = Tiling::new([vec![8], vec![2, 2]]).unwrap();
        assert!(matches!(
            tiling.tile_dimension(0),
            Err(TilingError::NonNestedTiles { index: 1, .. })
        ));
    }

    #[test]
    fn test_tiled_dimension_mask() {
        let tiling = Tiling::new([vec![8, 8], vec![4]]).unwrap();

        assert_eq!(
            tiling.tiled_dimension_mask(0).unwrap(),
            vec![true, false, true, false, false]
        );
        assert_eq!(
            tiling.tiled_dimension_mask(1).unwrap(),
            vec![false, true, false, true, true]
        );
    }

    #[test]
    fn test_remove_dimension() {
        let tiling = Tiling::new([vec![8, 8], vec![4]]).unwrap();

        assert_eq!(
            tiling.remove_dimension(0).unwrap(),
            Tiling::new([vec![8], vec![4]]).unwrap()
        );
        assert_eq!(
            tiling.remove_dimension(1).unwrap(),
            Tiling::new([[8]]).unwrap()
        );
    }

    #[test]
    fn test_remove_only_dimension() {
        let tiling = Tiling::new([[128], [32]]).unwrap();
        assert_eq!(tiling.remove_dimension(0).unwrap(), Tiling::default());
    }

    #[test]
    fn test_remove_dimension_out_of_rank() {
        let tiling = Tiling::new([[8, 8]]).unwrap();
        assert_eq!(
            tiling.remove_dimension(5),
            Err(TilingError::InvalidAxis { axis: 5, rank: 2 })
        );
        assert!(Tiling::default().remove_dimension(0).is_err());
    }
}
