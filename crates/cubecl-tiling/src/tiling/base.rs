use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{Result, Tile, TilingError};

/// An ordered sequence of [tiles](Tile), applied from first to last.
///
/// Each tile applies to the trailing dimensions of the shape produced by the tile before
/// it: the first tile defines the coarsest blocking and every following tile subdivides
/// the inner dimensions appended by its predecessor.
///
/// A tiling is an immutable value. Equality and hashing are structural over the tiles, use
/// [`Tiling::canonicalize`] to compare tilings describing the same transform.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tiling {
    tiles: Vec<Tile>,
}

impl Tiling {
    /// Create a tiling from a literal list of tiles.
    ///
    /// Fails with [`TilingError::MalformedTile`] if any tile size isn't positive. Whether the
    /// tiles apply to a given shape is only checked by the transforms.
    pub fn new<I, T>(tiles: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[i64]>,
    {
        let tiles = tiles
            .into_iter()
            .map(|tile| Tile::new(tile.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { tiles })
    }

    /// Create a tiling from already validated tiles.
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// The tiles, outermost first.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Whether the tiling has no tile at all.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The number of logical dimensions the tiling applies to, i.e. the arity of its first tile.
    pub fn rank(&self) -> usize {
        self.tiles.first().map(Tile::arity).unwrap_or(0)
    }

    /// The number of dimensions the tiling adds to a shape.
    pub fn total_arity(&self) -> usize {
        self.tiles.iter().map(Tile::arity).sum()
    }

    /// Whether tile arities never increase, so every tile only refers to dimensions of the tile
    /// before it.
    pub fn is_nested(&self) -> bool {
        self.check_nested().is_ok()
    }

    pub(crate) fn check_nested(&self) -> Result<()> {
        for (index, pair) in self.tiles.windows(2).enumerate() {
            let (previous, tile) = (&pair[0], &pair[1]);
            if tile.arity() > previous.arity() {
                return Err(TilingError::NonNestedTiles {
                    index: index + 1,
                    arity: tile.arity(),
                    previous: previous.arity(),
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Tiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Tiling(")?;
        for tile in &self.tiles {
            write!(f, "{tile}")?;
        }
        f.write_str(")")
    }
}
