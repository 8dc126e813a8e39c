use alloc::vec::Vec;
use core::{fmt, ops::Deref};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{INLINE_DIMS, TilingError};

/// The sizes a single tiling level splits the trailing dimensions into.
///
/// A tile of arity `k` applies to the last `k` dimensions of a shape; entry `i` is the
/// inner extent of the `i`-th of those dimensions. Every entry is positive.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<i64>")]
pub struct Tile {
    dims: SmallVec<[i64; INLINE_DIMS]>,
}

impl Tile {
    /// Create a tile, rejecting non-positive sizes.
    pub fn new(dims: &[i64]) -> Result<Self, TilingError> {
        if dims.iter().any(|&d| d <= 0) {
            return Err(TilingError::MalformedTile {
                tile: dims.to_vec(),
            });
        }

        Ok(Self {
            dims: SmallVec::from_slice(dims),
        })
    }

    /// Number of trailing dimensions the tile splits.
    pub fn arity(&self) -> usize {
        self.dims.len()
    }

    /// Whether every size is `1`. The empty tile is trivially singleton.
    pub fn is_singleton(&self) -> bool {
        self.dims.iter().all(|&d| d == 1)
    }

    /// The tile without its leading `1` sizes.
    pub(crate) fn strip_leading_ones(&self) -> Self {
        let start = self
            .dims
            .iter()
            .position(|&d| d != 1)
            .unwrap_or(self.dims.len());

        Self {
            dims: SmallVec::from_slice(&self.dims[start..]),
        }
    }

    /// The tile with the entry at `index` removed.
    pub(crate) fn without(&self, index: usize) -> Self {
        let mut dims = self.dims.clone();
        dims.remove(index);
        Self { dims }
    }
}

impl Deref for Tile {
    type Target = [i64];

    fn deref(&self) -> &Self::Target {
        &self.dims
    }
}

impl TryFrom<Vec<i64>> for Tile {
    type Error = TilingError;

    fn try_from(value: Vec<i64>) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl TryFrom<&[i64]> for Tile {
    type Error = TilingError;

    fn try_from(value: &[i64]) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Tile> for Vec<i64> {
    fn from(tile: Tile) -> Self {
        tile.dims.into_vec()
    }
}

/// Formats as a tuple: `(8, 8)`, `(4,)` or `()`.
impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{d}")?;
        }
        if self.dims.len() == 1 {
            f.write_str(",")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::ToString, vec};

    #[test]
    fn test_rejects_non_positive_sizes() {
        assert_eq!(
            Tile::new(&[4, 0]),
            Err(TilingError::MalformedTile { tile: vec![4, 0] })
        );
        assert!(Tile::new(&[-2]).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Tile::new(&[8, 8]).unwrap().to_string(), "(8, 8)");
        assert_eq!(Tile::new(&[4]).unwrap().to_string(), "(4,)");
        assert_eq!(Tile::new(&[]).unwrap().to_string(), "()");
    }

    #[test]
    fn test_strip_leading_ones() {
        let tile = Tile::new(&[1, 1, 4, 1]).unwrap();
        assert_eq!(&*tile.strip_leading_ones(), &[4, 1]);
        assert!(Tile::new(&[1, 1]).unwrap().strip_leading_ones().is_empty());
    }

    #[test]
    fn test_singleton() {
        assert!(Tile::new(&[1, 1]).unwrap().is_singleton());
        assert!(Tile::new(&[]).unwrap().is_singleton());
        assert!(!Tile::new(&[1, 2]).unwrap().is_singleton());
    }
}
