use alloc::vec::Vec;

use crate::{Tile, Tiling, config::logger::TilingLogLevel};

impl Tiling {
    /// Returns a canonical version of the tiling.
    ///
    /// Dimensions of size `1` are considered inessential. A tiling is canonical when:
    ///
    /// 1. No tile is made only of `1`s. Such a tile only adds unit dimensions, e.g.
    ///    `(8, 8)(1, 1)` becomes `(8, 8)`.
    /// 2. Apart from the first tile, which defines the base tile shape, no tile starts with
    ///    a `1`. `(8, 8)(1, 4)` yields a shape `(.., 8, 2, 1, 4)` and becomes `(8, 8)(4,)`,
    ///    yielding `(.., 8, 2, 4)`.
    /// 3. Every tile partitions at least one dimension of the previous tile in more than one
    ///    piece. `(8, 8)(8, 8)` yields `(.., 1, 1, 8, 8)` and becomes `(8, 8)`.
    ///
    /// Canonicalization is idempotent.
    pub fn canonicalize(&self) -> Tiling {
        let mut tiles: Vec<Tile> = Vec::with_capacity(self.tiles().len());

        for tile in self.tiles() {
            if tile.is_singleton() {
                continue;
            }

            let Some(previous) = tiles.last() else {
                tiles.push(tile.clone());
                continue;
            };

            let tile = tile.strip_leading_ones();
            // Splitting the previous tile into itself only adds unit dimensions.
            let redundant = tile.arity() <= previous.arity()
                && previous[previous.arity() - tile.arity()..] == tile[..];
            if redundant {
                continue;
            }
            tiles.push(tile);
        }

        let canonical = Tiling::from_tiles(tiles);
        if canonical != *self && TilingLogLevel::logs_derivations() {
            log::debug!("{self}.canonicalize() -> {canonical}");
        }

        canonical
    }
}
