//! Algebraic properties of tilings, checked on generated valid inputs.

use cubecl_tiling::{
    Dims, Tiling, flat_offset,
    striding::{col_major_contiguous_strides, row_major_contiguous_strides},
};
use proptest::prelude::*;

/// A nested tiling together with a shape it divides evenly and an in-bounds index.
#[derive(Debug, Clone)]
struct Case {
    tiling: Tiling,
    shape: Vec<i64>,
    index: Vec<i64>,
}

/// Builds a case from raw generated numbers.
///
/// Tile sizes are powers of two; every tile divides the trailing sizes of the tile before it,
/// and the trailing shape dimensions are multiples of the first tile.
fn build_case(
    leading: Vec<i64>,
    base_log2: Vec<u32>,
    multipliers: Vec<i64>,
    nested: Vec<(usize, Vec<u32>)>,
    index_seed: Vec<i64>,
) -> Case {
    let mut tiles: Vec<Vec<i64>> = vec![base_log2.iter().map(|&e| 1 << e).collect()];
    let mut previous_log2 = base_log2.clone();

    for (arity, reductions) in nested {
        let arity = arity.min(previous_log2.len());
        if arity == 0 {
            break;
        }
        let tail = &previous_log2[previous_log2.len() - arity..];
        let log2: Vec<u32> = tail
            .iter()
            .zip(reductions.iter().cycle())
            .map(|(&e, &r)| e - r.min(e))
            .collect();
        tiles.push(log2.iter().map(|&e| 1 << e).collect());
        previous_log2 = log2;
    }

    let mut shape = leading;
    shape.extend(
        tiles[0]
            .iter()
            .zip(multipliers.iter().cycle())
            .map(|(t, m)| t * m),
    );
    let index = shape
        .iter()
        .zip(index_seed.iter().cycle())
        .map(|(d, i)| i % d)
        .collect();

    Case {
        tiling: Tiling::new(&tiles).unwrap(),
        shape,
        index,
    }
}

fn valid_case() -> impl Strategy<Value = Case> {
    (
        prop::collection::vec(1i64..5, 0..3),
        prop::collection::vec(0u32..5, 1..4),
        prop::collection::vec(1i64..4, 1..4),
        prop::collection::vec((1usize..4, prop::collection::vec(0u32..3, 1..4)), 0..3),
        prop::collection::vec(0i64..1024, 1..8),
    )
        .prop_map(|(leading, base, multipliers, nested, index)| {
            build_case(leading, base, multipliers, nested, index)
        })
}

fn tiling_literal() -> impl Strategy<Value = Tiling> {
    prop::collection::vec(prop::collection::vec(1i64..4, 0..4), 0..5)
        .prop_map(|tiles| Tiling::new(&tiles).unwrap())
}

proptest! {
    #[test]
    fn shape_round_trip(case in valid_case()) {
        let tiled = case.tiling.tile_shape(&case.shape).unwrap();
        let untiled = case.tiling.untile_shape(&tiled).unwrap();
        prop_assert_eq!(untiled.as_slice(), case.shape.as_slice());
    }

    #[test]
    fn rank_law(case in valid_case()) {
        let tiled = case.tiling.tile_shape(&case.shape).unwrap();
        prop_assert_eq!(tiled.len(), case.shape.len() + case.tiling.total_arity());
    }

    #[test]
    fn index_round_trip(case in valid_case()) {
        let tiled = case.tiling.tile_indices(&case.index).unwrap();
        let untiled = case.tiling.untile_indices(&tiled).unwrap();
        prop_assert_eq!(untiled.as_slice(), case.index.as_slice());
    }

    #[test]
    fn tiled_index_within_tiled_shape(case in valid_case()) {
        let shape = case.tiling.tile_shape(&case.shape).unwrap();
        let index = case.tiling.tile_indices(&case.index).unwrap();
        prop_assert!(index.iter().zip(shape.iter()).all(|(i, d)| 0 <= *i && i < d));
    }

    #[test]
    fn offsets_are_preserved(case in valid_case(), col_major in any::<bool>()) {
        let strides = if col_major {
            col_major_contiguous_strides(&case.shape)
        } else {
            row_major_contiguous_strides(&case.shape)
        };
        let tiled_strides = case.tiling.tile_strides(&strides).unwrap();
        let tiled_index = case.tiling.tile_indices(&case.index).unwrap();

        prop_assert_eq!(
            flat_offset(&tiled_index, &tiled_strides),
            flat_offset(&case.index, &strides)
        );
    }

    #[test]
    fn remove_dimension_keeps_other_decompositions(case in valid_case()) {
        let rank = case.tiling.rank();
        for removed in 0..rank {
            let reduced = case.tiling.remove_dimension(removed).unwrap();
            for dim in (0..rank).filter(|&d| d != removed) {
                let renumbered = if dim > removed { dim - 1 } else { dim };
                prop_assert_eq!(
                    reduced.tile_dimension(renumbered).unwrap(),
                    case.tiling.tile_dimension(dim).unwrap()
                );
            }
        }
    }

    #[test]
    fn mask_matches_dimension_decomposition(case in valid_case()) {
        for dim in 0..case.tiling.rank() {
            let mask = case.tiling.tiled_dimension_mask(dim).unwrap();
            let count = mask.iter().filter(|&&m| m).count();
            prop_assert_eq!(count, 1 + case.tiling.tile_dimension(dim).unwrap().len());
        }
    }

    #[test]
    fn canonicalize_is_idempotent(tiling in tiling_literal()) {
        let once = tiling.canonicalize();
        prop_assert_eq!(once.canonicalize(), once);
    }

    #[test]
    fn canonicalize_ignores_unit_tiles(tiling in tiling_literal(), arity in 0usize..4) {
        let mut tiles: Vec<Dims> = tiling.tiles().iter().map(|t| Dims::from_slice(t)).collect();
        tiles.push(Dims::from_elem(1, arity));
        let padded = Tiling::new(&tiles).unwrap();

        prop_assert_eq!(padded.canonicalize(), tiling.canonicalize());
    }
}
