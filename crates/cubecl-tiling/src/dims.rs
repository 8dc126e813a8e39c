use smallvec::SmallVec;

use crate::INLINE_DIMS;

/// Shapes, strides and index tuples, logical or tiled.
///
/// Ranks up to [`INLINE_DIMS`] are stored inline.
pub type Dims = SmallVec<[i64; INLINE_DIMS]>;

/// Create a [`Dims`] value, with the same forms as `vec!`.
#[macro_export]
macro_rules! dims {
    () => (
        $crate::Dims::new()
    );
    ($elem:expr; $n:expr) => ({
        let dims: $crate::Dims = $crate::smallvec!($elem; $n);
        dims
    });
    ($($x:expr),+$(,)?) => ({
        let dims: $crate::Dims = $crate::smallvec!($($x),*);
        dims
    });
}

/// Flat memory offset of `indices` under `strides`.
///
/// Extra entries on either side are ignored.
pub fn flat_offset(indices: &[i64], strides: &[i64]) -> i64 {
    indices.iter().zip(strides).map(|(i, s)| i * s).sum()
}
