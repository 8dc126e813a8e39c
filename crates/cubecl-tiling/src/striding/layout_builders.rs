//! # Stride Layout Builders

use crate::{Dims, dims};

/// Construct row-major contiguous strides for a shape.
///
/// This will return new strides such that:
/// - ``strides.len() == shape.len()``
/// - ``strides[rank - 1] == 1``
/// - ``for i in 0..rank - 1 { strides[i] == strides[i + 1] * shape[i + 1] }``
///
/// If ``rank == 0``, this will return ``dims![]``.
pub fn row_major_contiguous_strides<S>(shape: S) -> Dims
where
    S: AsRef<[i64]>,
{
    let shape = shape.as_ref();
    let rank = shape.len();
    let mut strides = dims![1; rank];
    if rank > 1 {
        for i in (0..rank - 1).rev() {
            strides[i] = strides[i + 1] * shape[i + 1];
        }
    }
    strides
}

/// Construct column-major contiguous strides for a shape.
///
/// The first dimension has stride `1` and each following stride is the product of
/// the preceding extents.
pub fn col_major_contiguous_strides<S>(shape: S) -> Dims
where
    S: AsRef<[i64]>,
{
    let shape = shape.as_ref();
    let mut strides = dims![1; shape.len()];
    for i in 1..shape.len() {
        strides[i] = strides[i - 1] * shape[i - 1];
    }
    strides
}
