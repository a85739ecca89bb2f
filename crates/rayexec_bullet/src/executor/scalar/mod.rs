//! Scalar executors, producing one output row per input row.

mod list;
pub use list::*;

use rayexec_error::{RayexecError, Result};

use crate::array::Array;
use crate::bitmap::Bitmap;

use super::builder::ArrayDataBuffer;

/// Validates that the output buffer has the same length as the logical length
/// of the input array, returning the length.
pub fn validate_logical_len<B>(buffer: &B, array: &Array) -> Result<usize>
where
    B: ArrayDataBuffer,
{
    let len = array.logical_len();
    if buffer.len() != len {
        return Err(RayexecError::new(format!(
            "Invalid logical length, buffer: {}, array: {len}",
            buffer.len()
        )));
    }
    Ok(len)
}

/// Check the validity of a value at a physical index.
///
/// A missing validity bitmap means every value is valid.
pub(crate) fn check_physical_validity(validity: Option<&Bitmap>, idx: usize) -> Result<bool> {
    match validity {
        Some(validity) => {
            if idx >= validity.len() {
                return Err(RayexecError::new(format!(
                    "Physical index {idx} out of bounds for validity of length {}",
                    validity.len()
                )));
            }
            Ok(validity.value_unchecked(idx))
        }
        None => Ok(true),
    }
}
