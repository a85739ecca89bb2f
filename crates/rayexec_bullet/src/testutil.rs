//! Helpers for asserting on arrays in tests.
//!
//! Not gated behind `cfg(test)` so that other crates can use them in their own
//! tests.

use crate::array::Array;

/// Asserts that two arrays have the same data type and are logically equal.
///
/// Selections and validities are taken into account by comparing the logical
/// scalar values row by row. Every differing row is reported on failure.
pub fn assert_arrays_eq(expected: &Array, got: &Array) {
    assert_eq!(
        expected.datatype(),
        got.datatype(),
        "Array data types differ"
    );
    assert_eq!(
        expected.logical_len(),
        got.logical_len(),
        "Array logical lengths differ"
    );

    let mut diffs = Vec::new();
    for idx in 0..expected.logical_len() {
        let a = expected.logical_value(idx).unwrap();
        let b = got.logical_value(idx).unwrap();

        if a != b {
            diffs.push(format!("row {idx}: expected {a}, got {b}"));
        }
    }

    if !diffs.is_empty() {
        panic!("Arrays differ:\n{}", diffs.join("\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionVector;

    #[test]
    fn equal_with_selection() {
        let expected = Array::from_iter([7_i64, 7, 7]);
        let mut got = Array::from_iter([7_i64]);
        got.select_mut(&SelectionVector::repeated(3, 0).into());

        assert_arrays_eq(&expected, &got);
    }

    #[test]
    #[should_panic]
    fn null_differs_from_value() {
        let expected = Array::from_iter([Some(1_i64), Some(2)]);
        let got = Array::from_iter([Some(1_i64), None]);
        assert_arrays_eq(&expected, &got);
    }

    #[test]
    #[should_panic]
    fn data_types_differ() {
        let expected = Array::from_iter([1_i32]);
        let got = Array::from_iter([1_i64]);
        assert_arrays_eq(&expected, &got);
    }

    #[test]
    #[should_panic]
    fn lengths_differ() {
        let expected = Array::from_iter([true, false]);
        let got = Array::from_iter([true]);
        assert_arrays_eq(&expected, &got);
    }
}
