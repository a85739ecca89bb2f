//! Element ordering used when finding the extremum of a list.
//!
//! This is not a general purpose ordering for floats. NaN compares greater
//! than every other value (including infinity), all NaNs compare equal to each
//! other, and negative zero compares equal to positive zero.

use std::cmp::Ordering;

/// Total ordering of list elements for `array_max`.
pub trait ArrayMaxOrd {
    fn max_cmp(&self, other: &Self) -> Ordering;
}

impl<T> ArrayMaxOrd for &T
where
    T: ArrayMaxOrd + ?Sized,
{
    #[inline]
    fn max_cmp(&self, other: &Self) -> Ordering {
        (**self).max_cmp(*other)
    }
}

macro_rules! impl_array_max_ord {
    ($($t:ty),*) => {
        $(
            impl ArrayMaxOrd for $t {
                #[inline]
                fn max_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

// Temporal and decimal types are stored as integers, and get their ordering
// from these.
impl_array_max_ord!(bool, i8, i16, i32, i64, i128, u8, u16, u32, u64);

macro_rules! impl_array_max_ord_float {
    ($($t:ty),*) => {
        $(
            impl ArrayMaxOrd for $t {
                #[inline]
                fn max_cmp(&self, other: &Self) -> Ordering {
                    match (self.is_nan(), other.is_nan()) {
                        (true, true) => Ordering::Equal,
                        (true, false) => Ordering::Greater,
                        (false, true) => Ordering::Less,
                        // Only NaNs are unordered, and IEEE already treats -0
                        // and +0 as equal.
                        (false, false) => self.partial_cmp(other).unwrap_or(Ordering::Equal),
                    }
                }
            }
        )*
    };
}

impl_array_max_ord_float!(f32, f64);

impl ArrayMaxOrd for str {
    #[inline]
    fn max_cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl ArrayMaxOrd for [u8] {
    #[inline]
    fn max_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}
