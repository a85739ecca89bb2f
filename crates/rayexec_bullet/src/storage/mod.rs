//! In-memory storage formats.

mod primitive;
pub use primitive::*;

mod boolean;
pub use boolean::*;

mod varlen;
pub use varlen::*;

mod german;
pub use german::*;
pub(crate) use german::{encode_german_metadata, i32_offset};

mod list;
pub use list::*;

use std::fmt::Debug;

use rayexec_error::Result;

/// Storage that can be indexed into to get a single value at a time.
///
/// Indices are always physical indices.
pub trait AddressableStorage: Debug {
    type T: Debug;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, idx: usize) -> Option<Self::T>;

    /// Get a value, erroring if the stored data can't be read as `T`.
    ///
    /// Returns `Ok(None)` if the index is out of bounds.
    fn try_get(&self, idx: usize) -> Result<Option<Self::T>> {
        Ok(self.get(idx))
    }
}

impl<'a, T> AddressableStorage for &'a [T]
where
    T: Debug + Copy,
{
    type T = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, idx: usize) -> Option<Self::T> {
        <[T]>::get(self, idx).copied()
    }
}

/// Storage for an array containing only nulls, and no other type information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UntypedNullStorage(pub usize);

impl UntypedNullStorage {
    pub fn len(&self) -> usize {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}
