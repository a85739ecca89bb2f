use std::fmt::Debug;

use rayexec_error::{RayexecError, Result};

use super::{AddressableStorage, PrimitiveStorage};

pub trait OffsetIndex: Debug + Clone + Copy + PartialEq + Eq {
    const ZERO: Self;

    fn get(start: Self, end: Self, slice: &[u8]) -> Option<&[u8]>;

    /// Convert a buffer position into an offset, returning None if it
    /// doesn't fit.
    fn from_usize(v: usize) -> Option<Self>;
}

impl OffsetIndex for i32 {
    const ZERO: Self = 0;

    fn get(start: Self, end: Self, slice: &[u8]) -> Option<&[u8]> {
        slice.get((start as usize)..(end as usize))
    }

    fn from_usize(v: usize) -> Option<Self> {
        i32::try_from(v).ok()
    }
}

impl OffsetIndex for i64 {
    const ZERO: Self = 0;

    fn get(start: Self, end: Self, slice: &[u8]) -> Option<&[u8]> {
        slice.get((start as usize)..(end as usize))
    }

    fn from_usize(v: usize) -> Option<Self> {
        i64::try_from(v).ok()
    }
}

/// Backing storage for multiple variable length values stored in a contiguous
/// vector.
#[derive(Debug, Clone, PartialEq)]
pub struct ContiguousVarlenStorage<O> {
    /// Offsets into the data buffer. The first value should be 0.
    pub(crate) offsets: PrimitiveStorage<O>,
    /// The data buffers being indexed into.
    pub(crate) data: PrimitiveStorage<u8>,
}

impl<O: OffsetIndex> ContiguousVarlenStorage<O> {
    pub fn with_offsets_and_data_capacity(offsets_cap: usize, data_cap: usize) -> Self {
        let mut offsets = Vec::with_capacity(offsets_cap + 1);
        offsets.push(O::ZERO);
        let data: Vec<u8> = Vec::with_capacity(data_cap);

        ContiguousVarlenStorage {
            offsets: offsets.into(),
            data: data.into(),
        }
    }

    /// Append a value.
    ///
    /// Errors if the end of the value can't be represented by the offset
    /// type.
    pub fn push(&mut self, value: &[u8]) -> Result<()> {
        let data = self.data.as_vec_mut();
        let end = data.len() + value.len();
        let offset = O::from_usize(end).ok_or_else(|| {
            RayexecError::new(format!("Varlen offset {end} exceeds offset type"))
        })?;

        data.extend_from_slice(value);
        self.offsets.as_vec_mut().push(offset);
        Ok(())
    }

    pub fn get(&self, idx: usize) -> Option<&[u8]> {
        self.as_contiguous_storage_slice().get(idx)
    }

    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_contiguous_storage_slice(&self) -> ContiguousVarlenStorageSlice<'_, O> {
        ContiguousVarlenStorageSlice {
            offsets: self.offsets.as_ref(),
            data: self.data.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ContiguousVarlenStorageSlice<'a, O> {
    offsets: &'a [O],
    data: &'a [u8],
}

impl<'a, O: OffsetIndex> AddressableStorage for ContiguousVarlenStorageSlice<'a, O> {
    type T = &'a [u8];

    fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    fn get(&self, idx: usize) -> Option<Self::T> {
        let start = self.offsets.get(idx)?;
        let end = self.offsets.get(idx + 1)?;

        O::get(*start, *end, self.data)
    }
}
