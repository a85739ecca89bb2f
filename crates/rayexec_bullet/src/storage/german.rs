use rayexec_error::{RayexecError, Result};

use super::{AddressableStorage, PrimitiveStorage};

/// Values with a length less than or equal to this are stored completely
/// inline.
pub const INLINE_THRESHOLD: usize = 12;

/// Variable length storage where short values are stored inline, and long
/// values are stored in a separate data buffer.
///
/// Layout for each value's 12 bytes of inline/metadata:
///
/// - Inline (len <= 12): the value itself, zero padded.
/// - Not inline: 4 byte prefix, 4 byte buffer index (always zero), 4 byte
///   offset into the data buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct GermanVarlenStorage {
    pub(crate) lens: PrimitiveStorage<i32>,
    pub(crate) inline_or_metadata: PrimitiveStorage<[u8; 12]>,
    pub(crate) data: PrimitiveStorage<u8>,
}

impl GermanVarlenStorage {
    pub fn with_metadata_capacity(cap: usize) -> Self {
        GermanVarlenStorage {
            lens: Vec::with_capacity(cap).into(),
            inline_or_metadata: Vec::with_capacity(cap).into(),
            data: Vec::new().into(),
        }
    }

    pub(crate) fn from_parts(
        lens: Vec<i32>,
        inline_or_metadata: Vec<[u8; 12]>,
        data: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(lens.len(), inline_or_metadata.len());
        GermanVarlenStorage {
            lens: lens.into(),
            inline_or_metadata: inline_or_metadata.into(),
            data: data.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.lens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a value.
    ///
    /// Errors if the value's length or its offset in the data buffer doesn't
    /// fit in an i32.
    pub fn push(&mut self, value: &[u8]) -> Result<()> {
        let len = i32_offset(value.len())?;
        let metadata = encode_german_metadata(value, self.data.as_vec_mut())?;
        self.lens.as_vec_mut().push(len);
        self.inline_or_metadata.as_vec_mut().push(metadata);
        Ok(())
    }

    pub fn get(&self, idx: usize) -> Option<&[u8]> {
        self.as_german_storage_slice().get(idx)
    }

    pub fn as_german_storage_slice(&self) -> GermanVarlenStorageSlice<'_> {
        GermanVarlenStorageSlice {
            lens: self.lens.as_ref(),
            inline_or_metadata: self.inline_or_metadata.as_ref(),
            data: self.data.as_ref(),
        }
    }
}

/// Convert a length or offset into the i32 used by the german layout.
pub(crate) fn i32_offset(v: usize) -> Result<i32> {
    i32::try_from(v).map_err(|_| {
        RayexecError::new(format!(
            "Varlen offset {v} exceeds maximum of {}",
            i32::MAX
        ))
    })
}

/// Produce the inline/metadata bytes for a value, appending the value to
/// `data` if it doesn't fit inline.
///
/// `data` is left untouched on error.
pub(crate) fn encode_german_metadata(value: &[u8], data: &mut Vec<u8>) -> Result<[u8; 12]> {
    let mut metadata = [0; 12];

    if value.len() <= INLINE_THRESHOLD {
        // Store completely inline.
        metadata[0..value.len()].copy_from_slice(value);
    } else {
        // Prefix, 4 bytes
        metadata[0..4].copy_from_slice(&value[0..4]);

        // Buffer index, currently always zero.

        // Offset, 4 bytes
        let offset = i32_offset(data.len())?;
        // End of the value must be addressable too.
        i32_offset(data.len() + value.len())?;
        data.extend_from_slice(value);
        metadata[8..12].copy_from_slice(&offset.to_le_bytes());
    }

    Ok(metadata)
}

#[derive(Debug, Clone, Copy)]
pub struct GermanVarlenStorageSlice<'a> {
    lens: &'a [i32],
    inline_or_metadata: &'a [[u8; 12]],
    data: &'a [u8],
}

impl<'a> AddressableStorage for GermanVarlenStorageSlice<'a> {
    type T = &'a [u8];

    fn len(&self) -> usize {
        self.lens.len()
    }

    #[inline]
    fn get(&self, idx: usize) -> Option<Self::T> {
        let len = *self.lens.get(idx)? as usize;
        let inline: &'a [u8; 12] = self.inline_or_metadata.get(idx)?;

        if len <= INLINE_THRESHOLD {
            Some(&inline[..len])
        } else {
            let mut offset = [0; 4];
            offset.copy_from_slice(&inline[8..12]);
            let offset = i32::from_le_bytes(offset) as usize;

            self.data.get(offset..(offset + len))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_and_not_inline() {
        let mut storage = GermanVarlenStorage::with_metadata_capacity(4);
        storage.push(b"red").unwrap();
        storage.push(b"red shiny car ahead").unwrap();
        storage.push(b"").unwrap();
        storage.push(b"twelve bytes").unwrap();

        assert_eq!(4, storage.len());

        assert_eq!(Some(b"red".as_slice()), storage.get(0));
        assert_eq!(Some(b"red shiny car ahead".as_slice()), storage.get(1));
        assert_eq!(Some(b"".as_slice()), storage.get(2));
        assert_eq!(Some(b"twelve bytes".as_slice()), storage.get(3));

        // Only the long value goes to the data buffer.
        assert_eq!(b"red shiny car ahead".len(), storage.data.len());
    }

    #[test]
    fn multiple_out_of_line() {
        let mut storage = GermanVarlenStorage::with_metadata_capacity(2);
        storage.push(b"blue clear sky above").unwrap();
        storage.push(b"orange beautiful sunset").unwrap();

        assert_eq!(Some(b"blue clear sky above".as_slice()), storage.get(0));
        assert_eq!(Some(b"orange beautiful sunset".as_slice()), storage.get(1));
        assert_eq!(None, storage.get(2));
    }

    #[test]
    fn offset_overflow_errors() {
        assert_eq!(i32::MAX, i32_offset(i32::MAX as usize).unwrap());
        i32_offset(i32::MAX as usize + 1).unwrap_err();
    }

    #[test]
    fn encode_out_of_line() {
        let mut data = b"existing".to_vec();
        let meta = encode_german_metadata(b"a value past the inline limit", &mut data).unwrap();

        assert_eq!(8 + b"a value past the inline limit".len(), data.len());
        assert_eq!(&b"a va"[..], &meta[0..4]);
        assert_eq!(8, i32::from_le_bytes([meta[8], meta[9], meta[10], meta[11]]));
    }

    #[test]
    fn clone_compares_equal() {
        let mut storage = GermanVarlenStorage::with_metadata_capacity(2);
        storage.push(b"short").unwrap();
        storage.push(b"not short enough to inline").unwrap();

        let mut other = storage.clone();
        assert_eq!(storage, other);

        other.push(b"extra").unwrap();
        assert_ne!(storage, other);
    }
}
