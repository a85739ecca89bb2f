use crate::bitmap::Bitmap;

use super::AddressableStorage;

/// Boolean values stored as a bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanStorage(pub(crate) Bitmap);

impl BooleanStorage {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_boolean_storage_ref(&self) -> BooleanStorageRef<'_> {
        BooleanStorageRef(&self.0)
    }
}

impl From<Bitmap> for BooleanStorage {
    fn from(value: Bitmap) -> Self {
        BooleanStorage(value)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BooleanStorageRef<'a>(&'a Bitmap);

impl<'a> AddressableStorage for BooleanStorageRef<'a> {
    type T = bool;

    fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    fn get(&self, idx: usize) -> Option<Self::T> {
        if idx >= self.0.len() {
            return None;
        }
        Some(self.0.value_unchecked(idx))
    }
}
