use rayexec_error::{RayexecError, Result};

use super::PrimitiveStorage;
use crate::array::Array;

/// Location of a single list value within the child array.
///
/// Both `offset` and `len` are in terms of logical rows of the child array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListItemMetadata {
    pub offset: i32,
    pub len: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListStorage {
    pub(crate) metadata: PrimitiveStorage<ListItemMetadata>,
    pub(crate) array: Array,
}

impl ListStorage {
    /// Create new list storage, checking that every list falls within the
    /// bounds of the child array.
    pub fn try_new(
        metadata: impl Into<PrimitiveStorage<ListItemMetadata>>,
        array: Array,
    ) -> Result<Self> {
        let metadata = metadata.into();
        let child_len = array.logical_len();

        for (idx, m) in metadata.as_ref().iter().enumerate() {
            if m.offset < 0 || m.len < 0 || (m.offset as usize + m.len as usize) > child_len {
                return Err(RayexecError::new(format!(
                    "List metadata at index {idx} out of bounds, offset: {}, len: {}, child len: {child_len}",
                    m.offset,
                    m.len,
                )));
            }
        }

        Ok(ListStorage { metadata, array })
    }

    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn metadata(&self) -> &[ListItemMetadata] {
        self.metadata.as_ref()
    }

    /// The child array containing the values for all lists.
    pub fn inner_array(&self) -> &Array {
        &self.array
    }
}
