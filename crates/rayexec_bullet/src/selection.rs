/// Maps a logical row index to the physical location in the array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionVector {
    indices: Vec<usize>,
}

impl SelectionVector {
    pub fn with_capacity(cap: usize) -> Self {
        SelectionVector {
            indices: Vec::with_capacity(cap),
        }
    }

    /// Creates a selection vector that that has all indices in the range [0,n)
    /// point to the same physical index.
    pub fn repeated(len: usize, idx: usize) -> Self {
        SelectionVector {
            indices: vec![idx; len],
        }
    }

    /// Try to get the location of an index, returning None if the index is out
    /// of bounds.
    pub fn get(&self, idx: usize) -> Option<usize> {
        self.indices.get(idx).copied()
    }

    /// Get the location of a logical index.
    ///
    /// Panics if `idx` is out of bounds.
    #[inline]
    pub fn get_unchecked(&self, idx: usize) -> usize {
        self.indices[idx]
    }

    pub fn push_location(&mut self, location: usize) {
        self.indices.push(location)
    }

    pub fn iter_locations(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    pub fn num_rows(&self) -> usize {
        self.indices.len()
    }
}

impl FromIterator<usize> for SelectionVector {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        SelectionVector {
            indices: iter.into_iter().collect(),
        }
    }
}

/// Gets the physical row index for a logical index, returning None if the
/// index is out of bounds of the selection.
#[inline]
pub fn get(selection: Option<&SelectionVector>, idx: usize) -> Option<usize> {
    match selection {
        Some(s) => s.get(idx),
        None => Some(idx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_without_selection() {
        assert_eq!(Some(7), get(None, 7));
    }

    #[test]
    fn get_out_of_bounds() {
        let sel = SelectionVector::repeated(2, 0);
        assert_eq!(None, get(Some(&sel), 2));
    }
}
