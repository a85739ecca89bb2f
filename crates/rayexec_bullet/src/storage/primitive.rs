/// Backing storage for primitive values.
///
/// Currently this contains only a single variant, but should be extension point
/// for working with externally managed data (Arrow arrays from arrow-rs, shared
/// memory regions, CUDA, etc).
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveStorage<T> {
    /// A basic vector of data.
    Vec(Vec<T>),
}

impl<T> PrimitiveStorage<T> {
    pub fn len(&self) -> usize {
        self.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a mutable reference to the underlying vector for appending values.
    pub fn as_vec_mut(&mut self) -> &mut Vec<T> {
        match self {
            Self::Vec(v) => v,
        }
    }

    pub fn as_slice(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T> From<Vec<T>> for PrimitiveStorage<T> {
    fn from(value: Vec<T>) -> Self {
        PrimitiveStorage::Vec(value)
    }
}

impl<T> AsRef<[T]> for PrimitiveStorage<T> {
    fn as_ref(&self) -> &[T] {
        match self {
            Self::Vec(v) => v.as_slice(),
        }
    }
}
