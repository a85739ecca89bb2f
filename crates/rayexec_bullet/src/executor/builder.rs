use std::marker::PhantomData;

use rayexec_error::Result;

use crate::array::ArrayData;
use crate::bitmap::Bitmap;
use crate::datatype::DataType;
use crate::storage::{
    encode_german_metadata, i32_offset, BooleanStorage, GermanVarlenStorage, PrimitiveStorage,
};

/// Builder for producing the output of an executor.
#[derive(Debug)]
pub struct ArrayBuilder<B> {
    /// Data type of the output array.
    pub datatype: DataType,
    /// Buffer holding the output values.
    pub buffer: B,
}

/// A fixed length buffer that values can be written to by index.
pub trait ArrayDataBuffer {
    type Type: ?Sized;

    /// Number of values this buffer holds.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Put a value at the given index.
    ///
    /// Panics if `idx` is out of bounds. Errors if the value can't be
    /// represented by the buffer.
    fn put(&mut self, idx: usize, val: &Self::Type) -> Result<()>;

    fn into_data(self) -> ArrayData;
}

/// Wrapper around a buffer that tracks the index currently being written to.
#[derive(Debug)]
pub struct OutputBuffer<B> {
    pub(crate) idx: usize,
    pub(crate) buffer: B,
}

impl<B> OutputBuffer<B>
where
    B: ArrayDataBuffer,
{
    pub fn put(&mut self, val: &B::Type) -> Result<()> {
        self.buffer.put(self.idx, val)
    }
}

#[derive(Debug)]
pub struct PrimitiveBuffer<T> {
    pub(crate) values: Vec<T>,
}

impl<T> PrimitiveBuffer<T>
where
    T: Default + Copy,
{
    pub fn with_len(len: usize) -> Self {
        PrimitiveBuffer {
            values: vec![T::default(); len],
        }
    }
}

impl<T> ArrayDataBuffer for PrimitiveBuffer<T>
where
    T: Copy,
    PrimitiveStorage<T>: Into<ArrayData>,
{
    type Type = T;

    fn len(&self) -> usize {
        self.values.len()
    }

    fn put(&mut self, idx: usize, val: &Self::Type) -> Result<()> {
        self.values[idx] = *val;
        Ok(())
    }

    fn into_data(self) -> ArrayData {
        PrimitiveStorage::from(self.values).into()
    }
}

#[derive(Debug)]
pub struct BooleanBuffer {
    pub(crate) values: Bitmap,
}

impl BooleanBuffer {
    pub fn with_len(len: usize) -> Self {
        BooleanBuffer {
            values: Bitmap::new_with_all_false(len),
        }
    }
}

impl ArrayDataBuffer for BooleanBuffer {
    type Type = bool;

    fn len(&self) -> usize {
        self.values.len()
    }

    fn put(&mut self, idx: usize, val: &Self::Type) -> Result<()> {
        self.values.set_unchecked(idx, *val);
        Ok(())
    }

    fn into_data(self) -> ArrayData {
        BooleanStorage::from(self.values).into()
    }
}

/// Buffer for variable length values (`str` or `[u8]`), producing german
/// storage.
///
/// Values are always copied into the buffer.
#[derive(Debug)]
pub struct GermanVarlenBuffer<T: ?Sized> {
    pub(crate) lens: Vec<i32>,
    pub(crate) inline_or_metadata: Vec<[u8; 12]>,
    pub(crate) data: Vec<u8>,
    pub(crate) _type: PhantomData<T>,
}

impl<T> GermanVarlenBuffer<T>
where
    T: AsRef<[u8]> + ?Sized,
{
    pub fn with_len(len: usize) -> Self {
        GermanVarlenBuffer {
            lens: vec![0; len],
            inline_or_metadata: vec![[0; 12]; len],
            data: Vec::new(),
            _type: PhantomData,
        }
    }
}

impl<T> ArrayDataBuffer for GermanVarlenBuffer<T>
where
    T: AsRef<[u8]> + ?Sized,
{
    type Type = T;

    fn len(&self) -> usize {
        self.lens.len()
    }

    fn put(&mut self, idx: usize, val: &Self::Type) -> Result<()> {
        let val = val.as_ref();
        let len = i32_offset(val.len())?;
        self.inline_or_metadata[idx] = encode_german_metadata(val, &mut self.data)?;
        self.lens[idx] = len;
        Ok(())
    }

    fn into_data(self) -> ArrayData {
        GermanVarlenStorage::from_parts(self.lens, self.inline_or_metadata, self.data).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Array;
    use crate::scalar::ScalarValue;

    #[test]
    fn german_buffer_out_of_order_puts() {
        let mut buffer = GermanVarlenBuffer::<str>::with_len(3);
        buffer.put(2, "a value longer than twelve bytes").unwrap();
        buffer.put(0, "short").unwrap();
        buffer.put(1, "another long value for the buffer").unwrap();

        let arr = Array::new_with_array_data(DataType::Utf8, buffer.into_data());

        assert_eq!(ScalarValue::from("short"), arr.logical_value(0).unwrap());
        assert_eq!(
            ScalarValue::from("another long value for the buffer"),
            arr.logical_value(1).unwrap()
        );
        assert_eq!(
            ScalarValue::from("a value longer than twelve bytes"),
            arr.logical_value(2).unwrap()
        );
    }

    #[test]
    fn primitive_buffer() {
        let mut buffer = PrimitiveBuffer::<i16>::with_len(2);
        buffer.put(1, &-4).unwrap();

        let arr = Array::new_with_array_data(DataType::Int16, buffer.into_data());
        assert_eq!(ScalarValue::Int16(0), arr.logical_value(0).unwrap());
        assert_eq!(ScalarValue::Int16(-4), arr.logical_value(1).unwrap());
    }
}
