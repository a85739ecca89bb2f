use rayexec_error::{RayexecError, Result};

use crate::array::{ArrayData, BinaryData};
use crate::storage::{
    AddressableStorage, BooleanStorageRef, ContiguousVarlenStorageSlice,
    GermanVarlenStorageSlice, ListItemMetadata,
};

/// How values are physically stored, independent of their logical type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalType {
    UntypedNull,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Binary,
    Utf8,
    List,
}

/// Helper trait for getting the underlying data for an array.
///
/// Each implementation is a marker for a physical type, and maps to the
/// addressable storage holding values of that type.
pub trait PhysicalStorage<'a> {
    type Storage: AddressableStorage;

    /// Get the storage from the array data, erroring if the data doesn't match
    /// this physical type.
    fn get_storage(data: &'a ArrayData) -> Result<Self::Storage>;
}

macro_rules! impl_physical_primitive {
    ($marker:ident, $native:ty, $variant:ident) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $marker;

        impl<'a> PhysicalStorage<'a> for $marker {
            type Storage = &'a [$native];

            fn get_storage(data: &'a ArrayData) -> Result<Self::Storage> {
                match data {
                    ArrayData::$variant(storage) => Ok(storage.as_slice()),
                    _ => Err(invalid_storage_err(data, PhysicalType::$variant)),
                }
            }
        }
    };
}

impl_physical_primitive!(PhysicalI8, i8, Int8);
impl_physical_primitive!(PhysicalI16, i16, Int16);
impl_physical_primitive!(PhysicalI32, i32, Int32);
impl_physical_primitive!(PhysicalI64, i64, Int64);
impl_physical_primitive!(PhysicalI128, i128, Int128);
impl_physical_primitive!(PhysicalU8, u8, UInt8);
impl_physical_primitive!(PhysicalU16, u16, UInt16);
impl_physical_primitive!(PhysicalU32, u32, UInt32);
impl_physical_primitive!(PhysicalU64, u64, UInt64);
impl_physical_primitive!(PhysicalF32, f32, Float32);
impl_physical_primitive!(PhysicalF64, f64, Float64);

#[derive(Debug, Clone, Copy)]
pub struct PhysicalBool;

impl<'a> PhysicalStorage<'a> for PhysicalBool {
    type Storage = BooleanStorageRef<'a>;

    fn get_storage(data: &'a ArrayData) -> Result<Self::Storage> {
        match data {
            ArrayData::Boolean(storage) => Ok(storage.as_boolean_storage_ref()),
            _ => Err(invalid_storage_err(data, PhysicalType::Boolean)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PhysicalBinary;

impl<'a> PhysicalStorage<'a> for PhysicalBinary {
    type Storage = BinaryDataStorage<'a>;

    fn get_storage(data: &'a ArrayData) -> Result<Self::Storage> {
        match data {
            ArrayData::Binary(binary) => Ok(BinaryDataStorage::from_binary_data(binary)),
            _ => Err(invalid_storage_err(data, PhysicalType::Binary)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PhysicalUtf8;

impl<'a> PhysicalStorage<'a> for PhysicalUtf8 {
    type Storage = StrDataStorage<'a>;

    fn get_storage(data: &'a ArrayData) -> Result<Self::Storage> {
        match data {
            ArrayData::Binary(binary) => Ok(StrDataStorage {
                inner: BinaryDataStorage::from_binary_data(binary),
            }),
            _ => Err(invalid_storage_err(data, PhysicalType::Utf8)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PhysicalList;

impl<'a> PhysicalStorage<'a> for PhysicalList {
    type Storage = &'a [ListItemMetadata];

    fn get_storage(data: &'a ArrayData) -> Result<Self::Storage> {
        match data {
            ArrayData::List(storage) => Ok(storage.metadata()),
            _ => Err(invalid_storage_err(data, PhysicalType::List)),
        }
    }
}

/// Addressable view over any of the binary storage variants.
#[derive(Debug, Clone, Copy)]
pub enum BinaryDataStorage<'a> {
    Binary(ContiguousVarlenStorageSlice<'a, i32>),
    LargeBinary(ContiguousVarlenStorageSlice<'a, i64>),
    German(GermanVarlenStorageSlice<'a>),
}

impl<'a> BinaryDataStorage<'a> {
    fn from_binary_data(data: &'a BinaryData) -> Self {
        match data {
            BinaryData::Binary(s) => Self::Binary(s.as_contiguous_storage_slice()),
            BinaryData::LargeBinary(s) => Self::LargeBinary(s.as_contiguous_storage_slice()),
            BinaryData::German(s) => Self::German(s.as_german_storage_slice()),
        }
    }
}

impl<'a> AddressableStorage for BinaryDataStorage<'a> {
    type T = &'a [u8];

    fn len(&self) -> usize {
        match self {
            Self::Binary(s) => s.len(),
            Self::LargeBinary(s) => s.len(),
            Self::German(s) => s.len(),
        }
    }

    #[inline]
    fn get(&self, idx: usize) -> Option<Self::T> {
        match self {
            Self::Binary(s) => s.get(idx),
            Self::LargeBinary(s) => s.get(idx),
            Self::German(s) => s.get(idx),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StrDataStorage<'a> {
    inner: BinaryDataStorage<'a>,
}

impl<'a> AddressableStorage for StrDataStorage<'a> {
    type T = &'a str;

    fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    fn get(&self, idx: usize) -> Option<Self::T> {
        self.try_get(idx).ok().flatten()
    }

    #[inline]
    fn try_get(&self, idx: usize) -> Result<Option<Self::T>> {
        match self.inner.get(idx) {
            Some(bs) => Ok(Some(std::str::from_utf8(bs)?)),
            None => Ok(None),
        }
    }
}

fn invalid_storage_err(data: &ArrayData, want: PhysicalType) -> RayexecError {
    RayexecError::new(format!(
        "Invalid storage, have {:?}, want {want:?}",
        data.physical_type()
    ))
}
