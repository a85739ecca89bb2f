use std::sync::Arc;

use rayexec_error::{RayexecError, Result, ResultExt};

use crate::bitmap::Bitmap;
use crate::datatype::DataType;
use crate::executor::physical_type::PhysicalType;
use crate::scalar::{Decimal128Scalar, Decimal64Scalar, ScalarValue, TimestampScalar};
use crate::selection::{self, SelectionVector};
use crate::storage::{
    i32_offset, AddressableStorage, BooleanStorage, ContiguousVarlenStorage, GermanVarlenStorage,
    ListItemMetadata, ListStorage, PrimitiveStorage, UntypedNullStorage,
};

/// Wrapper around a selection vector allowing for owned or shared vectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Owned(SelectionVector),
    Shared(Arc<SelectionVector>),
}

impl AsRef<SelectionVector> for Selection {
    fn as_ref(&self) -> &SelectionVector {
        match self {
            Selection::Owned(v) => v,
            Self::Shared(v) => v.as_ref(),
        }
    }
}

impl From<SelectionVector> for Selection {
    fn from(value: SelectionVector) -> Self {
        Selection::Owned(value)
    }
}

impl From<Arc<SelectionVector>> for Selection {
    fn from(value: Arc<SelectionVector>) -> Self {
        Selection::Shared(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    /// Data type of the array.
    pub(crate) datatype: DataType,
    /// Selection of rows for the array.
    ///
    /// If set, this provides logical row mapping on top of the underlying data.
    /// If not set, then there's a one-to-one mapping between the logical row
    /// and and row in the underlying data.
    pub(crate) selection: Option<Selection>,
    /// Option validity mask.
    ///
    /// This indicates the validity of the underlying data. This does not take
    /// into account the selection vector, and always maps directly to the data.
    pub(crate) validity: Option<Bitmap>,
    /// The physical data.
    pub(crate) data: ArrayData,
}

impl Array {
    pub fn new_untyped_null_array(len: usize) -> Self {
        let data = UntypedNullStorage(len);

        Array {
            datatype: DataType::Null,
            selection: None,
            validity: None,
            data: data.into(),
        }
    }

    pub fn new_with_array_data(datatype: DataType, data: impl Into<ArrayData>) -> Self {
        Array {
            datatype,
            selection: None,
            validity: None,
            data: data.into(),
        }
    }

    pub fn new_with_validity_and_array_data(
        datatype: DataType,
        validity: impl Into<Option<Bitmap>>,
        data: impl Into<ArrayData>,
    ) -> Self {
        Array {
            datatype,
            selection: None,
            validity: validity.into(),
            data: data.into(),
        }
    }

    pub fn datatype(&self) -> &DataType {
        &self.datatype
    }

    pub fn selection_vector(&self) -> Option<&SelectionVector> {
        self.selection.as_ref().map(|v| v.as_ref())
    }

    /// Updates this array's selection vector.
    ///
    /// Takes into account any existing selection. This allows for repeated
    /// selection (filtering) against the same array.
    pub fn select_mut(&mut self, selection: &Selection) {
        match self.selection_vector() {
            Some(existing) => {
                // Existing selection, need to create a new vector that selects
                // from the existing vector.
                let input_sel = selection.as_ref();
                let mut new_sel = SelectionVector::with_capacity(input_sel.num_rows());

                for input_loc in input_sel.iter_locations() {
                    new_sel.push_location(existing.get_unchecked(input_loc));
                }

                self.selection = Some(new_sel.into())
            }
            None => {
                // No existing selection, we can just use the provided vector
                // directly.
                self.selection = Some(selection.clone())
            }
        }
    }

    pub fn logical_len(&self) -> usize {
        match self.selection_vector() {
            Some(v) => v.num_rows(),
            None => self.data.len(),
        }
    }

    pub fn validity(&self) -> Option<&Bitmap> {
        self.validity.as_ref()
    }

    pub fn array_data(&self) -> &ArrayData {
        &self.data
    }

    /// Get the value at a logical index.
    ///
    /// Takes into account the validity and selection vector.
    pub fn logical_value(&self, idx: usize) -> Result<ScalarValue<'_>> {
        let idx = selection::get(self.selection_vector(), idx)
            .ok_or_else(|| RayexecError::new(format!("Logical index {idx} out of bounds")))?;

        if let Some(validity) = &self.validity {
            if idx >= validity.len() {
                return Err(RayexecError::new(format!(
                    "Physical index {idx} out of bounds for validity"
                )));
            }
            if !validity.value_unchecked(idx) {
                return Ok(ScalarValue::Null);
            }
        }

        self.physical_scalar(idx)
    }

    /// Gets the scalar value at the physical index.
    ///
    /// Ignores validity and selectivitity.
    pub fn physical_scalar(&self, idx: usize) -> Result<ScalarValue<'_>> {
        Ok(match (&self.datatype, &self.data) {
            (DataType::Null, ArrayData::UntypedNull(_)) => ScalarValue::Null,
            (DataType::Boolean, ArrayData::Boolean(arr)) => arr
                .as_boolean_storage_ref()
                .get(idx)
                .ok_or_else(|| missing_value_err(idx))?
                .into(),
            (DataType::Float32, ArrayData::Float32(arr)) => get_primitive(arr, idx)?.into(),
            (DataType::Float64, ArrayData::Float64(arr)) => get_primitive(arr, idx)?.into(),
            (DataType::Int8, ArrayData::Int8(arr)) => get_primitive(arr, idx)?.into(),
            (DataType::Int16, ArrayData::Int16(arr)) => get_primitive(arr, idx)?.into(),
            (DataType::Int32, ArrayData::Int32(arr)) => get_primitive(arr, idx)?.into(),
            (DataType::Int64, ArrayData::Int64(arr)) => get_primitive(arr, idx)?.into(),
            (DataType::Int128, ArrayData::Int128(arr)) => get_primitive(arr, idx)?.into(),
            (DataType::UInt8, ArrayData::UInt8(arr)) => get_primitive(arr, idx)?.into(),
            (DataType::UInt16, ArrayData::UInt16(arr)) => get_primitive(arr, idx)?.into(),
            (DataType::UInt32, ArrayData::UInt32(arr)) => get_primitive(arr, idx)?.into(),
            (DataType::UInt64, ArrayData::UInt64(arr)) => get_primitive(arr, idx)?.into(),
            (DataType::Decimal64(m), ArrayData::Int64(arr)) => {
                ScalarValue::Decimal64(Decimal64Scalar {
                    precision: m.precision,
                    scale: m.scale,
                    value: get_primitive(arr, idx)?,
                })
            }
            (DataType::Decimal128(m), ArrayData::Int128(arr)) => {
                ScalarValue::Decimal128(Decimal128Scalar {
                    precision: m.precision,
                    scale: m.scale,
                    value: get_primitive(arr, idx)?,
                })
            }
            (DataType::Timestamp(m), ArrayData::Int64(arr)) => {
                ScalarValue::Timestamp(TimestampScalar {
                    unit: m.unit,
                    value: get_primitive(arr, idx)?,
                })
            }
            (DataType::Date32, ArrayData::Int32(arr)) => {
                ScalarValue::Date32(get_primitive(arr, idx)?)
            }
            (DataType::Date64, ArrayData::Int64(arr)) => {
                ScalarValue::Date64(get_primitive(arr, idx)?)
            }
            (DataType::Utf8, ArrayData::Binary(data)) => {
                let v = data.get(idx).ok_or_else(|| missing_value_err(idx))?;
                let s = std::str::from_utf8(v).context("binary data not valid utf8")?;
                s.into()
            }
            (DataType::Binary, ArrayData::Binary(data)) => {
                let v = data.get(idx).ok_or_else(|| missing_value_err(idx))?;
                v.into()
            }
            (DataType::List(_), ArrayData::List(list)) => {
                let meta = list
                    .metadata()
                    .get(idx)
                    .ok_or_else(|| missing_value_err(idx))?;

                let start = meta.offset as usize;
                let end = start + meta.len as usize;

                let values = (start..end)
                    .map(|child_idx| list.inner_array().logical_value(child_idx))
                    .collect::<Result<Vec<_>>>()?;

                ScalarValue::List(values)
            }
            _ => return Err(array_not_valid_for_type_err(&self.datatype)),
        })
    }

    /// Try to convert an iterator of scalars of a given datatype into an array.
    ///
    /// Errors if any of the scalars are a different type than the provided
    /// datatype.
    pub fn try_from_scalars<'a>(
        datatype: DataType,
        scalars: impl IntoIterator<Item = ScalarValue<'a>>,
    ) -> Result<Array> {
        let scalars = scalars.into_iter();
        let (cap, _) = scalars.size_hint();

        /// Helper for iterating over scalars and producing a single type of
        /// primitive array.
        ///
        /// `$pattern => $value` extracts the native value from a matching
        /// scalar, `$null` is the placeholder value used for nulls.
        macro_rules! primitive_from_scalars {
            ($pattern:pat => $value:expr, $null:expr) => {{
                let mut validity = Bitmap::default();
                let mut values = Vec::with_capacity(cap);

                for scalar in scalars {
                    match scalar {
                        ScalarValue::Null => {
                            validity.push(false);
                            values.push($null);
                        }
                        $pattern => {
                            validity.push(true);
                            values.push($value);
                        }
                        other => return Err(unexpected_scalar_err(&other, &datatype)),
                    }
                }

                Ok(Array::new_with_validity_and_array_data(
                    datatype,
                    validity_if_has_nulls(validity),
                    PrimitiveStorage::from(values),
                ))
            }};
        }

        match &datatype {
            DataType::Null => {
                let mut len = 0;
                for scalar in scalars {
                    match scalar {
                        ScalarValue::Null => len += 1,
                        other => return Err(unexpected_scalar_err(&other, &datatype)),
                    }
                }
                Ok(Array::new_untyped_null_array(len))
            }
            DataType::Boolean => {
                let mut validity = Bitmap::default();
                let mut values = Bitmap::default();

                for scalar in scalars {
                    match scalar {
                        ScalarValue::Null => {
                            validity.push(false);
                            values.push(false);
                        }
                        ScalarValue::Boolean(v) => {
                            validity.push(true);
                            values.push(v);
                        }
                        other => return Err(unexpected_scalar_err(&other, &datatype)),
                    }
                }

                Ok(Array::new_with_validity_and_array_data(
                    datatype,
                    validity_if_has_nulls(validity),
                    BooleanStorage::from(values),
                ))
            }
            DataType::Float32 => primitive_from_scalars!(ScalarValue::Float32(v) => v, 0.0),
            DataType::Float64 => primitive_from_scalars!(ScalarValue::Float64(v) => v, 0.0),
            DataType::Int8 => primitive_from_scalars!(ScalarValue::Int8(v) => v, 0),
            DataType::Int16 => primitive_from_scalars!(ScalarValue::Int16(v) => v, 0),
            DataType::Int32 => primitive_from_scalars!(ScalarValue::Int32(v) => v, 0),
            DataType::Int64 => primitive_from_scalars!(ScalarValue::Int64(v) => v, 0),
            DataType::Int128 => primitive_from_scalars!(ScalarValue::Int128(v) => v, 0),
            DataType::UInt8 => primitive_from_scalars!(ScalarValue::UInt8(v) => v, 0),
            DataType::UInt16 => primitive_from_scalars!(ScalarValue::UInt16(v) => v, 0),
            DataType::UInt32 => primitive_from_scalars!(ScalarValue::UInt32(v) => v, 0),
            DataType::UInt64 => primitive_from_scalars!(ScalarValue::UInt64(v) => v, 0),
            // TODO: Assert precision/scale of decimal scalars and unit of
            // timestamp scalars match the datatype.
            DataType::Decimal64(_) => {
                primitive_from_scalars!(ScalarValue::Decimal64(v) => v.value, 0)
            }
            DataType::Decimal128(_) => {
                primitive_from_scalars!(ScalarValue::Decimal128(v) => v.value, 0)
            }
            DataType::Timestamp(_) => {
                primitive_from_scalars!(ScalarValue::Timestamp(v) => v.value, 0)
            }
            DataType::Date32 => primitive_from_scalars!(ScalarValue::Date32(v) => v, 0),
            DataType::Date64 => primitive_from_scalars!(ScalarValue::Date64(v) => v, 0),
            DataType::Utf8 | DataType::Binary => {
                let mut validity = Bitmap::default();
                let mut german = GermanVarlenStorage::with_metadata_capacity(cap);

                for scalar in scalars {
                    match (&datatype, scalar) {
                        (_, ScalarValue::Null) => {
                            validity.push(false);
                            german.push(&[])?;
                        }
                        (DataType::Utf8, ScalarValue::Utf8(v)) => {
                            validity.push(true);
                            german.push(v.as_bytes())?;
                        }
                        (DataType::Binary, ScalarValue::Binary(v)) => {
                            validity.push(true);
                            german.push(v.as_ref())?;
                        }
                        (_, other) => return Err(unexpected_scalar_err(&other, &datatype)),
                    }
                }

                Ok(Array::new_with_validity_and_array_data(
                    datatype,
                    validity_if_has_nulls(validity),
                    german,
                ))
            }
            DataType::List(meta) => {
                let mut validity = Bitmap::default();
                let mut metadata = Vec::with_capacity(cap);
                let mut children = Vec::new();

                for scalar in scalars {
                    match scalar {
                        ScalarValue::Null => {
                            validity.push(false);
                            metadata.push(ListItemMetadata {
                                offset: i32_offset(children.len())?,
                                len: 0,
                            });
                        }
                        ScalarValue::List(values) => {
                            validity.push(true);
                            metadata.push(ListItemMetadata {
                                offset: i32_offset(children.len())?,
                                len: i32_offset(values.len())?,
                            });
                            children.extend(values);
                        }
                        other => return Err(unexpected_scalar_err(&other, &datatype)),
                    }
                }

                let child = Array::try_from_scalars(meta.datatype.as_ref().clone(), children)?;
                let list = ListStorage::try_new(metadata, child)?;

                Ok(Array::new_with_validity_and_array_data(
                    datatype,
                    validity_if_has_nulls(validity),
                    list,
                ))
            }
        }
    }
}

fn get_primitive<T: Copy>(storage: &PrimitiveStorage<T>, idx: usize) -> Result<T> {
    storage
        .as_ref()
        .get(idx)
        .copied()
        .ok_or_else(|| missing_value_err(idx))
}

fn validity_if_has_nulls(validity: Bitmap) -> Option<Bitmap> {
    if validity.count_falses() == 0 {
        None
    } else {
        Some(validity)
    }
}

fn missing_value_err(idx: usize) -> RayexecError {
    RayexecError::new(format!("Missing data at physical index {idx}"))
}

fn unexpected_scalar_err(scalar: &ScalarValue, datatype: &DataType) -> RayexecError {
    RayexecError::new(format!(
        "Unexpected scalar value: {scalar:?}, want: {datatype}"
    ))
}

fn array_not_valid_for_type_err(datatype: &DataType) -> RayexecError {
    RayexecError::new(format!("Array data not valid for data type: {datatype}"))
}

/// Implements `FromIterator` for both a native type and its optional variant.
macro_rules! impl_primitive_from_iter {
    ($native:ty, $datatype:ident) => {
        impl FromIterator<$native> for Array {
            fn from_iter<T: IntoIterator<Item = $native>>(iter: T) -> Self {
                let vals: Vec<_> = iter.into_iter().collect();
                Array::new_with_array_data(DataType::$datatype, PrimitiveStorage::from(vals))
            }
        }

        impl FromIterator<Option<$native>> for Array {
            fn from_iter<T: IntoIterator<Item = Option<$native>>>(iter: T) -> Self {
                let mut validity = Bitmap::default();
                let mut vals = Vec::new();

                for v in iter {
                    validity.push(v.is_some());
                    vals.push(v.unwrap_or_default());
                }

                Array::new_with_validity_and_array_data(
                    DataType::$datatype,
                    validity_if_has_nulls(validity),
                    PrimitiveStorage::from(vals),
                )
            }
        }
    };
}

impl_primitive_from_iter!(i8, Int8);
impl_primitive_from_iter!(i16, Int16);
impl_primitive_from_iter!(i32, Int32);
impl_primitive_from_iter!(i64, Int64);
impl_primitive_from_iter!(i128, Int128);
impl_primitive_from_iter!(u8, UInt8);
impl_primitive_from_iter!(u16, UInt16);
impl_primitive_from_iter!(u32, UInt32);
impl_primitive_from_iter!(u64, UInt64);
impl_primitive_from_iter!(f32, Float32);
impl_primitive_from_iter!(f64, Float64);

impl FromIterator<bool> for Array {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let vals: Bitmap = iter.into_iter().collect();
        Array::new_with_array_data(DataType::Boolean, BooleanStorage::from(vals))
    }
}

impl FromIterator<Option<bool>> for Array {
    fn from_iter<T: IntoIterator<Item = Option<bool>>>(iter: T) -> Self {
        let mut validity = Bitmap::default();
        let mut vals = Bitmap::default();

        for v in iter {
            validity.push(v.is_some());
            vals.push(v.unwrap_or(false));
        }

        Array::new_with_validity_and_array_data(
            DataType::Boolean,
            validity_if_has_nulls(validity),
            BooleanStorage::from(vals),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    UntypedNull(UntypedNullStorage),
    Boolean(Arc<BooleanStorage>),
    Float32(Arc<PrimitiveStorage<f32>>),
    Float64(Arc<PrimitiveStorage<f64>>),
    Int8(Arc<PrimitiveStorage<i8>>),
    Int16(Arc<PrimitiveStorage<i16>>),
    Int32(Arc<PrimitiveStorage<i32>>),
    Int64(Arc<PrimitiveStorage<i64>>),
    Int128(Arc<PrimitiveStorage<i128>>),
    UInt8(Arc<PrimitiveStorage<u8>>),
    UInt16(Arc<PrimitiveStorage<u16>>),
    UInt32(Arc<PrimitiveStorage<u32>>),
    UInt64(Arc<PrimitiveStorage<u64>>),
    Binary(BinaryData),
    List(Arc<ListStorage>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BinaryData {
    Binary(Arc<ContiguousVarlenStorage<i32>>),
    LargeBinary(Arc<ContiguousVarlenStorage<i64>>),
    German(Arc<GermanVarlenStorage>),
}

impl BinaryData {
    pub fn len(&self) -> usize {
        match self {
            Self::Binary(s) => s.len(),
            Self::LargeBinary(s) => s.len(),
            Self::German(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the bytes at a physical index.
    pub fn get(&self, idx: usize) -> Option<&[u8]> {
        match self {
            Self::Binary(s) => s.get(idx),
            Self::LargeBinary(s) => s.get(idx),
            Self::German(s) => s.get(idx),
        }
    }
}

impl ArrayData {
    pub fn physical_type(&self) -> PhysicalType {
        match self {
            Self::UntypedNull(_) => PhysicalType::UntypedNull,
            Self::Boolean(_) => PhysicalType::Boolean,
            Self::Float32(_) => PhysicalType::Float32,
            Self::Float64(_) => PhysicalType::Float64,
            Self::Int8(_) => PhysicalType::Int8,
            Self::Int16(_) => PhysicalType::Int16,
            Self::Int32(_) => PhysicalType::Int32,
            Self::Int64(_) => PhysicalType::Int64,
            Self::Int128(_) => PhysicalType::Int128,
            Self::UInt8(_) => PhysicalType::UInt8,
            Self::UInt16(_) => PhysicalType::UInt16,
            Self::UInt32(_) => PhysicalType::UInt32,
            Self::UInt64(_) => PhysicalType::UInt64,
            Self::Binary(_) => PhysicalType::Binary,
            Self::List(_) => PhysicalType::List,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::UntypedNull(s) => s.len(),
            Self::Boolean(s) => s.len(),
            Self::Float32(s) => s.len(),
            Self::Float64(s) => s.len(),
            Self::Int8(s) => s.len(),
            Self::Int16(s) => s.len(),
            Self::Int32(s) => s.len(),
            Self::Int64(s) => s.len(),
            Self::Int128(s) => s.len(),
            Self::UInt8(s) => s.len(),
            Self::UInt16(s) => s.len(),
            Self::UInt32(s) => s.len(),
            Self::UInt64(s) => s.len(),
            Self::Binary(bin) => bin.len(),
            Self::List(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<UntypedNullStorage> for ArrayData {
    fn from(value: UntypedNullStorage) -> Self {
        ArrayData::UntypedNull(value)
    }
}

impl From<BooleanStorage> for ArrayData {
    fn from(value: BooleanStorage) -> Self {
        ArrayData::Boolean(value.into())
    }
}

macro_rules! impl_array_data_from_primitive {
    ($native:ty, $variant:ident) => {
        impl From<PrimitiveStorage<$native>> for ArrayData {
            fn from(value: PrimitiveStorage<$native>) -> Self {
                ArrayData::$variant(value.into())
            }
        }
    };
}

impl_array_data_from_primitive!(f32, Float32);
impl_array_data_from_primitive!(f64, Float64);
impl_array_data_from_primitive!(i8, Int8);
impl_array_data_from_primitive!(i16, Int16);
impl_array_data_from_primitive!(i32, Int32);
impl_array_data_from_primitive!(i64, Int64);
impl_array_data_from_primitive!(i128, Int128);
impl_array_data_from_primitive!(u8, UInt8);
impl_array_data_from_primitive!(u16, UInt16);
impl_array_data_from_primitive!(u32, UInt32);
impl_array_data_from_primitive!(u64, UInt64);

impl From<ContiguousVarlenStorage<i32>> for ArrayData {
    fn from(value: ContiguousVarlenStorage<i32>) -> Self {
        ArrayData::Binary(BinaryData::Binary(Arc::new(value)))
    }
}

impl From<ContiguousVarlenStorage<i64>> for ArrayData {
    fn from(value: ContiguousVarlenStorage<i64>) -> Self {
        ArrayData::Binary(BinaryData::LargeBinary(Arc::new(value)))
    }
}

impl From<GermanVarlenStorage> for ArrayData {
    fn from(value: GermanVarlenStorage) -> Self {
        ArrayData::Binary(BinaryData::German(Arc::new(value)))
    }
}

impl From<ListStorage> for ArrayData {
    fn from(value: ListStorage) -> Self {
        ArrayData::List(Arc::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatype::{ListTypeMeta, TimeUnit, TimestampTypeMeta};

    #[test]
    fn select_mut_composes_selections() {
        let mut arr = Array::from_iter([10, 11, 12, 13]);
        arr.select_mut(&SelectionVector::from_iter([3, 2, 1]).into());
        arr.select_mut(&SelectionVector::from_iter([0, 2]).into());

        assert_eq!(2, arr.logical_len());
        assert_eq!(ScalarValue::Int32(13), arr.logical_value(0).unwrap());
        assert_eq!(ScalarValue::Int32(11), arr.logical_value(1).unwrap());
    }

    #[test]
    fn logical_value_respects_validity() {
        let arr = Array::from_iter([Some(1_i64), None, Some(3)]);

        assert_eq!(ScalarValue::Int64(1), arr.logical_value(0).unwrap());
        assert_eq!(ScalarValue::Null, arr.logical_value(1).unwrap());
        arr.logical_value(3).unwrap_err();
    }

    #[test]
    fn list_from_scalars() {
        let datatype = DataType::List(ListTypeMeta::new(DataType::Int32));
        let arr = Array::try_from_scalars(
            datatype,
            [
                ScalarValue::List(vec![ScalarValue::Int32(1), ScalarValue::Null]),
                ScalarValue::Null,
                ScalarValue::List(vec![]),
            ],
        )
        .unwrap();

        assert_eq!(3, arr.logical_len());
        assert_eq!(
            ScalarValue::List(vec![ScalarValue::Int32(1), ScalarValue::Null]),
            arr.logical_value(0).unwrap()
        );
        assert_eq!(ScalarValue::Null, arr.logical_value(1).unwrap());
        assert_eq!(ScalarValue::List(vec![]), arr.logical_value(2).unwrap());
    }

    #[test]
    fn timestamp_from_scalars_keeps_unit() {
        let datatype = DataType::Timestamp(TimestampTypeMeta::new(TimeUnit::Microsecond));
        let arr = Array::try_from_scalars(
            datatype,
            [ScalarValue::Timestamp(TimestampScalar {
                unit: TimeUnit::Microsecond,
                value: 42,
            })],
        )
        .unwrap();

        assert_eq!(PhysicalType::Int64, arr.array_data().physical_type());
        assert_eq!(
            ScalarValue::Timestamp(TimestampScalar {
                unit: TimeUnit::Microsecond,
                value: 42,
            }),
            arr.logical_value(0).unwrap()
        );
    }

    #[test]
    fn from_scalars_wrong_type() {
        Array::try_from_scalars(DataType::Int32, [ScalarValue::Int64(4)]).unwrap_err();
    }

    #[test]
    fn utf8_from_scalars() {
        let arr = Array::try_from_scalars(
            DataType::Utf8,
            [
                ScalarValue::from("a"),
                ScalarValue::Null,
                ScalarValue::from("a value stored out of line"),
            ],
        )
        .unwrap();

        assert_eq!(PhysicalType::Binary, arr.array_data().physical_type());
        assert_eq!(ScalarValue::from("a"), arr.logical_value(0).unwrap());
        assert_eq!(ScalarValue::Null, arr.logical_value(1).unwrap());
        assert_eq!(
            ScalarValue::from("a value stored out of line"),
            arr.logical_value(2).unwrap()
        );
    }
}
