use std::borrow::Cow;
use std::fmt;

use crate::datatype::{DataType, DecimalTypeMeta, TimeUnit, TimestampTypeMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal64Scalar {
    pub precision: u8,
    pub scale: i8,
    pub value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal128Scalar {
    pub precision: u8,
    pub scale: i8,
    pub value: i128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimestampScalar {
    pub unit: TimeUnit,
    pub value: i64,
}

/// A single scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue<'a> {
    /// Represents `DataType::Null` (castable to/from any other type)
    Null,

    /// True or false value
    Boolean(bool),

    /// 32bit float
    Float32(f32),

    /// 64bit float
    Float64(f64),

    /// Signed 8bit int
    Int8(i8),

    /// Signed 16bit int
    Int16(i16),

    /// Signed 32bit int
    Int32(i32),

    /// Signed 64bit int
    Int64(i64),

    /// Signed 128bit int
    Int128(i128),

    /// Unsigned 8bit int
    UInt8(u8),

    /// Unsigned 16bit int
    UInt16(u16),

    /// Unsigned 32bit int
    UInt32(u32),

    /// Unsigned 64bit int
    UInt64(u64),

    Decimal64(Decimal64Scalar),
    Decimal128(Decimal128Scalar),
    Timestamp(TimestampScalar),

    /// Days since epoch.
    Date32(i32),

    /// Milliseconds since epoch.
    Date64(i64),

    /// Utf-8 encoded string.
    Utf8(Cow<'a, str>),

    /// Binary
    Binary(Cow<'a, [u8]>),

    /// A list of scalars, all of the same type.
    List(Vec<ScalarValue<'a>>),
}

pub type OwnedScalarValue = ScalarValue<'static>;

impl<'a> ScalarValue<'a> {
    /// Return the datatype for the scalar.
    ///
    /// Lists use the datatype of the first non-null element, falling back to
    /// `Null` if there's no such element.
    pub fn datatype(&self) -> DataType {
        match self {
            Self::Null => DataType::Null,
            Self::Boolean(_) => DataType::Boolean,
            Self::Float32(_) => DataType::Float32,
            Self::Float64(_) => DataType::Float64,
            Self::Int8(_) => DataType::Int8,
            Self::Int16(_) => DataType::Int16,
            Self::Int32(_) => DataType::Int32,
            Self::Int64(_) => DataType::Int64,
            Self::Int128(_) => DataType::Int128,
            Self::UInt8(_) => DataType::UInt8,
            Self::UInt16(_) => DataType::UInt16,
            Self::UInt32(_) => DataType::UInt32,
            Self::UInt64(_) => DataType::UInt64,
            Self::Decimal64(v) => DataType::Decimal64(DecimalTypeMeta::new(v.precision, v.scale)),
            Self::Decimal128(v) => {
                DataType::Decimal128(DecimalTypeMeta::new(v.precision, v.scale))
            }
            Self::Timestamp(v) => DataType::Timestamp(TimestampTypeMeta::new(v.unit)),
            Self::Date32(_) => DataType::Date32,
            Self::Date64(_) => DataType::Date64,
            Self::Utf8(_) => DataType::Utf8,
            Self::Binary(_) => DataType::Binary,
            Self::List(list) => {
                let inner = list
                    .iter()
                    .find(|v| !matches!(v, ScalarValue::Null))
                    .map(|v| v.datatype())
                    .unwrap_or(DataType::Null);
                DataType::List(crate::datatype::ListTypeMeta::new(inner))
            }
        }
    }

    pub fn into_owned(self) -> OwnedScalarValue {
        match self {
            Self::Null => OwnedScalarValue::Null,
            Self::Boolean(v) => OwnedScalarValue::Boolean(v),
            Self::Float32(v) => OwnedScalarValue::Float32(v),
            Self::Float64(v) => OwnedScalarValue::Float64(v),
            Self::Int8(v) => OwnedScalarValue::Int8(v),
            Self::Int16(v) => OwnedScalarValue::Int16(v),
            Self::Int32(v) => OwnedScalarValue::Int32(v),
            Self::Int64(v) => OwnedScalarValue::Int64(v),
            Self::Int128(v) => OwnedScalarValue::Int128(v),
            Self::UInt8(v) => OwnedScalarValue::UInt8(v),
            Self::UInt16(v) => OwnedScalarValue::UInt16(v),
            Self::UInt32(v) => OwnedScalarValue::UInt32(v),
            Self::UInt64(v) => OwnedScalarValue::UInt64(v),
            Self::Decimal64(v) => OwnedScalarValue::Decimal64(v),
            Self::Decimal128(v) => OwnedScalarValue::Decimal128(v),
            Self::Timestamp(v) => OwnedScalarValue::Timestamp(v),
            Self::Date32(v) => OwnedScalarValue::Date32(v),
            Self::Date64(v) => OwnedScalarValue::Date64(v),
            Self::Utf8(v) => OwnedScalarValue::Utf8(v.into_owned().into()),
            Self::Binary(v) => OwnedScalarValue::Binary(v.into_owned().into()),
            Self::List(v) => {
                OwnedScalarValue::List(v.into_iter().map(|v| v.into_owned()).collect())
            }
        }
    }
}

impl fmt::Display for ScalarValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Int8(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Int128(v) => write!(f, "{v}"),
            Self::UInt8(v) => write!(f, "{v}"),
            Self::UInt16(v) => write!(f, "{v}"),
            Self::UInt32(v) => write!(f, "{v}"),
            Self::UInt64(v) => write!(f, "{v}"),
            Self::Decimal64(v) => write!(f, "{} (s={})", v.value, v.scale),
            Self::Decimal128(v) => write!(f, "{} (s={})", v.value, v.scale),
            Self::Timestamp(v) => write!(f, "{}{}", v.value, v.unit),
            Self::Date32(v) => write!(f, "{v}d"),
            Self::Date64(v) => write!(f, "{v}ms"),
            Self::Utf8(v) => write!(f, "{v}"),
            Self::Binary(v) => write!(f, "{v:?}"),
            Self::List(list) => {
                write!(f, "[")?;
                for (idx, v) in list.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
        }
    }
}

macro_rules! impl_from_native {
    ($native:ty, $variant:ident) => {
        impl From<$native> for ScalarValue<'_> {
            fn from(value: $native) -> Self {
                ScalarValue::$variant(value)
            }
        }
    };
}

impl_from_native!(bool, Boolean);
impl_from_native!(i8, Int8);
impl_from_native!(i16, Int16);
impl_from_native!(i32, Int32);
impl_from_native!(i64, Int64);
impl_from_native!(i128, Int128);
impl_from_native!(u8, UInt8);
impl_from_native!(u16, UInt16);
impl_from_native!(u32, UInt32);
impl_from_native!(u64, UInt64);
impl_from_native!(f32, Float32);
impl_from_native!(f64, Float64);
impl_from_native!(TimestampScalar, Timestamp);
impl_from_native!(Decimal64Scalar, Decimal64);
impl_from_native!(Decimal128Scalar, Decimal128);

impl<'a> From<&'a str> for ScalarValue<'a> {
    fn from(value: &'a str) -> Self {
        ScalarValue::Utf8(Cow::Borrowed(value))
    }
}

impl From<String> for ScalarValue<'_> {
    fn from(value: String) -> Self {
        ScalarValue::Utf8(Cow::Owned(value))
    }
}

impl<'a> From<&'a [u8]> for ScalarValue<'a> {
    fn from(value: &'a [u8]) -> Self {
        ScalarValue::Binary(Cow::Borrowed(value))
    }
}

impl<'a, T> From<Option<T>> for ScalarValue<'a>
where
    T: Into<ScalarValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => ScalarValue::Null,
        }
    }
}
