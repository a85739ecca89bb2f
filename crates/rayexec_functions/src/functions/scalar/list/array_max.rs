use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::sync::Arc;

use rayexec_bullet::array::Array;
use rayexec_bullet::datatype::{DataType, DataTypeId};
use rayexec_bullet::executor::aggregate::AggregateState;
use rayexec_bullet::executor::builder::{
    ArrayBuilder, ArrayDataBuffer, BooleanBuffer, GermanVarlenBuffer, PrimitiveBuffer,
};
use rayexec_bullet::executor::physical_type::{
    PhysicalBinary, PhysicalBool, PhysicalF32, PhysicalF64, PhysicalI128, PhysicalI16,
    PhysicalI32, PhysicalI64, PhysicalI8, PhysicalStorage, PhysicalType, PhysicalU16,
    PhysicalU32, PhysicalU64, PhysicalU8, PhysicalUtf8,
};
use rayexec_bullet::executor::scalar::ListExecutor;
use rayexec_bullet::storage::AddressableStorage;
use rayexec_error::{RayexecError, Result};
use tracing::trace;

use super::ordering::ArrayMaxOrd;
use crate::functions::scalar::{PlannedScalarFunction, ScalarFunction};
use crate::functions::{invalid_input_types_error, plan_check_num_args, FunctionInfo, Signature};

/// Returns the largest non-null element of each list.
///
/// Null lists, empty lists, and lists containing only nulls produce null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayMax;

impl FunctionInfo for ArrayMax {
    fn name(&self) -> &'static str {
        "array_max"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["list_max"]
    }

    fn signatures(&self) -> &[Signature] {
        &[Signature {
            input: &[DataTypeId::List],
            variadic: None,
            return_type: DataTypeId::Any,
        }]
    }
}

impl ScalarFunction for ArrayMax {
    fn plan_from_datatypes(&self, inputs: &[DataType]) -> Result<Box<dyn PlannedScalarFunction>> {
        plan_check_num_args(self, inputs, 1)?;
        if self.exact_signature(inputs).is_none() {
            return Err(invalid_input_types_error(self, &[&inputs[0]]));
        }

        let datatype = match &inputs[0] {
            DataType::List(meta) => meta.datatype.as_ref().clone(),
            other => return Err(invalid_input_types_error(self, &[other])),
        };

        let physical_type = datatype.physical_type()?;
        if physical_type == PhysicalType::List {
            return Err(RayexecError::new(format!(
                "Unsupported list element type for '{}': {datatype}",
                self.name()
            )));
        }

        trace!(%datatype, ?physical_type, "planned array_max");

        Ok(Box::new(ArrayMaxImpl {
            datatype,
            physical_type,
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayMaxImpl {
    /// Element type of the input lists, and the output type.
    datatype: DataType,
    /// Physical type of the elements, decided at plan time.
    physical_type: PhysicalType,
}

impl PlannedScalarFunction for ArrayMaxImpl {
    fn name(&self) -> &'static str {
        "array_max_impl"
    }

    fn return_type(&self) -> DataType {
        self.datatype.clone()
    }

    fn execute(&self, inputs: &[&Arc<Array>]) -> Result<Array> {
        let array: &Array = match inputs {
            [array] => array,
            other => {
                return Err(RayexecError::new(format!(
                    "Expected 1 input for 'array_max', received {}",
                    other.len()
                )))
            }
        };

        let len = array.logical_len();
        let datatype = self.datatype.clone();

        macro_rules! reduce_primitive {
            ($storage:ty, $native:ty) => {
                reduce_max::<$storage, _>(
                    array,
                    datatype,
                    PrimitiveBuffer::<$native>::with_len(len),
                )
            };
        }

        match self.physical_type {
            PhysicalType::UntypedNull => Ok(Array::new_untyped_null_array(len)),
            PhysicalType::Boolean => {
                reduce_max::<PhysicalBool, _>(array, datatype, BooleanBuffer::with_len(len))
            }
            PhysicalType::Int8 => reduce_primitive!(PhysicalI8, i8),
            PhysicalType::Int16 => reduce_primitive!(PhysicalI16, i16),
            PhysicalType::Int32 => reduce_primitive!(PhysicalI32, i32),
            PhysicalType::Int64 => reduce_primitive!(PhysicalI64, i64),
            PhysicalType::Int128 => reduce_primitive!(PhysicalI128, i128),
            PhysicalType::UInt8 => reduce_primitive!(PhysicalU8, u8),
            PhysicalType::UInt16 => reduce_primitive!(PhysicalU16, u16),
            PhysicalType::UInt32 => reduce_primitive!(PhysicalU32, u32),
            PhysicalType::UInt64 => reduce_primitive!(PhysicalU64, u64),
            PhysicalType::Float32 => reduce_primitive!(PhysicalF32, f32),
            PhysicalType::Float64 => reduce_primitive!(PhysicalF64, f64),
            PhysicalType::Utf8 => reduce_max::<PhysicalUtf8, _>(
                array,
                datatype,
                GermanVarlenBuffer::<str>::with_len(len),
            ),
            PhysicalType::Binary => reduce_max::<PhysicalBinary, _>(
                array,
                datatype,
                GermanVarlenBuffer::<[u8]>::with_len(len),
            ),
            PhysicalType::List => Err(RayexecError::new(
                "Nested lists not supported for 'array_max'",
            )),
        }
    }
}

/// Reduce every list in the array to its maximum element.
fn reduce_max<'a, S, B>(array: &'a Array, datatype: DataType, buffer: B) -> Result<Array>
where
    S: PhysicalStorage<'a>,
    B: ArrayDataBuffer,
    <S::Storage as AddressableStorage>::T: ArrayMaxOrd + Default + Borrow<B::Type>,
{
    let builder = ArrayBuilder { datatype, buffer };
    ListExecutor::execute_reduce::<
        S,
        B,
        MaxState<<S::Storage as AddressableStorage>::T>,
        <S::Storage as AddressableStorage>::T,
    >(array, builder)
}

/// Running maximum for a single list.
///
/// The first value seen is kept when later values compare equal to it.
#[derive(Debug)]
pub struct MaxState<T> {
    max: Option<T>,
}

impl<T> Default for MaxState<T> {
    fn default() -> Self {
        MaxState { max: None }
    }
}

impl<T> AggregateState<T, T> for MaxState<T>
where
    T: ArrayMaxOrd + Default + Debug,
{
    fn merge(&mut self, other: Self) -> Result<()> {
        if let Some(other) = other.max {
            self.update(other)?;
        }
        Ok(())
    }

    fn update(&mut self, input: T) -> Result<()> {
        let replace = match &self.max {
            Some(current) => input.max_cmp(current) == Ordering::Greater,
            None => true,
        };

        if replace {
            self.max = Some(input);
        }

        Ok(())
    }

    fn finalize(self) -> Result<(T, bool)> {
        match self.max {
            Some(max) => Ok((max, true)),
            None => Ok((T::default(), false)),
        }
    }
}
