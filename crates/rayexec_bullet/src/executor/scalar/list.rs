use std::borrow::Borrow;

use rayexec_error::{OptionExt, RayexecError, Result};

use super::{check_physical_validity, validate_logical_len};
use crate::array::{Array, ArrayData};
use crate::bitmap::Bitmap;
use crate::executor::aggregate::AggregateState;
use crate::executor::builder::{ArrayBuilder, ArrayDataBuffer, OutputBuffer};
use crate::executor::physical_type::{PhysicalList, PhysicalStorage};
use crate::selection;
use crate::storage::AddressableStorage;

#[derive(Debug, Clone, Copy)]
pub struct ListExecutor;

impl ListExecutor {
    /// Reduce each list in `array` to a single value.
    ///
    /// A fresh `State` is created per list and updated with every non-null
    /// element of that list in order. The finalized state produces the
    /// output value, or null if the state reports the value as invalid. Null
    /// lists produce null without creating a state.
    ///
    /// `S` is the physical storage of the list's elements, not of the list
    /// itself.
    pub fn execute_reduce<'a, S, B, State, Output>(
        array: &'a Array,
        builder: ArrayBuilder<B>,
    ) -> Result<Array>
    where
        S: PhysicalStorage<'a>,
        B: ArrayDataBuffer,
        State: AggregateState<<S::Storage as AddressableStorage>::T, Output>,
        Output: Borrow<B::Type>,
    {
        let len = validate_logical_len(&builder.buffer, array)?;

        let child = match array.array_data() {
            ArrayData::List(list) => list.inner_array(),
            other => {
                return Err(RayexecError::new(format!(
                    "Expected list storage, got {:?}",
                    other.physical_type()
                )))
            }
        };

        let metadata = PhysicalList::get_storage(array.array_data())?;
        let selection = array.selection_vector();
        let validity = array.validity();

        let child_values = S::get_storage(child.array_data())?;
        let child_selection = child.selection_vector();
        let child_validity = child.validity();

        let mut out_validity = Bitmap::new_with_all_true(len);
        let mut output_buffer = OutputBuffer {
            idx: 0,
            buffer: builder.buffer,
        };

        for idx in 0..len {
            let sel = selection::get(selection, idx).required("list row index")?;

            if !check_physical_validity(validity, sel)? {
                out_validity.set_unchecked(idx, false);
                continue;
            }

            let meta = metadata.get(sel).required("list metadata")?;
            let start = meta.offset as usize;
            let end = start + meta.len as usize;

            let mut state = State::default();

            for child_idx in start..end {
                let child_sel =
                    selection::get(child_selection, child_idx).required("list element index")?;

                if !check_physical_validity(child_validity, child_sel)? {
                    continue;
                }

                let val = child_values
                    .try_get(child_sel)?
                    .required("list element value")?;
                state.update(val)?;
            }

            let (out, valid) = state.finalize()?;
            if valid {
                output_buffer.idx = idx;
                output_buffer.put(out.borrow())?;
            } else {
                out_validity.set_unchecked(idx, false);
            }
        }

        let validity = if out_validity.count_falses() == 0 {
            None
        } else {
            Some(out_validity)
        };

        Ok(Array {
            datatype: builder.datatype,
            selection: None,
            validity,
            data: output_buffer.buffer.into_data(),
        })
    }
}
