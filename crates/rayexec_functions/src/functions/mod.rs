pub mod scalar;

use rayexec_bullet::datatype::{DataType, DataTypeId};
use rayexec_error::{RayexecError, Result};

/// Function signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// Expected positional input types for this signature.
    pub input: &'static [DataTypeId],

    /// Type of the variadic args if this function is variadic.
    ///
    /// If None, the function is not considered variadic.
    pub variadic: Option<DataTypeId>,

    /// The expected return type.
    ///
    /// This is purely informational. `DataTypeId::Any` is used for functions
    /// where the return type depends on the inputs (e.g. the element type of
    /// a list).
    pub return_type: DataTypeId,
}

impl Signature {
    /// Check if this signature is a variadic signature.
    pub const fn is_variadic(&self) -> bool {
        self.variadic.is_some()
    }

    /// Return if inputs given data types exactly satisfy the signature.
    ///
    /// Only the top-level type ids are compared, type metadata is ignored.
    pub fn exact_match(&self, inputs: &[DataType]) -> bool {
        if inputs.len() < self.input.len() {
            return false;
        }
        if !self.is_variadic() && inputs.len() != self.input.len() {
            return false;
        }

        let (positional, rest) = inputs.split_at(self.input.len());

        for (expected, have) in self.input.iter().zip(positional) {
            if !id_matches(*expected, have) {
                return false;
            }
        }

        match self.variadic {
            Some(expected) => rest.iter().all(|have| id_matches(expected, have)),
            None => true,
        }
    }
}

fn id_matches(expected: DataTypeId, have: &DataType) -> bool {
    expected == DataTypeId::Any || expected == have.datatype_id()
}

/// Trait for defining informating about functions.
pub trait FunctionInfo {
    /// Name of the function.
    fn name(&self) -> &'static str;

    /// Aliases for the function.
    ///
    /// Lookups by any of these aliases resolve to the same function.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Signature for the function.
    ///
    /// This is used during binding/planning to determine the return type for a
    /// function given some inputs.
    fn signatures(&self) -> &[Signature];

    /// Get the signature for this function if the inputs have an exact
    /// signature match.
    fn exact_signature(&self, inputs: &[DataType]) -> Option<&Signature> {
        self.signatures().iter().find(|sig| sig.exact_match(inputs))
    }
}

/// Check the number of arguments provided, erroring if it doesn't match the
/// expected number of arguments.
pub fn plan_check_num_args(
    func: &impl FunctionInfo,
    inputs: &[DataType],
    expected: usize,
) -> Result<()> {
    if inputs.len() != expected {
        return Err(RayexecError::new(format!(
            "Expected {} input for '{}', received {}",
            expected,
            func.name(),
            inputs.len(),
        )));
    }
    Ok(())
}

/// Return an error indicating the input types we got are not ones we can
/// handle.
pub fn invalid_input_types_error(func: &impl FunctionInfo, got: &[&DataType]) -> RayexecError {
    let got_types = got
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(",");
    RayexecError::new(format!(
        "Got invalid type(s) '{}' for '{}'",
        got_types,
        func.name()
    ))
}
