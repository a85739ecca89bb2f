pub mod list;

use std::fmt::Debug;
use std::sync::Arc;

use dyn_clone::DynClone;
use once_cell::sync::Lazy;
use rayexec_bullet::array::Array;
use rayexec_bullet::datatype::DataType;
use rayexec_error::Result;
use tracing::debug;

use super::FunctionInfo;

// List of all scalar functions.
pub static BUILTIN_SCALAR_FUNCTIONS: Lazy<Vec<Box<dyn ScalarFunction>>> = Lazy::new(|| {
    vec![
        // List
        Box::new(list::ArrayMax),
    ]
});

/// Find a builtin scalar function by its name or one of its aliases.
///
/// Matching is case-insensitive.
pub fn find_scalar_function(name: &str) -> Option<&'static dyn ScalarFunction> {
    let found = BUILTIN_SCALAR_FUNCTIONS.iter().find(|func| {
        func.name().eq_ignore_ascii_case(name)
            || func
                .aliases()
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    });

    if found.is_none() {
        debug!(%name, "no builtin scalar function found");
    }

    found.map(|func| func.as_ref())
}

/// A generic scalar function that can specialize into a more specific function
/// depending on input types.
///
/// Generic scalar functions must be cheaply cloneable.
pub trait ScalarFunction: FunctionInfo + Debug + Sync + Send + DynClone {
    /// Plan a scalar function based on datatype inputs.
    ///
    /// Errors if the inputs can't be handled by this function. This happens at
    /// bind time, before any data is seen.
    fn plan_from_datatypes(&self, inputs: &[DataType]) -> Result<Box<dyn PlannedScalarFunction>>;
}

impl Clone for Box<dyn ScalarFunction> {
    fn clone(&self) -> Self {
        dyn_clone::clone_box(&**self)
    }
}

impl PartialEq<dyn ScalarFunction> for Box<dyn ScalarFunction + '_> {
    fn eq(&self, other: &dyn ScalarFunction) -> bool {
        self.as_ref() == other
    }
}

impl PartialEq for dyn ScalarFunction + '_ {
    fn eq(&self, other: &dyn ScalarFunction) -> bool {
        self.name() == other.name() && self.signatures() == other.signatures()
    }
}

/// A scalar function planned for a specific set of input types.
///
/// Planned functions hold no mutable state, and may be executed concurrently
/// on different batches.
pub trait PlannedScalarFunction: Debug + Sync + Send + DynClone {
    /// The name of the function this was planned from.
    fn name(&self) -> &'static str;

    /// Data type of the arrays produced by this function.
    fn return_type(&self) -> DataType;

    /// Execute the function on a batch of input arrays, producing one output
    /// row per input row.
    fn execute(&self, inputs: &[&Arc<Array>]) -> Result<Array>;
}

impl Clone for Box<dyn PlannedScalarFunction> {
    fn clone(&self) -> Self {
        dyn_clone::clone_box(&**self)
    }
}
