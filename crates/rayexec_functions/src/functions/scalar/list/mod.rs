//! Functions operating on list values.

mod array_max;
pub use array_max::*;

pub mod ordering;
