//! Vectorized executors operating on arrays.

pub mod aggregate;
pub mod builder;
pub mod physical_type;
pub mod scalar;
