//! Scalar functions operating on columnar arrays.

pub mod functions;
