//! A suspiciously Arrow-like columnar storage implementation.
pub mod array;
pub mod bitmap;
pub mod datatype;
pub mod executor;
pub mod scalar;
pub mod selection;
pub mod storage;
pub mod testutil;
