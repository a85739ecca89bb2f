//! Aggregate states.

use std::fmt::Debug;

use rayexec_error::Result;

/// State for a single group's aggregate.
///
/// An example state for MAX would be a struct that holds the largest value
/// seen so far from values provided in `update`.
pub trait AggregateState<Input, Output>: Default + Debug {
    /// Merge other state into this state.
    fn merge(&mut self, other: Self) -> Result<()>;

    /// Update this state with some input.
    fn update(&mut self, input: Input) -> Result<()>;

    /// Produce a single value from the state, along with a bool indicating if
    /// the value is valid.
    fn finalize(self) -> Result<(Output, bool)>;
}
