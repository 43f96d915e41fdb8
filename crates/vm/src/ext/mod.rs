/// Execution utilities for running interpreters under a step budget
pub mod exec;

/// ASCII encoding of inputs and decoding of outputs
pub mod ascii;

/// Chains of interpreters feeding each other's inputs
pub mod pipeline;
