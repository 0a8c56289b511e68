//! Test-driven development helpers and generators.

#[allow(missing_docs)]
pub mod tdd_basic;
pub mod tdd_workflow;
pub mod test_generator;
/// Test execution and TDD support functionality.
pub mod test_runner;
