//! Shared test infrastructure.



/// Sanity checks for the infrastructure itself.
pub mod infrastructure_tests;

/// Mock devices.
pub mod mocks;
