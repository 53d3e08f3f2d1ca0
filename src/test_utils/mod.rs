//! Test helpers, available to unit tests and behind the `test-utils` feature.

pub mod mocks;

pub use mocks::MockGateway;
