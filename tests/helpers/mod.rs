//! Test helpers module
//!
//! This module provides utilities and helpers for testing the GroupChat client.
//! It includes a mock Convex deployment, test data builders and test context setup.

#![allow(dead_code)]

pub mod convex_mock;
pub mod test_context;
pub mod test_data;

pub use convex_mock::*;
pub use test_context::*;
pub use test_data::*;
