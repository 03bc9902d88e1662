//! Shared utilities.

pub mod testutil;
