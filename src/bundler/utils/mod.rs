//! Shared utilities for bundle builds.

pub mod fs;
