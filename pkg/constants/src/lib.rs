//! Centralized constants for kubectl-revisions.
//!
//! Well-known Kubernetes keys, API paths and defaults live here.
//! Change a value in one place and it applies everywhere.

pub mod api;
pub mod diff;
pub mod labels;
pub mod paths;
