//! Helpers over the `k8s-openapi` object model used by kubectl-revisions.
//!
//! Objects are the upstream API types. This crate adds what the revision
//! engine needs on top: resource addressing, workload polymorphism, owner
//! checks, selector conversion and decoding of revision snapshots.

pub mod codec;
pub mod meta;
pub mod pod;
pub mod selector;
pub mod workload;
