//! Rawbridge Core - Metadata snapshot model and marshaler
//!
//! This crate holds the engine-independent half of rawbridge: the typed
//! snapshot of a RAW file's metadata and the pure marshaler that turns a
//! snapshot into a uniform `serde_json::Value` tree. It has no I/O and no
//! decoder dependency; the `rawbridge` crate populates snapshots and
//! drives the lifecycle.

// The larger makernote trees exceed the default limit when expanded
// through `json!`.
#![recursion_limit = "256"]

pub mod convert;
pub mod marshal;
pub mod snapshot;

pub use marshal::marshal;
pub use snapshot::Snapshot;
