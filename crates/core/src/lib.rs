//! surface-core
//!
//! Core library for API surface snapshots: an immutable symbol model of
//! classes, methods, and fields tagged with version metadata, a loader for
//! JSON/YAML snapshot documents, and a compatibility checker that reports
//! what changed between two snapshots and how serious each change is.
//!
//! All substantive logic lives here so it is fully testable and reusable from
//! multiple frontends; the `compare-surfaces` CLI is a thin wrapper.

pub mod check;
pub mod config;
pub mod context;
pub mod loader;
pub mod model;
pub mod report;

pub use check::{compare, compare_parallel, Finding, FindingKind, Severity};
pub use context::ComparisonContext;
pub use model::{MalformedSurfaceError, NotFoundError, Surface, SurfaceBuilder};

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
