//! hassprom core: entity state model, metric registry, and error types.
//!
//! This crate holds the bookkeeping that maps entity observations onto
//! exported metric families, plus the event/state contracts shared by the
//! exporter and tooling. It carries no runtime or HTTP dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `HasspromError`/`Result` so a bad
//! observation never takes the host process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;
pub mod model;

/// Shared result type.
pub use error::{HasspromError, Result};
pub use metrics::{Labels, MetricDesc, MetricKey, MetricKind, MetricRegistry};
pub use model::{Event, RegistryAction, State};
