//! Exporter self-observability.
//!
//! Counters about the exporter's own event handling, kept apart from the
//! entity registry and appended to the `/metrics` body.

pub mod metrics;

pub use metrics::{CounterVec, ExporterMetrics};
