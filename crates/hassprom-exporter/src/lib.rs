//! hassprom exporter library entry.
//!
//! Wires configuration, the entity filter, per-domain handlers, the event bus
//! and the HTTP surface around a `MetricRegistry`. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod bus;
pub mod config;
pub mod convert;
pub mod dispatch;
pub mod exporter;
pub mod filter;
pub mod handlers;
pub mod obs;
pub mod ops;
pub mod router;
