//! Domain dispatch table.
//!
//! Maps an entity domain (`sensor`, `light`, ...) to the handler that turns
//! its state into metrics.

pub mod table;

pub use table::{DomainHandler, HandlerTable};
