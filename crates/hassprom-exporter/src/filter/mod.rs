//! Entity selection layer (include/exclude filter, per-entity overrides).
//!
//! Compiles filter and component configuration into lookup structures the
//! exporter consults on every observation.

pub mod component;
pub mod entity_filter;
pub mod glob;

pub use component::ComponentOverrides;
pub use entity_filter::EntityFilter;
pub use glob::Glob;
