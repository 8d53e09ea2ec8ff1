//! Metric bookkeeping for entity observations.
//!
//! Families are created lazily under a namespaced, sanitized name. Every
//! label set written on behalf of an entity is remembered in a reverse index
//! so it can be retracted when the entity is renamed, disabled, removed, or
//! drops into an ignored state. Exposition works on a point-in-time snapshot.

pub mod expose;
pub mod labels;
pub mod name;
pub mod registry;

pub use expose::{encode_text, CONTENT_TYPE};
pub use labels::Labels;
pub use name::sanitize_metric_name;
pub use registry::{FamilySnapshot, MetricDesc, MetricKey, MetricKind, MetricRegistry};
