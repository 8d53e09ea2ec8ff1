//! Entity state and host event contracts.
//!
//! - `State`: one entity's current state string plus its attribute map.
//! - `Event`: the two host notifications the exporter reacts to
//!   (state changes and entity-registry updates).
//!
//! Both are plain serde types so they can arrive as JSON over HTTP or be
//! built directly in tests.

pub mod event;
pub mod state;

pub use event::{Event, EventType, RegistryAction};
pub use state::{split_entity_id, State};
