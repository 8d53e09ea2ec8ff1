use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::state::State;

/// Entity registry change kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryAction {
    Create,
    Update,
    Remove,
}

/// Event kinds, used as subscription keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    StateChanged,
    EntityRegistryUpdated,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::StateChanged => "state_changed",
            EventType::EntityRegistryUpdated => "entity_registry_updated",
        }
    }
}

/// Host notification (JSON field `event_type` selects the variant).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum Event {
    StateChanged {
        entity_id: String,
        #[serde(default)]
        old_state: Option<State>,
        #[serde(default)]
        new_state: Option<State>,
    },
    EntityRegistryUpdated {
        action: RegistryAction,
        entity_id: String,
        /// For `update`: changed field -> previous value.
        #[serde(default)]
        changes: Map<String, Value>,
    },
}

impl Event {
    pub fn event_type(&self) -> EventType {
        match self {
            Event::StateChanged { .. } => EventType::StateChanged,
            Event::EntityRegistryUpdated { .. } => EventType::EntityRegistryUpdated,
        }
    }

    pub fn entity_id(&self) -> &str {
        match self {
            Event::StateChanged { entity_id, .. } => entity_id,
            Event::EntityRegistryUpdated { entity_id, .. } => entity_id,
        }
    }

    /// Convenience constructor for a state transition.
    pub fn state_changed(old_state: Option<State>, new_state: State) -> Self {
        Event::StateChanged {
            entity_id: new_state.entity_id.clone(),
            old_state,
            new_state: Some(new_state),
        }
    }
}
