use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const STATE_ON: &str = "on";
pub const STATE_OFF: &str = "off";
pub const STATE_OPEN: &str = "open";
pub const STATE_OPENING: &str = "opening";
pub const STATE_CLOSED: &str = "closed";
pub const STATE_CLOSING: &str = "closing";
pub const STATE_LOCKED: &str = "locked";
pub const STATE_UNLOCKED: &str = "unlocked";
pub const STATE_HOME: &str = "home";
pub const STATE_NOT_HOME: &str = "not_home";
pub const STATE_ABOVE_HORIZON: &str = "above_horizon";
pub const STATE_BELOW_HORIZON: &str = "below_horizon";
pub const STATE_UNAVAILABLE: &str = "unavailable";
pub const STATE_UNKNOWN: &str = "unknown";

/// States that mean "no usable reading".
pub const IGNORED_STATES: [&str; 2] = [STATE_UNAVAILABLE, STATE_UNKNOWN];

pub const ATTR_FRIENDLY_NAME: &str = "friendly_name";
pub const ATTR_DEVICE_CLASS: &str = "device_class";
pub const ATTR_UNIT_OF_MEASUREMENT: &str = "unit_of_measurement";
pub const ATTR_BATTERY_LEVEL: &str = "battery_level";

/// Snapshot of one entity as reported by the host.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct State {
    /// `<domain>.<object_id>`.
    pub entity_id: String,
    pub state: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// Unix timestamp (seconds) of the last update.
    #[serde(default)]
    pub last_updated: f64,
}

impl State {
    pub fn new(entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            attributes: Map::new(),
            last_updated: 0.0,
        }
    }

    /// Builder helper, mostly for tests and priming.
    pub fn with_attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn with_last_updated(mut self, ts: f64) -> Self {
        self.last_updated = ts;
        self
    }

    pub fn domain(&self) -> &str {
        split_entity_id(&self.entity_id).0
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attr(key).and_then(Value::as_str)
    }

    /// Coerce an attribute to a float.
    ///
    /// Numbers pass through, booleans map to 0/1, strings are parsed.
    /// Anything else (lists, objects, junk strings) yields `None`.
    pub fn attr_f64(&self, key: &str) -> Option<f64> {
        self.attr(key).and_then(value_as_f64)
    }

    /// String members of a list attribute; non-strings are skipped.
    pub fn attr_str_list(&self, key: &str) -> Vec<&str> {
        self.attr(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn friendly_name(&self) -> Option<&str> {
        self.attr_str(ATTR_FRIENDLY_NAME)
    }

    pub fn device_class(&self) -> Option<&str> {
        self.attr_str(ATTR_DEVICE_CLASS)
    }

    pub fn unit_of_measurement(&self) -> Option<&str> {
        self.attr_str(ATTR_UNIT_OF_MEASUREMENT)
    }

    /// True for `unavailable` / `unknown`.
    pub fn is_ignored(&self) -> bool {
        IGNORED_STATES.contains(&self.state.as_str())
    }
}

/// Split `light.kitchen` into (`light`, `kitchen`).
pub fn split_entity_id(entity_id: &str) -> (&str, &str) {
    entity_id.split_once('.').unwrap_or((entity_id, ""))
}

/// Lenient float coercion shared by attribute readers.
pub fn value_as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
