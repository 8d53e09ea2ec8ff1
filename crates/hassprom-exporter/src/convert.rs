//! State/unit coercion helpers shared by domain handlers.

use chrono::DateTime;
use tracing::debug;

use hassprom_core::model::state::{
    STATE_ABOVE_HORIZON, STATE_BELOW_HORIZON, STATE_CLOSED, STATE_HOME, STATE_LOCKED,
    STATE_NOT_HOME, STATE_OFF, STATE_ON, STATE_OPEN, STATE_UNKNOWN, STATE_UNLOCKED,
};
use hassprom_core::State;

pub const UNIT_CELSIUS: &str = "°C";
pub const UNIT_FAHRENHEIT: &str = "°F";
pub const UNIT_PERCENT: &str = "%";
pub const DEVICE_CLASS_TIMESTAMP: &str = "timestamp";

const ONE_STATES: [&str; 5] = [STATE_ON, STATE_LOCKED, STATE_ABOVE_HORIZON, STATE_OPEN, STATE_HOME];
const ZERO_STATES: [&str; 6] = [
    STATE_OFF,
    STATE_UNLOCKED,
    STATE_UNKNOWN,
    STATE_CLOSED,
    STATE_BELOW_HORIZON,
    STATE_NOT_HOME,
];

/// Numeric reading of a state, or `None` when it has none.
///
/// Timestamp sensors parse RFC 3339 into epoch seconds; binary-ish states map
/// to 1/0; anything else must parse as a float.
pub fn state_as_number(state: &State) -> Option<f64> {
    let s = state.state.as_str();
    let value = if state.device_class() == Some(DEVICE_CLASS_TIMESTAMP) {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) / 1e9)
    } else if ONE_STATES.contains(&s) {
        Some(1.0)
    } else if ZERO_STATES.contains(&s) {
        Some(0.0)
    } else {
        s.trim().parse::<f64>().ok()
    };

    if value.is_none() {
        debug!(entity_id = %state.entity_id, state = %s, "could not convert state to float");
    }
    value
}

/// Metric-name form of a unit of measurement.
///
/// `°C`/`°F` -> `celsius` (Fahrenheit readings are converted), `%` ->
/// `percent`, otherwise `/` becomes `_per_` and the result is lowercased.
/// Missing or empty units yield `None`.
pub fn unit_string(unit: Option<&str>) -> Option<String> {
    let unit = unit?;
    let out = match unit {
        UNIT_CELSIUS | UNIT_FAHRENHEIT => "celsius".to_string(),
        UNIT_PERCENT => "percent".to_string(),
        other => other.replace('/', "_per_").to_lowercase(),
    };
    if out.is_empty() { None } else { Some(out) }
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) / 1.8
}

/// Convert when the entity reports Fahrenheit.
pub fn normalize_temperature(state: &State, value: f64) -> f64 {
    if state.unit_of_measurement() == Some(UNIT_FAHRENHEIT) {
        fahrenheit_to_celsius(value)
    } else {
        value
    }
}
