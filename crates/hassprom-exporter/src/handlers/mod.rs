//! Per-domain metric handlers.
//!
//! Each handler reads one entity state and records zero or more samples via
//! [`HandlerCtx`]. Handlers return `Err` only for caller bugs (label
//! conflicts, kind clashes); missing or unparseable readings are skipped.

mod alarm;
mod climate;
mod cover;
mod fan;
mod humidifier;
mod light;
mod sensor;
mod simple;

pub use alarm::{alarm_control_panel, ALARM_STATES};
pub use climate::{climate, HVAC_ACTIONS};
pub use cover::{cover, COVER_STATES};
pub use fan::fan;
pub use humidifier::humidifier;
pub use light::light;
pub use sensor::sensor;
pub use simple::{
    automation, battery, binary_sensor, counter, device_tracker, input_boolean, input_number,
    lock, number, person, switch, update, zwave,
};

use hassprom_core::error::Result;
use hassprom_core::{Labels, MetricDesc, MetricRegistry, State};

use crate::exporter::ExportSettings;

/// Borrowed view handed to every handler.
pub struct HandlerCtx<'a> {
    pub registry: &'a MetricRegistry,
    pub settings: &'a ExportSettings,
}

impl<'a> HandlerCtx<'a> {
    pub fn new(registry: &'a MetricRegistry, settings: &'a ExportSettings) -> Self {
        Self { registry, settings }
    }

    /// Record `value` under the entity's standard labels.
    pub fn set(&self, state: &State, desc: MetricDesc<'_>, value: f64) -> Result<()> {
        let labels = entity_labels(state)?;
        self.registry.record(&state.entity_id, &desc, &labels, value)
    }

    /// Record with extra labels appended (e.g. `mode`, `state`).
    pub fn set_with(
        &self,
        state: &State,
        desc: MetricDesc<'_>,
        extra: &[(&str, &str)],
        value: f64,
    ) -> Result<()> {
        let labels = entity_labels(state)?.merged(extra)?;
        self.registry.record(&state.entity_id, &desc, &labels, value)
    }

    /// Counter +1.
    pub fn inc(&self, state: &State, desc: MetricDesc<'_>) -> Result<()> {
        self.set(state, desc, 1.0)
    }

    /// One 0/1 gauge per option, 1 for the option equal to `current`.
    pub fn set_enum(
        &self,
        state: &State,
        desc: MetricDesc<'_>,
        label: &str,
        options: &[&str],
        current: &str,
    ) -> Result<()> {
        for option in options {
            let v = if *option == current { 1.0 } else { 0.0 };
            self.set_with(state, desc, &[(label, *option)], v)?;
        }
        Ok(())
    }
}

/// `entity`, `domain`, `friendly_name` (empty when the entity has none).
pub fn entity_labels(state: &State) -> Result<Labels> {
    Labels::new()
        .with("entity", state.entity_id.as_str())?
        .with("domain", state.domain())?
        .with("friendly_name", state.friendly_name().unwrap_or_default())
}
