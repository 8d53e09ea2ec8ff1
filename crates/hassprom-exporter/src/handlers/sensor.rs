//! Sensor naming chain.
//!
//! The metric a sensor lands in is the first hit of, in order: per-entity
//! component override, global override, timestamp class, device class,
//! configured default, unit/plain fallback.

use hassprom_core::error::Result;
use hassprom_core::{MetricDesc, State};

use super::{simple::battery, HandlerCtx};
use crate::convert::{normalize_temperature, state_as_number, unit_string, DEVICE_CLASS_TIMESTAMP};

type NameRule = fn(&HandlerCtx<'_>, &State, Option<&str>) -> Option<String>;

const NAME_RULES: [NameRule; 6] = [
    component_override,
    global_override,
    timestamp_metric,
    device_class_metric,
    default_metric,
    fallback_metric,
];

fn component_override(ctx: &HandlerCtx<'_>, state: &State, _unit: Option<&str>) -> Option<String> {
    ctx.settings
        .components
        .override_metric(&state.entity_id)
        .map(str::to_string)
}

fn global_override(ctx: &HandlerCtx<'_>, _state: &State, _unit: Option<&str>) -> Option<String> {
    ctx.settings.override_metric.clone()
}

fn timestamp_metric(_ctx: &HandlerCtx<'_>, state: &State, _unit: Option<&str>) -> Option<String> {
    (state.device_class() == Some(DEVICE_CLASS_TIMESTAMP))
        .then(|| format!("sensor_{DEVICE_CLASS_TIMESTAMP}_seconds"))
}

fn device_class_metric(_ctx: &HandlerCtx<'_>, state: &State, unit: Option<&str>) -> Option<String> {
    let class = state.device_class()?;
    Some(match unit {
        Some(u) => format!("sensor_{class}_{u}"),
        None => format!("sensor_{class}"),
    })
}

fn default_metric(ctx: &HandlerCtx<'_>, _state: &State, _unit: Option<&str>) -> Option<String> {
    ctx.settings.default_metric.clone()
}

fn fallback_metric(_ctx: &HandlerCtx<'_>, _state: &State, unit: Option<&str>) -> Option<String> {
    Some(match unit {
        Some(u) => format!("sensor_unit_{u}"),
        None => "sensor_state".to_string(),
    })
}

/// Metric name this sensor state is exported under.
pub fn sensor_metric_name(ctx: &HandlerCtx<'_>, state: &State) -> String {
    let unit = unit_string(state.unit_of_measurement());
    NAME_RULES
        .iter()
        .find_map(|rule| rule(ctx, state, unit.as_deref()))
        .unwrap_or_else(|| "sensor_state".to_string())
}

pub fn sensor(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    if let Some(value) = state_as_number(state) {
        let name = sensor_metric_name(ctx, state);
        let help = match unit_string(state.unit_of_measurement()) {
            Some(unit) => format!("Sensor data measured in {unit}"),
            None => "State of the sensor".to_string(),
        };
        ctx.set(
            state,
            MetricDesc::gauge(&name, &help),
            normalize_temperature(state, value),
        )?;
    }
    battery(ctx, state)
}
