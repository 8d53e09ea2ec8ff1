use hassprom_core::error::Result;
use hassprom_core::{MetricDesc, State};

use super::HandlerCtx;
use crate::config::TemperatureUnit;
use crate::convert::fahrenheit_to_celsius;

pub const HVAC_ACTIONS: [&str; 8] = [
    "cooling",
    "defrosting",
    "drying",
    "fan",
    "heating",
    "idle",
    "off",
    "preheating",
];

/// (attribute, metric, help)
const TEMPERATURES: [(&str, &str, &str); 4] = [
    (
        "temperature",
        "climate_target_temperature_celsius",
        "Target temperature in degrees Celsius",
    ),
    (
        "target_temp_high",
        "climate_target_temperature_high_celsius",
        "Target high temperature in degrees Celsius",
    ),
    (
        "target_temp_low",
        "climate_target_temperature_low_celsius",
        "Target low temperature in degrees Celsius",
    ),
    (
        "current_temperature",
        "climate_current_temperature_celsius",
        "Current temperature in degrees Celsius",
    ),
];

/// `(current attribute, options attribute, metric, help)` for mode enums.
const MODE_ENUMS: [(&str, &str, &str, &str); 2] = [
    ("preset_mode", "preset_modes", "climate_preset_mode", "Preset mode enum"),
    ("fan_mode", "fan_modes", "climate_fan_mode", "Fan mode enum"),
];

pub fn climate(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    for (attr, name, help) in TEMPERATURES {
        let Some(mut temp) = state.attr_f64(attr) else {
            continue;
        };
        if ctx.settings.climate_units == TemperatureUnit::Fahrenheit {
            temp = fahrenheit_to_celsius(temp);
        }
        ctx.set(state, MetricDesc::gauge(name, help), temp)?;
    }

    if let Some(action) = state.attr_str("hvac_action").filter(|a| !a.is_empty()) {
        ctx.set_enum(
            state,
            MetricDesc::gauge("climate_action", "HVAC action"),
            "action",
            &HVAC_ACTIONS,
            action,
        )?;
    }

    let hvac_modes = state.attr_str_list("hvac_modes");
    if !state.state.is_empty() {
        ctx.set_enum(
            state,
            MetricDesc::gauge("climate_mode", "HVAC mode"),
            "mode",
            &hvac_modes,
            &state.state,
        )?;
    }

    for (current_attr, options_attr, name, help) in MODE_ENUMS {
        let options = state.attr_str_list(options_attr);
        if let Some(current) = state.attr_str(current_attr).filter(|m| !m.is_empty()) {
            ctx.set_enum(state, MetricDesc::gauge(name, help), "mode", &options, current)?;
        }
    }
    Ok(())
}
