use hassprom_core::error::Result;
use hassprom_core::{MetricDesc, State};

use super::HandlerCtx;
use crate::convert::state_as_number;

const DIRECTION_FORWARD: &str = "forward";
const DIRECTION_REVERSE: &str = "reverse";

pub fn fan(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    if let Some(value) = state_as_number(state) {
        ctx.set(state, MetricDesc::gauge("fan_state", "State of the fan (0/1)"), value)?;
    }

    if let Some(pct) = state.attr_f64("percentage") {
        ctx.set(
            state,
            MetricDesc::gauge("fan_speed_percent", "Fan speed percent (0-100)"),
            pct,
        )?;
    }

    if let Some(osc) = state.attr_f64("oscillating") {
        ctx.set(
            state,
            MetricDesc::gauge("fan_is_oscillating", "Whether the fan is oscillating (0/1)"),
            osc,
        )?;
    }

    let presets = state.attr_str_list("preset_modes");
    if let Some(preset) = state.attr_str("preset_mode").filter(|m| !m.is_empty()) {
        ctx.set_enum(
            state,
            MetricDesc::gauge("fan_preset_mode", "Fan preset mode enum"),
            "mode",
            &presets,
            preset,
        )?;
    }

    match state.attr_str("direction") {
        Some(dir @ (DIRECTION_FORWARD | DIRECTION_REVERSE)) => ctx.set(
            state,
            MetricDesc::gauge("fan_direction_reversed", "Fan direction reversed (bool)"),
            if dir == DIRECTION_REVERSE { 1.0 } else { 0.0 },
        ),
        _ => Ok(()),
    }
}
