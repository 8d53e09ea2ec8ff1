use hassprom_core::error::Result;
use hassprom_core::{MetricDesc, State};

use super::HandlerCtx;
use crate::convert::state_as_number;

pub fn humidifier(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    // a zero target is treated as "not set"
    if let Some(target) = state.attr_f64("humidity").filter(|h| *h != 0.0) {
        ctx.set(
            state,
            MetricDesc::gauge("humidifier_target_humidity_percent", "Target Relative Humidity"),
            target,
        )?;
    }

    if let Some(value) = state_as_number(state) {
        ctx.set(
            state,
            MetricDesc::gauge("humidifier_state", "State of the humidifier (0/1)"),
            value,
        )?;
    }

    let available = state.attr_str_list("available_modes");
    if let Some(mode) = state.attr_str("mode").filter(|m| !m.is_empty()) {
        ctx.set_enum(
            state,
            MetricDesc::gauge("humidifier_mode", "Humidifier Mode"),
            "mode",
            &available,
            mode,
        )?;
    }
    Ok(())
}
