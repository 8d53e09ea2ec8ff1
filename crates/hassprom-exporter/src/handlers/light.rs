use hassprom_core::error::Result;
use hassprom_core::model::state::STATE_ON;
use hassprom_core::{MetricDesc, State};

use super::HandlerCtx;
use crate::convert::state_as_number;

/// Brightness 0..100. An "on" light without a brightness attribute reads 100.
pub fn light(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    let Some(mut value) = state_as_number(state) else {
        return Ok(());
    };

    if state.state == STATE_ON {
        if let Some(brightness) = state.attr_f64("brightness") {
            value = brightness / 255.0;
        }
    }

    ctx.set(
        state,
        MetricDesc::gauge("light_brightness_percent", "Light brightness percentage (0..100)"),
        value * 100.0,
    )
}
