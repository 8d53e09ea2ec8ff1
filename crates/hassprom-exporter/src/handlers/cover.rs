use hassprom_core::error::Result;
use hassprom_core::model::state::{STATE_CLOSED, STATE_CLOSING, STATE_OPEN, STATE_OPENING};
use hassprom_core::{MetricDesc, State};

use super::HandlerCtx;

pub const COVER_STATES: [&str; 4] = [STATE_CLOSED, STATE_CLOSING, STATE_OPEN, STATE_OPENING];

pub fn cover(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    ctx.set_enum(
        state,
        MetricDesc::gauge("cover_state", "State of the cover (0/1)"),
        "state",
        &COVER_STATES,
        &state.state,
    )?;

    if let Some(position) = state.attr_f64("current_position") {
        ctx.set(
            state,
            MetricDesc::gauge("cover_position", "Position of the cover (0-100)"),
            position,
        )?;
    }

    if let Some(tilt) = state.attr_f64("current_tilt_position") {
        ctx.set(
            state,
            MetricDesc::gauge("cover_tilt_position", "Tilt Position of the cover (0-100)"),
            tilt,
        )?;
    }
    Ok(())
}
