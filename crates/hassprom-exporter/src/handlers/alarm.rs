use hassprom_core::error::Result;
use hassprom_core::{MetricDesc, State};

use super::HandlerCtx;

pub const ALARM_STATES: [&str; 10] = [
    "armed_away",
    "armed_custom_bypass",
    "armed_home",
    "armed_night",
    "armed_vacation",
    "arming",
    "disarmed",
    "disarming",
    "pending",
    "triggered",
];

pub fn alarm_control_panel(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    if state.state.is_empty() {
        return Ok(());
    }
    ctx.set_enum(
        state,
        MetricDesc::gauge("alarm_control_panel_state", "State of the alarm control panel (0/1)"),
        "state",
        &ALARM_STATES,
        &state.state,
    )
}
