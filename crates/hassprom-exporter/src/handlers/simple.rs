//! Domains exported as a single numeric gauge (plus small extras).

use hassprom_core::error::Result;
use hassprom_core::model::state::{value_as_f64, ATTR_BATTERY_LEVEL};
use hassprom_core::{MetricDesc, State};

use super::HandlerCtx;
use crate::convert::{normalize_temperature, state_as_number, unit_string};

fn numeric_state(ctx: &HandlerCtx<'_>, state: &State, name: &str, help: &str) -> Result<()> {
    match state_as_number(state) {
        Some(v) => ctx.set(state, MetricDesc::gauge(name, help), v),
        None => Ok(()),
    }
}

pub fn binary_sensor(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    numeric_state(ctx, state, "binary_sensor_state", "State of the binary sensor (0/1)")
}

pub fn input_boolean(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    numeric_state(ctx, state, "input_boolean_state", "State of the input boolean (0/1)")
}

pub fn device_tracker(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    numeric_state(ctx, state, "device_tracker_state", "State of the device tracker (0/1)")
}

pub fn person(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    numeric_state(ctx, state, "person_state", "State of the person (0/1)")
}

pub fn lock(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    numeric_state(ctx, state, "lock_state", "State of the lock (0/1)")
}

pub fn counter(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    numeric_state(ctx, state, "counter_value", "Value of counter entities")
}

pub fn update(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    numeric_state(
        ctx,
        state,
        "update_state",
        "Update state, indicating if an update is available (0/1)",
    )
}

/// `<domain>_state[_<unit>]`, Fahrenheit readings stored as Celsius.
fn numeric_with_unit(ctx: &HandlerCtx<'_>, state: &State, domain: &str, title: &str) -> Result<()> {
    let Some(value) = state_as_number(state) else {
        return Ok(());
    };
    let (name, help) = match unit_string(state.unit_of_measurement()) {
        Some(unit) => (
            format!("{domain}_state_{unit}"),
            format!("State of the {title} measured in {unit}"),
        ),
        None => (format!("{domain}_state"), format!("State of the {title}")),
    };
    ctx.set(state, MetricDesc::gauge(&name, &help), normalize_temperature(state, value))
}

pub fn input_number(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    numeric_with_unit(ctx, state, "input_number", "input number")
}

pub fn number(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    numeric_with_unit(ctx, state, "number", "number")
}

pub fn switch(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    numeric_state(ctx, state, "switch_state", "State of the switch (0/1)")?;
    attributes(ctx, state)
}

/// Every numeric attribute as `<domain>_attr_<key>`.
fn attributes(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    let domain = state.domain();
    for (key, raw) in &state.attributes {
        let Some(value) = value_as_f64(raw) else {
            continue;
        };
        let name = format!("{domain}_attr_{}", key.to_lowercase());
        let help = format!("{key} attribute of {domain} entity");
        ctx.set(state, MetricDesc::gauge(&name, &help), value)?;
    }
    Ok(())
}

pub fn battery(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    match state.attr_f64(ATTR_BATTERY_LEVEL) {
        Some(level) => ctx.set(
            state,
            MetricDesc::gauge(
                "battery_level_percent",
                "Battery level as a percentage of its capacity",
            ),
            level,
        ),
        None => Ok(()),
    }
}

pub fn zwave(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    battery(ctx, state)
}

pub fn automation(ctx: &HandlerCtx<'_>, state: &State) -> Result<()> {
    ctx.inc(
        state,
        MetricDesc::counter(
            "automation_triggered_count",
            "Count of times an automation has been triggered",
        ),
    )
}
