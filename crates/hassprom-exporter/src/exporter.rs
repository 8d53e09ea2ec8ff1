//! State exporter: host events in, registry updates out.
//!
//! Per state observation:
//! - always: `state_change` (+1), `entity_available`, `last_updated_time_seconds`
//! - ignored state (`unavailable`/`unknown`): retract everything except the
//!   retained availability metrics
//! - otherwise: run the domain handler, if one is registered
//!
//! Registry events retract label sets for removed, disabled or re-identified
//! entities. A friendly-name change retracts before the new state is recorded.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use hassprom_core::error::Result;
use hassprom_core::{Event, MetricDesc, MetricRegistry, RegistryAction, State};

use crate::config::{ExporterConfig, TemperatureUnit};
use crate::dispatch::HandlerTable;
use crate::filter::{ComponentOverrides, EntityFilter};
use crate::handlers::HandlerCtx;
use crate::obs::ExporterMetrics;

/// Metrics every observed entity gets, kept by default while it is unavailable.
pub const AVAILABILITY_METRICS: [&str; 3] = [
    "state_change",
    "entity_available",
    "last_updated_time_seconds",
];

const STATE_CHANGE: MetricDesc<'static> =
    MetricDesc::counter("state_change", "The number of state changes");
const ENTITY_AVAILABLE: MetricDesc<'static> = MetricDesc::gauge(
    "entity_available",
    "Entity is available (not in the unavailable or unknown state)",
);
const LAST_UPDATED: MetricDesc<'static> =
    MetricDesc::gauge("last_updated_time_seconds", "The last_updated timestamp");

/// Handler-visible settings compiled from config.
#[derive(Debug, Clone, Default)]
pub struct ExportSettings {
    pub climate_units: TemperatureUnit,
    pub default_metric: Option<String>,
    pub override_metric: Option<String>,
    pub components: ComponentOverrides,
    pub retain_on_unavailable: Vec<String>,
}

impl ExportSettings {
    pub fn from_config(cfg: &ExporterConfig) -> Result<Self> {
        Ok(Self {
            climate_units: cfg.exporter.climate_units,
            default_metric: cfg.default_metric.clone(),
            override_metric: cfg.override_metric.clone(),
            components: ComponentOverrides::compile(
                &cfg.component_config,
                &cfg.component_config_domain,
                &cfg.component_config_glob,
            )?,
            retain_on_unavailable: cfg.exporter.retain_on_unavailable.clone(),
        })
    }
}

pub struct StateExporter {
    registry: Arc<MetricRegistry>,
    filter: EntityFilter,
    settings: ExportSettings,
    handlers: HandlerTable,
    stats: Arc<ExporterMetrics>,
}

impl StateExporter {
    pub fn new(
        registry: Arc<MetricRegistry>,
        filter: EntityFilter,
        settings: ExportSettings,
        stats: Arc<ExporterMetrics>,
    ) -> Self {
        Self {
            registry,
            filter,
            settings,
            handlers: HandlerTable::builtin(),
            stats,
        }
    }

    pub fn from_config(
        cfg: &ExporterConfig,
        registry: Arc<MetricRegistry>,
        stats: Arc<ExporterMetrics>,
    ) -> Result<Self> {
        let filter = EntityFilter::compile(&cfg.filter)?;
        let settings = ExportSettings::from_config(cfg)?;
        Ok(Self::new(registry, filter, settings, stats))
    }

    /// Replace the handler table (extra or overridden domains).
    pub fn with_handlers(mut self, handlers: HandlerTable) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn registry(&self) -> &Arc<MetricRegistry> {
        &self.registry
    }

    pub fn stats(&self) -> &Arc<ExporterMetrics> {
        &self.stats
    }

    /// Bus entry point.
    pub fn handle_event(&self, event: &Event) {
        self.stats
            .events
            .inc(&[("type", event.event_type().as_str())]);
        match event {
            Event::StateChanged {
                old_state,
                new_state,
                ..
            } => self.handle_state_changed(old_state.as_ref(), new_state.as_ref()),
            Event::EntityRegistryUpdated {
                action,
                entity_id,
                changes,
            } => self.handle_registry_updated(*action, entity_id, changes),
        }
    }

    pub fn handle_state_changed(&self, old_state: Option<&State>, new_state: Option<&State>) {
        let Some(state) = new_state else {
            return;
        };

        if !self.filter.matches(&state.entity_id) {
            debug!(entity_id = %state.entity_id, "filtered out entity");
            self.stats.events_filtered.inc(&[]);
            return;
        }

        if let Some(old) = old_state {
            if old.friendly_name() != state.friendly_name() {
                self.remove_labelsets::<&str>(&old.entity_id, &[], "rename");
            }
        }

        self.handle_state(state);
    }

    /// Record one state. Failures stay scoped to this observation.
    pub fn handle_state(&self, state: &State) {
        debug!(entity_id = %state.entity_id, "handling state update");
        if let Err(e) = self.observe(state) {
            warn!(entity_id = %state.entity_id, error = %e, code = e.code().as_str(), "state observation rejected");
            self.stats
                .observation_errors
                .inc(&[("domain", state.domain())]);
        }
    }

    fn observe(&self, state: &State) -> Result<()> {
        let ctx = HandlerCtx::new(&self.registry, &self.settings);

        ctx.inc(state, STATE_CHANGE)?;
        ctx.set(
            state,
            ENTITY_AVAILABLE,
            if state.is_ignored() { 0.0 } else { 1.0 },
        )?;
        ctx.set(state, LAST_UPDATED, state.last_updated)?;

        if state.is_ignored() {
            self.remove_labelsets(
                &state.entity_id,
                self.settings.retain_on_unavailable.as_slice(),
                "unavailable",
            );
            return Ok(());
        }

        if state.state.is_empty() {
            return Ok(());
        }
        match self.handlers.get(state.domain()) {
            Some(handler) => handler(&ctx, state),
            None => Ok(()),
        }
    }

    pub fn handle_registry_updated(
        &self,
        action: RegistryAction,
        entity_id: &str,
        changes: &Map<String, Value>,
    ) {
        debug!(entity_id, ?action, "handling entity registry update");
        match action {
            RegistryAction::Create => {}
            RegistryAction::Remove => {
                self.remove_labelsets::<&str>(entity_id, &[], "removed");
            }
            RegistryAction::Update => {
                // `changes` carries previous values
                if let Some(previous) = changes.get("entity_id") {
                    if let Some(previous) = previous.as_str().filter(|s| !s.is_empty()) {
                        self.remove_labelsets::<&str>(previous, &[], "renamed_id");
                    }
                } else if changes.contains_key("disabled_by") {
                    self.remove_labelsets::<&str>(entity_id, &[], "disabled");
                }
            }
        }
    }

    /// Initial load: record every state the filter accepts. Returns how many
    /// were recorded.
    pub fn prime(&self, states: &[State]) -> usize {
        let mut n = 0;
        for state in states.iter().filter(|s| self.filter.matches(&s.entity_id)) {
            self.handle_state(state);
            n += 1;
        }
        n
    }

    fn remove_labelsets<S: AsRef<str>>(&self, entity_id: &str, exempt: &[S], reason: &str) {
        let removed = self.registry.retract(entity_id, exempt);
        if removed > 0 {
            debug!(entity_id, removed, reason, "retracted labelsets");
            self.stats
                .labelsets_removed
                .add(&[("reason", reason)], removed as u64);
        }
    }
}
