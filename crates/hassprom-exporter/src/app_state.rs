//! Shared application state for the exporter service.
//!
//! Owns the registry for the lifetime of the integration: built from config
//! at startup, wired to the bus through explicit subscriptions, and torn down
//! (subscriptions dropped, registry cleared) on shutdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use hassprom_core::error::{HasspromError, Result};
use hassprom_core::model::EventType;
use hassprom_core::{Event, MetricRegistry, State};

use crate::bus::{EventBus, Subscription};
use crate::config::ExporterConfig;
use crate::exporter::StateExporter;
use crate::obs::ExporterMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    registry: Arc<MetricRegistry>,
    exporter: Arc<StateExporter>,
    stats: Arc<ExporterMetrics>,
    bus: EventBus,
    subscriptions: Mutex<Vec<Subscription>>,
    draining: AtomicBool,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let registry = Arc::new(MetricRegistry::new(&cfg.exporter.namespace));
        let stats = Arc::new(ExporterMetrics::default());
        let exporter = Arc::new(StateExporter::from_config(
            &cfg,
            Arc::clone(&registry),
            Arc::clone(&stats),
        )?);

        let bus = EventBus::new();
        let subscriptions: Vec<Subscription> = [EventType::StateChanged, EventType::EntityRegistryUpdated]
            .into_iter()
            .map(|ty| {
                let exporter = Arc::clone(&exporter);
                bus.subscribe(ty, move |ev| exporter.handle_event(ev))
            })
            .collect();

        info!(
            namespace = %cfg.exporter.namespace,
            auth = cfg.exporter.auth_token.is_some(),
            "exporter state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                exporter,
                stats,
                bus,
                subscriptions: Mutex::new(subscriptions),
                draining: AtomicBool::new(false),
            }),
        })
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<MetricRegistry> {
        Arc::clone(&self.inner.registry)
    }

    pub fn exporter(&self) -> Arc<StateExporter> {
        Arc::clone(&self.inner.exporter)
    }

    pub fn stats(&self) -> Arc<ExporterMetrics> {
        Arc::clone(&self.inner.stats)
    }

    pub fn bus(&self) -> &EventBus {
        &self.inner.bus
    }

    /// Publish a host event; returns handlers run (0 once shut down).
    pub fn publish(&self, event: &Event) -> usize {
        self.inner.bus.publish(event)
    }

    /// Feed an initial batch of states, serialized with bus dispatch.
    pub fn prime(&self, states: &[State]) -> usize {
        self.inner
            .bus
            .exclusive(|| self.inner.exporter.prime(states))
    }

    /// Check an `Authorization` header value against the configured token.
    pub fn authorize(&self, header: Option<&str>) -> Result<()> {
        let Some(expected) = self.inner.cfg.exporter.auth_token.as_deref() else {
            return Ok(());
        };
        match header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) if token == expected => Ok(()),
            _ => Err(HasspromError::Unauthorized),
        }
    }

    /// Registry exposition followed by exporter self-metrics.
    pub fn render_metrics(&self) -> String {
        let mut out = self.inner.registry.render();
        out.push_str(&self.inner.stats.render());
        out
    }

    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Relaxed)
    }

    /// Unsubscribe from the bus and drop all exported series.
    pub fn shutdown(&self) {
        if self.inner.draining.swap(true, Ordering::Relaxed) {
            return;
        }
        let subs: Vec<Subscription> = std::mem::take(
            &mut *self
                .inner
                .subscriptions
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        let n = subs.len();
        for sub in subs {
            sub.unsubscribe();
        }
        self.inner.registry.clear();
        info!(subscriptions = n, "exporter torn down");
    }
}
