//! Self-metrics for the exporter.
//!
//! Counters with dynamic labels backed by `DashMap`. Labels are flattened into
//! sorted key vectors to keep deterministic ordering.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value (0 when never incremented).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format, label sets sorted.
    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", name, help);
        let _ = writeln!(out, "# TYPE {} counter", name);
        let mut rows: Vec<(Vec<(String, String)>, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();
        for (key, val) in rows {
            let label_str = key
                .iter()
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            if label_str.is_empty() {
                let _ = writeln!(out, "{} {}", name, val);
            } else {
                let _ = writeln!(out, "{}{{{}}} {}", name, label_str, val);
            }
        }
    }
}

#[derive(Default)]
pub struct ExporterMetrics {
    /// `type`: state_changed | entity_registry_updated
    pub events: CounterVec,
    pub events_filtered: CounterVec,
    /// `domain`: handler domain that failed
    pub observation_errors: CounterVec,
    /// `reason`: rename | unavailable | removed | disabled | renamed_id
    pub labelsets_removed: CounterVec,
}

impl ExporterMetrics {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.events.render("hassprom_events_total", "Host events received", &mut out);
        self.events_filtered.render(
            "hassprom_events_filtered_total",
            "State changes dropped by the entity filter",
            &mut out,
        );
        self.observation_errors.render(
            "hassprom_observation_errors_total",
            "Observations rejected by a domain handler",
            &mut out,
        );
        self.labelsets_removed.render(
            "hassprom_labelsets_removed_total",
            "Label sets retracted from the registry",
            &mut out,
        );
        out
    }
}
