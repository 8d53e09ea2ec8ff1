//! Metric registry with a per-entity reverse index.
//!
//! Layout:
//! - `metric_name -> Family` (exported name, help, kind, label names, samples)
//! - `entity_id -> {MetricKey...}` (label sets written for that entity)
//!
//! Every sample has exactly one owning entity; a second entity writing the
//! same key is rejected, so retracting one entity never touches another's
//! samples.
//!
//! Both maps live behind one `RwLock` so `record` / `retract` are atomic with
//! respect to `snapshot`: a scrape never sees a sample whose index entry is
//! half-written.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{HasspromError, Result};
use crate::metrics::labels::Labels;
use crate::metrics::name::sanitize_metric_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

/// Static description of a metric as seen by a handler.
#[derive(Debug, Clone, Copy)]
pub struct MetricDesc<'a> {
    /// Logical (unprefixed, unsanitized) name.
    pub name: &'a str,
    pub help: &'a str,
    pub kind: MetricKind,
}

impl<'a> MetricDesc<'a> {
    pub const fn gauge(name: &'a str, help: &'a str) -> Self {
        Self { name, help, kind: MetricKind::Gauge }
    }

    pub const fn counter(name: &'a str, help: &'a str) -> Self {
        Self { name, help, kind: MetricKind::Counter }
    }
}

/// One label-set instance of one metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricKey {
    metric_name: String,
    label_values: Vec<String>,
}

impl MetricKey {
    pub fn new(metric_name: impl Into<String>, label_values: Vec<String>) -> Self {
        Self {
            metric_name: metric_name.into(),
            label_values,
        }
    }

    pub fn metric_name(&self) -> &str {
        &self.metric_name
    }

    pub fn label_values(&self) -> &[String] {
        &self.label_values
    }
}

#[derive(Debug)]
struct Sample {
    value: f64,
    owner: String,
}

#[derive(Debug)]
struct Family {
    exported_name: String,
    help: String,
    kind: MetricKind,
    label_names: Vec<String>,
    samples: HashMap<Vec<String>, Sample>,
}

impl Family {
    fn snapshot(&self) -> FamilySnapshot {
        let mut samples: Vec<(Vec<String>, f64)> = self
            .samples
            .iter()
            .map(|(k, sample)| (k.clone(), sample.value))
            .collect();
        samples.sort_by(|a, b| a.0.cmp(&b.0));
        FamilySnapshot {
            name: self.exported_name.clone(),
            help: self.help.clone(),
            kind: self.kind,
            label_names: self.label_names.clone(),
            samples,
        }
    }
}

/// Point-in-time copy of one family.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilySnapshot {
    /// Exported (prefixed, sanitized) name.
    pub name: String,
    pub help: String,
    pub kind: MetricKind,
    pub label_names: Vec<String>,
    /// Sorted by label values.
    pub samples: Vec<(Vec<String>, f64)>,
}

#[derive(Debug, Default)]
struct Inner {
    families: HashMap<String, Family>,
    by_entity: HashMap<String, HashSet<MetricKey>>,
}

/// Owned registry instance; one per running exporter.
#[derive(Debug, Default)]
pub struct MetricRegistry {
    prefix: String,
    inner: RwLock<Inner>,
}

impl MetricRegistry {
    /// `namespace` is prepended as `<namespace>_` to every exported name.
    /// An empty namespace exports logical names as-is.
    pub fn new(namespace: &str) -> Self {
        let prefix = if namespace.is_empty() {
            String::new()
        } else {
            format!("{namespace}_")
        };
        Self {
            prefix,
            inner: RwLock::new(Inner::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set (gauge) or add to (counter) the sample for `labels`, creating the
    /// family on first use, and index the label set under `entity_id`.
    ///
    /// A label set already written by a different entity is rejected with
    /// `KeyOwned`. On error nothing is changed.
    pub fn record(
        &self,
        entity_id: &str,
        desc: &MetricDesc<'_>,
        labels: &Labels,
        value: f64,
    ) -> Result<()> {
        if desc.kind == MetricKind::Counter && value < 0.0 {
            return Err(HasspromError::BadRequest(format!(
                "counter {} cannot decrease (got {value})",
                desc.name
            )));
        }

        let label_names = labels.names();
        let mut guard = self.write();
        let Inner { families, by_entity } = &mut *guard;

        if let Some(existing) = families.get(desc.name) {
            if existing.kind != desc.kind {
                return Err(HasspromError::KindMismatch {
                    metric: desc.name.to_string(),
                    existing: existing.kind.as_str(),
                });
            }
            if existing.label_names != label_names {
                return Err(HasspromError::LabelMismatch {
                    metric: desc.name.to_string(),
                    expected: existing.label_names.clone(),
                    got: label_names,
                });
            }
        }

        let label_values = labels.values();
        if let Some(sample) = families
            .get(desc.name)
            .and_then(|f| f.samples.get(&label_values))
        {
            if sample.owner != entity_id {
                return Err(HasspromError::KeyOwned {
                    metric: desc.name.to_string(),
                    owner: sample.owner.clone(),
                });
            }
        }

        let family = families.entry(desc.name.to_string()).or_insert_with(|| {
            let exported_name = sanitize_metric_name(&format!("{}{}", self.prefix, desc.name));
            debug!(metric = %desc.name, exported = %exported_name, kind = desc.kind.as_str(), "creating metric family");
            Family {
                exported_name,
                help: desc.help.to_string(),
                kind: desc.kind,
                label_names,
                samples: HashMap::new(),
            }
        });

        let sample = family
            .samples
            .entry(label_values.clone())
            .or_insert_with(|| Sample {
                value: 0.0,
                owner: entity_id.to_string(),
            });
        match desc.kind {
            MetricKind::Gauge => sample.value = value,
            MetricKind::Counter => sample.value += value,
        }

        by_entity
            .entry(entity_id.to_string())
            .or_default()
            .insert(MetricKey::new(desc.name, label_values));
        Ok(())
    }

    /// Remove every label set indexed under `entity_id` whose metric is not in
    /// `exempt`. Returns the number of label sets removed. Unknown entities are
    /// a no-op.
    pub fn retract<S: AsRef<str>>(&self, entity_id: &str, exempt: &[S]) -> usize {
        let mut guard = self.write();
        let Inner { families, by_entity } = &mut *guard;

        let Some(keys) = by_entity.get_mut(entity_id) else {
            return 0;
        };

        let mut removed = 0;
        keys.retain(|key| {
            if exempt.iter().any(|e| e.as_ref() == key.metric_name()) {
                return true;
            }
            debug!(
                entity_id,
                metric = %key.metric_name(),
                labels = ?key.label_values(),
                "removing labelset"
            );
            if let Some(family) = families.get_mut(key.metric_name()) {
                family.samples.remove(key.label_values());
            }
            removed += 1;
            false
        });

        if keys.is_empty() {
            by_entity.remove(entity_id);
        }
        removed
    }

    /// `retract` with nothing exempt.
    pub fn retract_all(&self, entity_id: &str) -> usize {
        self.retract::<&str>(entity_id, &[])
    }

    /// All families, sorted by exported name.
    pub fn snapshot(&self) -> Vec<FamilySnapshot> {
        let inner = self.read();
        let mut out: Vec<FamilySnapshot> = inner.families.values().map(Family::snapshot).collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    /// Text exposition of the current snapshot.
    pub fn render(&self) -> String {
        super::expose::encode_text(&self.snapshot())
    }

    pub fn family(&self, metric_name: &str) -> Option<FamilySnapshot> {
        self.read().families.get(metric_name).map(Family::snapshot)
    }

    /// Current sample value for a logical metric name and label tuple.
    pub fn value(&self, metric_name: &str, label_values: &[&str]) -> Option<f64> {
        let inner = self.read();
        let family = inner.families.get(metric_name)?;
        let key: Vec<String> = label_values.iter().map(|s| s.to_string()).collect();
        family.samples.get(&key).map(|s| s.value)
    }

    /// Keys indexed for `entity_id`, sorted.
    pub fn tracked_keys(&self, entity_id: &str) -> Vec<MetricKey> {
        let inner = self.read();
        let mut keys: Vec<MetricKey> = inner
            .by_entity
            .get(entity_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    pub fn entity_count(&self) -> usize {
        self.read().by_entity.len()
    }

    pub fn family_count(&self) -> usize {
        self.read().families.len()
    }

    /// Drop every family and index entry (integration teardown).
    pub fn clear(&self) {
        let mut inner = self.write();
        inner.families.clear();
        inner.by_entity.clear();
    }
}
