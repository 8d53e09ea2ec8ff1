use std::collections::BTreeMap;
use std::net::SocketAddr;

use serde::Deserialize;
use hassprom_core::error::{HasspromError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,

    #[serde(default)]
    pub filter: FilterConfig,

    /// Sensor metric used when no override, timestamp or device class applies.
    #[serde(default)]
    pub default_metric: Option<String>,

    /// Sensor metric forced for every sensor without a per-entity override.
    #[serde(default)]
    pub override_metric: Option<String>,

    #[serde(default)]
    pub component_config: BTreeMap<String, ComponentOverride>,

    #[serde(default)]
    pub component_config_domain: BTreeMap<String, ComponentOverride>,

    #[serde(default)]
    pub component_config_glob: BTreeMap<String, ComponentOverride>,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(HasspromError::UnsupportedVersion);
        }

        self.exporter.validate()?;

        for (name, v) in [("default_metric", &self.default_metric), ("override_metric", &self.override_metric)] {
            if matches!(v.as_deref(), Some(s) if s.trim().is_empty()) {
                return Err(HasspromError::BadRequest(format!("{name} must not be empty")));
            }
        }

        for entity_id in self.component_config.keys() {
            if !is_entity_id(entity_id) {
                return Err(HasspromError::BadRequest(format!(
                    "component_config key is not an entity id: {entity_id}"
                )));
            }
        }

        Ok(())
    }
}

/// `<domain>.<object_id>`, both parts non-empty, no whitespace.
fn is_entity_id(s: &str) -> bool {
    match s.split_once('.') {
        Some((d, o)) => !d.is_empty() && !o.is_empty() && !s.contains(char::is_whitespace),
        None => false,
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Prefix for every exported family (`<namespace>_...`). Empty disables it.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// When set, `/metrics` requires `Authorization: Bearer <token>`.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Unit the host reports climate temperatures in.
    #[serde(default)]
    pub climate_units: TemperatureUnit,

    /// Metrics kept when an entity turns unavailable/unknown.
    #[serde(default = "default_retain_on_unavailable")]
    pub retain_on_unavailable: Vec<String>,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            namespace: default_namespace(),
            auth_token: None,
            climate_units: TemperatureUnit::default(),
            retain_on_unavailable: default_retain_on_unavailable(),
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|_| {
            HasspromError::BadRequest(format!(
                "exporter.listen must be a valid socket address: {}",
                self.listen
            ))
        })?;
        if matches!(self.auth_token.as_deref(), Some(t) if t.trim().is_empty()) {
            return Err(HasspromError::BadRequest(
                "exporter.auth_token must not be empty when set".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:9108".into()
}
fn default_namespace() -> String {
    "homeassistant".into()
}
fn default_retain_on_unavailable() -> Vec<String> {
    crate::exporter::AVAILABILITY_METRICS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "celsius", alias = "°C")]
    Celsius,
    #[serde(rename = "fahrenheit", alias = "°F")]
    Fahrenheit,
}

/// Include/exclude lists for entities. Globs support `*` and `?`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    #[serde(default)]
    pub include_domains: Vec<String>,
    #[serde(default)]
    pub include_entities: Vec<String>,
    #[serde(default)]
    pub include_entity_globs: Vec<String>,
    #[serde(default)]
    pub exclude_domains: Vec<String>,
    #[serde(default)]
    pub exclude_entities: Vec<String>,
    #[serde(default)]
    pub exclude_entity_globs: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentOverride {
    #[serde(default)]
    pub override_metric: Option<String>,
}
