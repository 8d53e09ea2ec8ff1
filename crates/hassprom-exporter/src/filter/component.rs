//! Per-entity component overrides merged from entity, glob and domain maps.

use std::collections::{BTreeMap, HashMap};

use hassprom_core::error::Result;
use hassprom_core::model::split_entity_id;

use super::glob::Glob;
use crate::config::ComponentOverride;

/// Lookup precedence: exact entity, then the last matching glob (in key
/// order), then domain.
#[derive(Debug, Clone, Default)]
pub struct ComponentOverrides {
    by_entity: HashMap<String, ComponentOverride>,
    by_domain: HashMap<String, ComponentOverride>,
    by_glob: Vec<(Glob, ComponentOverride)>,
}

impl ComponentOverrides {
    pub fn compile(
        by_entity: &BTreeMap<String, ComponentOverride>,
        by_domain: &BTreeMap<String, ComponentOverride>,
        by_glob: &BTreeMap<String, ComponentOverride>,
    ) -> Result<Self> {
        let by_glob = by_glob
            .iter()
            .map(|(pattern, ov)| Ok((Glob::compile(pattern)?, ov.clone())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            by_entity: by_entity.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            by_domain: by_domain.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            by_glob,
        })
    }

    /// Effective `override_metric` for an entity, if any layer sets one.
    pub fn override_metric(&self, entity_id: &str) -> Option<&str> {
        if let Some(m) = self
            .by_entity
            .get(entity_id)
            .and_then(|o| o.override_metric.as_deref())
        {
            return Some(m);
        }
        if let Some(m) = self
            .by_glob
            .iter()
            .rev()
            .filter(|(g, _)| g.matches(entity_id))
            .find_map(|(_, o)| o.override_metric.as_deref())
        {
            return Some(m);
        }
        let (domain, _) = split_entity_id(entity_id);
        self.by_domain
            .get(domain)
            .and_then(|o| o.override_metric.as_deref())
    }
}
