//! Include/exclude entity filter.
//!
//! Resolution order:
//! 1. no lists at all -> accept
//! 2. entity explicitly included -> accept
//! 3. entity explicitly excluded -> reject
//! 4. domain or glob excluded -> reject
//! 5. domain or glob included -> accept
//! 6. otherwise accept only when nothing is included

use std::collections::HashSet;

use hassprom_core::error::Result;
use hassprom_core::model::split_entity_id;

use super::glob::{compile_globs, Glob};
use crate::config::FilterConfig;

#[derive(Debug, Clone, Default)]
pub struct EntityFilter {
    include_domains: HashSet<String>,
    include_entities: HashSet<String>,
    include_globs: Vec<Glob>,
    exclude_domains: HashSet<String>,
    exclude_entities: HashSet<String>,
    exclude_globs: Vec<Glob>,
}

impl EntityFilter {
    /// Filter that accepts every entity.
    pub fn accept_all() -> Self {
        Self::default()
    }

    pub fn compile(cfg: &FilterConfig) -> Result<Self> {
        Ok(Self {
            include_domains: cfg.include_domains.iter().cloned().collect(),
            include_entities: cfg.include_entities.iter().cloned().collect(),
            include_globs: compile_globs(&cfg.include_entity_globs)?,
            exclude_domains: cfg.exclude_domains.iter().cloned().collect(),
            exclude_entities: cfg.exclude_entities.iter().cloned().collect(),
            exclude_globs: compile_globs(&cfg.exclude_entity_globs)?,
        })
    }

    fn has_includes(&self) -> bool {
        !self.include_domains.is_empty()
            || !self.include_entities.is_empty()
            || !self.include_globs.is_empty()
    }

    fn has_excludes(&self) -> bool {
        !self.exclude_domains.is_empty()
            || !self.exclude_entities.is_empty()
            || !self.exclude_globs.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_includes() && !self.has_excludes()
    }

    pub fn matches(&self, entity_id: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        if self.include_entities.contains(entity_id) {
            return true;
        }
        if self.exclude_entities.contains(entity_id) {
            return false;
        }

        let (domain, _) = split_entity_id(entity_id);
        if self.exclude_domains.contains(domain)
            || self.exclude_globs.iter().any(|g| g.matches(entity_id))
        {
            return false;
        }
        if self.include_domains.contains(domain)
            || self.include_globs.iter().any(|g| g.matches(entity_id))
        {
            return true;
        }
        !self.has_includes()
    }
}
