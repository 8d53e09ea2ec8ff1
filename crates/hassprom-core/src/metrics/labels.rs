//! Ordered label sets.
//!
//! Label order is significant: a family fixes its label names on first use and
//! every later write must present the same names in the same order.

use crate::error::{HasspromError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    pairs: Vec<(String, String)>,
}

impl Labels {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append one label. Reusing a name is a caller bug.
    pub fn push(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        if self.get(name).is_some() {
            return Err(HasspromError::ConflictingLabels(vec![name.to_string()]));
        }
        self.pairs.push((name.to_string(), value.into()));
        Ok(())
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Result<Self> {
        self.push(name, value)?;
        Ok(self)
    }

    /// Copy of `self` with `extra` appended. All conflicting names are
    /// reported together and nothing is appended on conflict.
    pub fn merged(&self, extra: &[(&str, &str)]) -> Result<Labels> {
        let mut conflicts: Vec<String> = extra
            .iter()
            .filter(|(k, _)| self.get(k).is_some())
            .map(|(k, _)| k.to_string())
            .collect();
        if !conflicts.is_empty() {
            conflicts.sort();
            return Err(HasspromError::ConflictingLabels(conflicts));
        }
        let mut out = self.clone();
        for (k, v) in extra {
            out.push(k, *v)?;
        }
        Ok(out)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn names(&self) -> Vec<String> {
        self.pairs.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn values(&self) -> Vec<String> {
        self.pairs.iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
