//! Aggregated module document
//!
//! `all.json` is produced by an earlier documentation build step. Only the
//! `modules` list is read here; the globals, classes and miscs sections are
//! ignored.

use crate::diagnostics::{StabilityError, StabilityResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One documented module as it appears in `all.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecord {
    /// Module name (e.g. "fs")
    pub name: String,
    /// Heading shown in the docs, absent for undocumented modules
    #[serde(default)]
    pub display_name: Option<String>,
    /// Stability index, absent when the module has no stability banner
    #[serde(default)]
    pub stability: Option<i64>,
    /// Stability banner text (e.g. "Stable")
    #[serde(default)]
    pub stability_text: String,
    /// Markdown source path (e.g. "doc/api/fs.md")
    pub source: String,
}

impl ModuleRecord {
    /// Whether this module belongs in the stability overview
    pub fn has_stability(&self) -> bool {
        let named = self
            .display_name
            .as_deref()
            .is_some_and(|name| !name.is_empty());
        named && self.stability.is_some_and(|level| level >= 0)
    }
}

/// The aggregated module document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleIndex {
    /// Every module record
    pub modules: Vec<ModuleRecord>,
}

impl ModuleIndex {
    /// Parse an index from JSON text
    pub fn from_json(json: &str) -> StabilityResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load an index from a file
    pub fn load(path: impl AsRef<Path>) -> StabilityResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| StabilityError::file_io(path, e))?;
        let index: ModuleIndex =
            serde_json::from_str(&text).map_err(|e| StabilityError::json(path, e))?;
        tracing::debug!(
            "Loaded {} module records from {}",
            index.modules.len(),
            path.display()
        );
        Ok(index)
    }
}
