//! Build configuration
//!
//! All settings have defaults matching the doc build's output layout, so an
//! empty config (or none at all) reproduces the standard run. A TOML file can
//! override any of them:
//!
//! ```toml
//! source_dir = "out/doc/api"
//! strict = true
//!
//! [markers]
//! begin = "<!-- STABILITY_OVERVIEW_SLOT_BEGIN -->"
//! end = "<!-- STABILITY_OVERVIEW_SLOT_END -->"
//! ```

use crate::diagnostics::{StabilityError, StabilityResult};
use crate::splice::Markers;
use crate::stability::LinkRewrite;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File names of the generated pages, relative to the source directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFiles {
    /// Markdown page with a stability slot
    pub markdown: PathBuf,
    /// HTML page with a stability slot
    pub html: PathBuf,
    /// JSON page with a stability slot
    pub json: PathBuf,
    /// Standalone row dump, only written when enabled
    pub stability_json: PathBuf,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            markdown: PathBuf::from("documentation.md"),
            html: PathBuf::from("documentation.html"),
            json: PathBuf::from("documentation.json"),
            stability_json: PathBuf::from("stability.json"),
        }
    }
}

/// Stability build configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityConfig {
    /// Directory holding `all.json` and the generated pages
    pub source_dir: PathBuf,
    /// Aggregated module document, relative to `source_dir`
    pub input: PathBuf,
    /// Fail when a page has no stability slot
    pub strict: bool,
    /// Also write the rows to `outputs.stability_json`
    pub emit_stability_json: bool,
    /// Compute everything but write nothing
    pub dry_run: bool,
    /// Output file names
    pub outputs: OutputFiles,
    /// Slot markers
    pub markers: Markers,
    /// Source path to page link rewriting
    pub links: LinkRewrite,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("out/doc/api"),
            input: PathBuf::from("all.json"),
            strict: false,
            emit_stability_json: false,
            dry_run: false,
            outputs: OutputFiles::default(),
            markers: Markers::default(),
            links: LinkRewrite::default(),
        }
    }
}

impl StabilityConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> StabilityResult<Self> {
        let config: StabilityConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> StabilityResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| StabilityError::file_io(path, e))?;
        Self::from_toml(&text)
    }

    /// Check markers and file names
    pub fn validate(&self) -> StabilityResult<()> {
        self.markers.validate()?;

        let names = [
            ("input", &self.input),
            ("outputs.markdown", &self.outputs.markdown),
            ("outputs.html", &self.outputs.html),
            ("outputs.json", &self.outputs.json),
            ("outputs.stability_json", &self.outputs.stability_json),
        ];
        for (key, path) in names {
            if path.as_os_str().is_empty() {
                return Err(StabilityError::config(format!("{} must not be empty", key)));
            }
        }
        Ok(())
    }

    /// Resolve a path against `source_dir` unless it is absolute
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.source_dir.join(path)
        }
    }

    /// Path of the aggregated module document
    pub fn input_path(&self) -> PathBuf {
        self.resolve(&self.input)
    }

    /// Path of the Markdown page
    pub fn markdown_path(&self) -> PathBuf {
        self.resolve(&self.outputs.markdown)
    }

    /// Path of the HTML page
    pub fn html_path(&self) -> PathBuf {
        self.resolve(&self.outputs.html)
    }

    /// Path of the JSON page
    pub fn json_path(&self) -> PathBuf {
        self.resolve(&self.outputs.json)
    }

    /// Path of the row dump
    pub fn stability_json_path(&self) -> PathBuf {
        self.resolve(&self.outputs.stability_json)
    }
}
