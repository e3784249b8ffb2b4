//! Marker-delimited splicing
//!
//! Each documentation page carries an empty slot:
//!
//! ```text
//! <!-- STABILITY_OVERVIEW_SLOT_BEGIN --><!-- STABILITY_OVERVIEW_SLOT_END -->
//! ```
//!
//! Splicing replaces everything from the first begin marker to the last end
//! marker (markers included) with new content that is itself wrapped in the
//! markers, so running the build again finds the slot again.

mod json;

pub use json::{splice_json, update_json_stability_mark};

use crate::diagnostics::{StabilityError, StabilityResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Begin and end marker of the stability slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Opening marker
    pub begin: String,
    /// Closing marker
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            begin: "<!-- STABILITY_OVERVIEW_SLOT_BEGIN -->".to_string(),
            end: "<!-- STABILITY_OVERVIEW_SLOT_END -->".to_string(),
        }
    }
}

impl Markers {
    /// Create a marker pair
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
        }
    }

    /// Surround content with the markers
    pub fn wrap(&self, inner: &str) -> String {
        format!("{}{}{}", self.begin, inner, self.end)
    }

    /// Check that the markers are usable
    pub fn validate(&self) -> StabilityResult<()> {
        if self.begin.is_empty() || self.end.is_empty() {
            return Err(StabilityError::config("markers must not be empty"));
        }
        if self.begin == self.end {
            return Err(StabilityError::config(
                "begin and end markers must differ",
            ));
        }
        Ok(())
    }

    /// Compile the slot pattern: `begin(.*)end`, dot matching newlines
    pub fn compile(&self) -> StabilityResult<MarkerPattern> {
        let pattern = format!(
            "(?s){}(.*){}",
            regex::escape(&self.begin),
            regex::escape(&self.end)
        );
        Ok(MarkerPattern {
            regex: Regex::new(&pattern)?,
        })
    }
}

/// Compiled slot pattern
#[derive(Debug, Clone)]
pub struct MarkerPattern {
    regex: Regex,
}

impl MarkerPattern {
    /// Replace the first slot with `replacement`, taken literally.
    ///
    /// Returns `None` when the content has no slot.
    pub fn splice(&self, content: &str, replacement: &str) -> Option<String> {
        let found = self.regex.find(content)?;
        let mut out =
            String::with_capacity(content.len() - found.as_str().len() + replacement.len());
        out.push_str(&content[..found.start()]);
        out.push_str(replacement);
        out.push_str(&content[found.end()..]);
        Some(out)
    }
}

/// Replace the slot in `content`; `None` when there is no slot.
pub fn splice_text(
    content: &str,
    replacement: &str,
    markers: &Markers,
) -> StabilityResult<Option<String>> {
    Ok(markers.compile()?.splice(content, replacement))
}

/// The three documentation pages that carry a stability slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// documentation.md
    Markdown,
    /// documentation.html
    Html,
    /// documentation.json
    Json,
}

impl TargetKind {
    /// Get display string
    pub fn display(&self) -> &'static str {
        match self {
            TargetKind::Markdown => "markdown",
            TargetKind::Html => "html",
            TargetKind::Json => "json",
        }
    }
}

impl TargetKind {
    /// Guess the page kind from the file extension; anything unknown is Markdown
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("html" | "htm") => TargetKind::Html,
            Some("json") => TargetKind::Json,
            _ => TargetKind::Markdown,
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// What happened to a target file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpliceOutcome {
    /// The slot was replaced and the file rewritten
    Updated,
    /// The slot already held the replacement; nothing written
    Unchanged,
    /// No slot in the file; nothing written
    MarkersNotFound,
}

impl SpliceOutcome {
    /// Get display string
    pub fn display(&self) -> &'static str {
        match self {
            SpliceOutcome::Updated => "updated",
            SpliceOutcome::Unchanged => "unchanged",
            SpliceOutcome::MarkersNotFound => "markers not found",
        }
    }
}

/// Splices replacements into target files
#[derive(Debug, Clone)]
pub struct Splicer {
    pattern: MarkerPattern,
    /// Fail instead of reporting [`SpliceOutcome::MarkersNotFound`]
    strict: bool,
    /// Compute outcomes without writing
    dry_run: bool,
}

impl Splicer {
    /// Create a splicer for the given markers
    pub fn new(markers: &Markers) -> StabilityResult<Self> {
        markers.validate()?;
        Ok(Self {
            pattern: markers.compile()?,
            strict: false,
            dry_run: false,
        })
    }

    /// Treat a missing slot as an error
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Never write files
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Splice `replacement` into the slot of `path`.
    ///
    /// The file is opened read-write, read whole, and written back only when
    /// the content changed. A write truncates the file to the new length.
    pub fn splice(
        &self,
        kind: TargetKind,
        path: impl AsRef<Path>,
        replacement: &str,
    ) -> StabilityResult<SpliceOutcome> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .read(true)
            .write(!self.dry_run)
            .open(path)
            .map_err(|e| StabilityError::file_io(path, e))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| StabilityError::file_io(path, e))?;

        let replaced = match kind {
            TargetKind::Json => splice_json(&content, replacement, &self.pattern)
                .map_err(|e| match e {
                    StabilityError::Serialization(source) => StabilityError::json(path, source),
                    other => other,
                })?,
            TargetKind::Markdown | TargetKind::Html => self.pattern.splice(&content, replacement),
        };

        let Some(replaced) = replaced else {
            return self.missing(kind, path);
        };

        if replaced == content {
            tracing::debug!("{} target {} already up to date", kind, path.display());
            return Ok(SpliceOutcome::Unchanged);
        }

        if self.dry_run {
            tracing::info!("Would update {} target {}", kind, path.display());
            return Ok(SpliceOutcome::Updated);
        }

        write_in_place(&mut file, replaced.as_bytes())
            .map_err(|e| StabilityError::file_io(path, e))?;
        tracing::info!("Updated {} target {}", kind, path.display());
        Ok(SpliceOutcome::Updated)
    }

    fn missing(&self, kind: TargetKind, path: &Path) -> StabilityResult<SpliceOutcome> {
        if self.strict {
            return Err(StabilityError::MarkersNotFound(path.to_path_buf()));
        }
        tracing::warn!(
            "No stability markers in {} target {}; left untouched",
            kind,
            path.display()
        );
        Ok(SpliceOutcome::MarkersNotFound)
    }
}

fn write_in_place(file: &mut std::fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.seek(SeekFrom::Start(0))?;
    file.write_all(bytes)?;
    file.set_len(bytes.len() as u64)?;
    file.flush()
}

/// Splice `replacement` into the slot of a documentation file.
///
/// The page kind follows the extension, so a `.json` path gets the JSON
/// splice. Missing markers leave the file untouched and are reported as
/// [`SpliceOutcome::MarkersNotFound`].
pub fn update_stability_mark(
    path: impl AsRef<Path>,
    replacement: &str,
    markers: &Markers,
) -> StabilityResult<SpliceOutcome> {
    let path = path.as_ref();
    Splicer::new(markers)?.splice(TargetKind::from_path(path), path, replacement)
}

/// Report for one spliced target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    /// Which page
    pub kind: TargetKind,
    /// File path
    pub path: PathBuf,
    /// What happened
    pub outcome: SpliceOutcome,
}
