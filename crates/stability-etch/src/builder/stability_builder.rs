//! StabilityBuilder - runs the whole stability overview build
//!
//! Load `all.json`, collect rows, render Markdown and HTML, then splice the
//! Markdown page, the HTML page and the JSON page in that order.

use crate::config::StabilityConfig;
use crate::diagnostics::{StabilityError, StabilityResult};
use crate::docgen::MarkdownTableRenderer;
use crate::html::HtmlRenderer;
use crate::module::ModuleIndex;
use crate::splice::{Markers, SpliceOutcome, Splicer, TargetKind, TargetReport};
use crate::stability::{collect_stability, LinkRewrite, StabilityRow};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of a stability build
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// Rows of the rendered table, in table order
    pub rows: Vec<StabilityRow>,
    /// Rendered Markdown table
    pub markdown: String,
    /// Rendered HTML table
    pub html: String,
    /// One report per spliced page, in splice order
    pub targets: Vec<TargetReport>,
    /// Row dump, when written
    pub stability_json: Option<PathBuf>,
    /// Whether files were left untouched on purpose
    pub dry_run: bool,
}

impl BuildOutput {
    /// Pages whose slot was replaced
    pub fn updated(&self) -> impl Iterator<Item = &TargetReport> {
        self.targets
            .iter()
            .filter(|t| t.outcome == SpliceOutcome::Updated)
    }

    /// Pages without a slot
    pub fn missing_markers(&self) -> impl Iterator<Item = &TargetReport> {
        self.targets
            .iter()
            .filter(|t| t.outcome == SpliceOutcome::MarkersNotFound)
    }
}

/// Builder for configuring the stability build
///
/// # Example
///
/// ```no_run
/// use stability_etch::StabilityBuilder;
///
/// let output = StabilityBuilder::new("out/doc/api")
///     .strict(true)
///     .build()
///     .expect("Failed to update stability overview");
/// println!("{} modules", output.rows.len());
/// ```
#[derive(Debug, Clone)]
pub struct StabilityBuilder {
    /// Configuration for the run
    pub config: StabilityConfig,
    /// Table renderer
    pub table: MarkdownTableRenderer,
}

impl StabilityBuilder {
    /// Create a builder for a documentation output directory
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        let config = StabilityConfig {
            source_dir: source_dir.into(),
            ..StabilityConfig::default()
        };
        Self::from_config(config)
    }

    /// Create a builder from a full configuration
    pub fn from_config(config: StabilityConfig) -> Self {
        Self {
            config,
            table: MarkdownTableRenderer::new(),
        }
    }

    /// Set the documentation output directory
    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.source_dir = dir.into();
        self
    }

    /// Set the slot markers
    pub fn markers(mut self, markers: Markers) -> Self {
        self.config.markers = markers;
        self
    }

    /// Set the link rewriting rules
    pub fn link_rewrite(mut self, links: LinkRewrite) -> Self {
        self.config.links = links;
        self
    }

    /// Fail when a page has no slot
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Also write `stability.json`
    pub fn emit_stability_json(mut self, emit: bool) -> Self {
        self.config.emit_stability_json = emit;
        self
    }

    /// Compute everything but write nothing
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    /// Set the table renderer
    pub fn table_renderer(mut self, table: MarkdownTableRenderer) -> Self {
        self.table = table;
        self
    }

    /// Run the build
    pub fn build(self) -> StabilityResult<BuildOutput> {
        self.config.validate()?;

        let index = ModuleIndex::load(self.config.input_path())?;
        self.build_from_index(&index)
    }

    /// Run the build on an already loaded module document
    pub fn build_from_index(&self, index: &ModuleIndex) -> StabilityResult<BuildOutput> {
        let config = &self.config;
        config.validate()?;

        let rows = collect_stability(&index.modules, &config.links);
        tracing::info!(
            "Collected {} stability rows from {} modules",
            rows.len(),
            index.modules.len()
        );

        let markdown = self.table.render(&rows);
        let html = HtmlRenderer::new().render(&markdown)?;

        let splicer = Splicer::new(&config.markers)?
            .strict(config.strict)
            .dry_run(config.dry_run);
        let markers = &config.markers;

        let jobs = [
            (
                TargetKind::Markdown,
                config.markdown_path(),
                markers.wrap(&format!("\n{}\n", markdown)),
            ),
            (TargetKind::Html, config.html_path(), markers.wrap(&html)),
            (TargetKind::Json, config.json_path(), markers.wrap(&html)),
        ];

        let mut targets = Vec::with_capacity(jobs.len());
        for (kind, path, replacement) in jobs {
            let outcome = splicer.splice(kind, &path, &replacement)?;
            targets.push(TargetReport {
                kind,
                path,
                outcome,
            });
        }

        let stability_json = if config.emit_stability_json {
            let path = config.stability_json_path();
            if !config.dry_run {
                write_stability_json(&path, &rows)?;
            }
            Some(path)
        } else {
            None
        };

        Ok(BuildOutput {
            rows,
            markdown,
            html,
            targets,
            stability_json,
            dry_run: config.dry_run,
        })
    }
}

/// Write rows as a pretty-printed JSON array
pub fn write_stability_json(path: &Path, rows: &[StabilityRow]) -> StabilityResult<()> {
    let mut json = serde_json::to_string_pretty(rows)?;
    json.push('\n');
    fs::write(path, json).map_err(|e| StabilityError::file_io(path, e))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}
