//! stability-etch: API stability overview for generated documentation
//!
//! This crate builds the stability overview table of the API docs by:
//! - Reading the aggregated module document (`all.json`)
//! - Collecting one row per module that declares a stability index
//! - Rendering the rows as a Markdown table and, through comrak, as HTML
//!   with per-level CSS classes on each row
//! - Splicing both renderings into the marker slot of the already generated
//!   `documentation.md`, `documentation.html` and `documentation.json`
//!
//! # Architecture
//!
//! ```text
//! all.json ──▶ ModuleIndex ──▶ StabilityRow ──▶ Markdown table
//!                                                   │
//!                                ┌──────────────────┤
//!                                ▼                  ▼
//!                        documentation.md      HtmlRenderer
//!                                                   │
//!                                        ┌──────────┴──────────┐
//!                                        ▼                     ▼
//!                               documentation.html    documentation.json
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use stability_etch::StabilityBuilder;
//!
//! StabilityBuilder::new("out/doc/api")
//!     .build()
//!     .expect("Failed to update stability overview");
//! ```

// Core types
pub mod collate;
pub mod config;
pub mod diagnostics;
pub mod module;
pub mod stability;

// Rendering and output
pub mod builder;
pub mod docgen;
pub mod html;
pub mod printer;
pub mod splice;

// Re-exports for convenience
pub use builder::{BuildOutput, StabilityBuilder};
pub use collate::locale_compare;
pub use config::{OutputFiles, StabilityConfig};
pub use diagnostics::{StabilityError, StabilityResult};
pub use docgen::MarkdownTableRenderer;
pub use html::HtmlRenderer;
pub use module::{ModuleIndex, ModuleRecord};
pub use printer::BuildPrinter;
pub use splice::{
    splice_text, update_json_stability_mark, update_stability_mark, Markers, SpliceOutcome,
    Splicer, TargetKind, TargetReport,
};
pub use stability::{collect_stability, LinkRewrite, StabilityLevel, StabilityRow};
