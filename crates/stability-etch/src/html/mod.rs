//! HTML rendering of the stability table
//!
//! The Markdown table is parsed with comrak, lowered into an owned markup
//! tree, annotated with the per-level row classes and serialized.
//!
//! ```
//! use stability_etch::html::HtmlRenderer;
//!
//! let html = HtmlRenderer::new()
//!     .render("| API | Stability |\n| --- | --------- |\n| [fs](fs.html) | (2) Stable |")
//!     .unwrap();
//! assert!(html.contains("api_stability_2"));
//! ```

pub mod annotate;
pub mod convert;
pub mod tree;

pub use annotate::{annotate_stability, parse_level, stability_class};
pub use convert::markdown_to_tree;
pub use tree::{Element, MarkupNode, MarkupTree};

use crate::diagnostics::StabilityResult;

/// Markdown to HTML renderer for the stability table
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    /// Whether to add the stability row classes
    annotate: bool,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self { annotate: true }
    }
}

impl HtmlRenderer {
    /// Create a renderer that annotates table rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable row annotation
    pub fn with_annotation(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Render Markdown to HTML, trimmed of surrounding whitespace.
    ///
    /// Fails with [`MalformedRow`](crate::StabilityError::MalformedRow) when
    /// annotation is on and a table body row is not a two-cell stability
    /// row.
    pub fn render(&self, markdown: &str) -> StabilityResult<String> {
        let mut tree = markdown_to_tree(markdown);
        if self.annotate {
            let rows = annotate_stability(&mut tree)?;
            tracing::debug!("Annotated {} stability rows", rows);
        }
        Ok(tree.to_html().trim().to_string())
    }
}
