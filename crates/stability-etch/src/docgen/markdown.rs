//! Markdown table rendering

use crate::stability::StabilityRow;

/// Renders the stability overview as a GFM table
#[derive(Debug, Clone)]
pub struct MarkdownTableRenderer {
    /// Heading of the link column
    pub api_header: String,
    /// Heading of the stability column
    pub stability_header: String,
}

impl Default for MarkdownTableRenderer {
    fn default() -> Self {
        Self {
            api_header: "API".to_string(),
            stability_header: "Stability".to_string(),
        }
    }
}

impl MarkdownTableRenderer {
    /// Create a new table renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column headings
    pub fn with_headers(mut self, api: impl Into<String>, stability: impl Into<String>) -> Self {
        self.api_header = api.into();
        self.stability_header = stability.into();
        self
    }

    /// Render rows to a Markdown table.
    ///
    /// Lines are joined with `\n` and there is no trailing newline.
    pub fn render(&self, rows: &[StabilityRow]) -> String {
        let mut md = Vec::with_capacity(rows.len() + 2);
        md.push(format!(
            "| {} | {} |",
            self.api_header, self.stability_header
        ));
        md.push(format!(
            "| {} | {} |",
            delimiter(&self.api_header),
            delimiter(&self.stability_header)
        ));

        for row in rows {
            md.push(format!(
                "| [{}]({}) | {} |",
                escape_cell(&row.api),
                row.link,
                escape_cell(&row.stability_text)
            ));
        }

        md.join("\n")
    }
}

/// Keep cell text on one line and escape pipes so it cannot split a table row
pub fn escape_cell(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

fn delimiter(header: &str) -> String {
    "-".repeat(header.chars().count().max(3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(api: &str, stability: i64, text: &str) -> StabilityRow {
        StabilityRow {
            api: api.into(),
            link: format!("{}.html", api),
            stability,
            stability_text: format!("({}) {}", stability, text),
        }
    }

    #[test]
    fn test_render_table() {
        let rows = vec![row("fs", 2, "Stable"), row("http", 1, "Experimental")];
        let md = MarkdownTableRenderer::new().render(&rows);

        assert_eq!(
            md,
            "| API | Stability |\n\
             | --- | --------- |\n\
             | [fs](fs.html) | (2) Stable |\n\
             | [http](http.html) | (1) Experimental |"
        );
    }

    #[test]
    fn test_render_empty() {
        let md = MarkdownTableRenderer::new().render(&[]);
        assert_eq!(md, "| API | Stability |\n| --- | --------- |");
    }

    #[test]
    fn test_custom_headers() {
        let md = MarkdownTableRenderer::new()
            .with_headers("Module", "Status")
            .render(&[]);
        assert_eq!(md, "| Module | Status |\n| ------ | ------ |");
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
        assert_eq!(escape_cell("plain"), "plain");
    }

    #[test]
    fn test_escape_cell_line_breaks() {
        assert_eq!(escape_cell("Stable\nsecond line"), "Stable second line");
        assert_eq!(escape_cell("a\r\n\r\n  b\n"), "a b");
    }

    #[test]
    fn test_multiline_text_stays_one_row() {
        use crate::html::HtmlRenderer;
        use crate::stability::{collect_stability, LinkRewrite};
        use crate::test::mock_module;

        let modules = vec![mock_module("fs", 2, "Stable\nsecond line")];
        let rows = collect_stability(&modules, &LinkRewrite::default());
        let md = MarkdownTableRenderer::new().render(&rows);
        assert_eq!(md.lines().count(), 3);

        let html = HtmlRenderer::new().render(&md).unwrap();
        assert!(html.contains(
            "<td class=\"api_stability api_stability_2\">(2) Stable second line</td>"
        ));
    }
}
