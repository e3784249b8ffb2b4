//! Stability rows
//!
//! Projects the aggregated module records onto the rows of the stability
//! overview table.

use crate::collate::sort_by_locale;
use crate::module::ModuleRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the stability overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StabilityRow {
    /// API (module) name
    pub api: String,
    /// Link to the rendered module page (e.g. "fs.html")
    pub link: String,
    /// Stability index
    pub stability: i64,
    /// Display text, prefixed with the index (e.g. "(2) Stable")
    pub stability_text: String,
}

impl StabilityRow {
    /// Well-known level for this row
    pub fn level(&self) -> StabilityLevel {
        StabilityLevel::from_index(self.stability)
    }
}

/// Well-known stability indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StabilityLevel {
    /// 0
    Deprecated,
    /// 1
    Experimental,
    /// 2
    Stable,
    /// 3
    Legacy,
    /// Anything else
    Unknown,
}

impl StabilityLevel {
    /// All named levels, in index order
    pub const ALL: [StabilityLevel; 5] = [
        StabilityLevel::Deprecated,
        StabilityLevel::Experimental,
        StabilityLevel::Stable,
        StabilityLevel::Legacy,
        StabilityLevel::Unknown,
    ];

    /// Map a stability index to its level
    pub fn from_index(index: i64) -> Self {
        match index {
            0 => StabilityLevel::Deprecated,
            1 => StabilityLevel::Experimental,
            2 => StabilityLevel::Stable,
            3 => StabilityLevel::Legacy,
            _ => StabilityLevel::Unknown,
        }
    }

    /// Get display string
    pub fn display(&self) -> &'static str {
        match self {
            StabilityLevel::Deprecated => "Deprecated",
            StabilityLevel::Experimental => "Experimental",
            StabilityLevel::Stable => "Stable",
            StabilityLevel::Legacy => "Legacy",
            StabilityLevel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for StabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// How a module's markdown source path becomes a page link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkRewrite {
    /// Directory prefix removed from the source path
    pub strip_prefix: String,
    /// Extension of the source document
    pub source_extension: String,
    /// Extension of the rendered page
    pub target_extension: String,
}

impl Default for LinkRewrite {
    fn default() -> Self {
        Self {
            strip_prefix: "doc/api/".to_string(),
            source_extension: ".md".to_string(),
            target_extension: ".html".to_string(),
        }
    }
}

impl LinkRewrite {
    /// Derive a page link from a source path.
    ///
    /// Only the first occurrence of the prefix and of the extension is
    /// rewritten.
    pub fn link_for(&self, source: &str) -> String {
        let stripped = if self.strip_prefix.is_empty() {
            source.to_string()
        } else {
            source.replacen(&self.strip_prefix, "", 1)
        };
        if self.source_extension.is_empty() {
            stripped
        } else {
            stripped.replacen(&self.source_extension, &self.target_extension, 1)
        }
    }
}

/// Collect the stability rows for every module that declares a stability.
///
/// Records without a display name or with a missing or negative index are
/// skipped. The result is sorted by API name with
/// [`locale_compare`](crate::collate::locale_compare).
pub fn collect_stability(modules: &[ModuleRecord], links: &LinkRewrite) -> Vec<StabilityRow> {
    let mut rows: Vec<StabilityRow> = modules
        .iter()
        .filter_map(|module| {
            if !module.has_stability() {
                tracing::debug!("Skipping {}: no stability", module.name);
                return None;
            }
            let stability = module.stability?;
            Some(StabilityRow {
                api: module.name.clone(),
                link: links.link_for(&module.source),
                stability,
                stability_text: format!("({}) {}", stability, module.stability_text),
            })
        })
        .collect();

    sort_by_locale(&mut rows, |row| row.api.as_str());
    rows
}

/// Count rows per well-known level
pub fn level_counts(rows: &[StabilityRow]) -> Vec<(StabilityLevel, usize)> {
    StabilityLevel::ALL
        .iter()
        .map(|level| {
            let count = rows.iter().filter(|row| row.level() == *level).count();
            (*level, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collate::locale_compare;
    use crate::test::{mock_module, mock_module_without_stability};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_link_for_default() {
        let links = LinkRewrite::default();
        assert_eq!(links.link_for("doc/api/fs.md"), "fs.html");
        assert_eq!(links.link_for("fs.md"), "fs.html");
    }

    #[test]
    fn test_link_for_first_occurrence_only() {
        let links = LinkRewrite::default();
        assert_eq!(links.link_for("doc/api/a.md.md"), "a.html.md");
    }

    #[test]
    fn test_link_for_custom() {
        let links = LinkRewrite {
            strip_prefix: "docs/".into(),
            source_extension: ".markdown".into(),
            target_extension: ".htm".into(),
        };
        assert_eq!(links.link_for("docs/net.markdown"), "net.htm");
    }

    #[test]
    fn test_collect_example() {
        let modules = vec![
            mock_module("http", 1, "Experimental"),
            mock_module("fs", 2, "Stable"),
        ];

        let rows = collect_stability(&modules, &LinkRewrite::default());

        assert_eq!(
            rows,
            vec![
                StabilityRow {
                    api: "fs".into(),
                    link: "fs.html".into(),
                    stability: 2,
                    stability_text: "(2) Stable".into(),
                },
                StabilityRow {
                    api: "http".into(),
                    link: "http.html".into(),
                    stability: 1,
                    stability_text: "(1) Experimental".into(),
                },
            ]
        );
    }

    #[test]
    fn test_collect_filters() {
        let mut unnamed = mock_module("internal", 1, "Experimental");
        unnamed.display_name = None;
        let mut empty_name = mock_module("empty", 1, "Experimental");
        empty_name.display_name = Some(String::new());
        let negative = mock_module("negative", -1, "Nope");

        let modules = vec![
            mock_module("zlib", 2, "Stable"),
            unnamed,
            empty_name,
            negative,
            mock_module_without_stability("globals"),
            mock_module("domain", 0, "Deprecated"),
        ];

        let rows = collect_stability(&modules, &LinkRewrite::default());
        let apis: Vec<_> = rows.iter().map(|r| r.api.as_str()).collect();
        assert_eq!(apis, vec!["domain", "zlib"]);
    }

    #[test]
    fn test_collect_sorted() {
        let modules: Vec<_> = ["worker_threads", "Buffer", "v8", "assert", "vm", "async_hooks"]
            .iter()
            .map(|name| mock_module(name, 2, "Stable"))
            .collect();

        let rows = collect_stability(&modules, &LinkRewrite::default());
        for pair in rows.windows(2) {
            assert_ne!(
                locale_compare(&pair[0].api, &pair[1].api),
                std::cmp::Ordering::Greater
            );
        }
        assert_eq!(rows[0].api, "assert");
        assert_eq!(rows[1].api, "async_hooks");
    }

    #[test]
    fn test_collect_empty() {
        assert!(collect_stability(&[], &LinkRewrite::default()).is_empty());
    }

    #[test]
    fn test_level_counts() {
        let modules = vec![
            mock_module("a", 2, "Stable"),
            mock_module("b", 2, "Stable"),
            mock_module("c", 0, "Deprecated"),
            mock_module("d", 7, "Odd"),
        ];
        let rows = collect_stability(&modules, &LinkRewrite::default());

        assert_eq!(
            level_counts(&rows),
            vec![
                (StabilityLevel::Deprecated, 1),
                (StabilityLevel::Stable, 2),
                (StabilityLevel::Unknown, 1),
            ]
        );
    }

    #[test]
    fn test_row_serializes_camel_case() {
        let row = StabilityRow {
            api: "fs".into(),
            link: "fs.html".into(),
            stability: 2,
            stability_text: "(2) Stable".into(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["stabilityText"], "(2) Stable");
    }
}
