//! Row classes for the stability table
//!
//! Every body row must be `<td>api</td><td>(level) text</td>`. The first
//! cell gets `module_stability`, the second `api_stability api_stability_N`
//! so the stylesheet can colour each level.

use super::tree::{Element, MarkupTree};
use crate::diagnostics::{StabilityError, StabilityResult};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Leading stability index, optionally parenthesized: "(2) Stable" or "2 Stable"
    static ref LEVEL_REGEX: Regex = Regex::new(r"^\s*\(?\s*(\d+)").unwrap();
}

/// Class of the API name cell
pub const MODULE_CLASS: &str = "module_stability";

/// Class prefix of the stability cell
pub const STABILITY_CLASS: &str = "api_stability";

/// Extract the stability index from the text of a stability cell.
pub fn parse_level(text: &str) -> Option<&str> {
    LEVEL_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Class list for a stability cell of the given level
pub fn stability_class(level: &str) -> String {
    format!("{} {}_{}", STABILITY_CLASS, STABILITY_CLASS, level)
}

/// Annotate every body row of every table in the tree.
///
/// Header rows (whose first cell is a `th`) are left alone. Returns the
/// number of annotated rows.
pub fn annotate_stability(tree: &mut MarkupTree) -> StabilityResult<usize> {
    let mut rows = 0;
    tree.try_visit_elements_mut(&mut |element: &mut Element| {
        if element.is("tr") && annotate_row(element, rows + 1)? {
            rows += 1;
        }
        Ok::<(), StabilityError>(())
    })?;
    Ok(rows)
}

/// Returns false for header rows.
fn annotate_row(row: &mut Element, index: usize) -> StabilityResult<bool> {
    let mut cells: Vec<&mut Element> = row
        .child_elements_mut()
        .filter(|cell| cell.is("td") || cell.is("th"))
        .collect();

    match cells.first() {
        Some(first) if first.is("td") => {}
        Some(_) => return Ok(false),
        None => return Err(StabilityError::malformed_row(index, "row has no cells")),
    }

    let count = cells.len();
    let [api, stability] = cells.as_mut_slice() else {
        return Err(StabilityError::malformed_row(
            index,
            format!("expected 2 cells, found {}", count),
        ));
    };

    let text = stability.text_content();
    let level = parse_level(&text).ok_or_else(|| {
        StabilityError::malformed_row(
            index,
            format!("stability cell {:?} does not start with a level", text),
        )
    })?;

    api.set_attr("class", MODULE_CLASS);
    stability.set_attr("class", stability_class(level));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::convert::markdown_to_tree;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("(2) Stable"), Some("2"));
        assert_eq!(parse_level("2 - Stable"), Some("2"));
        assert_eq!(parse_level(" (10) Custom"), Some("10"));
        assert_eq!(parse_level("Stable"), None);
        assert_eq!(parse_level(""), None);
    }

    #[test]
    fn test_stability_class() {
        assert_eq!(stability_class("2"), "api_stability api_stability_2");
    }

    #[test]
    fn test_annotate_rows() {
        let mut tree = markdown_to_tree(
            "| API | Stability |\n| --- | --------- |\n| [fs](fs.html) | (2) Stable |",
        );
        let rows = annotate_stability(&mut tree).unwrap();
        assert_eq!(rows, 1);

        let html = tree.to_html();
        assert!(html.contains("<th>API</th>"));
        assert!(html.contains("<td class=\"module_stability\"><a href=\"fs.html\">fs</a></td>"));
        assert!(html.contains("<td class=\"api_stability api_stability_2\">(2) Stable</td>"));
    }

    #[test]
    fn test_leading_digit_without_parens() {
        let mut tree = markdown_to_tree("| API | Stability |\n| --- | --- |\n| x | 2 Stable |");
        annotate_stability(&mut tree).unwrap();
        assert!(tree
            .to_html()
            .contains("<td class=\"api_stability api_stability_2\">2 Stable</td>"));
    }

    #[test]
    fn test_three_cells_is_malformed() {
        let mut tree = markdown_to_tree(
            "| A | B | C |\n| - | - | - |\n| x | (1) Experimental | extra |",
        );
        let err = annotate_stability(&mut tree).unwrap_err();
        match err {
            StabilityError::MalformedRow { row, reason } => {
                assert_eq!(row, 1);
                assert_eq!(reason, "expected 2 cells, found 3");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_level_is_malformed() {
        let mut tree = markdown_to_tree(
            "| API | Stability |\n| --- | --- |\n| fs | (2) Stable |\n| http | Stable |",
        );
        let err = annotate_stability(&mut tree).unwrap_err();
        assert!(matches!(err, StabilityError::MalformedRow { row: 2, .. }));
    }

    #[test]
    fn test_header_only_table() {
        let mut tree = markdown_to_tree("| API | Stability |\n| --- | --------- |");
        assert_eq!(annotate_stability(&mut tree).unwrap(), 0);
    }
}
