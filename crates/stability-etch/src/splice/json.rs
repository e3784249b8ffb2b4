//! Splicing into the JSON rendering of the docs
//!
//! The slot lives inside a string value of `documentation.json`. The
//! document is parsed, the slot is replaced inside every string that holds
//! one, and the document is written back with the same two-space layout the
//! doc tool emits. Escaping of the spliced HTML is left to the serializer.
//!
//! Content outside the slot keeps its bytes only when the file already has
//! that layout. Other layouts come back as two-space pretty JSON: minified
//! input is expanded and numbers take serde_json's canonical form (`1.50`
//! becomes `1.5`). A file whose slot already holds the replacement is never
//! rewritten.

use super::{Markers, MarkerPattern, Splicer, SpliceOutcome, TargetKind};
use crate::diagnostics::StabilityResult;
use serde_json::Value;
use std::path::Path;

/// Replace the slot in every string of a JSON document.
///
/// Returns `None` when no string holds a slot. Otherwise returns the
/// re-serialized document, or the input unchanged when every slot already
/// held `replacement`. A trailing newline is kept iff the input had one.
pub fn splice_json(
    content: &str,
    replacement: &str,
    pattern: &MarkerPattern,
) -> StabilityResult<Option<String>> {
    let mut doc: Value = serde_json::from_str(content)?;

    let mut found = false;
    let mut changed = false;
    visit_strings_mut(&mut doc, &mut |s: &mut String| {
        if let Some(spliced) = pattern.splice(s, replacement) {
            found = true;
            if spliced != *s {
                *s = spliced;
                changed = true;
            }
        }
    });

    if !found {
        return Ok(None);
    }
    if !changed {
        return Ok(Some(content.to_string()));
    }

    let mut out = serde_json::to_string_pretty(&doc)?;
    if content.ends_with('\n') {
        out.push('\n');
    }
    Ok(Some(out))
}

fn visit_strings_mut(value: &mut Value, visitor: &mut impl FnMut(&mut String)) {
    match value {
        Value::String(s) => visitor(s),
        Value::Array(items) => {
            for item in items {
                visit_strings_mut(item, visitor);
            }
        }
        Value::Object(map) => {
            for item in map.values_mut() {
                visit_strings_mut(item, visitor);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Splice `replacement` into the slot of a JSON documentation file.
///
/// Missing markers leave the file untouched and are reported as
/// [`SpliceOutcome::MarkersNotFound`].
pub fn update_json_stability_mark(
    path: impl AsRef<Path>,
    replacement: &str,
    markers: &Markers,
) -> StabilityResult<SpliceOutcome> {
    Splicer::new(markers)?.splice(TargetKind::Json, path, replacement)
}
