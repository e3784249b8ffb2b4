//! Table generation
//!
//! Renders stability rows into the Markdown source that every other output
//! format is derived from.

mod markdown;

pub use markdown::{escape_cell, MarkdownTableRenderer};
