//! Locale-aware string ordering for API names
//!
//! Approximates the root-locale collation browsers and Node use for
//! `localeCompare`. Strings are decomposed (NFD) and compared in levels:
//!
//! 1. primary: base characters with case folded. Whitespace sorts first,
//!    then punctuation and symbols in CLDR root order (`_` before `-`
//!    before `.` before `+`), then digits, then letters
//! 2. secondary: unaccented before accented (`e` < `é` < `f`)
//! 3. tertiary: lowercase before uppercase at the first differing position
//! 4. raw code point order, so the ordering is total
//!
//! Letters without a decomposition (`ß`, `ø`, non-Latin scripts) keep their
//! code point order after `z`.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// ASCII punctuation and symbols in CLDR root collation order
const SYMBOL_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Compare two strings the way the stability table orders API names.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| case_key(a).cmp(case_key(b)))
        .then_with(|| a.cmp(b))
}

/// Sort a slice in place by a string key using [`locale_compare`].
pub fn sort_by_locale<T>(items: &mut [T], key: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| locale_compare(key(a), key(b)));
}

fn base_chars(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c))
}

fn primary_key(s: &str) -> impl Iterator<Item = (u8, u32)> + '_ {
    base_chars(s).flat_map(|c| c.to_lowercase().map(weight))
}

fn weight(c: char) -> (u8, u32) {
    if c.is_whitespace() {
        (0, 0)
    } else if c.is_numeric() {
        (2, c as u32)
    } else if c.is_alphabetic() {
        (3, c as u32)
    } else {
        let rank = SYMBOL_ORDER
            .chars()
            .position(|s| s == c)
            .map_or(SYMBOL_ORDER.len() as u32 + c as u32, |i| i as u32);
        (1, rank)
    }
}

/// Each base character contributes a 0 followed by its combining marks.
fn accent_key(s: &str) -> Vec<u32> {
    s.nfd()
        .map(|c| if is_combining_mark(c) { c as u32 } else { 0 })
        .collect()
}

fn case_key(s: &str) -> impl Iterator<Item = bool> + '_ {
    base_chars(s).map(char::is_uppercase)
}
