//! Locale-style string collation without an ICU dependency.
//!
//! Primary strength ignores case and groups characters as
//! punctuation/space < digits < letters < everything else. Ties break with
//! lowercase before uppercase, then by raw code points so distinct strings
//! never compare equal.

use std::cmp::Ordering;

#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary)
        .cmp(b.chars().map(primary))
        .then_with(|| a.chars().map(case_rank).cmp(b.chars().map(case_rank)))
        .then_with(|| a.cmp(b))
}

fn primary(c: char) -> (u8, char) {
    let class = if c.is_whitespace() || c.is_ascii_punctuation() {
        0
    } else if c.is_numeric() {
        1
    } else if c.is_alphabetic() {
        2
    } else {
        3
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}

fn case_rank(c: char) -> u8 {
    if c.is_uppercase() { 1 } else { 0 }
}
