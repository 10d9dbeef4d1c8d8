//! Layer height extraction
//!
//! Scans G-code text once, keeping every line verbatim (minus trailing
//! whitespace) and collecting the distinct Z heights it mentions.

use std::collections::HashSet;
use std::fmt;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// First `Z` followed by an unsigned decimal number. ASCII digits only; at
/// most one decimal point; at least one digit.
static Z_HEIGHT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Z([0-9]+(?:\.[0-9]*)?|\.[0-9]+)").expect("Z height pattern is valid")
});

/// Any of the three line terminators: `\r\n`, `\n`, or a lone `\r`.
static LINE_BREAK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\n|\r").expect("line break pattern is valid"));

/// Split text into lines on any terminator. A final terminator does not
/// start an extra empty line.
fn split_lines(raw: &str) -> Vec<&str> {
    if raw.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<&str> = LINE_BREAK_REGEX.split(raw).collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Find the height carried by a line, if any.
///
/// Only the first match counts, wherever it appears in the line (comments
/// included).
pub fn detect_height(line: &str) -> Option<f64> {
    Z_HEIGHT_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// The loaded G-code, one entry per source line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDocument {
    lines: Vec<String>,
}

impl SourceDocument {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<String>> for SourceDocument {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

/// Distinct layer heights, strictly ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeightIndex {
    heights: Vec<f64>,
}

impl HeightIndex {
    /// Build an index from arbitrary values: duplicates are dropped and the
    /// rest sorted ascending.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut seen = HashSet::new();
        let mut heights: Vec<f64> = values
            .into_iter()
            .filter(|h| seen.insert(h.to_bits()))
            .collect();
        heights.sort_by(f64::total_cmp);
        Self { heights }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.heights
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Lowest height, the default starting layer.
    pub fn first(&self) -> Option<f64> {
        self.heights.first().copied()
    }

    /// Zero-based layer index of `height`, by exact equality.
    pub fn position(&self, height: f64) -> Option<usize> {
        self.heights
            .binary_search_by(|probe| probe.total_cmp(&height))
            .ok()
    }

    pub fn contains(&self, height: f64) -> bool {
        self.position(height).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.heights.iter().copied()
    }
}

/// Wrapper that prints a height the way users see it in the height list:
/// shortest round-trip digits, always with a decimal point (`0.2`, `10.0`).
#[derive(Debug, Clone, Copy)]
pub struct HeightLabel(pub f64);

impl fmt::Display for HeightLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Split raw text into lines and collect its distinct heights.
pub fn extract(raw: &str) -> (SourceDocument, HeightIndex) {
    let lines: Vec<String> = split_lines(raw)
        .into_iter()
        .map(|l| l.trim_end().to_string())
        .collect();
    let heights = HeightIndex::from_values(lines.iter().filter_map(|l| detect_height(l)));

    debug!(
        "Extracted {} distinct heights from {} lines",
        heights.len(),
        lines.len()
    );

    (SourceDocument::from(lines), heights)
}
