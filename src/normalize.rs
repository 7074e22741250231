//! Text folding for alias and company-name matching
//!
//! Registry strings and incoming text go through the same fold so that
//! comparisons are case-insensitive and width-insensitive:
//! - Unicode NFKC normalization
//! - Full Unicode lowercase (Polish diacritics keep their letter, e.g. "Ł" -> "ł")
//! - Surrounding whitespace trimmed (registry strings only)
//!
//! Incoming text is folded through [`FoldedText`], which keeps enough
//! bookkeeping to report a match as the raw substring it came from.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold text for case-insensitive comparison.
///
/// # Examples
///
/// ```
/// use ticker_resolver::normalize::fold_text;
///
/// assert_eq!(fold_text("PKN ORLEN"), "pkn orlen");
/// assert_eq!(fold_text("ＣＤ Ｐｒｏｊｅｋｔ"), "cd projekt");
/// ```
pub fn fold_text(s: &str) -> String {
    FoldedText::new(s).folded
}

/// Fold one base character together with its combining marks
fn fold_segment(segment: &str) -> String {
    segment.nfkc().flat_map(char::to_lowercase).collect()
}

/// Folded copy of a title or body that maps matches back to the raw input
///
/// Folding runs per segment (a base character plus any combining marks
/// after it), so every folded byte traces back to the raw segment that
/// produced it.
#[derive(Debug, Clone)]
pub struct FoldedText<'a> {
    raw: &'a str,
    folded: String,
    /// (folded byte start, raw byte start) per segment, ascending
    segments: Vec<(usize, usize)>,
}

impl<'a> FoldedText<'a> {
    pub fn new(raw: &'a str) -> Self {
        let mut starts: Vec<usize> = raw
            .char_indices()
            .filter(|&(i, c)| i == 0 || !is_combining_mark(c))
            .map(|(i, _)| i)
            .collect();
        starts.push(raw.len());

        let mut folded = String::with_capacity(raw.len());
        let mut segments = Vec::with_capacity(starts.len());
        for bounds in starts.windows(2) {
            segments.push((folded.len(), bounds[0]));
            folded.push_str(&fold_segment(&raw[bounds[0]..bounds[1]]));
        }

        Self {
            raw,
            folded,
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.folded
    }

    /// Raw text behind the folded byte range `start..end`
    ///
    /// A range that starts or ends inside a segment (e.g. half of a
    /// ligature) widens to the whole segment.
    pub fn raw_slice(&self, start: usize, end: usize) -> &'a str {
        let from = self.raw_start(start);
        let last = self.segment_at(end.saturating_sub(1).max(start));
        let to = self
            .segments
            .get(last + 1)
            .map_or(self.raw.len(), |&(_, raw)| raw);
        &self.raw[from..to.max(from)]
    }

    /// Character offset in the raw text of the folded byte `start`
    pub fn raw_char_offset(&self, start: usize) -> usize {
        char_offset(self.raw, self.raw_start(start))
    }

    fn segment_at(&self, folded_idx: usize) -> usize {
        self.segments
            .partition_point(|&(folded, _)| folded <= folded_idx)
            .saturating_sub(1)
    }

    fn raw_start(&self, start: usize) -> usize {
        self.segments
            .get(self.segment_at(start))
            .map_or(0, |&(_, raw)| raw)
    }
}

/// Fold a registry string (alias, name), dropping it if nothing is left.
pub fn fold_registry_text(s: &str) -> Option<String> {
    let folded = fold_text(s.trim());
    if folded.is_empty() {
        None
    } else {
        Some(folded)
    }
}

/// Canonical ticker form: trimmed, uppercase. Blank tickers are rejected.
pub fn normalize_ticker(s: &str) -> Option<String> {
    let ticker = s.trim();
    if ticker.is_empty() {
        None
    } else {
        Some(ticker.to_uppercase())
    }
}

/// Word characters for boundary tests (alphanumeric or underscore)
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Convert a byte index into a character offset.
pub fn char_offset(s: &str, byte_idx: usize) -> usize {
    s[..byte_idx].chars().count()
}

/// Length in characters (not bytes)
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
