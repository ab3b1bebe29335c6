//! Highlight engine: syntax coloring from rule profiles and transient
//! search-match highlighting, both expressed as layered style spans over a
//! [`TextBuffer`]'s text.

pub mod profile;
pub mod style;

pub use profile::{HighlightProfile, HighlightRule};
pub use style::{Color, Layer, SEARCH_MATCH, Style, StyleMap, StyleSpan};

use core_buffer::TextBuffer;
use regex::Regex;
use tracing::{debug, trace};

/// Scan the full buffer text and push one syntax span per non-overlapping
/// match of each rule, in the profile's declared order. Later rules paint
/// over earlier ones where spans overlap (list order is paint order).
pub fn apply_profile(buffer: &TextBuffer, styles: &mut StyleMap, profile: &HighlightProfile) {
    let text = buffer.text();
    let mut spans = 0usize;
    for rule in &profile.rules {
        for m in rule.pattern.find_iter(text) {
            styles.push(StyleSpan {
                start: m.start(),
                end: m.end(),
                style: rule.style,
                layer: Layer::Syntax,
            });
            spans += 1;
        }
    }
    debug!(target: "highlight", profile = profile.name, spans, "apply_profile");
}

/// Highlight every case-insensitive literal occurrence of `term` with the
/// search-match background and select the first one in the buffer. Returns
/// the byte offset of the first match, or `None` when the term does not occur
/// (the caller owes the user a "not found" notification in that case).
///
/// An empty `term` is refused: it would match at every position.
pub fn highlight_matches(buffer: &mut TextBuffer, styles: &mut StyleMap, term: &str) -> Option<usize> {
    if term.is_empty() {
        return None;
    }
    let pattern = literal_regex(term, true);
    let mut first: Option<(usize, usize)> = None;
    let mut count = 0usize;
    for m in pattern.find_iter(buffer.text()) {
        styles.push(StyleSpan {
            start: m.start(),
            end: m.end(),
            style: Style::bg(SEARCH_MATCH),
            layer: Layer::Search,
        });
        if first.is_none() {
            first = Some((m.start(), m.end()));
        }
        count += 1;
    }
    trace!(target: "highlight", term, count, "highlight_matches");
    let (start, end) = first?;
    buffer.select(start, end);
    Some(start)
}

/// Remove only the search-highlight layer, leaving syntax spans intact.
/// Idempotent: clearing an already-clear map is a no-op.
pub fn clear_matches(styles: &mut StyleMap) {
    styles.clear_layer(Layer::Search);
}

/// Compile `term` as a literal pattern: every regex metacharacter in the
/// user's input is escaped so search never grows surprise syntax.
pub fn literal_regex(term: &str, case_insensitive: bool) -> Regex {
    let escaped = regex::escape(term);
    let pattern = if case_insensitive {
        format!("(?i){escaped}")
    } else {
        escaped
    };
    // Escaped literals always compile; a failure would be a regex crate bug.
    Regex::new(&pattern).expect("escaped literal must be a valid pattern")
}
