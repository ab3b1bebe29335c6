//! Style spans and the layered style map.
//!
//! Styles are kept as an ordered list of `(range, style)` pairs rather than a
//! flattened per-byte attribute buffer. Paint order is list order: when spans
//! overlap, a later span's set attributes win over an earlier span's
//! (last-write-wins per attribute, mirroring merge-format semantics).
//! Each span is tagged with the layer that produced it so transient search
//! highlights can be stripped without disturbing syntax coloring.

/// 24-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The original palette.
pub const KEYWORD: Color = Color::rgb(0xff, 0x79, 0xc6);
pub const STRING: Color = Color::rgb(0xf1, 0xfa, 0x8c);
pub const COMMENT: Color = Color::rgb(0x62, 0x72, 0xa4);
pub const SEARCH_MATCH: Color = Color::rgb(0xff, 0xeb, 0x3b);

/// Visual attributes applied to a span. `None` means "leave as-is", which is
/// what makes per-attribute last-write-wins composition possible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

impl Style {
    pub const fn fg(color: Color) -> Self {
        Self {
            foreground: Some(color),
            background: None,
        }
    }

    pub const fn bg(color: Color) -> Self {
        Self {
            foreground: None,
            background: Some(color),
        }
    }

    /// Overlay `other` on top of `self`: set attributes of `other` win.
    fn merged(self, other: Self) -> Self {
        Self {
            foreground: other.foreground.or(self.foreground),
            background: other.background.or(self.background),
        }
    }
}

/// Origin of a span. Search highlights layer on top of syntax and are the
/// only spans removed by [`StyleMap::clear_layer`] during a new search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Syntax,
    Search,
}

/// A styled half-open byte range `[start, end)` of the buffer text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleSpan {
    pub start: usize,
    pub end: usize,
    pub style: Style,
    pub layer: Layer,
}

/// Ordered collection of style spans for one document.
#[derive(Default, Debug)]
pub struct StyleMap {
    spans: Vec<StyleSpan>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, span: StyleSpan) {
        self.spans.push(span);
    }

    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// Drop every span of `layer`, preserving the relative order of the rest.
    /// Idempotent.
    pub fn clear_layer(&mut self, layer: Layer) {
        self.spans.retain(|s| s.layer != layer);
    }

    /// Effective style at a byte offset, folding spans in paint order.
    pub fn resolve_at(&self, offset: usize) -> Style {
        self.spans
            .iter()
            .filter(|s| s.start <= offset && offset < s.end)
            .fold(Style::default(), |acc, s| acc.merged(s.style))
    }

    /// Spans belonging to `layer`, in paint order.
    pub fn layer_spans(&self, layer: Layer) -> impl Iterator<Item = &StyleSpan> {
        self.spans.iter().filter(move |s| s.layer == layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize, style: Style, layer: Layer) -> StyleSpan {
        StyleSpan {
            start,
            end,
            style,
            layer,
        }
    }

    #[test]
    fn later_span_wins_on_overlap() {
        let mut map = StyleMap::new();
        map.push(span(0, 10, Style::fg(KEYWORD), Layer::Syntax));
        map.push(span(5, 10, Style::fg(COMMENT), Layer::Syntax));
        assert_eq!(map.resolve_at(2).foreground, Some(KEYWORD));
        assert_eq!(map.resolve_at(7).foreground, Some(COMMENT));
    }

    #[test]
    fn search_background_layers_over_syntax_foreground() {
        let mut map = StyleMap::new();
        map.push(span(0, 4, Style::fg(STRING), Layer::Syntax));
        map.push(span(2, 6, Style::bg(SEARCH_MATCH), Layer::Search));
        let at = map.resolve_at(3);
        assert_eq!(at.foreground, Some(STRING), "syntax foreground survives");
        assert_eq!(at.background, Some(SEARCH_MATCH));
    }

    #[test]
    fn clear_layer_is_idempotent_and_selective() {
        let mut map = StyleMap::new();
        map.push(span(0, 4, Style::fg(STRING), Layer::Syntax));
        map.push(span(0, 4, Style::bg(SEARCH_MATCH), Layer::Search));
        map.clear_layer(Layer::Search);
        map.clear_layer(Layer::Search);
        assert_eq!(map.spans().len(), 1);
        assert_eq!(map.spans()[0].layer, Layer::Syntax);
    }

    #[test]
    fn resolve_outside_any_span_is_default() {
        let mut map = StyleMap::new();
        map.push(span(0, 2, Style::fg(KEYWORD), Layer::Syntax));
        assert_eq!(map.resolve_at(2), Style::default(), "end is exclusive");
    }
}
