//! Text measurement and greedy line packing

use crate::constants::*;
use crate::font::GlyphMetrics;
use crate::hyphenation::Hyphenator;
use crate::page::Line;
use tracing::trace;

/// Measures character runs in pixels using glyph metrics.
///
/// Characters without metrics, whitespace included, cost the fallback width.
/// Letter spacing is added after every character.
#[derive(Clone, Copy)]
pub struct WidthCalculator<'a> {
    metrics: &'a dyn GlyphMetrics,
    letter_spacing: i32,
    fallback_width: i32,
}

impl<'a> WidthCalculator<'a> {
    pub fn new(metrics: &'a dyn GlyphMetrics) -> Self {
        Self {
            metrics,
            letter_spacing: DEFAULT_LETTER_SPACING,
            fallback_width: FALLBACK_SPACE_WIDTH,
        }
    }

    /// Set the extra pixels added after every character
    pub fn with_letter_spacing(mut self, letter_spacing: i32) -> Self {
        self.letter_spacing = letter_spacing;
        self
    }

    /// Set the width used for spaces and unmapped characters
    pub fn with_fallback_width(mut self, fallback_width: i32) -> Self {
        self.fallback_width = fallback_width;
        self
    }

    pub fn fallback_width(&self) -> i32 {
        self.fallback_width
    }

    pub fn letter_spacing(&self) -> i32 {
        self.letter_spacing
    }

    /// Width of a single character including letter spacing
    pub fn char_width(&self, ch: char) -> i32 {
        self.metrics
            .glyph_width(ch)
            .unwrap_or(self.fallback_width)
            .saturating_add(self.letter_spacing)
    }

    /// Total width of a character run
    pub fn width_of(&self, text: &str) -> i32 {
        text.chars()
            .fold(0i32, |total, ch| total.saturating_add(self.char_width(ch)))
    }
}

impl std::fmt::Debug for WidthCalculator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidthCalculator")
            .field("letter_spacing", &self.letter_spacing)
            .field("fallback_width", &self.fallback_width)
            .finish()
    }
}

/// Split a source line into packing tokens.
///
/// Two synthetic blank tokens come first so the line's indentation is priced
/// like two spaces. The line itself is split on every whitespace character,
/// so runs of whitespace yield empty tokens.
pub fn tokenize(source: &str) -> impl Iterator<Item = &str> {
    std::iter::repeat_n("", SYNTHETIC_INDENT_TOKENS).chain(source.split(char::is_whitespace))
}

/// Packs the tokens of one source line into lines no wider than the printable width
pub struct LineBuilder<'a> {
    widths: WidthCalculator<'a>,
    hyphenator: &'a dyn Hyphenator,
    printable_width: i32,
}

impl<'a> LineBuilder<'a> {
    pub fn new(
        widths: WidthCalculator<'a>,
        hyphenator: &'a dyn Hyphenator,
        printable_width: i32,
    ) -> Self {
        Self {
            widths,
            hyphenator,
            printable_width,
        }
    }

    /// Pack a non-blank source line, handing every finished line to `emit` in order.
    ///
    /// Left-aligned lines hyphenate an overflowing word through the
    /// hyphenator. Centered lines never hyphenate and move the whole word to
    /// the next line instead.
    pub fn pack(&self, source: &str, centered: bool, mut emit: impl FnMut(Line)) {
        let space_width = self.widths.fallback_width();
        let mut current_text = String::new();
        let mut current_width = 0i32;
        let mut emitted = 0;

        for token in tokenize(source) {
            let token_width = self.widths.width_of(token);

            if current_width.saturating_add(token_width) <= self.printable_width {
                current_text.push_str(token);
                current_text.push(TOKEN_SEPARATOR);
                current_width = current_width
                    .saturating_add(token_width)
                    .saturating_add(space_width);
            } else if centered {
                let finished = std::mem::take(&mut current_text);
                emit(self.seal(finished, true));
                emitted += 1;

                current_text.push_str(token);
                current_text.push(TOKEN_SEPARATOR);
                current_width = self.widths.width_of(&current_text);
            } else {
                let split = self.hyphenator.split(
                    token,
                    self.printable_width.saturating_sub(current_width),
                    &self.widths,
                );
                current_text.push_str(&split.left);
                emit(self.seal(std::mem::take(&mut current_text), false));
                emitted += 1;

                current_text.push_str(&split.right);
                current_text.push(TOKEN_SEPARATOR);
                current_width = self.widths.width_of(&current_text);
            }
        }

        if !current_text.is_empty() {
            emit(self.seal(current_text, centered));
            emitted += 1;
        }
        trace!("Packed source line into {} lines", emitted);
    }

    #[cfg(test)]
    fn pack_to_vec(&self, source: &str, centered: bool) -> Vec<Line> {
        let mut lines = Vec::new();
        self.pack(source, centered, |line| lines.push(line));
        lines
    }

    fn seal(&self, text: String, centered: bool) -> Line {
        if centered {
            let width = self.widths.width_of(&text);
            Line::centered(text, width)
        } else {
            Line::left(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{Glyph, GlyphTable};
    use crate::hyphenation::{NoHyphenation, VowelHyphenator};

    const CYRILLIC: &str = "абвгдеёжзийклмнопрстуфхцчшщъыьэюя";

    fn table() -> GlyphTable {
        GlyphTable::new()
            .with_uniform_width(CYRILLIC, 10)
            .with_uniform_width("ab", 10)
    }

    fn texts(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_width_of_uses_fallback_for_unknown() {
        let table = table();
        let widths = WidthCalculator::new(&table);

        assert_eq!(widths.width_of(""), 0);
        assert_eq!(widths.width_of("аб"), 20);
        assert_eq!(widths.width_of("а б"), 35);
        assert_eq!(widths.width_of("x"), FALLBACK_SPACE_WIDTH);
    }

    #[test]
    fn test_width_of_adds_letter_spacing() {
        let table = table().with_glyph('ж', Glyph::new(14));
        let widths = WidthCalculator::new(&table).with_letter_spacing(2);

        assert_eq!(widths.width_of("аж"), 12 + 16);
        assert_eq!(widths.width_of(" "), 17);
        assert_eq!(widths.letter_spacing(), 2);
    }

    #[test]
    fn test_huge_glyph_widths_saturate() {
        let table = GlyphTable::new().with_glyph('а', Glyph::new(2_000_000_000));
        let widths = WidthCalculator::new(&table).with_letter_spacing(5);

        assert_eq!(widths.char_width('а'), 2_000_000_005);
        assert_eq!(widths.width_of("ааа"), i32::MAX);

        let builder = LineBuilder::new(widths, &VowelHyphenator, 100);
        let lines = builder.pack_to_vec("аа а", false);
        assert_eq!(texts(&lines), vec!["  ", "аа ", "а "]);
    }

    #[test]
    fn test_tokenize_prepends_synthetic_blanks() {
        let tokens: Vec<&str> = tokenize("aa bb").collect();
        assert_eq!(tokens, vec!["", "", "aa", "bb"]);

        let tokens: Vec<&str> = tokenize("  aa").collect();
        assert_eq!(tokens, vec!["", "", "", "", "aa"]);

        let tokens: Vec<&str> = tokenize("a\tb").collect();
        assert_eq!(tokens, vec!["", "", "a", "b"]);
    }

    #[test]
    fn test_overflowing_short_word_is_deferred() {
        let table = table();
        let builder = LineBuilder::new(WidthCalculator::new(&table), &VowelHyphenator, 50);

        let lines = builder.pack_to_vec("aa bb", false);
        assert_eq!(texts(&lines), vec!["  aa ", "bb "]);
        assert!(lines.iter().all(|l| !l.centered));
        assert!(lines.iter().all(|l| l.precomputed_width.is_none()));
    }

    #[test]
    fn test_left_aligned_line_is_hyphenated() {
        let table = table();
        let widths = WidthCalculator::new(&table);
        let builder = LineBuilder::new(widths, &VowelHyphenator, 150);

        // "  да " is 65 px wide, leaving 85 px; "перепо-" is 75 px
        let lines = builder.pack_to_vec("да переполнение", false);
        assert_eq!(texts(&lines), vec!["  да перепо-", "лнение "]);
        assert!(widths.width_of(&lines[0].text) <= 150);
    }

    #[test]
    fn test_hyphenation_strategy_is_pluggable() {
        let table = table();
        let builder = LineBuilder::new(WidthCalculator::new(&table), &NoHyphenation, 150);

        let lines = builder.pack_to_vec("да переполнение", false);
        assert_eq!(texts(&lines), vec!["  да ", "переполнение "]);
    }

    #[test]
    fn test_centered_line_never_hyphenates() {
        let table = table();
        let builder = LineBuilder::new(WidthCalculator::new(&table), &VowelHyphenator, 50);

        let lines = builder.pack_to_vec("  переполнение", true);
        assert_eq!(texts(&lines), vec!["    ", "переполнение "]);
        assert!(lines.iter().all(|l| l.centered));
        assert!(lines.iter().all(|l| !l.text.contains('-')));
        assert_eq!(lines[0].precomputed_width, Some(60));
        assert_eq!(lines[1].precomputed_width, Some(135));
    }

    #[test]
    fn test_centered_line_wraps_whole_words() {
        let table = table();
        let builder = LineBuilder::new(WidthCalculator::new(&table), &VowelHyphenator, 110);

        let lines = builder.pack_to_vec("  глава первая", true);
        assert_eq!(texts(&lines), vec!["    глава ", "первая "]);
        assert_eq!(lines[0].precomputed_width, Some(125));
    }
}
