//! Text pagination for bitmap fonts
//!
//! This library splits text into fixed-size pages using per-character pixel
//! widths, so a renderer can place every line without measuring text again.
//! It packs lines greedily, hyphenates overflowing words at vowel breaks,
//! keeps centered lines unbroken, and reserves runs of blank lines as
//! contiguous blocks for illustrations.

use tracing::instrument;

pub mod constants;
pub mod error;
pub mod font;
pub mod geometry;
pub mod hyphenation;
pub mod layout;
pub mod page;
pub mod text;

pub use error::{PaginationError, Result};
#[cfg(feature = "ttf-parser")]
pub use font::TtfGlyphMetrics;
pub use font::{Glyph, GlyphMetrics, GlyphTable};
pub use geometry::{A4, A5_RING, PageGeometry};
pub use hyphenation::{Hyphenator, NoHyphenation, VowelHyphenator, WordSplit};
pub use layout::{Pagination, Paginator};
pub use page::{Line, OversizedBlankPolicy, Page};
pub use text::WidthCalculator;

/// Paginate text with compact density and default options
///
/// # Arguments
/// * `text` - Source text; lines starting with two spaces are centered
/// * `metrics` - Pixel widths of the font glyphs
/// * `geometry` - Page size and padding
///
/// # Returns
/// The pages in source order, or an error if the geometry cannot hold text
#[instrument(skip(text, metrics))]
pub fn paginate(
    text: &str,
    metrics: &dyn GlyphMetrics,
    geometry: PageGeometry,
) -> Result<Pagination> {
    Paginator::new(metrics, geometry).paginate(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_pagination() {
        let font = GlyphTable::new().with_uniform_width("абвгдеёжзийклмнопрстуфхцчшщъыьэюя", 20);
        let text = "  Глава первая\n\nОлег говорит, в деревне три улицы.";

        let pagination = paginate(text, &font, A5_RING).unwrap();

        assert_eq!(pagination.page_count(), 1);
        let page = pagination.page(1).unwrap();
        assert_eq!(page.len(), 4);
        assert!(page.lines()[0].centered);
        assert!(page.lines()[1].is_blank());
        assert_eq!(page.lines()[2].text, "  Олег говорит, в деревне три ули-");
        assert_eq!(page.lines()[3].text, "цы. ");
        assert!(page.iter().skip(2).all(|l| !l.centered));
    }
}
