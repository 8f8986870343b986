//! Pagination of a whole text into pages

use crate::Result;
use crate::constants::CENTER_MARKER;
use crate::error::PaginationError;
use crate::font::GlyphMetrics;
use crate::geometry::PageGeometry;
use crate::hyphenation::{Hyphenator, VowelHyphenator};
use crate::page::{OversizedBlankPolicy, Page, PageBuilder};
use crate::text::{LineBuilder, WidthCalculator};
use tracing::{debug, instrument, trace};

/// The pages produced by one pagination run, indexed from 1
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pagination {
    pages: Vec<Page>,
}

impl Pagination {
    /// Get a page by its 1-based number
    pub fn page(&self, number: usize) -> Option<&Page> {
        number.checked_sub(1).and_then(|index| self.pages.get(index))
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn all_pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

impl<'a> IntoIterator for &'a Pagination {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

/// Scanner state over source lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    /// Counting consecutive blank source lines
    BlankRun(usize),
}

/// Splits text into pages for a page geometry and bitmap font.
///
/// Source lines starting with two spaces are centered. Runs of blank source
/// lines are kept together as space for illustrations. Centered lines never
/// hyphenate; left-aligned lines use the configured hyphenator (Cyrillic
/// vowel breaks by default).
pub struct Paginator<'a> {
    metrics: &'a dyn GlyphMetrics,
    geometry: PageGeometry,
    compact: bool,
    letter_spacing: i32,
    requested_page: Option<usize>,
    hyphenator: Box<dyn Hyphenator + 'a>,
    blank_policy: OversizedBlankPolicy,
}

impl<'a> Paginator<'a> {
    /// Create a paginator using compact density and no letter spacing
    pub fn new(metrics: &'a dyn GlyphMetrics, geometry: PageGeometry) -> Self {
        Self {
            metrics,
            geometry,
            compact: true,
            letter_spacing: crate::constants::DEFAULT_LETTER_SPACING,
            requested_page: None,
            hyphenator: Box::new(VowelHyphenator),
            blank_policy: OversizedBlankPolicy::default(),
        }
    }

    /// Select the compact or relaxed row count
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Set extra pixels added after every character
    pub fn with_letter_spacing(mut self, letter_spacing: i32) -> Self {
        self.letter_spacing = letter_spacing;
        self
    }

    /// Stop paginating once the given 1-based page is complete
    pub fn with_requested_page(mut self, page: usize) -> Self {
        self.requested_page = Some(page);
        self
    }

    /// Replace the word splitting strategy
    pub fn with_hyphenator<H: Hyphenator + 'a>(mut self, hyphenator: H) -> Self {
        self.hyphenator = Box::new(hyphenator);
        self
    }

    /// Set how blank runs of a full page or more are emitted
    pub fn with_oversized_blank_policy(mut self, policy: OversizedBlankPolicy) -> Self {
        self.blank_policy = policy;
        self
    }

    /// Width calculator matching this paginator's font and spacing
    pub fn widths(&self) -> WidthCalculator<'a> {
        WidthCalculator::new(self.metrics).with_letter_spacing(self.letter_spacing)
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Rows per page for the selected density
    pub fn row_count(&self) -> usize {
        self.geometry.row_count(self.compact)
    }

    /// Paginate `text`, splitting source lines on `'\n'`.
    ///
    /// A blank run still pending at the end of the text is dropped. With a
    /// requested page, input processing stops once that page is sealed and
    /// the result holds exactly that many pages.
    #[instrument(skip(self, text), fields(text_len = text.len(), compact = self.compact))]
    pub fn paginate(&self, text: &str) -> Result<Pagination> {
        self.geometry.validate(self.compact)?;
        if self.requested_page == Some(0) {
            return Err(PaginationError::InvalidOption(
                "requested page numbers start at 1".to_string(),
            ));
        }

        let row_count = self.row_count();
        let printable_width = self.geometry.printable_width();
        debug!(
            "Paginating with {} rows of {} px",
            row_count, printable_width
        );

        let line_builder = LineBuilder::new(self.widths(), self.hyphenator.as_ref(), printable_width);
        let mut builder = PageBuilder::new(row_count, self.blank_policy);
        let mut state = ScanState::Normal;
        let mut stopped_early = false;

        for source in text.split('\n') {
            if source.trim().is_empty() {
                state = match state {
                    ScanState::Normal => ScanState::BlankRun(1),
                    ScanState::BlankRun(count) => ScanState::BlankRun(count + 1),
                };
                continue;
            }

            if let ScanState::BlankRun(count) = state {
                builder.push_blank_run(count);
                state = ScanState::Normal;
            }

            let centered = source.starts_with(CENTER_MARKER);
            line_builder.pack(source, centered, |line| builder.push_line(line));

            if self
                .requested_page
                .is_some_and(|page| builder.sealed_count() >= page)
            {
                debug!("Requested page is ready, stopping early");
                stopped_early = true;
                break;
            }
        }

        if let ScanState::BlankRun(count) = state {
            trace!("Dropping trailing blank run of {}", count);
        }

        let mut pages = builder.finish();
        if stopped_early {
            if let Some(page) = self.requested_page {
                pages.truncate(page);
            }
        }

        debug!("Paginated into {} pages", pages.len());
        Ok(Pagination { pages })
    }
}

impl std::fmt::Debug for Paginator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("geometry", &self.geometry)
            .field("compact", &self.compact)
            .field("letter_spacing", &self.letter_spacing)
            .field("requested_page", &self.requested_page)
            .field("blank_policy", &self.blank_policy)
            .finish()
    }
}
