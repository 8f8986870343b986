//! Lines, pages, and the row-count page accumulator

use crate::geometry::PageGeometry;
use crate::text::WidthCalculator;
use tracing::trace;

/// A finished line of text, ready to be placed on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub centered: bool,
    /// Pixel width, measured at packing time for centered lines only
    pub precomputed_width: Option<i32>,
}

impl Line {
    /// Create a left-aligned line
    pub fn left<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            centered: false,
            precomputed_width: None,
        }
    }

    /// Create a centered line with its measured width
    pub fn centered<S: Into<String>>(text: S, width: i32) -> Self {
        Self {
            text: text.into(),
            centered: true,
            precomputed_width: Some(width),
        }
    }

    /// Create an empty row reserved for non-text content
    pub fn blank() -> Self {
        Self::left("")
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    /// Pixel width of the line, measured on demand unless precomputed
    pub fn width(&self, widths: &WidthCalculator<'_>) -> i32 {
        self.precomputed_width
            .unwrap_or_else(|| widths.width_of(&self.text))
    }

    /// X coordinate at which a renderer should start drawing the line
    pub fn horizontal_offset(&self, geometry: &PageGeometry, widths: &WidthCalculator<'_>) -> i32 {
        if self.centered {
            geometry.padding_left + (geometry.printable_width() - self.width(widths)) / 2
        } else {
            geometry.padding_left
        }
    }
}

/// An ordered, sealed sequence of lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    lines: Vec<Line>,
}

impl Page {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }
}

impl<'a> IntoIterator for &'a Page {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// What to do with a blank run that fills a whole page or more
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OversizedBlankPolicy {
    /// Emit the run as a page holding a single placeholder row
    #[default]
    Collapse,
    /// Emit every blank row, filling as many pages as needed
    Preserve,
}

/// Accumulates lines into pages of at most `row_count` rows.
///
/// A page is sealed when a line arrives for a full buffer, when a blank run
/// does not fit, or when the builder is finished. Empty buffers are never
/// sealed.
#[derive(Debug)]
pub struct PageBuilder {
    row_count: usize,
    policy: OversizedBlankPolicy,
    pages: Vec<Page>,
    current: Vec<Line>,
}

impl PageBuilder {
    pub fn new(row_count: usize, policy: OversizedBlankPolicy) -> Self {
        Self {
            row_count,
            policy,
            pages: Vec::new(),
            current: Vec::with_capacity(row_count),
        }
    }

    /// Append a finished line, rolling over to a new page when the current one is full
    pub fn push_line(&mut self, line: Line) {
        if self.current.len() >= self.row_count {
            self.seal_current();
        }
        self.current.push(line);
    }

    /// Append a run of `count` blank rows as one block.
    ///
    /// The block is moved whole to a fresh page when it does not fit the
    /// current one. A block of `row_count` rows or more is handled by the
    /// oversized blank policy.
    pub fn push_blank_run(&mut self, count: usize) {
        if count == 0 {
            return;
        }

        if self.current.len() + count <= self.row_count {
            trace!("Blank run of {} fits the current page", count);
            self.current.extend(std::iter::repeat_n(Line::blank(), count));
        } else if count < self.row_count {
            trace!("Blank run of {} moved to a new page", count);
            self.seal_current();
            self.current.extend(std::iter::repeat_n(Line::blank(), count));
        } else {
            self.seal_current();
            match self.policy {
                OversizedBlankPolicy::Collapse => {
                    trace!("Blank run of {} collapsed to a placeholder page", count);
                    self.pages.push(Page::new(vec![Line::blank()]));
                }
                OversizedBlankPolicy::Preserve => {
                    trace!("Blank run of {} spread over full pages", count);
                    let mut remaining = count;
                    while remaining >= self.row_count {
                        self.pages
                            .push(Page::new(vec![Line::blank(); self.row_count]));
                        remaining -= self.row_count;
                    }
                    self.current.extend(std::iter::repeat_n(Line::blank(), remaining));
                }
            }
        }
    }

    /// Number of pages sealed so far
    pub fn sealed_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of lines in the unsealed buffer
    pub fn current_len(&self) -> usize {
        self.current.len()
    }

    /// Seal the remaining buffer and return every page
    pub fn finish(mut self) -> Vec<Page> {
        self.seal_current();
        self.pages
    }

    fn seal_current(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let lines = std::mem::replace(&mut self.current, Vec::with_capacity(self.row_count));
        trace!("Sealed page {} with {} lines", self.pages.len() + 1, lines.len());
        self.pages.push(Page::new(lines));
    }
}
