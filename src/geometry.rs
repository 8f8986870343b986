//! Page geometry presets and derived measurements

use crate::Result;
use crate::error::PaginationError;

/// Printable area of a page in pixels, plus the two row-count densities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    pub width: i32,
    pub height: i32,
    pub padding_top: i32,
    pub padding_left: i32,
    pub padding_right: i32,
    /// Rows per page in compact layout
    pub compact_row_count: usize,
    /// Rows per page in relaxed layout
    pub relaxed_row_count: usize,
}

/// A4 sheet
pub const A4: PageGeometry = PageGeometry {
    width: 1190,
    height: 1684,
    padding_top: 126,
    padding_left: 170,
    padding_right: 56,
    compact_row_count: 52,
    relaxed_row_count: 26,
};

/// A5 sheet bound on rings, with symmetric side padding
pub const A5_RING: PageGeometry = PageGeometry {
    width: 840,
    height: 1190,
    padding_top: 44,
    padding_left: 86,
    padding_right: 86,
    compact_row_count: 39,
    relaxed_row_count: 20,
};

impl PageGeometry {
    /// Width left for text between the side paddings
    pub fn printable_width(&self) -> i32 {
        self.width - self.padding_left - self.padding_right
    }

    /// Rows per page for the selected density
    pub fn row_count(&self, compact: bool) -> usize {
        if compact {
            self.compact_row_count
        } else {
            self.relaxed_row_count
        }
    }

    /// Set the side paddings
    pub fn with_horizontal_padding(mut self, left: i32, right: i32) -> Self {
        self.padding_left = left;
        self.padding_right = right;
        self
    }

    /// Set both row-count densities
    pub fn with_row_counts(mut self, compact: usize, relaxed: usize) -> Self {
        self.compact_row_count = compact;
        self.relaxed_row_count = relaxed;
        self
    }

    /// Check that the geometry can hold text at the selected density
    pub fn validate(&self, compact: bool) -> Result<()> {
        if self.padding_top < 0 || self.padding_left < 0 || self.padding_right < 0 {
            return Err(PaginationError::InvalidGeometry(format!(
                "padding must not be negative (top {}, left {}, right {})",
                self.padding_top, self.padding_left, self.padding_right
            )));
        }

        if self.printable_width() <= 0 {
            return Err(PaginationError::InvalidGeometry(format!(
                "printable width is {} (width {}, padding {} + {})",
                self.printable_width(),
                self.width,
                self.padding_left,
                self.padding_right
            )));
        }

        if self.row_count(compact) == 0 {
            return Err(PaginationError::InvalidGeometry(format!(
                "{} row count is 0",
                if compact { "compact" } else { "relaxed" }
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_width() {
        assert_eq!(A4.printable_width(), 964);
        assert_eq!(A5_RING.printable_width(), 668);
    }

    #[test]
    fn test_row_count_density() {
        assert_eq!(A4.row_count(true), 52);
        assert_eq!(A4.row_count(false), 26);
        assert!(A5_RING.validate(true).is_ok());
        assert!(A5_RING.validate(false).is_ok());
    }

    #[test]
    fn test_invalid_geometry() {
        let narrow = A4.with_horizontal_padding(600, 590);
        assert!(matches!(
            narrow.validate(true),
            Err(PaginationError::InvalidGeometry(_))
        ));

        let no_rows = A4.with_row_counts(0, 10);
        assert!(no_rows.validate(true).is_err());
        assert!(no_rows.validate(false).is_ok());

        let negative = A4.with_horizontal_padding(-1, 0);
        assert!(negative.validate(true).is_err());
    }
}
