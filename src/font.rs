//! Glyph metrics for pixel-accurate text measurement

use crate::Result;
use crate::error::PaginationError;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Trait for looking up per-character pixel widths of a bitmap font.
///
/// Implementations must be read-only: pagination never mutates metrics, so one
/// instance can be shared between any number of pagination runs.
pub trait GlyphMetrics {
    /// Width of a single character in pixels, or `None` if the font has no glyph for it
    fn glyph_width(&self, ch: char) -> Option<i32>;

    /// Whether the font has metrics for the character. Identity is exact, with no case folding.
    fn contains(&self, ch: char) -> bool {
        self.glyph_width(ch).is_some()
    }
}

/// Metrics of a single bitmap glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Glyph {
    pub width: i32,
    /// Horizontal drawing offset, used only by renderers
    pub x_offset: i32,
    /// Vertical drawing offset, used only by renderers
    pub y_offset: i32,
}

impl Glyph {
    /// Create a glyph with the given width and no offsets
    pub fn new(width: i32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Set the drawing offsets
    pub fn with_offsets(mut self, x_offset: i32, y_offset: i32) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }
}

/// An owned, immutable character table of a bitmap font.
///
/// CSV tables have the header `char,width,x_offset,y_offset`; the offset
/// columns may be omitted.
#[derive(Debug, Clone, Default)]
pub struct GlyphTable {
    glyphs: HashMap<char, Glyph>,
}

impl GlyphTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a glyph to the table
    pub fn with_glyph(mut self, ch: char, glyph: Glyph) -> Self {
        self.glyphs.insert(ch, glyph);
        self
    }

    /// Add every character of `chars` with the same width
    pub fn with_uniform_width(mut self, chars: &str, width: i32) -> Self {
        for ch in chars.chars() {
            self.glyphs.insert(ch, Glyph::new(width));
        }
        self
    }

    /// Get the metrics of a character
    pub fn get(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Load a table from CSV data
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let mut glyphs = HashMap::new();

        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if record.len() < 2 {
                return Err(PaginationError::MetricsError(format!(
                    "line {line}: expected at least 2 fields, found {}",
                    record.len()
                )));
            }

            let mut chars = record[0].chars();
            let ch = match (chars.next(), chars.next()) {
                (Some(ch), None) => ch,
                _ => {
                    return Err(PaginationError::MetricsError(format!(
                        "line {line}: character cell {:?} must hold exactly one character",
                        &record[0]
                    )));
                }
            };

            let width = parse_field(&record, 1, line)?;
            let x_offset = parse_field(&record, 2, line)?;
            let y_offset = parse_field(&record, 3, line)?;

            glyphs.insert(
                ch,
                Glyph {
                    width,
                    x_offset,
                    y_offset,
                },
            );
        }

        debug!("Loaded {} glyphs from CSV", glyphs.len());
        Ok(Self { glyphs })
    }

    /// Load a table from a CSV file
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }
}

/// Parse an integer column, treating a missing or empty optional column as 0
fn parse_field(record: &csv::StringRecord, index: usize, line: u64) -> Result<i32> {
    match record.get(index).map(str::trim) {
        None | Some("") if index > 1 => Ok(0),
        None | Some("") => Err(PaginationError::MetricsError(format!(
            "line {line}: missing width"
        ))),
        Some(value) => value.parse().map_err(|e| {
            PaginationError::MetricsError(format!("line {line}: invalid number {value:?}: {e}"))
        }),
    }
}

impl GlyphMetrics for GlyphTable {
    fn glyph_width(&self, ch: char) -> Option<i32> {
        self.glyphs.get(&ch).map(|g| g.width)
    }
}

impl FromIterator<(char, Glyph)> for GlyphTable {
    fn from_iter<I: IntoIterator<Item = (char, Glyph)>>(iter: I) -> Self {
        Self {
            glyphs: iter.into_iter().collect(),
        }
    }
}

/// TrueType glyph metrics rasterized to whole pixels at a fixed size.
///
/// This struct owns the font data and parses it on demand for lookups.
/// Characters without a glyph in the face report no metrics and fall back
/// to the space width during measurement.
#[cfg(feature = "ttf-parser")]
pub struct TtfGlyphMetrics {
    font_data: Vec<u8>,
    units_per_em: f32,
    pixel_size: f32,
}

#[cfg(feature = "ttf-parser")]
impl TtfGlyphMetrics {
    /// Create new metrics from raw TTF/TTC font data at the given pixel size.
    ///
    /// Validates the font by parsing it and extracting units_per_em.
    pub fn new(font_data: Vec<u8>, pixel_size: f32) -> Result<Self> {
        let face = ttf_parser::Face::parse(&font_data, 0)
            .map_err(|e| PaginationError::FontError(format!("Failed to parse font: {e}")))?;
        let units_per_em = face.units_per_em() as f32;
        Ok(Self {
            font_data,
            units_per_em,
            pixel_size,
        })
    }

    /// Create metrics at the default pixel size
    pub fn with_default_size(font_data: Vec<u8>) -> Result<Self> {
        Self::new(font_data, crate::constants::DEFAULT_PIXEL_SIZE)
    }

    pub fn pixel_size(&self) -> f32 {
        self.pixel_size
    }
}

#[cfg(feature = "ttf-parser")]
impl GlyphMetrics for TtfGlyphMetrics {
    fn glyph_width(&self, ch: char) -> Option<i32> {
        let face = ttf_parser::Face::parse(&self.font_data, 0).ok()?;
        face.glyph_index(ch)
            .and_then(|gid| face.glyph_hor_advance(gid))
            .map(|advance| (advance as f32 / self.units_per_em * self.pixel_size).round() as i32)
    }
}

#[cfg(feature = "ttf-parser")]
impl std::fmt::Debug for TtfGlyphMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtfGlyphMetrics")
            .field("units_per_em", &self.units_per_em)
            .field("pixel_size", &self.pixel_size)
            .field("font_data_len", &self.font_data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lookup() {
        let table = GlyphTable::new()
            .with_glyph('а', Glyph::new(10).with_offsets(1, 2))
            .with_uniform_width("бв", 12);

        assert_eq!(table.len(), 3);
        assert_eq!(table.glyph_width('а'), Some(10));
        assert_eq!(table.glyph_width('в'), Some(12));
        assert_eq!(table.get('а').map(|g| g.y_offset), Some(2));
        assert!(table.contains('б'));
        assert!(!table.contains('г'));
    }

    #[test]
    fn test_lookup_has_no_case_folding() {
        let table = GlyphTable::new().with_uniform_width("а", 10);
        assert!(table.contains('а'));
        assert!(!table.contains('А'));
    }

    #[test]
    fn test_load_from_csv() {
        let data = "char,width,x_offset,y_offset\nа,10,1,-3\nб,11\n\" \",7,0,0\n";
        let table = GlyphTable::from_csv_reader(data.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.get('а'),
            Some(&Glyph {
                width: 10,
                x_offset: 1,
                y_offset: -3
            })
        );
        assert_eq!(table.get('б'), Some(&Glyph::new(11)));
        assert_eq!(table.glyph_width(' '), Some(7));
    }

    #[test]
    fn test_csv_rejects_multi_char_cell() {
        let data = "char,width\nаб,10\n";
        let result = GlyphTable::from_csv_reader(data.as_bytes());
        assert!(matches!(result, Err(PaginationError::MetricsError(_))));
    }

    #[test]
    fn test_csv_rejects_bad_width() {
        let data = "char,width\nа,wide\n";
        let result = GlyphTable::from_csv_reader(data.as_bytes());
        assert!(matches!(result, Err(PaginationError::MetricsError(_))));

        let data = "char,width\nа\n";
        let result = GlyphTable::from_csv_reader(data.as_bytes());
        assert!(matches!(result, Err(PaginationError::MetricsError(_))));
    }

    #[test]
    fn test_missing_csv_file() {
        let result = GlyphTable::from_csv_path("/nonexistent/glyphs.csv");
        assert!(matches!(result, Err(PaginationError::Io(_))));
    }

    #[cfg(feature = "ttf-parser")]
    fn load_test_font() -> Option<Vec<u8>> {
        // Try common system font paths
        let paths = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ];
        for path in &paths {
            if let Ok(data) = std::fs::read(path) {
                return Some(data);
            }
        }
        None
    }

    #[cfg(feature = "ttf-parser")]
    #[test]
    fn test_ttf_metrics_invalid_data() {
        let result = TtfGlyphMetrics::new(vec![0, 1, 2, 3], 32.0);
        assert!(matches!(result, Err(PaginationError::FontError(_))));
    }

    #[cfg(feature = "ttf-parser")]
    #[test]
    fn test_ttf_metrics_widths() {
        let Some(font_data) = load_test_font() else {
            eprintln!("Skipping test: no system font found");
            return;
        };
        let metrics = TtfGlyphMetrics::with_default_size(font_data.clone()).unwrap();
        assert_eq!(metrics.pixel_size(), crate::constants::DEFAULT_PIXEL_SIZE);
        let w = metrics.glyph_width('A');
        assert!(w.is_some_and(|w| w > 0), "width should be positive, got {w:?}");
        assert!(metrics.contains('A'));

        let larger = TtfGlyphMetrics::new(font_data, 64.0).unwrap();
        assert!(larger.glyph_width('A') > w);
    }
}
