//! Constants for text measurement and line packing

/// Width in pixels of a space and of any character missing from the font
pub const FALLBACK_SPACE_WIDTH: i32 = 15;

/// Default extra pixels added after every character
pub const DEFAULT_LETTER_SPACING: i32 = 0;

/// Number of blank tokens prepended to every source line to price its indentation
pub const SYNTHETIC_INDENT_TOKENS: usize = 2;

/// Leading marker of a center-aligned source line
pub const CENTER_MARKER: &str = "  ";

/// Marker appended to the left part of a hyphenated word
pub const HYPHEN: char = '-';

/// Separator appended after every packed token
pub const TOKEN_SEPARATOR: char = ' ';

/// Vowels at which a word may be hyphenated (matched case-insensitively)
pub const HYPHENATION_VOWELS: &[char] = &['ё', 'у', 'е', 'ы', 'а', 'о', 'э', 'я', 'и', 'ю'];

/// Characters at each end of a word that never take a hyphen
pub const MIN_HYPHENATION_EDGE: usize = 2;

/// Default pixel size used when deriving glyph widths from a TrueType face
pub const DEFAULT_PIXEL_SIZE: f32 = 32.0;
