//! Word splitting strategies for lines that overflow

use crate::constants::{HYPHEN, HYPHENATION_VOWELS, MIN_HYPHENATION_EDGE};
use crate::text::WidthCalculator;
use tracing::trace;

/// Result of splitting a word at the end of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSplit {
    /// Part that stays on the current line, hyphen included. Empty when the word is deferred.
    pub left: String,
    /// Part carried to the next line
    pub right: String,
}

impl WordSplit {
    /// Move the whole word to the next line
    pub fn deferred(word: &str) -> Self {
        Self {
            left: String::new(),
            right: word.to_string(),
        }
    }

    pub fn is_deferred(&self) -> bool {
        self.left.is_empty()
    }
}

/// Strategy for breaking a word that does not fit the remaining line width.
///
/// A returned non-empty `left` must measure no wider than `remaining_width`.
pub trait Hyphenator {
    fn split(&self, word: &str, remaining_width: i32, widths: &WidthCalculator<'_>) -> WordSplit;
}

/// Breaks words after a Cyrillic vowel, keeping as much of the word on the current line as fits
#[derive(Debug, Clone, Copy, Default)]
pub struct VowelHyphenator;

impl VowelHyphenator {
    /// Character indices after which the word may be broken, in ascending order
    pub fn break_candidates(word: &str) -> Vec<usize> {
        let chars: Vec<char> = word.chars().collect();
        candidates(&chars)
    }
}

fn candidates(chars: &[char]) -> Vec<usize> {
    let end = chars.len().saturating_sub(MIN_HYPHENATION_EDGE);
    (MIN_HYPHENATION_EDGE..end)
        .filter(|&i| is_vowel(chars[i]))
        .collect()
}

fn is_vowel(ch: char) -> bool {
    ch.to_lowercase().any(|c| HYPHENATION_VOWELS.contains(&c))
}

impl Hyphenator for VowelHyphenator {
    fn split(&self, word: &str, remaining_width: i32, widths: &WidthCalculator<'_>) -> WordSplit {
        let chars: Vec<char> = word.chars().collect();

        for position in candidates(&chars).into_iter().rev() {
            let mut left: String = chars[..=position].iter().collect();
            left.push(HYPHEN);

            if widths.width_of(&left) <= remaining_width {
                let right: String = chars[position + 1..].iter().collect();
                trace!("Hyphenated {:?} as {:?} + {:?}", word, left, right);
                return WordSplit { left, right };
            }
        }

        trace!(
            "Deferred {:?}, no break fits in {} px",
            word, remaining_width
        );
        WordSplit::deferred(word)
    }
}

/// Never breaks words; an overflowing word always moves to the next line
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHyphenation;

impl Hyphenator for NoHyphenation {
    fn split(&self, word: &str, _remaining_width: i32, _widths: &WidthCalculator<'_>) -> WordSplit {
        WordSplit::deferred(word)
    }
}
