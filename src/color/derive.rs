//! Deterministic derivation of a color from an arbitrary string.
//!
//! Three characters of the upper-cased string are picked and each is mapped
//! onto a color channel. Which characters are picked depends on whether the
//! string is a taxonomy (code or scientific name) or some other label.

use crate::color::rgb::Rgb;
use crate::error::AnnotationError;

/// Stand-in for positions that do not exist in short strings.
const PLACEHOLDER: char = ' ';

/// Scale from alphabet position to channel value ('Z' lands just below 255).
const CHANNEL_SCALE: f64 = 10.2;

/// Channel values above this in all three channels count as near-white.
const NEAR_WHITE: u8 = 235;

/// Channel values below this in all three channels count as near-black.
const NEAR_BLACK: u8 = 60;

/// Which characters of a string feed the three color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivationMode {
    /// Taxonomy code or scientific name: first char, second char, and the
    /// char right after the first space (genus/species pair), else the third.
    Taxonomy,
    /// Any other label (e.g. sequence name): first char, last char, middle char.
    Label,
}

/// Derives a color from `s`.
///
/// The result is a pure function of `s` and `mode`. Characters outside
/// `A..=Z` (after upper-casing) are clamped to the nearest channel bound,
/// i.e. digits, punctuation and spaces map to 0.
///
/// If all three channels end up near-white the first channel is forced to 0,
/// if all three are near-black the second channel is forced to 255.
///
/// # Arguments
/// * `s` - String to derive the color from; must be non-empty
/// * `mode` - How to pick characters, see [DerivationMode]
///
/// # Errors
/// [AnnotationError::InvalidArgument] if `s` is empty.
///
/// # Example
/// ```
/// use cladetint::color::{derive_color, DerivationMode, Rgb};
///
/// let kea = derive_color("Nestor notabilis", DerivationMode::Taxonomy).unwrap();
/// assert_eq!(kea, derive_color("NESTOR NOTABILIS", DerivationMode::Taxonomy).unwrap());
/// ```
pub fn derive_color(s: &str, mode: DerivationMode) -> Result<Rgb, AnnotationError> {
    if s.is_empty() {
        return Err(AnnotationError::invalid_argument(
            "cannot derive color from empty string",
        ));
    }

    let chars: Vec<char> = s.to_uppercase().chars().collect();
    let (first, second, third) = pick_chars(&chars, mode);

    let mut r = normalize_char(first);
    let mut g = normalize_char(second);
    let b = normalize_char(third);

    if r > NEAR_WHITE && g > NEAR_WHITE && b > NEAR_WHITE {
        r = 0;
    } else if r < NEAR_BLACK && g < NEAR_BLACK && b < NEAR_BLACK {
        g = 255;
    }

    Ok(Rgb::new(r, g, b))
}

/// Picks the three characters feeding red, green and blue.
fn pick_chars(chars: &[char], mode: DerivationMode) -> (char, char, char) {
    let len = chars.len();
    let at = |i: usize| chars.get(i).copied().unwrap_or(PLACEHOLDER);

    let first = at(0);
    if len < 2 {
        return (first, PLACEHOLDER, PLACEHOLDER);
    }

    match mode {
        DerivationMode::Taxonomy => {
            let third = if len > 2 {
                match chars.iter().position(|&c| c == ' ') {
                    Some(space) if space > 0 => at(space + 1),
                    _ => at(2),
                }
            } else {
                PLACEHOLDER
            };
            (first, at(1), third)
        }
        DerivationMode::Label => {
            let third = if len > 2 { at((len - 1) / 2) } else { PLACEHOLDER };
            (first, at(len - 1), third)
        }
    }
}

/// Maps a character onto `[0, 255]` by its distance from 'A'.
fn normalize_char(c: char) -> u8 {
    let offset = i64::from(u32::from(c)) - i64::from(u32::from('A'));
    let scaled = offset as f64 * CHANNEL_SCALE;
    scaled.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_char_bounds() {
        assert_eq!(normalize_char('A'), 0);
        assert_eq!(normalize_char('B'), 10);
        assert_eq!(normalize_char('Y'), 244);
        assert_eq!(normalize_char('Z'), 254);
        assert_eq!(normalize_char(' '), 0);
        assert_eq!(normalize_char('7'), 0);
        assert_eq!(normalize_char('Ö'), 255);
    }

    #[test]
    fn test_pick_chars_taxonomy_uses_char_after_space() {
        let chars: Vec<char> = "APTERYX HAASTII".chars().collect();
        assert_eq!(pick_chars(&chars, DerivationMode::Taxonomy), ('A', 'P', 'H'));
    }

    #[test]
    fn test_pick_chars_taxonomy_trailing_space_uses_placeholder() {
        let chars: Vec<char> = "KEA ".chars().collect();
        assert_eq!(pick_chars(&chars, DerivationMode::Taxonomy), ('K', 'E', ' '));
    }

    #[test]
    fn test_pick_chars_label() {
        let chars: Vec<char> = "TAKAHE".chars().collect();
        // middle index (6 - 1) / 2 = 2
        assert_eq!(pick_chars(&chars, DerivationMode::Label), ('T', 'E', 'K'));
    }

    #[test]
    fn test_pick_chars_short_strings() {
        let one: Vec<char> = "Q".chars().collect();
        assert_eq!(pick_chars(&one, DerivationMode::Label), ('Q', ' ', ' '));
        let two: Vec<char> = "QZ".chars().collect();
        assert_eq!(pick_chars(&two, DerivationMode::Taxonomy), ('Q', 'Z', ' '));
        assert_eq!(pick_chars(&two, DerivationMode::Label), ('Q', 'Z', ' '));
    }
}
