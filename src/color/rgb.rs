//! RGB color value attached to branches.

use crate::error::AnnotationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =#========================================================================#=
// RGB
// =#========================================================================#=
/// An opaque 8-bit RGB color.
///
/// Used as branch color of a [Node](crate::model::Node), where `None`
/// means "unset / inherit". Serializes as `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Creates a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Linearly interpolates between `self` (at `t = 0`) and `to` (at `t = 1`).
    ///
    /// `t` is clamped to `[0, 1]`; a NaN `t` is treated as `0`.
    /// Channels are truncated towards zero, so `t = 1` yields exactly `to`.
    ///
    /// # Example
    /// ```
    /// use cladetint::color::Rgb;
    ///
    /// let mid = Rgb::BLACK.interpolate(Rgb::WHITE, 0.5);
    /// assert_eq!(mid, Rgb::new(127, 127, 127));
    /// ```
    pub fn interpolate(self, to: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let channel = |from: u8, to: u8| -> u8 {
            let from = f64::from(from);
            (from + t * (f64::from(to) - from)) as u8
        };
        Rgb::new(
            channel(self.r, to.r),
            channel(self.g, to.g),
            channel(self.b, to.b),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = AnnotationError;

    /// Parses `#rrggbb` (leading `#` optional, hex digits case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AnnotationError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = AnnotationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}
