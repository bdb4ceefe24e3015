//! Exact RGB color values and hex parsing
//!
//! Colors are compared component-wise with no tolerance; they are used
//! directly as lookup keys when building per-frame substitution tables.
//!
//! Accepted input format: `#RRGGBB` or `RRGGBB`, case-insensitive.

use image::Rgb;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty (after trimming)
    #[error("empty color string")]
    Empty,
    /// Input is not a six-digit hex color
    #[error("invalid hex color '{0}', expected #RRGGBB or RRGGBB")]
    InvalidFormat(String),
}

/// An exact 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` representation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channel values as a `[r, g, b]` array.
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<Rgb<u8>> for Color {
    fn from(px: Rgb<u8>) -> Self {
        let [r, g, b] = px.0;
        Self { r, g, b }
    }
}

impl From<Color> for Rgb<u8> {
    fn from(c: Color) -> Self {
        Rgb(c.channels())
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s)
    }
}

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^#?([a-fA-F0-9]{6})$").expect("hex color pattern is valid"))
}

/// Parse a hex color string (`#RRGGBB` or `RRGGBB`) into a [`Color`].
///
/// Surrounding whitespace is ignored.
///
/// # Examples
///
/// ```
/// use colorcycle::color::{parse_hex_color, Color};
///
/// assert_eq!(parse_hex_color("#FF0000").unwrap(), Color::new(255, 0, 0));
/// assert_eq!(parse_hex_color("00ff7f").unwrap(), Color::new(0, 255, 127));
/// assert!(parse_hex_color("#F00").is_err());
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is empty or not six hex digits.
pub fn parse_hex_color(s: &str) -> Result<Color, ColorError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ColorError::Empty);
    }

    let caps = hex_pattern()
        .captures(trimmed)
        .ok_or_else(|| ColorError::InvalidFormat(trimmed.to_string()))?;
    let hex = caps.get(1).map(|m| m.as_str()).unwrap_or_default().as_bytes();

    Ok(Color::new(hex_pair(hex[0], hex[1]), hex_pair(hex[2], hex[3]), hex_pair(hex[4], hex[5])))
}

/// Combine two already-validated hex digits into a byte.
fn hex_pair(high: u8, low: u8) -> u8 {
    hex_digit(high) * 16 + hex_digit(low)
}

fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}
