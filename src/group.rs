//! Color groups: ordered rings of colors that rotate together
//!
//! A group is validated once on construction (at least two colors) and is
//! read-only afterwards.

use crate::color::{parse_hex_color, Color};
use thiserror::Error;

/// Minimum number of colors a group must contain.
pub const MIN_GROUP_LEN: usize = 2;

/// Error type for group construction and parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    /// Group has fewer than [`MIN_GROUP_LEN`] colors
    #[error("each color group must contain at least 2 colors, got {0}")]
    TooFewColors(usize),
    /// One or more entries are not valid hex colors
    #[error("invalid hex color format: {}", .0.join(", "))]
    InvalidColors(Vec<String>),
    /// Error in a specific group when parsing several at once
    #[error("group {index}: {source}")]
    InGroup {
        /// 1-based group number
        index: usize,
        #[source]
        source: Box<GroupError>,
    },
}

/// An ordered ring of colors.
///
/// Colors may repeat within a group; the group length is always at least
/// [`MIN_GROUP_LEN`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGroup {
    colors: Vec<Color>,
}

impl ColorGroup {
    /// Create a group from an ordered list of colors.
    pub fn new(colors: Vec<Color>) -> Result<Self, GroupError> {
        if colors.len() < MIN_GROUP_LEN {
            return Err(GroupError::TooFewColors(colors.len()));
        }
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed group; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Hex summary such as `[#ff0000, #00ff00]`.
    pub fn to_hex_list(&self) -> String {
        let hex: Vec<String> = self.colors.iter().map(|c| c.to_hex()).collect();
        format!("[{}]", hex.join(", "))
    }
}

impl TryFrom<Vec<Color>> for ColorGroup {
    type Error = GroupError;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

/// Parse one comma-separated line of hex colors into a group.
///
/// Empty entries (e.g. a trailing comma) are ignored. Every invalid entry is
/// reported, not just the first.
///
/// ```
/// use colorcycle::group::parse_group;
///
/// let group = parse_group("#FF0000, 00FF00,#0000FF").unwrap();
/// assert_eq!(group.len(), 3);
/// ```
pub fn parse_group(line: &str) -> Result<ColorGroup, GroupError> {
    let entries: Vec<&str> = line.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();

    let mut colors = Vec::with_capacity(entries.len());
    let mut invalid = Vec::new();
    for entry in &entries {
        match parse_hex_color(entry) {
            Ok(color) => colors.push(color),
            Err(_) => invalid.push(entry.to_string()),
        }
    }

    if !invalid.is_empty() {
        return Err(GroupError::InvalidColors(invalid));
    }

    ColorGroup::new(colors)
}

/// Parse several lines, one group per line, failing on the first bad group.
pub fn parse_groups<S: AsRef<str>>(lines: &[S]) -> Result<Vec<ColorGroup>, GroupError> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            parse_group(line.as_ref())
                .map_err(|e| GroupError::InGroup { index: i + 1, source: Box::new(e) })
        })
        .collect()
}
