//! Per-frame color substitution tables
//!
//! Given a frame index, every owned color at position `i` of its group maps
//! to the color at position `(i + frame) % len` of the same group. Given a
//! group `[A, B, C]` and frame 1:
//! - A becomes B
//! - B becomes C
//! - C becomes A

use std::collections::HashMap;

use crate::color::Color;
use crate::group::ColorGroup;
use crate::registry::ColorGroupRegistry;

/// Mapping from original color to replacement color, valid for one frame.
///
/// Colors absent from the table are left untouched by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionTable {
    map: HashMap<Color, Color>,
}

impl SubstitutionTable {
    pub fn get(&self, color: Color) -> Option<Color> {
        self.map.get(&color).copied()
    }

    /// Replacement for `color`, or `color` itself if it is not targeted.
    #[inline]
    pub fn apply(&self, color: Color) -> Color {
        self.get(color).unwrap_or(color)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// True when every entry maps a color to itself.
    pub fn is_identity(&self) -> bool {
        self.map.iter().all(|(from, to)| from == to)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Color, Color)> + '_ {
        self.map.iter().map(|(&from, &to)| (from, to))
    }
}

impl FromIterator<(Color, Color)> for SubstitutionTable {
    fn from_iter<I: IntoIterator<Item = (Color, Color)>>(iter: I) -> Self {
        Self { map: iter.into_iter().collect() }
    }
}

/// Build the substitution table for `frame`.
///
/// Only the owning group (per `registry`) drives a color; occurrences in
/// other groups are skipped. When a color repeats inside its own group, the
/// later position is the one that takes effect.
pub fn build_frame_map(
    frame: usize,
    groups: &[ColorGroup],
    registry: &ColorGroupRegistry,
) -> SubstitutionTable {
    let mut map = HashMap::with_capacity(registry.len());

    for (group_index, group) in groups.iter().enumerate() {
        let colors = group.colors();
        let len = colors.len();
        if len == 0 {
            continue;
        }

        let shift = frame % len;
        for (i, &original) in colors.iter().enumerate() {
            if registry.is_owned_by(original, group_index) {
                map.insert(original, colors[(i + shift) % len]);
            }
        }
    }

    SubstitutionTable { map }
}
