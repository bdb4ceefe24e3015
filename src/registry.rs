//! Color ownership registry
//!
//! Decides which group drives each color. Groups are scanned in input order
//! and the first group containing a color owns it; every later occurrence,
//! in the same group or another one, is reported as a [`DuplicateColor`]
//! and does not change ownership.

use std::collections::HashMap;
use std::fmt;

use crate::color::Color;
use crate::group::ColorGroup;

/// A color that appeared more than once across the input groups.
///
/// Informational only: processing continues using the owning group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateColor {
    /// The repeated color
    pub color: Color,
    /// Index of the group where the repeat was seen
    pub group: usize,
    /// Position of the repeat within that group
    pub position: usize,
    /// Index of the group that owns the color
    pub owner: usize,
}

impl fmt::Display for DuplicateColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "color {} in group {} appears in multiple places; it will cycle with group {}, the first group it appeared in",
            self.color,
            self.group + 1,
            self.owner + 1
        )
    }
}

/// Immutable mapping from each targeted color to its owning group index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorGroupRegistry {
    owners: HashMap<Color, usize>,
}

impl ColorGroupRegistry {
    /// Build the registry from groups in input order.
    ///
    /// Returns the registry together with one [`DuplicateColor`] record per
    /// repeated occurrence, in scan order. Never fails.
    pub fn build(groups: &[ColorGroup]) -> (Self, Vec<DuplicateColor>) {
        let mut owners: HashMap<Color, usize> = HashMap::new();
        let mut duplicates = Vec::new();

        for (group_index, group) in groups.iter().enumerate() {
            for (position, &color) in group.colors().iter().enumerate() {
                match owners.get(&color) {
                    Some(&owner) => duplicates.push(DuplicateColor {
                        color,
                        group: group_index,
                        position,
                        owner,
                    }),
                    None => {
                        owners.insert(color, group_index);
                    }
                }
            }
        }

        log::debug!(
            "registry: {} owned colors across {} groups, {} duplicates",
            owners.len(),
            groups.len(),
            duplicates.len()
        );

        (Self { owners }, duplicates)
    }

    /// Index of the group that owns `color`, if any group contains it.
    pub fn owner(&self, color: Color) -> Option<usize> {
        self.owners.get(&color).copied()
    }

    /// Whether `group` is the acknowledged owner of `color`.
    pub fn is_owned_by(&self, color: Color, group: usize) -> bool {
        self.owner(color) == Some(group)
    }

    /// Number of distinct targeted colors.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
