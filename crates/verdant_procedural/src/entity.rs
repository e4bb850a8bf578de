//! # Terrain Entities
//!
//! Trees, bushes and flowers placed inside a chunk.
//!
//! ## Identifiers
//!
//! Each category draws ids from its own monotonic counter, started far apart:
//!
//! | Category | First id    |
//! |----------|-------------|
//! | Tree     | 1,000,000   |
//! | Bush     | 2,000,000   |
//! | Flower   | 3,000,000   |
//!
//! The ranges are a stable contract with clients that correlate ids across
//! sessions. Counters belong to one world; ids never repeat inside it.

use std::fmt;

use serde::{Deserialize, Serialize};
use verdant_shared::Position;

/// Entity identifier, unique within one world.
pub type EntityId = u64;

/// Entity category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Tree
    Tree,
    /// Bush
    Bush,
    /// Flower
    Flower,
}

impl EntityKind {
    /// First identifier handed out for this category.
    #[inline]
    #[must_use]
    pub const fn id_base(self) -> EntityId {
        match self {
            Self::Tree => 1_000_000,
            Self::Bush => 2_000_000,
            Self::Flower => 3_000_000,
        }
    }
}

/// Per-world identifier counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityIds {
    next_tree: EntityId,
    next_bush: EntityId,
    next_flower: EntityId,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self {
            next_tree: EntityKind::Tree.id_base(),
            next_bush: EntityKind::Bush.id_base(),
            next_flower: EntityKind::Flower.id_base(),
        }
    }
}

impl EntityIds {
    /// Creates counters at their category bases.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next identifier for `kind`.
    pub fn allocate(&mut self, kind: EntityKind) -> EntityId {
        let counter = match kind {
            EntityKind::Tree => &mut self.next_tree,
            EntityKind::Bush => &mut self.next_bush,
            EntityKind::Flower => &mut self.next_flower,
        };
        let id = *counter;
        *counter += 1;
        id
    }

    /// Number of identifiers handed out for `kind`.
    #[must_use]
    pub const fn allocated(&self, kind: EntityKind) -> u64 {
        match kind {
            EntityKind::Tree => self.next_tree - EntityKind::Tree.id_base(),
            EntityKind::Bush => self.next_bush - EntityKind::Bush.id_base(),
            EntityKind::Flower => self.next_flower - EntityKind::Flower.id_base(),
        }
    }
}

/// 24-bit colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Creates a colour from channels.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts hue (degrees), saturation and lightness (percent).
    #[must_use]
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let l = (lightness / 100.0).clamp(0.0, 1.0);
        let h = hue.rem_euclid(360.0) / 60.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fixed flower palette.
pub const FLOWER_PALETTE: [Color; 9] = [
    Color::rgb(0xff, 0x69, 0xb4), // hot pink
    Color::rgb(0xff, 0xd7, 0x00), // gold
    Color::rgb(0x93, 0x70, 0xdb), // purple
    Color::rgb(0xff, 0x63, 0x47), // tomato
    Color::rgb(0xff, 0xff, 0xff), // white
    Color::rgb(0xff, 0xa5, 0x00), // orange
    Color::rgb(0x87, 0xce, 0xeb), // sky blue
    Color::rgb(0xee, 0x82, 0xee), // violet
    Color::rgb(0xff, 0x7f, 0x50), // coral
];

/// A tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// World-unique id
    pub id: EntityId,
    /// Centre position
    pub position: Position,
    /// Diameter
    pub size: f64,
    /// Crown colour
    pub color: Color,
    /// Sprite variant (0-2)
    pub variant: u8,
}

/// A bush.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bush {
    /// World-unique id
    pub id: EntityId,
    /// Centre position
    pub position: Position,
    /// Diameter
    pub size: f64,
    /// Leaf colour
    pub color: Color,
    /// Sprite variant (0-2)
    pub variant: u8,
}

/// A flower. Flowers are points and have no size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flower {
    /// World-unique id
    pub id: EntityId,
    /// Position
    pub position: Position,
    /// Petal colour
    pub color: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_counters_are_disjoint() {
        let mut ids = EntityIds::new();
        assert_eq!(ids.allocate(EntityKind::Tree), 1_000_000);
        assert_eq!(ids.allocate(EntityKind::Tree), 1_000_001);
        assert_eq!(ids.allocate(EntityKind::Bush), 2_000_000);
        assert_eq!(ids.allocate(EntityKind::Flower), 3_000_000);
        assert_eq!(ids.allocated(EntityKind::Tree), 2);
        assert_eq!(ids.allocated(EntityKind::Bush), 1);
        assert_eq!(ids.allocated(EntityKind::Flower), 1);
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(Color::from_hsl(0.0, 100.0, 50.0), Color::rgb(255, 0, 0));
        assert_eq!(Color::from_hsl(120.0, 100.0, 50.0), Color::rgb(0, 255, 0));
        assert_eq!(Color::from_hsl(240.0, 100.0, 50.0), Color::rgb(0, 0, 255));
        assert_eq!(Color::from_hsl(0.0, 0.0, 100.0), Color::rgb(255, 255, 255));
        assert_eq!(Color::from_hsl(0.0, 0.0, 0.0), Color::rgb(0, 0, 0));
    }

    #[test]
    fn test_green_hues_are_green() {
        let c = Color::from_hsl(120.0, 55.0, 30.0);
        assert!(c.g > c.r && c.g > c.b);
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::rgb(0xff, 0x69, 0xb4).to_string(), "#ff69b4");
    }
}
