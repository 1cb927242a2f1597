//! Display colors for chart entries
//!
//! Colors are drawn at random from the full 24-bit RGB space every time a
//! summary is built. There is no stable key-to-color mapping across
//! aggregation passes.

use rand::Rng;
use serde::{Serialize, Serializer};
use std::fmt;

/// 24-bit RGB color, rendered as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor(u32);

impl HexColor {
    /// Largest representable color (`#ffffff`)
    pub const MAX: u32 = 0xFF_FFFF;

    /// Create a color from a packed `0xRRGGBB` value
    pub fn new(rgb: u32) -> Option<Self> {
        (rgb <= Self::MAX).then_some(Self(rgb))
    }

    /// Draw a color uniformly from the full RGB space
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..=Self::MAX))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Split into `(red, green, blue)` channels
    pub fn rgb(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
