//! Pixel value type shared by every stage of the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Sum of absolute per-channel differences.
    #[inline]
    pub fn manhattan(&self, other: &Rgb) -> u32 {
        self.r.abs_diff(other.r) as u32
            + self.g.abs_diff(other.g) as u32
            + self.b.abs_diff(other.b) as u32
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A color paired with the number of pixels it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCount {
    pub color: Rgb,
    pub count: usize,
}

impl ColorCount {
    pub fn new(color: Rgb, count: usize) -> Self {
        Self { color, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_is_zero_padded_lowercase() {
        assert_eq!(Rgb::new(200, 30, 30).to_hex(), "#c81e1e");
        assert_eq!(Rgb::new(0, 5, 255).to_hex(), "#0005ff");
        assert_eq!(Rgb::new(0, 0, 0).to_string(), "#000000");
    }

    #[test]
    fn test_manhattan_is_symmetric() {
        let a = Rgb::new(200, 30, 30);
        let b = Rgb::new(205, 35, 33);
        assert_eq!(a.manhattan(&b), 13);
        assert_eq!(b.manhattan(&a), 13);
        assert_eq!(Rgb::new(0, 0, 0).manhattan(&Rgb::new(255, 255, 255)), 765);
    }
}
