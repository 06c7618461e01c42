//! Ball colors

use serde::{Deserialize, Serialize};

/// Linear RGBA color, components in 0.0 - 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from 8-bit channels
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse `#RRGGBB` or `RRGGBB`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    fn to_rgb8(self) -> (u8, u8, u8) {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    /// `#RRGGBB` (alpha dropped)
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// CSS `rgba(...)` with the given extra opacity folded in
    pub fn to_css(self, opacity: f32) -> String {
        let (r, g, b) = self.to_rgb8();
        let a = (self.a * opacity).clamp(0.0, 1.0);
        format!("rgba({r}, {g}, {b}, {a:.3})")
    }
}

/// Fixed ball palette; one entry is picked uniformly per spawned ball
pub const PALETTE: [Rgba; 5] = [
    Rgba::from_rgb8(0xFF, 0x6B, 0x6B), // coral
    Rgba::from_rgb8(0x4E, 0xCD, 0xC4), // teal
    Rgba::from_rgb8(0x45, 0xB7, 0xD1), // sky
    Rgba::from_rgb8(0x96, 0xCE, 0xB4), // sage
    Rgba::from_rgb8(0xFF, 0xEE, 0xAD), // cream
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_hex() {
        let hex: Vec<String> = PALETTE.iter().map(|c| c.to_hex()).collect();
        assert_eq!(hex, ["#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEEAD"]);
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgba::from_hex("#4ECDC4"), Some(PALETTE[1]));
        assert_eq!(Rgba::from_hex("ffeead"), Some(PALETTE[4]));
        assert_eq!(Rgba::from_hex("#FFF"), None);
        assert_eq!(Rgba::from_hex("#GG0000"), None);
        assert_eq!(Rgba::from_hex("#+FFFFF"), None);
        assert_eq!(Rgba::from_hex("FF+FFF"), None);
    }

    #[test]
    fn test_to_css_folds_opacity() {
        let c = Rgba::from_rgb8(255, 0, 0);
        assert_eq!(c.to_css(0.5), "rgba(255, 0, 0, 0.500)");
        assert_eq!(c.to_css(2.0), "rgba(255, 0, 0, 1.000)");
    }
}
