//! Colours and the per-interaction particle palette.

use eon_types::InteractionKind;
use serde::Serialize;

/// An opaque 8-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Self { r, g, b }
    }

    /// Attach an alpha channel.
    pub const fn with_alpha(self, a: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

impl core::fmt::Display for Rgb {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A colour with alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity.
    pub a: f64,
}

impl core::fmt::Display for Rgba {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Particle colour for each interaction kind.
pub const fn color_for(kind: InteractionKind) -> Rgb {
    match kind {
        InteractionKind::Click => Rgb::from_hex(0x0093_c5fd),
        InteractionKind::Hover => Rgb::from_hex(0x00c0_84fc),
        InteractionKind::Scroll => Rgb::from_hex(0x00fb_bf24),
        InteractionKind::Keypress => Rgb::from_hex(0x0034_d399),
        InteractionKind::Move => Rgb::from_hex(0x0060_a5fa),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_literals_decode() {
        assert_eq!(Rgb::from_hex(0x0093_c5fd), Rgb { r: 147, g: 197, b: 253 });
        assert_eq!(color_for(InteractionKind::Hover).to_string(), "#c084fc");
    }

    #[test]
    fn rgba_css_form() {
        let c = Rgb::from_hex(0x0093_c5fd).with_alpha(0.5);
        assert_eq!(c.to_string(), "rgba(147, 197, 253, 0.5)");
    }
}
