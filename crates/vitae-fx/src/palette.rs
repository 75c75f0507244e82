#![forbid(unsafe_code)]

//! The CV color palette and outline selection.

use crate::color::Rgba;

/// Stroke color and weight for a shape outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutlineStyle {
    pub color: Rgba,
    /// Stroke width in pixels.
    pub weight: u8,
}

/// Backdrop colors.
///
/// Outline selection uses cumulative thresholds on one uniform draw `u`:
///
/// | range | color | weight |
/// |-------|-------|--------|
/// | `u < accent_probability` | accent | 3 |
/// | `u < 0.30` | white | 2 |
/// | `u < 0.50` | light blue | 2 |
/// | `u < 0.75` | mid blue | 3 |
/// | otherwise | dark blue | 4 |
///
/// An accent probability above a later threshold shadows the bands below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    pub background: Rgba,
    pub accent: Rgba,
    pub white: Rgba,
    pub blue_light: Rgba,
    pub blue_mid: Rgba,
    pub blue_dark: Rgba,
}

impl Palette {
    /// The CV site palette.
    pub const CV: Self = Self {
        background: Rgba::rgb(0x0A, 0x3A, 0x52),
        accent: Rgba::rgb(0xF0, 0x00, 0x0F),
        white: Rgba::WHITE,
        blue_light: Rgba::rgb(0x3E, 0x9F, 0xD4),
        blue_mid: Rgba::rgb(0x00, 0x6B, 0xA5),
        blue_dark: Rgba::rgb(0x00, 0x4B, 0x72),
    };

    /// Map a uniform draw in `[0, 1)` to an outline.
    pub fn outline_for(&self, u: f64, accent_probability: f64) -> OutlineStyle {
        let (color, weight) = if u < accent_probability {
            (self.accent, 3)
        } else if u < 0.3 {
            (self.white, 2)
        } else if u < 0.5 {
            (self.blue_light, 2)
        } else if u < 0.75 {
            (self.blue_mid, 3)
        } else {
            (self.blue_dark, 4)
        };
        OutlineStyle { color, weight }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::CV
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_with_default_accent() {
        let p = Palette::CV;
        let cases = [
            (0.0, p.accent, 3),
            (0.149, p.accent, 3),
            (0.15, p.white, 2),
            (0.35, p.blue_light, 2),
            (0.6, p.blue_mid, 3),
            (0.75, p.blue_dark, 4),
            (0.999, p.blue_dark, 4),
        ];
        for (u, color, weight) in cases {
            assert_eq!(p.outline_for(u, 0.15), OutlineStyle { color, weight }, "u={u}");
        }
    }

    #[test]
    fn zero_accent_probability_never_picks_accent() {
        let p = Palette::CV;
        assert_eq!(p.outline_for(0.0, 0.0).color, p.white);
    }

    #[test]
    fn large_accent_probability_shadows_lower_bands() {
        let p = Palette::CV;
        assert_eq!(p.outline_for(0.6, 0.8).color, p.accent);
        assert_eq!(p.outline_for(0.8, 0.8).color, p.blue_dark);
        assert_eq!(p.outline_for(0.999, 1.0).color, p.accent);
    }

    #[test]
    fn background_matches_site_color() {
        assert_eq!(Palette::default().background.to_string(), "#0A3A52");
    }
}
