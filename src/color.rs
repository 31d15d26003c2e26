//! RGB and HSL color types and the conversions between them
//!
//! Channel values of `Hsl` and of the unit-range RGB tuples live in `[0, 1]`.
//! `Rgb` is the 8-bit form written into output pixels.

use serde::{Deserialize, Serialize};

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

/// 8-bit background color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Quantize unit-range channels to 8 bits
    ///
    /// Values are clamped to `[0, 1]`, scaled by 255 and truncated, so only an
    /// exact `1.0` maps to 255.
    #[must_use]
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let quantize = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;
        Self::new(quantize(r), quantize(g), quantize(b))
    }

    /// Channels as unit-range floats
    #[must_use]
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    #[must_use]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Lowercase `#rrggbb` form
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(color: Rgb) -> Self {
        image::Rgb(color.to_array())
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Hue, saturation, lightness, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Convert to unit-range RGB
    #[must_use]
    pub fn to_rgb_unit(self) -> (f64, f64, f64) {
        let Self { h, s, l } = self;
        if s == 0.0 {
            return (l, l, l);
        }

        let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let m1 = 2.0 * l - m2;

        (
            hue_ramp(m1, m2, h + ONE_THIRD),
            hue_ramp(m1, m2, h),
            hue_ramp(m1, m2, h - ONE_THIRD),
        )
    }

    /// Convert to 8-bit RGB
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let (r, g, b) = self.to_rgb_unit();
        Rgb::from_unit(r, g, b)
    }

    /// Convert from unit-range RGB; grays come back with zero hue and saturation
    #[must_use]
    pub fn from_rgb_unit(r: f64, g: f64, b: f64) -> Self {
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let sum = max + min;
        let range = max - min;
        let l = sum / 2.0;

        if range == 0.0 {
            return Self::new(0.0, 0.0, l);
        }

        let s = if l <= 0.5 {
            range / sum
        } else {
            range / (2.0 - max - min)
        };

        let rc = (max - r) / range;
        let gc = (max - g) / range;
        let bc = (max - b) / range;

        let h = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        Self::new((h / 6.0).rem_euclid(1.0), s, l)
    }
}

fn hue_ramp(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < TWO_THIRDS {
        m1 + (m2 - m1) * (TWO_THIRDS - hue) * 6.0
    } else {
        m1
    }
}
