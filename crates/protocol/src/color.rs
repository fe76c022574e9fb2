use serde::{Deserialize, Serialize};

/// A 24-bit packed `0xRRGGBB` color.
///
/// Channel extraction goes through the accessors below so callers never
/// shift a raw integer themselves. Bits above the low 24 are discarded on
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Rgb(u32);

impl Rgb {
    pub const WHITE: Self = Self(0xFF_FF_FF);
    pub const BLACK: Self = Self(0);

    pub const fn from_packed(packed: u32) -> Self {
        Self(packed & 0xFF_FF_FF)
    }

    pub const fn from_channels(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn packed(self) -> u32 {
        self.0
    }

    pub const fn red(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub const fn blue(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Every channel shifted right by one, used for the darker rim strokes.
    pub const fn halved(self) -> Self {
        Self::from_channels(self.red() >> 1, self.green() >> 1, self.blue() >> 1)
    }

    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba {
            r: self.red(),
            g: self.green(),
            b: self.blue(),
            a,
        }
    }

    pub const fn opaque(self) -> Rgba {
        self.with_alpha(255)
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.0)
    }
}

impl From<u32> for Rgb {
    fn from(packed: u32) -> Self {
        Self::from_packed(packed)
    }
}

impl From<Rgb> for u32 {
    fn from(rgb: Rgb) -> Self {
        rgb.packed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(self) -> Rgb {
        Rgb::from_channels(self.r, self.g, self.b)
    }

    /// Alpha as a fraction in `0.0..=1.0`.
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}
