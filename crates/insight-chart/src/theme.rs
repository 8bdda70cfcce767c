// File: crates/insight-chart/src/theme.rs
// Summary: Series palette and light/dark theming for chart serializers and rasterizers.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque 8-bit RGB color. Displays and serializes as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_u32(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(s, 16).ok().map(Self::from_u32)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::parse_hex(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color `{s}`")))
    }
}

/// Series colors, assigned by position.
pub const PALETTE: [Rgb; 7] = [
    Rgb::from_u32(0x2563eb), // blue
    Rgb::from_u32(0x16a34a), // green
    Rgb::from_u32(0xf59e0b), // amber
    Rgb::from_u32(0xef4444), // red
    Rgb::from_u32(0x7c3aed), // violet
    Rgb::from_u32(0x0891b2), // cyan
    Rgb::from_u32(0xd946ef), // fuchsia
];

/// Color for the item at `index`; depends on the index only, never on data.
#[inline]
pub fn palette_color(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}

/// Non-series colors used when drawing a geometry bundle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgb,
    pub grid: Rgb,
    pub axis_line: Rgb,
    pub axis_label: Rgb,
    pub title: Rgb,
    /// Ring drawn under pie segments so empty pies stay visible.
    pub pie_track: Rgb,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgb::from_u32(0xffffff),
            grid: Rgb::from_u32(0xe5e7eb),
            axis_line: Rgb::from_u32(0x9ca3af),
            axis_label: Rgb::from_u32(0x6b7280),
            title: Rgb::from_u32(0x111827),
            pie_track: Rgb::from_u32(0xf3f4f6),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgb::new(18, 18, 20),
            grid: Rgb::new(40, 40, 45),
            axis_line: Rgb::new(180, 180, 190),
            axis_label: Rgb::new(150, 150, 160),
            title: Rgb::new(235, 235, 245),
            pie_track: Rgb::new(40, 40, 45),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: Rgb::from_u32(0x000000),
            grid: Rgb::from_u32(0x222222),
            axis_line: Rgb::from_u32(0xffffff),
            axis_label: Rgb::from_u32(0xcccccc),
            title: Rgb::from_u32(0xffffff),
            pie_track: Rgb::from_u32(0x222222),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_default()
}
