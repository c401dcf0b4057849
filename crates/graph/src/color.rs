use crate::error::{GraphError, Result};
use crate::types::ResonanceGraph;
use serde::{Deserialize, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 24-bit RGB color, rendered as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
/// Highlight and prime-edge glow.
pub const GOLD: Color = Color::rgb(0xff, 0xd7, 0x00);

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0x00, 0x00, 0x00)),
    ("blue", Color::rgb(0x00, 0x00, 0xff)),
    ("cyan", Color::rgb(0x00, 0xff, 0xff)),
    ("deepskyblue", Color::rgb(0x00, 0xbf, 0xff)),
    ("gold", GOLD),
    ("green", Color::rgb(0x00, 0x80, 0x00)),
    ("lightgray", Color::rgb(0xd3, 0xd3, 0xd3)),
    ("lime", Color::rgb(0x00, 0xff, 0x00)),
    ("magenta", Color::rgb(0xff, 0x00, 0xff)),
    ("orange", Color::rgb(0xff, 0xa5, 0x00)),
    ("pink", Color::rgb(0xff, 0xc0, 0xcb)),
    ("purple", Color::rgb(0x80, 0x00, 0x80)),
    ("red", Color::rgb(0xff, 0x00, 0x00)),
    ("teal", Color::rgb(0x00, 0x80, 0x80)),
    ("white", WHITE),
    ("yellow", Color::rgb(0xff, 0xff, 0x00)),
];

/// Node palette and per-layer edge base colors, in this order.
pub const DEFAULT_PALETTE: [Color; 9] = [
    Color::rgb(0xff, 0x00, 0x00),
    Color::rgb(0xff, 0xa5, 0x00),
    Color::rgb(0xff, 0xff, 0x00),
    Color::rgb(0x00, 0x80, 0x00),
    Color::rgb(0x00, 0xff, 0xff),
    Color::rgb(0x00, 0x00, 0xff),
    Color::rgb(0xff, 0x00, 0xff),
    Color::rgb(0xff, 0xc0, 0xcb),
    Color::rgb(0x00, 0xff, 0x00),
];

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Hue, lightness, saturation; each in `0.0..=1.0`.
    pub fn to_hls(self) -> (f64, f64, f64) {
        let (r, g, b) = (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        );
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let sum = max + min;
        let range = max - min;
        let l = sum / 2.0;
        if range == 0.0 {
            return (0.0, l, 0.0);
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
        ((h / 6.0).rem_euclid(1.0), l, s)
    }

    pub fn from_hls(h: f64, l: f64, s: f64) -> Self {
        if s == 0.0 {
            let v = channel(l);
            return Self::rgb(v, v, v);
        }
        let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let m1 = 2.0 * l - m2;
        Self::rgb(
            channel(hue_to_rgb(m1, m2, h + 1.0 / 3.0)),
            channel(hue_to_rgb(m1, m2, h)),
            channel(hue_to_rgb(m1, m2, h - 1.0 / 3.0)),
        )
    }

    /// Scale lightness by `factor`, clamped to `0..=1`.
    pub fn adjust_lightness(self, factor: f64) -> Self {
        let (h, l, s) = self.to_hls();
        Self::from_hls(h, (l * factor).clamp(0.0, 1.0), s)
    }
}

fn hue_to_rgb(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

fn channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

impl FromStr for Color {
    type Err = GraphError;

    /// `#rrggbb`, `rrggbb`, or a known color name.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some((_, color)) = NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
        {
            return Ok(*color);
        }
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GraphError::InvalidColor(s.to_string()));
        }
        let part = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| GraphError::InvalidColor(s.to_string()))
        };
        Ok(Self::rgb(part(0)?, part(2)?, part(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Palette entry for `key`, chosen by its SHA-256 digest.
pub fn palette_color(key: &str, palette: &[Color]) -> Color {
    if palette.is_empty() {
        return WHITE;
    }
    let digest = Sha256::digest(key.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    palette[(u64::from_be_bytes(head) % palette.len() as u64) as usize]
}

/// Color and hue (degrees) for a resonance weight: `weight mod 200` mapped
/// onto hues 180..280.
pub fn resonance_color(weight: f64) -> (Color, f64) {
    let normalized = weight.rem_euclid(200.0) / 200.0;
    let hue = 180.0 + normalized * 100.0;
    let saturation = 0.7 + normalized * 0.2;
    let lightness = 0.6 + normalized * 0.1;
    (Color::from_hls(hue / 360.0, lightness, saturation), hue)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColorFamily {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
}

impl ColorFamily {
    pub fn name(self) -> &'static str {
        match self {
            ColorFamily::Red => "Red",
            ColorFamily::Orange => "Orange",
            ColorFamily::Yellow => "Yellow",
            ColorFamily::Green => "Green",
            ColorFamily::Blue => "Blue",
            ColorFamily::Purple => "Purple",
            ColorFamily::Pink => "Pink",
        }
    }
}

impl fmt::Display for ColorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn color_family(hue: f64) -> ColorFamily {
    let hue = hue.rem_euclid(360.0);
    match hue {
        h if h < 30.0 => ColorFamily::Red,
        h if h < 60.0 => ColorFamily::Orange,
        h if h < 90.0 => ColorFamily::Yellow,
        h if h < 150.0 => ColorFamily::Green,
        h if h < 210.0 => ColorFamily::Blue,
        h if h < 270.0 => ColorFamily::Purple,
        h if h < 330.0 => ColorFamily::Pink,
        _ => ColorFamily::Red,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Hash of the item identity into the palette.
    #[default]
    Palette,
    /// Mean of the item's resonance values mapped into a blue-violet band.
    ResonanceWeighted,
}

/// Weight used by [`ColorMode::ResonanceWeighted`]: mean of the numeric values
/// the item shares with others, falling back to the mean of all its numeric
/// layer values, then to zero.
pub fn resonance_weight(graph: &ResonanceGraph, text: &str) -> f64 {
    let shared: Vec<f64> = graph
        .resonances_of(text)
        .into_iter()
        .filter_map(|(_, value)| value.as_number())
        .collect();
    if !shared.is_empty() {
        return mean(&shared);
    }
    let own: Vec<f64> = graph
        .node(text)
        .map(|node| node.values.iter().filter_map(|(_, v)| v.as_number()).collect())
        .unwrap_or_default();
    if own.is_empty() {
        0.0
    } else {
        mean(&own)
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Node colors for every item in the graph.
#[derive(Debug, Clone)]
pub struct ColorAssigner {
    mode: ColorMode,
    palette: Vec<Color>,
}

impl ColorAssigner {
    pub fn new(mode: ColorMode, palette: Vec<Color>) -> Self {
        let palette = if palette.is_empty() {
            DEFAULT_PALETTE.to_vec()
        } else {
            palette
        };
        Self { mode, palette }
    }

    pub fn color(&self, graph: &ResonanceGraph, text: &str) -> Color {
        match self.mode {
            ColorMode::Palette => palette_color(&text.to_lowercase(), &self.palette),
            ColorMode::ResonanceWeighted => resonance_color(resonance_weight(graph, text)).0,
        }
    }

    pub fn assign(&self, graph: &ResonanceGraph) -> BTreeMap<String, Color> {
        graph
            .nodes()
            .map(|node| (node.text.clone(), self.color(graph, &node.text)))
            .collect()
    }
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self::new(ColorMode::Palette, Vec::new())
    }
}

/// Edge base color per layer: cycle through the default palette in layer
/// order, then apply overrides. Overrides for unknown layers are ignored.
pub fn layer_colors(layers: &[String], overrides: &BTreeMap<String, Color>) -> BTreeMap<String, Color> {
    layers
        .iter()
        .enumerate()
        .map(|(i, layer)| {
            let color = overrides
                .get(layer)
                .copied()
                .unwrap_or(DEFAULT_PALETTE[i % DEFAULT_PALETTE.len()]);
            (layer.clone(), color)
        })
        .collect()
}
