//! HslColor, the canonical color representation of the picker.
//!
//! Hue, saturation and lightness are the only stored truth. RGB, hex and CSS
//! strings are derived on demand.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::PickerError;
use crate::math;

/// An 8-bit RGBA pixel as read from a rendered surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// HSL color: hue in `[0, 360)`, saturation and lightness in `[0, 100]`.
///
/// Every constructor normalizes its input, so a value of this type is always
/// renderable: hue wraps modulo 360, saturation and lightness are clamped,
/// and non-finite components are repaired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawHsl")]
pub struct HslColor {
    h: f64,
    s: f64,
    l: f64,
}

#[derive(Deserialize)]
struct RawHsl {
    h: f64,
    s: f64,
    l: f64,
}

impl From<RawHsl> for HslColor {
    fn from(raw: RawHsl) -> Self {
        Self::new(raw.h, raw.s, raw.l)
    }
}

impl Default for HslColor {
    fn default() -> Self {
        Self {
            h: 0.0,
            s: 0.0,
            l: 50.0,
        }
    }
}

fn wrap_hue(h: f64) -> f64 {
    if !h.is_finite() {
        warn!("{}", PickerError::InvalidColorValue(format!("hue {h}, using 0")));
        return 0.0;
    }
    // `+ 0.0` folds negative zero
    let wrapped = h.rem_euclid(360.0) + 0.0;
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

fn clamp_percent(name: &str, v: f64) -> f64 {
    if v.is_nan() {
        warn!("{}", PickerError::InvalidColorValue(format!("{name} NaN, using 0")));
        return 0.0;
    }
    if v.is_infinite() {
        warn!("{}", PickerError::InvalidColorValue(format!("{name} {v}, clamping")));
    }
    v.clamp(0.0, 100.0) + 0.0
}

impl HslColor {
    /// Create from hue (degrees), saturation and lightness (percent).
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: wrap_hue(h),
            s: clamp_percent("saturation", s),
            l: clamp_percent("lightness", l),
        }
    }

    /// Hue in degrees, `[0, 360)`.
    pub fn h(&self) -> f64 {
        self.h
    }
    /// Saturation in percent, `[0, 100]`.
    pub fn s(&self) -> f64 {
        self.s
    }
    /// Lightness in percent, `[0, 100]`.
    pub fn l(&self) -> f64 {
        self.l
    }

    pub fn with_h(self, h: f64) -> Self {
        Self::new(h, self.s, self.l)
    }

    pub fn with_s(self, s: f64) -> Self {
        Self::new(self.h, s, self.l)
    }

    pub fn with_l(self, l: f64) -> Self {
        Self::new(self.h, self.s, l)
    }

    /// CSS functional notation, e.g. `hsl(200, 100%, 50%)`.
    pub fn to_css(&self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            css_number(self.h),
            css_number(self.s),
            css_number(self.l)
        )
    }

    /// Normalized RGB (0.0–1.0).
    pub fn to_rgb(&self) -> (f64, f64, f64) {
        math::hsl_to_rgb(self.h / 360.0, self.s / 100.0, self.l / 100.0)
    }

    /// Convert to 0–255 RGB tuple.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let (r, g, b) = self.to_rgb();
        (
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
        )
    }

    /// Create from 0–255 RGB values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        let (h, s, l) = math::rgb_to_hsl(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
        Self::new(h * 360.0, s * 100.0, l * 100.0)
    }

    /// Format as uppercase hex, `RRGGBB` with no `#` prefix.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("{:02X}{:02X}{:02X}", r, g, b)
    }

    /// Parse a hex string (with or without `#`, 3, 6, or 8 chars).
    ///
    /// The alpha pair of an 8-char string is ignored.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let stripped = hex.trim().trim_start_matches('#');
        if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match stripped.len() {
            3 => {
                let r = u8::from_str_radix(&stripped[0..1], 16).ok()?;
                let g = u8::from_str_radix(&stripped[1..2], 16).ok()?;
                let b = u8::from_str_radix(&stripped[2..3], 16).ok()?;
                Some(Self::from_rgb8(r * 17, g * 17, b * 17))
            }
            6 | 8 => {
                let r = u8::from_str_radix(&stripped[0..2], 16).ok()?;
                let g = u8::from_str_radix(&stripped[2..4], 16).ok()?;
                let b = u8::from_str_radix(&stripped[4..6], 16).ok()?;
                Some(Self::from_rgb8(r, g, b))
            }
            _ => None,
        }
    }

    /// Parse the CSS color forms used in picker styles: hex, `rgb()`,
    /// `rgba()`, `hsl()`, `hsla()` and a handful of named colors.
    ///
    /// Alpha is ignored.
    pub fn parse_css(input: &str) -> Option<Self> {
        let s = input.trim().to_ascii_lowercase();
        if s.starts_with('#') {
            return Self::from_hex(&s);
        }
        if let Some(args) = function_args(&s, "hsla").or_else(|| function_args(&s, "hsl")) {
            let h = parse_component(args.first()?, 1.0)?;
            let sat = parse_component(args.get(1)?, 1.0)?;
            let l = parse_component(args.get(2)?, 1.0)?;
            return Some(Self::new(h, sat, l));
        }
        if let Some(args) = function_args(&s, "rgba").or_else(|| function_args(&s, "rgb")) {
            let r = parse_component(args.first()?, 2.55)?;
            let g = parse_component(args.get(1)?, 2.55)?;
            let b = parse_component(args.get(2)?, 2.55)?;
            let byte = |v: f64| v.round().clamp(0.0, 255.0) as u8;
            return Some(Self::from_rgb8(byte(r), byte(g), byte(b)));
        }
        named_color(&s).map(|(r, g, b)| Self::from_rgb8(r, g, b))
    }
}

impl From<Rgba8> for HslColor {
    fn from(px: Rgba8) -> Self {
        Self::from_rgb8(px.r, px.g, px.b)
    }
}

/// Up to two decimals, trailing zeros dropped.
fn css_number(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    format!("{}", rounded)
}

/// Split `name(a, b, c)` / `name(a b c / d)` into its arguments.
fn function_args<'a>(s: &'a str, name: &str) -> Option<Vec<&'a str>> {
    let rest = s.strip_prefix(name)?.trim_start();
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
    let args: Vec<&str> = inner
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|a| !a.is_empty())
        .collect();
    (args.len() >= 3).then_some(args)
}

/// Parse a number, optionally suffixed with `%` or `deg`. Percentages are
/// multiplied by `percent_scale`.
fn parse_component(raw: &str, percent_scale: f64) -> Option<f64> {
    if let Some(p) = raw.strip_suffix('%') {
        return p.parse::<f64>().ok().map(|v| v * percent_scale);
    }
    raw.trim_end_matches("deg").parse::<f64>().ok()
}

fn named_color(name: &str) -> Option<(u8, u8, u8)> {
    let rgb = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "magenta" | "fuchsia" => (255, 0, 255),
        "cyan" | "aqua" => (0, 255, 255),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "lightgray" | "lightgrey" => (211, 211, 211),
        "darkgray" | "darkgrey" => (169, 169, 169),
        "navy" => (0, 0, 128),
        "teal" => (0, 128, 128),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "brown" => (165, 42, 42),
        "pink" => (255, 192, 203),
        _ => return None,
    };
    Some(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_hue_and_clamps_percentages() {
        let c = HslColor::new(370.0, -5.0, 150.0);
        assert_eq!((c.h(), c.s(), c.l()), (10.0, 0.0, 100.0));

        let c = HslColor::new(-90.0, 50.0, 50.0);
        assert_eq!(c.h(), 270.0);

        let c = HslColor::new(720.0, 100.0, 0.0);
        assert_eq!(c.h(), 0.0);

        let c = HslColor::new(-0.0, -0.0, 0.0);
        assert_eq!(c.to_css(), "hsl(0, 0%, 0%)");
    }

    #[test]
    fn repairs_non_finite_components() {
        let c = HslColor::new(f64::NAN, f64::INFINITY, f64::NEG_INFINITY);
        assert_eq!((c.h(), c.s(), c.l()), (0.0, 100.0, 0.0));

        let c = HslColor::new(f64::INFINITY, f64::NAN, 40.0);
        assert_eq!((c.h(), c.s(), c.l()), (0.0, 0.0, 40.0));
    }

    #[test]
    fn css_string_matches_hsl_notation() {
        assert_eq!(HslColor::new(200.0, 100.0, 50.0).to_css(), "hsl(200, 100%, 50%)");
        assert_eq!(HslColor::new(10.5, 33.333, 0.0).to_css(), "hsl(10.5, 33.33%, 0%)");
    }

    #[test]
    fn hex_views() {
        let red = HslColor::new(0.0, 100.0, 50.0);
        assert_eq!(red.to_hex(), "FF0000");
        let green = HslColor::from_hex("#00ff00").unwrap();
        assert!((green.h() - 120.0).abs() < 1e-9);
        assert_eq!(HslColor::from_hex("#fff").map(|c| c.l()), Some(100.0));
        assert_eq!(HslColor::from_hex("0000FFAA").map(|c| c.to_hex()), Some("0000FF".into()));
        assert!(HslColor::from_hex("xyz").is_none());
        assert!(HslColor::from_hex("1234").is_none());
    }

    #[test]
    fn parses_css_forms() {
        assert_eq!(
            HslColor::parse_css("hsl(303, 100%, 27%)"),
            Some(HslColor::new(303.0, 100.0, 27.0))
        );
        assert_eq!(
            HslColor::parse_css("hsla(40deg 50% 60% / 0.5)"),
            Some(HslColor::new(40.0, 50.0, 60.0))
        );
        assert_eq!(
            HslColor::parse_css("rgb(115, 115, 115)").map(|c| c.to_rgb8()),
            Some((115, 115, 115))
        );
        assert_eq!(
            HslColor::parse_css("rgba(100%, 0%, 0%, 1)").map(|c| c.to_hex()),
            Some("FF0000".into())
        );
        assert_eq!(
            HslColor::parse_css("#00d93d").map(|c| c.to_hex()),
            Some("00D93D".into())
        );
        assert_eq!(
            HslColor::parse_css("Orange").map(|c| c.to_rgb8()),
            Some((255, 165, 0))
        );
        assert!(HslColor::parse_css("hsl(1, 2)").is_none());
        assert!(HslColor::parse_css("papayawhip-ish").is_none());
    }

    #[test]
    fn deserializes_through_normalization() {
        let c: HslColor = serde_json::from_str(r#"{"h": 400, "s": 120, "l": -1}"#).unwrap();
        assert_eq!((c.h(), c.s(), c.l()), (40.0, 100.0, 0.0));
    }

    #[test]
    fn pixel_converts_to_hsl() {
        let c = HslColor::from(Rgba8::opaque(0, 0, 255));
        assert!((c.h() - 240.0).abs() < 1e-9);
        assert!((c.s() - 100.0).abs() < 1e-9);
        assert!((c.l() - 50.0).abs() < 1e-9);
    }
}
