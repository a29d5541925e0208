//! CSS color values used by paint normalization and color animation.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::animation_attrs::format_number;

static RE_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(rgba?|hsla?)\(\s*([^)]*)\)$").expect("static regex")
});
static RE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[,/]\s*|\s+").expect("static regex"));

/// Straight (non-premultiplied) color with 0..=255 channels and a 0..=1 alpha.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a CSS color: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()`,
    /// `hsl()`/`hsla()`, `transparent` or a basic color keyword.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        if value == "transparent" {
            return Some(Self::TRANSPARENT);
        }
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(caps) = RE_FUNCTION.captures(&value) {
            let args: Vec<&str> = RE_SEPARATOR
                .split(caps[2].trim())
                .filter(|s| !s.is_empty())
                .collect();
            return if caps[1].starts_with("rgb") {
                parse_rgb_args(&args)
            } else {
                parse_hsl_args(&args)
            };
        }
        named(&value).map(|[r, g, b]| Self::rgba(r.into(), g.into(), b.into(), 1.0))
    }

    /// Channel-wise interpolation toward `to`.
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        Self::rgba(
            self.r + (to.r - self.r) * t,
            self.g + (to.g - self.g) * t,
            self.b + (to.b - self.b) * t,
            self.a + (to.a - self.a) * t,
        )
    }

    /// `rgba(r,g,b,a)` with rounded, clamped channels.
    pub fn to_rgba_string(&self) -> String {
        let ch = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        format!(
            "rgba({},{},{},{})",
            ch(self.r),
            ch(self.g),
            ch(self.b),
            format_number(self.a.clamp(0.0, 1.0))
        )
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |s: &str| u8::from_str_radix(s, 16).ok().map(f64::from);
    let nibble = |i: usize| byte(&hex[i..=i]).map(|v| v * 17.0);
    let (r, g, b, a) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255.0),
        4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
        6 => (byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?, 255.0),
        8 => (
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            byte(&hex[6..8])?,
        ),
        _ => return None,
    };
    Some(Color::rgba(r, g, b, a / 255.0))
}

/// `"50%"` scaled onto `full`, or a plain number.
fn component(s: &str, full: f64) -> Option<f64> {
    match s.strip_suffix('%') {
        Some(p) => p.parse::<f64>().ok().map(|v| v / 100.0 * full),
        None => s.parse::<f64>().ok(),
    }
}

fn alpha(args: &[&str]) -> Option<f64> {
    match args.get(3) {
        Some(a) => component(a, 1.0).map(|v| v.clamp(0.0, 1.0)),
        None => Some(1.0),
    }
}

fn parse_rgb_args(args: &[&str]) -> Option<Color> {
    if !(3..=4).contains(&args.len()) {
        return None;
    }
    let ch = |s: &str| component(s, 255.0).map(|v| v.clamp(0.0, 255.0));
    Some(Color::rgba(ch(args[0])?, ch(args[1])?, ch(args[2])?, alpha(args)?))
}

fn parse_hsl_args(args: &[&str]) -> Option<Color> {
    if !(3..=4).contains(&args.len()) {
        return None;
    }
    let h = args[0].trim_end_matches("deg").parse::<f64>().ok()?;
    let s = component(args[1], 1.0)?;
    let l = component(args[2], 1.0)?;
    let [r, g, b] = hsl_to_rgb(h, s, l);
    Some(Color::rgba(r * 255.0, g * 255.0, b * 255.0, alpha(args)?))
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        return [l, l, l];
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    ]
}

fn named(name: &str) -> Option<[u8; 3]> {
    Some(match name {
        "black" => [0, 0, 0],
        "white" => [255, 255, 255],
        "red" => [255, 0, 0],
        "lime" => [0, 255, 0],
        "green" => [0, 128, 0],
        "blue" => [0, 0, 255],
        "yellow" => [255, 255, 0],
        "cyan" | "aqua" => [0, 255, 255],
        "magenta" | "fuchsia" => [255, 0, 255],
        "silver" => [192, 192, 192],
        "gray" | "grey" => [128, 128, 128],
        "maroon" => [128, 0, 0],
        "olive" => [128, 128, 0],
        "purple" => [128, 0, 128],
        "teal" => [0, 128, 128],
        "navy" => [0, 0, 128],
        "orange" => [255, 165, 0],
        "pink" => [255, 192, 203],
        "brown" => [165, 42, 42],
        "gold" => [255, 215, 0],
        "indigo" => [75, 0, 130],
        "violet" => [238, 130, 238],
        _ => return None,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/style/color.rs"]
mod tests;
