//! Colour parsing and HSL adjustments.

use std::str::FromStr;
use std::sync::OnceLock;

use coolor::{Hsl, Rgb};
use ratatui::style::Color;
use regex::Regex;

/// Parses a colour name (`teal`, `LightBlue`) or hex code (`#f0a`, `#FF00AA`).
#[must_use]
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).map(|(r, g, b)| Color::Rgb(r, g, b));
    }

    match s.to_ascii_lowercase().as_str() {
        "orange" => Some(Color::Indexed(208)),
        "teal" => Some(Color::Rgb(0, 128, 128)),
        "pink" => Some(Color::Rgb(255, 105, 180)),
        "purple" => Some(Color::Rgb(128, 0, 128)),
        _ => Color::from_str(s).ok(),
    }
}

/// Resolves a role colour, which may be a CSS gradient; the first hex stop
/// of a gradient stands in for the whole gradient.
#[must_use]
pub fn role_colour(s: &str) -> Option<Color> {
    static HEX: OnceLock<Regex> = OnceLock::new();

    if let Some(colour) = parse_color(s) {
        return Some(colour);
    }

    let re = HEX.get_or_init(|| {
        Regex::new(r"#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b").expect("Invalid regex")
    });
    re.find(s).and_then(|m| parse_color(m.as_str()))
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
            Some((short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}

fn to_rgb(color: Color) -> Rgb {
    let (r, g, b) = match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0, 0, 0),
        Color::Red => (170, 0, 0),
        Color::Green => (0, 170, 0),
        Color::Yellow => (170, 85, 0),
        Color::Blue => (0, 0, 170),
        Color::Magenta => (170, 0, 170),
        Color::Cyan => (0, 170, 170),
        Color::Gray => (170, 170, 170),
        Color::DarkGray => (85, 85, 85),
        Color::LightRed => (255, 85, 85),
        Color::LightGreen => (85, 255, 85),
        Color::LightYellow => (255, 255, 85),
        Color::LightBlue => (85, 85, 255),
        Color::LightMagenta => (255, 85, 255),
        Color::LightCyan => (85, 255, 255),
        Color::Indexed(208) => (255, 135, 0),
        _ => (255, 255, 255),
    };
    Rgb::new(r, g, b)
}

/// Returns `color` with its saturation and lightness replaced.
#[must_use]
pub fn shade(color: Color, saturation: f32, lightness: f32) -> Color {
    let mut hsl: Hsl = to_rgb(color).to_hsl();
    hsl.s = saturation;
    hsl.l = lightness;
    let rgb: Rgb = hsl.to_rgb();
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}
