//! CSS color primitives — recognition, parsing, and equivalence.
//! Spec: <https://www.w3.org/TR/css-color-3/>

#![forbid(unsafe_code)]

mod hex;
mod hsl;
mod named;

pub use hex::parse_hex_color;
pub use hsl::hsl_to_rgb;
pub use named::named_color;

/// A minimal RGBA color representation. Two colors are equivalent iff all
/// four components match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    /// Construct an opaque color from its channel values.
    #[inline]
    #[must_use]
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 255,
        }
    }
}

/// The color-function names whose call forms evaluate to an `Rgba`.
/// Spec: Section 4.2.1 — RGB color values; Section 4.2.4 — HSL color values
#[inline]
#[must_use]
pub fn is_color_function(name: &str) -> bool {
    name.eq_ignore_ascii_case("rgb")
        || name.eq_ignore_ascii_case("rgba")
        || name.eq_ignore_ascii_case("hsl")
        || name.eq_ignore_ascii_case("hsla")
}

/// Whether `text` is recognizable as a color on its own: a named color
/// keyword or a hex pattern (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbba`).
#[inline]
#[must_use]
pub fn is_color_literal(text: &str) -> bool {
    color_from_literal(text).is_some()
}

/// Resolve a color literal (named keyword or hex form) to an `Rgba`.
#[must_use]
pub fn color_from_literal(text: &str) -> Option<Rgba> {
    let trimmed = text.trim();
    if let Some(hex_digits) = trimmed.strip_prefix('#') {
        return parse_hex_color(hex_digits);
    }
    named_color(trimmed)
}

/// Evaluate a color function call to an `Rgba`, given the function name and
/// its flattened component strings.
///
/// Components follow the legacy comma syntax: `rgb(r, g, b)` with channels
/// as integers or percentages, `hsl(h, s%, l%)`, and an optional fourth
/// alpha component as a number in `0..=1` or a percentage.
#[must_use]
pub fn color_from_function(name: &str, components: &[String]) -> Option<Rgba> {
    if components.len() != 3 && components.len() != 4 {
        return None;
    }
    let alpha = match components.get(3) {
        Some(raw) => parse_alpha(raw)?,
        None => 255,
    };
    if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") {
        let red = parse_rgb_channel(components.first()?)?;
        let green = parse_rgb_channel(components.get(1)?)?;
        let blue = parse_rgb_channel(components.get(2)?)?;
        return Some(Rgba {
            red,
            green,
            blue,
            alpha,
        });
    }
    if name.eq_ignore_ascii_case("hsl") || name.eq_ignore_ascii_case("hsla") {
        let hue = components.first()?.trim().trim_end_matches("deg").parse::<f32>().ok()?;
        let saturation = parse_percent_fraction(components.get(1)?)?;
        let lightness = parse_percent_fraction(components.get(2)?)?;
        let (red, green, blue) = hsl_to_rgb(hue, saturation, lightness);
        return Some(Rgba {
            red,
            green,
            blue,
            alpha,
        });
    }
    None
}

/// Parse one `rgb()` channel: an integer `0..=255` or a percentage.
fn parse_rgb_channel(raw: &str) -> Option<u8> {
    let trimmed = raw.trim();
    if let Some(percent_text) = trimmed.strip_suffix('%') {
        let fraction = percent_text.trim().parse::<f32>().ok()? / 100.0;
        return Some(scale_to_byte(fraction));
    }
    let channel = trimmed.parse::<f32>().ok()?;
    Some(clamp_to_byte(channel))
}

/// Parse an alpha component: a number in `0..=1` or a percentage.
fn parse_alpha(raw: &str) -> Option<u8> {
    let trimmed = raw.trim();
    if let Some(percent_text) = trimmed.strip_suffix('%') {
        let fraction = percent_text.trim().parse::<f32>().ok()? / 100.0;
        return Some(scale_to_byte(fraction));
    }
    let fraction = trimmed.parse::<f32>().ok()?;
    Some(scale_to_byte(fraction))
}

/// Parse a percentage token into a `0.0..=1.0` fraction.
fn parse_percent_fraction(raw: &str) -> Option<f32> {
    let percent_text = raw.trim().strip_suffix('%')?;
    let fraction = percent_text.trim().parse::<f32>().ok()? / 100.0;
    Some(fraction.clamp(0.0, 1.0))
}

/// Scale a `0.0..=1.0` fraction to a byte.
pub(crate) fn scale_to_byte(fraction: f32) -> u8 {
    clamp_to_byte(fraction * 255.0)
}

/// Round and clamp a channel value to a byte.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn clamp_to_byte(channel: f32) -> u8 {
    channel.round().clamp(0.0, 255.0) as u8
}
