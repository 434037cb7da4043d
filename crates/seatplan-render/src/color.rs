//! Hex color parsing for entity colors.

use peniko::Color;

/// Parse a CSS-style hex color: `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
/// The leading `#` is optional.
pub fn parse_hex_color(input: &str) -> Option<Color> {
    let hex = input.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);

    let [r, g, b, a] = match hex.len() {
        3 => [short(0)?, short(1)?, short(2)?, 255],
        4 => [short(0)?, short(1)?, short(2)?, short(3)?],
        6 => [channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?, 255],
        8 => [
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        ],
        _ => return None,
    };
    Some(Color::from_rgba8(r, g, b, a))
}

/// Parse an optional entity color, falling back when absent or invalid.
pub fn color_or(hex: Option<&str>, fallback: Color) -> Color {
    match hex {
        Some(hex) => parse_hex_color(hex).unwrap_or_else(|| {
            log::debug!("Unparseable color {hex:?}, using fallback");
            fallback
        }),
        None => fallback,
    }
}
