//! Color parsing for authored color text.
//! Spec: <https://www.w3.org/TR/css-color-4/>
use csscolorparser::Color;

use crate::value::ColorRgba;

/// Parse a CSS `<color>` into 8-bit RGBA channels.
///
/// Supports named colors (including `transparent`), hex forms
/// (`#rgb`/`#rgba`/`#rrggbb`/`#rrggbbaa`) and functional notations like
/// `rgb()`/`rgba()`/`hsl()`. `currentColor` is not a color here; it is a
/// computed value handled by the converters.
///
/// Spec: <https://www.w3.org/TR/css-color-4/#typedef-color>
#[inline]
pub fn parse_css_color(input: &str) -> Option<ColorRgba> {
    let parsed: Color = input.trim().parse().ok()?;
    let [red, green, blue, alpha] = parsed.to_rgba8();
    Some(ColorRgba::new(red, green, blue, alpha))
}
