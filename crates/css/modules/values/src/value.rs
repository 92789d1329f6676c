use core::fmt;

use crate::computed::ComputedValue;
use crate::keyword::CssKeyword;

/// A raw style value as stored in override maps and declaration blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Keyword(CssKeyword),
    Number(f32),
    Integer(i32),
    Bool(bool),
    Color(ColorRgba),
    Length(Length),
    /// Free-form text such as font family lists or transition shorthands.
    Text(String),
    /// Identifier of an enumerated property value (`center`, `italic`, ...).
    Ident(String),
    /// Value resolved against the requesting node at read time.
    Computed(ComputedValue),
}

impl StyleValue {
    /// Short, stable name of the variant, used in diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Keyword(_) => "keyword",
            Self::Number(_) => "number",
            Self::Integer(_) => "integer",
            Self::Bool(_) => "bool",
            Self::Color(_) => "color",
            Self::Length(_) => "length",
            Self::Text(_) => "text",
            Self::Ident(_) => "ident",
            Self::Computed(_) => "computed",
        }
    }

    /// Build an identifier value.
    pub fn ident(name: &str) -> Self {
        Self::Ident(name.to_owned())
    }

    /// Build a text value.
    pub fn text(text: &str) -> Self {
        Self::Text(text.to_owned())
    }

    pub const fn is_keyword(&self) -> bool {
        matches!(self, Self::Keyword(_))
    }
}

impl From<CssKeyword> for StyleValue {
    #[inline]
    fn from(keyword: CssKeyword) -> Self {
        Self::Keyword(keyword)
    }
}

impl From<f32> for StyleValue {
    #[inline]
    fn from(number: f32) -> Self {
        Self::Number(number)
    }
}

impl From<i32> for StyleValue {
    #[inline]
    fn from(integer: i32) -> Self {
        Self::Integer(integer)
    }
}

impl From<bool> for StyleValue {
    #[inline]
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<ColorRgba> for StyleValue {
    #[inline]
    fn from(color: ColorRgba) -> Self {
        Self::Color(color)
    }
}

impl From<Length> for StyleValue {
    #[inline]
    fn from(length: Length) -> Self {
        Self::Length(length)
    }
}

/// Authored text, converted by the receiving property.
impl From<&str> for StyleValue {
    #[inline]
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for StyleValue {
    #[inline]
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<ComputedValue> for StyleValue {
    #[inline]
    fn from(computed: ComputedValue) -> Self {
        Self::Computed(computed)
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(keyword) => write!(formatter, "{}", keyword.as_str().unwrap_or("<invalid>")),
            Self::Number(number) => write!(formatter, "{number}"),
            Self::Integer(integer) => write!(formatter, "{integer}"),
            Self::Bool(flag) => write!(formatter, "{flag}"),
            Self::Color(color) => write!(formatter, "{color}"),
            Self::Length(length) => write!(formatter, "{length}"),
            Self::Text(text) | Self::Ident(text) => formatter.write_str(text),
            Self::Computed(computed) => write!(formatter, "{computed:?}"),
        }
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorRgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl ColorRgba {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[inline]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }
}

impl Default for ColorRgba {
    #[inline]
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl fmt::Display for ColorRgba {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "rgba({}, {}, {}, {})",
            self.red,
            self.green,
            self.blue,
            f32::from(self.alpha) / 255.0
        )
    }
}

/// Specified length for geometry properties consumed by layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Length {
    #[default]
    Auto,
    Px(f32),
    /// Fraction of the containing block, `0.0..=1.0` for `0%..=100%`.
    Percent(f32),
}

impl fmt::Display for Length {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => formatter.write_str("auto"),
            Self::Px(px) => write!(formatter, "{px}px"),
            Self::Percent(fraction) => write!(formatter, "{}%", fraction * 100.0),
        }
    }
}

/// Declare an enumerated property value with its authored identifiers.
macro_rules! style_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $ident:literal),+ $(,)? } default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[doc = concat!("`", $ident, "`")]
                $variant,
            )+
        }

        impl $name {
            /// Every authored identifier, in declaration order.
            pub const IDENTS: &'static [&'static str] = &[$($ident),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $ident,)+
                }
            }

            /// Match an identifier, ignoring ASCII case.
            pub fn from_ident(ident: &str) -> Option<Self> {
                let trimmed = ident.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($ident) {
                        return Some(Self::$variant);
                    }
                )+
                None
            }
        }

        impl Default for $name {
            #[inline]
            fn default() -> Self {
                Self::$default
            }
        }

        impl $crate::typed::FromStyleValue for $name {
            const IS_ENUM: bool = true;

            fn from_style_value(value: &StyleValue) -> Option<Self> {
                match value {
                    StyleValue::Ident(ident) | StyleValue::Text(ident) => Self::from_ident(ident),
                    _ => None,
                }
            }
        }

        impl From<$name> for StyleValue {
            #[inline]
            fn from(value: $name) -> Self {
                Self::Ident(value.as_str().to_owned())
            }
        }
    };
}

mod enums {
    use super::StyleValue;

    style_enum! {
        /// `display`
        Display {
            Flex => "flex",
            Block => "block",
            Inline => "inline",
            None => "none",
        } default Flex
    }

    style_enum! {
        /// `font-style`
        FontStyle {
            Normal => "normal",
            Italic => "italic",
            Oblique => "oblique",
        } default Normal
    }

    style_enum! {
        /// `text-align`
        TextAlign {
            Start => "start",
            Left => "left",
            Center => "center",
            Right => "right",
            End => "end",
            Justify => "justify",
        } default Start
    }

    style_enum! {
        /// `text-overflow`
        TextOverflow {
            Clip => "clip",
            Ellipsis => "ellipsis",
        } default Clip
    }

    style_enum! {
        /// `pointer-events`
        PointerEvents {
            Auto => "auto",
            None => "none",
            Visible => "visible",
            All => "all",
        } default Auto
    }

    style_enum! {
        /// `object-fit`
        ObjectFit {
            Fill => "fill",
            Contain => "contain",
            Cover => "cover",
            None => "none",
            ScaleDown => "scale-down",
        } default Fill
    }

    style_enum! {
        /// `appearance`
        Appearance {
            Auto => "auto",
            None => "none",
            Button => "button",
            Toggle => "toggle",
            Slider => "slider",
        } default Auto
    }
}

pub use enums::{Appearance, Display, FontStyle, ObjectFit, PointerEvents, TextAlign, TextOverflow};
