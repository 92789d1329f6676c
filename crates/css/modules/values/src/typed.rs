use crate::value::{ColorRgba, Length, StyleValue};

/// Extraction of a concrete Rust type from a resolved style value.
pub trait FromStyleValue: Sized + Default {
    /// Enumerations tolerate representation mismatches silently.
    const IS_ENUM: bool = false;

    /// `None` when the value is stored in a different type.
    fn from_style_value(value: &StyleValue) -> Option<Self>;
}

impl FromStyleValue for f32 {
    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Number(number) => Some(*number),
            _ => None,
        }
    }
}

impl FromStyleValue for i32 {
    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Integer(integer) => Some(*integer),
            _ => None,
        }
    }
}

impl FromStyleValue for bool {
    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl FromStyleValue for ColorRgba {
    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Color(color) => Some(*color),
            _ => None,
        }
    }
}

impl FromStyleValue for Length {
    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Length(length) => Some(*length),
            _ => None,
        }
    }
}

impl FromStyleValue for String {
    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Text(text) | StyleValue::Ident(text) => Some(text.clone()),
            _ => None,
        }
    }
}

impl Default for StyleValue {
    #[inline]
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// Untyped access: every value matches.
impl FromStyleValue for StyleValue {
    fn from_style_value(value: &StyleValue) -> Option<Self> {
        Some(value.clone())
    }
}
