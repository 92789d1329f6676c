//! Conversion of authored values into a property's typed value.
//!
//! Every converter accepts the global keywords and computed values unchanged,
//! passes through values that already have the target type, and parses text.
//! `None` means the value cannot be represented; callers decide whether that
//! becomes [`CssKeyword::Invalid`] or a diagnostic.

use log::trace;

use crate::color::parse_css_color;
use crate::computed::ComputedValue;
use crate::keyword::{CssKeyword, parse_keyword};
use crate::value::{Length, StyleValue};

/// The storage type a property's values convert to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Number,
    Integer,
    Bool,
    Color,
    Length,
    Text,
    /// One of a fixed set of identifiers.
    Enum(&'static [&'static str]),
}

impl ValueType {
    /// Whether `value` is already stored in this type.
    pub fn matches(self, value: &StyleValue) -> bool {
        match (self, value) {
            (Self::Number, StyleValue::Number(_))
            | (Self::Integer, StyleValue::Integer(_))
            | (Self::Bool, StyleValue::Bool(_))
            | (Self::Color, StyleValue::Color(_))
            | (Self::Length, StyleValue::Length(_))
            | (Self::Text, StyleValue::Text(_)) => true,
            (Self::Enum(idents), StyleValue::Ident(ident)) => idents
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(ident)),
            _ => false,
        }
    }
}

/// Conversion function carried by a property descriptor.
pub type Converter = fn(&StyleValue, ValueType) -> Option<StyleValue>;

/// Default converter: dispatch on the value type.
pub fn by_type(value: &StyleValue, value_type: ValueType) -> Option<StyleValue> {
    if let Some(special) = passthrough(value) {
        return Some(special);
    }
    let converted = match value_type {
        ValueType::Number => to_number(value),
        ValueType::Integer => to_integer(value),
        ValueType::Bool => to_bool(value),
        ValueType::Color => to_color(value),
        ValueType::Length => to_length(value),
        ValueType::Text => to_text(value),
        ValueType::Enum(idents) => to_ident(value, idents),
    };
    if converted.is_none() {
        trace!("convert: {value:?} is not a valid {value_type:?}");
    }
    converted
}

/// `font-size`: numbers in px, with `em` and `%` relative to the parent.
pub fn font_size(value: &StyleValue, value_type: ValueType) -> Option<StyleValue> {
    if let StyleValue::Text(text) = value {
        let trimmed = text.trim();
        if let Some(em) = trimmed.strip_suffix("em").and_then(parse_f32) {
            return Some(ComputedValue::ParentScaled(em).into());
        }
        if let Some(percent) = trimmed.strip_suffix('%').and_then(parse_f32) {
            return Some(ComputedValue::ParentScaled(percent / 100.0).into());
        }
    }
    by_type(value, value_type)
}

/// `font-weight`: numeric weights plus `normal` and `bold`.
pub fn font_weight(value: &StyleValue, value_type: ValueType) -> Option<StyleValue> {
    if let StyleValue::Text(text) = value {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("normal") {
            return Some(StyleValue::Integer(400));
        }
        if trimmed.eq_ignore_ascii_case("bold") {
            return Some(StyleValue::Integer(700));
        }
    }
    by_type(value, value_type)
}

/// Keywords, computed values and keyword text are valid for every type.
fn passthrough(value: &StyleValue) -> Option<StyleValue> {
    match value {
        StyleValue::Keyword(_) | StyleValue::Computed(_) => Some(value.clone()),
        StyleValue::Text(text) | StyleValue::Ident(text) => {
            parse_keyword(text).map(StyleValue::Keyword)
        }
        _ => None,
    }
}

fn parse_f32(input: &str) -> Option<f32> {
    input.trim().parse::<f32>().ok()
}

fn to_number(value: &StyleValue) -> Option<StyleValue> {
    match value {
        StyleValue::Number(number) => Some(StyleValue::Number(*number)),
        StyleValue::Integer(integer) => Some(StyleValue::Number(*integer as f32)),
        StyleValue::Length(Length::Px(px)) => Some(StyleValue::Number(*px)),
        StyleValue::Text(text) => {
            let trimmed = text.trim();
            if let Some(percent) = trimmed.strip_suffix('%') {
                return parse_f32(percent).map(|number| StyleValue::Number(number / 100.0));
            }
            parse_f32(trimmed.strip_suffix("px").unwrap_or(trimmed)).map(StyleValue::Number)
        }
        _ => None,
    }
}

fn to_integer(value: &StyleValue) -> Option<StyleValue> {
    match value {
        StyleValue::Integer(integer) => Some(StyleValue::Integer(*integer)),
        StyleValue::Number(number) if number.fract() == 0.0 => {
            Some(StyleValue::Integer(*number as i32))
        }
        StyleValue::Text(text) => text.trim().parse::<i32>().ok().map(StyleValue::Integer),
        _ => None,
    }
}

fn to_bool(value: &StyleValue) -> Option<StyleValue> {
    match value {
        StyleValue::Bool(flag) => Some(StyleValue::Bool(*flag)),
        StyleValue::Integer(integer) => Some(StyleValue::Bool(*integer != 0)),
        StyleValue::Text(text) | StyleValue::Ident(text) => {
            let lowered = text.trim().to_ascii_lowercase();
            match lowered.as_str() {
                "true" | "visible" | "wrap" | "normal" => Some(StyleValue::Bool(true)),
                "false" | "hidden" | "collapse" | "nowrap" => Some(StyleValue::Bool(false)),
                _ => None,
            }
        }
        _ => None,
    }
}

fn to_color(value: &StyleValue) -> Option<StyleValue> {
    match value {
        StyleValue::Color(color) => Some(StyleValue::Color(*color)),
        StyleValue::Text(text) | StyleValue::Ident(text) => {
            if text.trim().eq_ignore_ascii_case("currentcolor") {
                return Some(ComputedValue::CurrentColor.into());
            }
            parse_css_color(text).map(StyleValue::Color)
        }
        _ => None,
    }
}

fn to_length(value: &StyleValue) -> Option<StyleValue> {
    match value {
        StyleValue::Length(length) => Some(StyleValue::Length(*length)),
        StyleValue::Number(number) => Some(StyleValue::Length(Length::Px(*number))),
        StyleValue::Integer(integer) => Some(StyleValue::Length(Length::Px(*integer as f32))),
        StyleValue::Text(text) => {
            let trimmed = text.trim();
            if let Some(percent) = trimmed.strip_suffix('%') {
                return parse_f32(percent)
                    .map(|number| StyleValue::Length(Length::Percent(number / 100.0)));
            }
            parse_f32(trimmed.strip_suffix("px").unwrap_or(trimmed))
                .map(|px| StyleValue::Length(Length::Px(px)))
        }
        _ => None,
    }
}

fn to_text(value: &StyleValue) -> Option<StyleValue> {
    match value {
        StyleValue::Text(text) | StyleValue::Ident(text) => Some(StyleValue::Text(text.clone())),
        StyleValue::Number(_) | StyleValue::Integer(_) => Some(StyleValue::Text(value.to_string())),
        _ => None,
    }
}

fn to_ident(value: &StyleValue, idents: &'static [&'static str]) -> Option<StyleValue> {
    let (StyleValue::Text(text) | StyleValue::Ident(text)) = value else {
        return None;
    };
    let trimmed = text.trim();
    idents
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(trimmed))
        .map(|candidate| StyleValue::Ident((*candidate).to_owned()))
}
