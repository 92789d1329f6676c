//! Values whose meaning depends on the node that reads them.

use crate::value::{ColorRgba, Length, StyleValue};

/// What a computed value may ask of the node it is resolved against.
///
/// Implemented by the cascade for a single `(property, node)` pair.
pub trait ResolveContext {
    /// Resolved `color` of the requesting node. When the property being
    /// resolved is `color` itself this is the parent's color.
    fn current_color(&self) -> Option<ColorRgba>;

    /// Resolved value of the same property on the requesting node's parent.
    fn parent_value(&self) -> Option<StyleValue>;

    /// Registry default of the property being resolved.
    fn default_value(&self) -> Option<StyleValue>;
}

/// A value that is converted against the requesting node instead of being
/// returned verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComputedValue {
    /// `currentColor`.
    CurrentColor,
    /// The parent's value of the same property times a factor (`1.5em`, `150%`).
    /// Falls back to the property default at the root.
    ParentScaled(f32),
}

impl ComputedValue {
    /// Whether descendants inherit the resolved value rather than the value
    /// itself. `currentColor` stays symbolic so each node uses its own color.
    pub const fn resolves_before_inheritance(self) -> bool {
        matches!(self, Self::ParentScaled(_))
    }

    /// Produce the concrete value for the requesting node.
    pub fn resolve(self, context: &dyn ResolveContext) -> Option<StyleValue> {
        match self {
            Self::CurrentColor => context.current_color().map(StyleValue::Color),
            Self::ParentScaled(factor) => {
                let base = context
                    .parent_value()
                    .or_else(|| context.default_value())?;
                scale_value(&base, factor)
            }
        }
    }
}

/// Multiply a numeric value, keeping its unit.
fn scale_value(base: &StyleValue, factor: f32) -> Option<StyleValue> {
    match base {
        StyleValue::Number(number) => Some(StyleValue::Number(number * factor)),
        StyleValue::Integer(integer) => Some(StyleValue::Number(*integer as f32 * factor)),
        StyleValue::Length(Length::Px(px)) => Some(StyleValue::Length(Length::Px(px * factor))),
        StyleValue::Length(Length::Percent(fraction)) => {
            Some(StyleValue::Length(Length::Percent(fraction * factor)))
        }
        _ => None,
    }
}
