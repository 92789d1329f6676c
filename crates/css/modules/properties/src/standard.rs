//! The built-in property table.

use css_values::convert::{font_size, font_weight};
use css_values::{
    Appearance, ColorRgba, ComputedValue, Display, FontStyle, Length, ObjectFit, PointerEvents,
    StyleValue, TextAlign, TextOverflow, ValueType,
};

use crate::descriptor::PropertyDescriptor;
use crate::id::PropertyId;

/// Descriptors for every [`PropertyId`].
pub fn standard_properties() -> Vec<PropertyDescriptor> {
    use PropertyId as Id;
    use PropertyDescriptor as Desc;

    let corner = |id| Desc::new(id, ValueType::Number).with_shorthand(Id::BorderRadius);
    let side = |id| Desc::new(id, ValueType::Color).with_shorthand(Id::BorderColor);

    vec![
        Desc::new(Id::Opacity, ValueType::Number).with_default(1.0f32),
        Desc::new(Id::ZIndex, ValueType::Integer).with_default(0i32),
        Desc::new(Id::Visibility, ValueType::Bool)
            .with_default(true)
            .inherited(),
        Desc::new(Id::Cursor, ValueType::Text).inherited(),
        Desc::new(Id::PointerEvents, ValueType::Enum(PointerEvents::IDENTS))
            .with_default(PointerEvents::Auto)
            .with_none_value(PointerEvents::None)
            .inherited(),
        Desc::new(Id::BackgroundColor, ValueType::Color)
            .with_default(ColorRgba::TRANSPARENT)
            .with_none_value(ColorRgba::TRANSPARENT),
        Desc::new(Id::BackgroundImage, ValueType::Text),
        Desc::new(Id::BorderRadius, ValueType::Number)
            .with_default(0.0f32)
            .with_none_value(0.0f32),
        corner(Id::BorderTopLeftRadius),
        corner(Id::BorderTopRightRadius),
        corner(Id::BorderBottomLeftRadius),
        corner(Id::BorderBottomRightRadius),
        Desc::new(Id::BorderColor, ValueType::Color)
            .with_default(ComputedValue::CurrentColor)
            .with_none_value(ColorRgba::TRANSPARENT),
        side(Id::BorderLeftColor),
        side(Id::BorderRightColor),
        side(Id::BorderTopColor),
        side(Id::BorderBottomColor),
        Desc::new(Id::BoxShadow, ValueType::Text),
        Desc::new(Id::TransformOrigin, ValueType::Text).with_default(StyleValue::text("50% 50%")),
        Desc::new(Id::Translate, ValueType::Text),
        Desc::new(Id::Scale, ValueType::Number)
            .with_default(1.0f32)
            .with_none_value(1.0f32),
        Desc::new(Id::Rotate, ValueType::Number)
            .with_default(0.0f32)
            .with_none_value(0.0f32),
        Desc::new(Id::FontFamily, ValueType::Text).inherited(),
        Desc::new(Id::Color, ValueType::Color)
            .with_default(ColorRgba::BLACK)
            .inherited(),
        Desc::new(Id::FontWeight, ValueType::Integer)
            .with_default(400i32)
            .with_converter(font_weight)
            .inherited(),
        Desc::new(Id::FontStyle, ValueType::Enum(FontStyle::IDENTS))
            .with_default(FontStyle::Normal)
            .inherited(),
        Desc::new(Id::FontSize, ValueType::Number)
            .with_default(16.0f32)
            .with_converter(font_size)
            .inherited(),
        Desc::new(Id::LineHeight, ValueType::Number)
            .with_default(1.2f32)
            .inherited(),
        Desc::new(Id::LetterSpacing, ValueType::Number)
            .with_default(0.0f32)
            .inherited(),
        Desc::new(Id::WordSpacing, ValueType::Number)
            .with_default(0.0f32)
            .inherited(),
        Desc::new(Id::TextAlign, ValueType::Enum(TextAlign::IDENTS))
            .with_default(TextAlign::Start)
            .inherited(),
        Desc::new(Id::TextOverflow, ValueType::Enum(TextOverflow::IDENTS))
            .with_default(TextOverflow::Clip),
        Desc::new(Id::TextWrap, ValueType::Bool)
            .with_default(true)
            .with_none_value(false)
            .inherited(),
        Desc::new(Id::Content, ValueType::Text),
        Desc::new(Id::Appearance, ValueType::Enum(Appearance::IDENTS))
            .with_default(Appearance::Auto)
            .with_none_value(Appearance::None),
        Desc::new(Id::Transition, ValueType::Text),
        Desc::new(Id::Animation, ValueType::Text),
        Desc::new(Id::ObjectFit, ValueType::Enum(ObjectFit::IDENTS))
            .with_default(ObjectFit::Fill)
            .with_none_value(ObjectFit::None),
        Desc::new(Id::ObjectPosition, ValueType::Text).with_default(StyleValue::text("50% 50%")),
        Desc::new(Id::Fill, ValueType::Color)
            .with_default(ComputedValue::CurrentColor)
            .with_none_value(ColorRgba::TRANSPARENT)
            .inherited(),
        Desc::new(Id::Stroke, ValueType::Color)
            .with_default(ComputedValue::CurrentColor)
            .with_none_value(ColorRgba::TRANSPARENT)
            .inherited(),
        Desc::new(Id::Display, ValueType::Enum(Display::IDENTS))
            .with_default(Display::Flex)
            .with_none_value(Display::None),
        Desc::new(Id::Width, ValueType::Length).with_default(Length::Auto),
        Desc::new(Id::Height, ValueType::Length).with_default(Length::Auto),
    ]
}
