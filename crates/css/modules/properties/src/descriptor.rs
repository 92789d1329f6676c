use core::fmt;

use css_values::convert::by_type;
use css_values::{Converter, StyleValue, ValueType};

use crate::id::PropertyId;

/// Immutable semantic description of one style property.
#[derive(Clone)]
pub struct PropertyDescriptor {
    pub id: PropertyId,
    pub name: &'static str,
    /// Value used when nothing in the cascade assigns the property, and for
    /// `auto`, `initial` and `unset`. `None` means the property has no value.
    pub default: Option<StyleValue>,
    /// Value substituted for the `none` keyword.
    pub none_value: Option<StyleValue>,
    /// Unset values come from the parent instead of `default`.
    pub inherited: bool,
    pub value_type: ValueType,
    pub converter: Converter,
    /// Property read when this longhand is not assigned anywhere.
    pub shorthand: Option<PropertyId>,
}

impl PropertyDescriptor {
    /// A non-inherited property with no default, converted by type.
    pub fn new(id: PropertyId, value_type: ValueType) -> Self {
        Self {
            id,
            name: id.name(),
            default: None,
            none_value: None,
            inherited: false,
            value_type,
            converter: by_type,
            shorthand: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<StyleValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn with_none_value(mut self, none_value: impl Into<StyleValue>) -> Self {
        self.none_value = Some(none_value.into());
        self
    }

    #[must_use]
    pub const fn inherited(mut self) -> Self {
        self.inherited = true;
        self
    }

    #[must_use]
    pub fn with_converter(mut self, converter: Converter) -> Self {
        self.converter = converter;
        self
    }

    #[must_use]
    pub const fn with_shorthand(mut self, shorthand: PropertyId) -> Self {
        self.shorthand = Some(shorthand);
        self
    }

    /// Convert an authored value into this property's type.
    #[inline]
    pub fn convert(&self, value: &StyleValue) -> Option<StyleValue> {
        (self.converter)(value, self.value_type)
    }

    #[inline]
    pub const fn default_value(&self) -> Option<&StyleValue> {
        self.default.as_ref()
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("default", &self.default)
            .field("none_value", &self.none_value)
            .field("inherited", &self.inherited)
            .field("value_type", &self.value_type)
            .field("shorthand", &self.shorthand)
            .finish_non_exhaustive()
    }
}
