use css_properties::PropertyId;
use css_values::{FromStyleValue, StyleValue};

/// Every property of one node, fully resolved. Produced once per pass and
/// compared against the previous pass to detect changes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedStyle {
    /// Indexed by [`PropertyId::index`]; `None` when the property has no value.
    values: Vec<Option<StyleValue>>,
}

impl ResolvedStyle {
    pub(crate) fn from_values(values: Vec<Option<StyleValue>>) -> Self {
        Self { values }
    }

    #[inline]
    pub fn get(&self, property: PropertyId) -> Option<&StyleValue> {
        self.values.get(property.index()).and_then(Option::as_ref)
    }

    /// Typed view; a missing or differently typed value gives `T::default()`.
    pub fn typed<T: FromStyleValue>(&self, property: PropertyId) -> T {
        self.get(property)
            .and_then(T::from_style_value)
            .unwrap_or_default()
    }

    /// Properties that resolved to a value.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &StyleValue)> {
        PropertyId::ALL
            .iter()
            .filter_map(|id| self.get(*id).map(|value| (*id, value)))
    }
}
