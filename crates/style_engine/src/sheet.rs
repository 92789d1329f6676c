//! Stylesheets as handed over by the (external) stylesheet parser, and their
//! compiled form with declarations resolved against the property registry.

use core::fmt;

use css_cascade::{DeclarationBlock, Diagnostics, Origin, SharedBlock, StyleDiagnostic};
use css_properties::{PropertyDescriptor, StyleError, StyleRegistry};
use css_values::{CssKeyword, StyleValue};

/// Handle returned by [`crate::StyleContext::insert_style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SheetId(pub u64);

impl fmt::Display for SheetId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "sheet#{}", self.0)
    }
}

/// One authored `name: value` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub value: StyleValue,
    pub important: bool,
}

impl Declaration {
    pub fn new(name: &str, value: impl Into<StyleValue>) -> Self {
        Self {
            name: name.to_owned(),
            value: value.into(),
            important: false,
        }
    }

    #[must_use]
    pub const fn important(mut self) -> Self {
        self.important = true;
        self
    }
}

/// A selector with its declarations, in authored order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleRule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

impl StyleRule {
    pub fn new(selector: &str) -> Self {
        Self {
            selector: selector.to_owned(),
            declarations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<StyleValue>) -> Self {
        self.declarations.push(Declaration::new(name, value));
        self
    }

    #[must_use]
    pub fn with_important(mut self, name: &str, value: impl Into<StyleValue>) -> Self {
        self.declarations.push(Declaration::new(name, value).important());
        self
    }
}

/// An ordered list of rules from one origin.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleSheet {
    pub origin: Origin,
    pub rules: Vec<StyleRule>,
}

impl StyleSheet {
    pub const fn new(origin: Origin) -> Self {
        Self {
            origin,
            rules: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_rule(mut self, rule: StyleRule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// A rule with its declarations split by importance.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub selector: String,
    pub source_order: u32,
    pub normal: Option<SharedBlock>,
    pub important: Option<SharedBlock>,
}

#[derive(Debug, Clone)]
pub struct CompiledSheet {
    pub id: SheetId,
    pub origin: Origin,
    pub importance_offset: i32,
    pub rules: Vec<CompiledRule>,
}

/// Convert an authored value to `descriptor`'s type. Values that do not
/// convert are stored as [`CssKeyword::Invalid`] and reported.
pub fn convert_authored(
    descriptor: &PropertyDescriptor,
    value: &StyleValue,
    diagnostics: &Diagnostics,
) -> StyleValue {
    descriptor.convert(value).unwrap_or_else(|| {
        diagnostics.report(StyleDiagnostic::InvalidValue {
            property: descriptor.id,
            value: value.clone(),
        });
        StyleValue::Keyword(CssKeyword::Invalid)
    })
}

/// Resolve every declaration of `sheet` against `registry`. Rules take
/// consecutive source orders starting at `*next_order`, which only advances
/// on success.
///
/// # Errors
/// Returns `UnknownProperty` for the first declaration whose name is not
/// registered.
pub fn compile(
    sheet: &StyleSheet,
    registry: &StyleRegistry,
    id: SheetId,
    importance_offset: i32,
    next_order: &mut u32,
    diagnostics: &Diagnostics,
) -> Result<CompiledSheet, StyleError> {
    let mut order = *next_order;
    let mut rules = Vec::with_capacity(sheet.rules.len());
    for rule in &sheet.rules {
        let mut normal = DeclarationBlock::new();
        let mut important = DeclarationBlock::new();
        for declaration in &rule.declarations {
            let descriptor = registry.lookup(&declaration.name)?;
            let value = convert_authored(descriptor, &declaration.value, diagnostics);
            let target = if declaration.important {
                &mut important
            } else {
                &mut normal
            };
            target.insert(descriptor.id, value);
        }
        rules.push(CompiledRule {
            selector: rule.selector.clone(),
            source_order: order,
            normal: (!normal.is_empty()).then(|| normal.into_shared()),
            important: (!important.is_empty()).then(|| important.into_shared()),
        });
        order = order.saturating_add(1);
    }
    *next_order = order;
    Ok(CompiledSheet {
        id,
        origin: sheet.origin,
        importance_offset,
        rules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_properties::PropertyId;
    use css_values::ColorRgba;

    /// Declarations are typed and split by importance; orders advance per rule.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn compiles_rules() -> Result<(), StyleError> {
        let registry = StyleRegistry::standard();
        let diagnostics = Diagnostics::default();
        let sheet = StyleSheet::new(Origin::Author)
            .with_rule(
                StyleRule::new(".a")
                    .with("color", StyleValue::text("red"))
                    .with_important("opacity", StyleValue::text("0.5")),
            )
            .with_rule(StyleRule::new(".b").with("z-index", StyleValue::text("high")));
        let mut next_order = 10;
        let compiled = compile(&sheet, &registry, SheetId(1), 0, &mut next_order, &diagnostics)?;

        assert_eq!(next_order, 12);
        assert_eq!(compiled.rules.len(), 2);
        let first = &compiled.rules[0];
        let second = &compiled.rules[1];
        assert_eq!(first.source_order, 10);
        assert_eq!(
            first.normal.as_ref().and_then(|block| block.get(PropertyId::Color).cloned()),
            Some(StyleValue::Color(ColorRgba::rgb(255, 0, 0)))
        );
        assert_eq!(
            first.important.as_ref().and_then(|block| block.get(PropertyId::Opacity).cloned()),
            Some(StyleValue::Number(0.5))
        );
        assert_eq!(
            second.normal.as_ref().and_then(|block| block.get(PropertyId::ZIndex).cloned()),
            Some(StyleValue::Keyword(CssKeyword::Invalid))
        );
        assert!(second.important.is_none());
        assert_eq!(diagnostics.len(), 1);
        Ok(())
    }

    /// Convertible values come back typed; the rest become `Invalid` and are
    /// reported once each.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn converts_authored_values() -> Result<(), StyleError> {
        let registry = StyleRegistry::standard();
        let diagnostics = Diagnostics::default();
        let opacity = registry.lookup("opacity")?;
        assert_eq!(
            convert_authored(opacity, &StyleValue::text("25%"), &diagnostics),
            StyleValue::Number(0.25)
        );
        assert!(diagnostics.is_empty());
        assert_eq!(
            convert_authored(opacity, &StyleValue::text("cloudy"), &diagnostics),
            StyleValue::Keyword(CssKeyword::Invalid)
        );
        assert_eq!(
            diagnostics.take(),
            vec![StyleDiagnostic::InvalidValue {
                property: PropertyId::Opacity,
                value: StyleValue::text("cloudy"),
            }]
        );
        Ok(())
    }

    /// Unknown names fail the whole sheet without consuming source orders.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn unknown_property_fails() {
        let registry = StyleRegistry::standard();
        let sheet = StyleSheet::new(Origin::Author)
            .with_rule(StyleRule::new(".a").with("margin-inline", 4.0f32));
        let mut next_order = 3;
        let result = compile(
            &sheet,
            &registry,
            SheetId(2),
            0,
            &mut next_order,
            &Diagnostics::default(),
        );
        assert!(matches!(result, Err(StyleError::UnknownProperty(_))));
        assert_eq!(next_order, 3);
    }
}
