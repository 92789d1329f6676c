#![cfg(test)]

use std::sync::Arc;

use css_cascade::{DeclarationBlock, StyleDiagnostic, StyleTree, TreeError};
use css_properties::{PropertyId, StyleError, StyleRegistry};
use css_values::{ColorRgba, ComputedValue, CssKeyword, Display, Length, StyleValue};
use smallvec::smallvec;

fn tree() -> StyleTree {
    let _ = env_logger::builder().is_test(true).try_init();
    StyleTree::new(Arc::new(StyleRegistry::standard()))
}

fn red() -> ColorRgba {
    ColorRgba::rgb(255, 0, 0)
}

/// A bare node resolves every property to its registry default.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn unassigned_properties_use_defaults() {
    let mut tree = tree();
    let node = tree.create_node();
    let registry = Arc::clone(tree.registry());
    for descriptor in registry.iter() {
        assert_eq!(
            tree.get_raw(node, descriptor.id),
            descriptor.default,
            "default of {}",
            descriptor.name
        );
    }
}

/// Children inherit inheritable properties until they override them.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn inheritance_then_override() -> Result<(), TreeError> {
    let mut tree = tree();
    let parent = tree.create_node();
    let child = tree.create_node();
    tree.attach(child, parent)?;

    tree.set(parent, PropertyId::Color, Some(red().into()))?;
    assert_eq!(tree.get::<ColorRgba>(child, PropertyId::Color), red());

    tree.set(child, PropertyId::Color, Some(ColorRgba::WHITE.into()))?;
    assert_eq!(tree.get::<ColorRgba>(child, PropertyId::Color), ColorRgba::WHITE);
    tree.set(parent, PropertyId::Color, Some(ColorRgba::BLACK.into()))?;
    assert_eq!(tree.get::<ColorRgba>(child, PropertyId::Color), ColorRgba::WHITE);
    Ok(())
}

/// Non-inheritable properties never come from the parent.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn non_inherited_properties_stay_local() -> Result<(), TreeError> {
    let mut tree = tree();
    let parent = tree.create_node();
    let child = tree.create_node();
    tree.attach(child, parent)?;
    tree.set(parent, PropertyId::Opacity, Some(StyleValue::Number(0.2)))?;
    assert!((tree.get::<f32>(child, PropertyId::Opacity) - 1.0).abs() < f32::EPSILON);
    Ok(())
}

/// A direct override beats every matched block.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn override_beats_declaration_blocks() -> Result<(), TreeError> {
    let mut tree = tree();
    let node = tree.create_node();
    let block = DeclarationBlock::new()
        .with(PropertyId::ZIndex, 4i32)
        .with(PropertyId::Opacity, 0.4f32)
        .into_shared();
    tree.set_declaration_blocks(node, smallvec![block])?;
    assert_eq!(tree.get_raw(node, PropertyId::ZIndex), Some(StyleValue::Integer(4)));

    tree.set(node, PropertyId::ZIndex, Some(StyleValue::Integer(9)))?;
    assert_eq!(tree.get_raw(node, PropertyId::ZIndex), Some(StyleValue::Integer(9)));
    assert_eq!(tree.get_raw(node, PropertyId::Opacity), Some(StyleValue::Number(0.4)));
    Ok(())
}

/// `initial`, `auto` and `unset` read exactly like an unassigned property.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn reset_keywords_match_unassigned() -> Result<(), TreeError> {
    let mut tree = tree();
    let parent = tree.create_node();
    let child = tree.create_node();
    let bare = tree.create_node();
    tree.attach(child, parent)?;
    tree.attach(bare, parent)?;
    tree.set(parent, PropertyId::Color, Some(red().into()))?;

    for keyword in [CssKeyword::Initial, CssKeyword::Auto, CssKeyword::Unset] {
        for property in [PropertyId::Opacity, PropertyId::Width, PropertyId::Display] {
            tree.set(child, property, Some(keyword.into()))?;
            assert_eq!(
                tree.get_raw(child, property),
                tree.get_raw(bare, property),
                "{keyword:?} on {}",
                property.name()
            );
        }
    }
    Ok(())
}

/// `inherit` copies the parent even for non-inheritable properties.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn inherit_keyword_reads_parent() -> Result<(), TreeError> {
    let mut tree = tree();
    let parent = tree.create_node();
    let child = tree.create_node();
    tree.attach(child, parent)?;
    tree.set(parent, PropertyId::Opacity, Some(StyleValue::Number(0.3)))?;
    tree.set(child, PropertyId::Opacity, Some(CssKeyword::Inherit.into()))?;
    assert_eq!(
        tree.get_raw(child, PropertyId::Opacity),
        tree.get_raw(parent, PropertyId::Opacity)
    );

    let orphan = tree.create_node();
    tree.set(orphan, PropertyId::Opacity, Some(CssKeyword::Inherit.into()))?;
    assert_eq!(tree.get_raw(orphan, PropertyId::Opacity), Some(StyleValue::Number(1.0)));
    Ok(())
}

/// `none` gives the property's none value; `invalid` gives no value.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn none_and_invalid_keywords() -> Result<(), TreeError> {
    let mut tree = tree();
    let node = tree.create_node();
    tree.set(node, PropertyId::Display, Some(CssKeyword::None.into()))?;
    assert_eq!(tree.get::<Display>(node, PropertyId::Display), Display::None);

    tree.set(node, PropertyId::Opacity, Some(CssKeyword::Invalid.into()))?;
    assert_eq!(tree.get_raw(node, PropertyId::Opacity), None);
    assert!(tree.get::<f32>(node, PropertyId::Opacity).abs() < f32::EPSILON);
    assert!(tree.has(node, PropertyId::Opacity));
    Ok(())
}

/// `has` tracks assignment only.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn has_follows_assignment() -> Result<(), TreeError> {
    let mut tree = tree();
    let parent = tree.create_node();
    let child = tree.create_node();
    tree.attach(child, parent)?;
    tree.set(parent, PropertyId::Color, Some(red().into()))?;
    assert!(!tree.has(child, PropertyId::Color));

    tree.set(child, PropertyId::Color, Some(red().into()))?;
    assert!(tree.has(child, PropertyId::Color));
    tree.set(child, PropertyId::Color, None)?;
    assert!(!tree.has(child, PropertyId::Color));
    Ok(())
}

/// Root and child opacity/color scenario.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn opacity_and_color_scenario() -> Result<(), TreeError> {
    let mut tree = tree();
    let root = tree.create_node();
    assert!((tree.get::<f32>(root, PropertyId::Opacity) - 1.0).abs() < f32::EPSILON);
    assert_eq!(tree.get::<ColorRgba>(root, PropertyId::Color), ColorRgba::BLACK);

    let child = tree.create_node();
    tree.attach(child, root)?;
    tree.set(root, PropertyId::Color, Some(red().into()))?;
    assert_eq!(tree.get::<ColorRgba>(child, PropertyId::Color), red());

    tree.set(child, PropertyId::Opacity, Some(StyleValue::Number(0.5)))?;
    assert!((tree.get::<f32>(child, PropertyId::Opacity) - 0.5).abs() < f32::EPSILON);
    assert!((tree.get::<f32>(root, PropertyId::Opacity) - 1.0).abs() < f32::EPSILON);
    Ok(())
}

/// `currentColor` defaults follow the node's resolved color.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn current_color_defaults() -> Result<(), TreeError> {
    let mut tree = tree();
    let root = tree.create_node();
    let child = tree.create_node();
    tree.attach(child, root)?;
    assert_eq!(tree.get::<ColorRgba>(child, PropertyId::Fill), ColorRgba::BLACK);

    tree.set(root, PropertyId::Color, Some(red().into()))?;
    assert_eq!(tree.get::<ColorRgba>(child, PropertyId::Fill), red());
    assert_eq!(tree.get::<ColorRgba>(child, PropertyId::BorderColor), red());

    tree.set(
        child,
        PropertyId::Color,
        Some(StyleValue::Computed(ComputedValue::CurrentColor)),
    )?;
    assert_eq!(tree.get::<ColorRgba>(child, PropertyId::Color), red());
    Ok(())
}

/// Relative font sizes scale the parent's resolved size.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn relative_font_size() -> Result<(), TreeError> {
    let mut tree = tree();
    let root = tree.create_node();
    let child = tree.create_node();
    tree.attach(child, root)?;
    tree.set(root, PropertyId::FontSize, Some(StyleValue::Number(20.0)))?;
    tree.set(
        child,
        PropertyId::FontSize,
        Some(StyleValue::Computed(ComputedValue::ParentScaled(1.5))),
    )?;
    assert!((tree.get::<f32>(child, PropertyId::FontSize) - 30.0).abs() < f32::EPSILON);

    tree.set(
        root,
        PropertyId::FontSize,
        Some(StyleValue::Computed(ComputedValue::ParentScaled(2.0))),
    )?;
    assert!((tree.get::<f32>(root, PropertyId::FontSize) - 32.0).abs() < f32::EPSILON);
    Ok(())
}

/// Descendants below a relative font size inherit the resolved size, whether
/// they declare nothing or `inherit`; a nested relative size scales it once.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn relative_font_size_inherits_resolved() -> Result<(), TreeError> {
    let mut tree = tree();
    let root = tree.create_node();
    let scaled = tree.create_node();
    let child = tree.create_node();
    let grandchild = tree.create_node();
    let inheriting = tree.create_node();
    let halved = tree.create_node();
    tree.attach(scaled, root)?;
    tree.attach(child, scaled)?;
    tree.attach(grandchild, child)?;
    tree.attach(inheriting, scaled)?;
    tree.attach(halved, child)?;
    tree.set(
        scaled,
        PropertyId::FontSize,
        Some(StyleValue::Computed(ComputedValue::ParentScaled(2.0))),
    )?;
    tree.set(
        inheriting,
        PropertyId::FontSize,
        Some(StyleValue::Keyword(CssKeyword::Inherit)),
    )?;
    tree.set(
        halved,
        PropertyId::FontSize,
        Some(StyleValue::Computed(ComputedValue::ParentScaled(0.5))),
    )?;

    let size = |node| tree.get::<f32>(node, PropertyId::FontSize);
    assert!((size(root) - 16.0).abs() < f32::EPSILON);
    assert!((size(scaled) - 32.0).abs() < f32::EPSILON);
    assert!((size(child) - 32.0).abs() < f32::EPSILON);
    assert!((size(grandchild) - 32.0).abs() < f32::EPSILON);
    assert!((size(inheriting) - 32.0).abs() < f32::EPSILON);
    assert!((size(halved) - 16.0).abs() < f32::EPSILON);
    assert_eq!(
        tree.get_raw(grandchild, PropertyId::FontSize),
        Some(StyleValue::Number(32.0))
    );
    Ok(())
}

/// `currentColor` is inherited as written and resolves against each node.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn current_color_inherits_symbolically() -> Result<(), TreeError> {
    let mut tree = tree();
    let root = tree.create_node();
    let child = tree.create_node();
    tree.attach(child, root)?;
    tree.set(root, PropertyId::Fill, Some(StyleValue::Computed(ComputedValue::CurrentColor)))?;
    tree.set(child, PropertyId::Color, Some(red().into()))?;
    assert_eq!(tree.get::<ColorRgba>(child, PropertyId::Fill), red());
    Ok(())
}

/// Corner radii fall back to `border-radius` until assigned themselves.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn shorthand_fallback() -> Result<(), TreeError> {
    let mut tree = tree();
    let node = tree.create_node();
    tree.set(node, PropertyId::BorderRadius, Some(StyleValue::Number(6.0)))?;
    let corner: f32 = tree.get_or_shorthand(node, PropertyId::BorderTopLeftRadius);
    assert!((corner - 6.0).abs() < f32::EPSILON);

    tree.set(node, PropertyId::BorderTopLeftRadius, Some(StyleValue::Number(2.0)))?;
    let corner: f32 = tree.get_or_shorthand(node, PropertyId::BorderTopLeftRadius);
    assert!((corner - 2.0).abs() < f32::EPSILON);
    Ok(())
}

/// Mismatched reads return the default and leave a diagnostic; converted
/// reads coerce first.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn type_mismatch_is_reported() -> Result<(), TreeError> {
    let mut tree = tree();
    let node = tree.create_node();
    tree.set(node, PropertyId::Width, Some(StyleValue::text("40px")))?;

    assert_eq!(tree.get::<Length>(node, PropertyId::Width), Length::Auto);
    let diagnostics = tree.diagnostics().take();
    assert!(matches!(
        diagnostics.as_slice(),
        [StyleDiagnostic::TypeMismatch { property: PropertyId::Width, .. }]
    ));

    assert_eq!(
        tree.get_converted::<Length>(node, PropertyId::Width),
        Length::Px(40.0)
    );
    assert!(tree.diagnostics().is_empty());

    tree.set(node, PropertyId::Display, Some(StyleValue::Number(3.0)))?;
    assert_eq!(tree.get::<Display>(node, PropertyId::Display), Display::Flex);
    assert!(tree.diagnostics().is_empty());
    Ok(())
}

/// Writes to unregistered properties fail at the registry boundary.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn unregistered_property_write_fails() {
    let mut tree = StyleTree::new(Arc::new(StyleRegistry::new()));
    let node = tree.create_node();
    let result = tree.set(node, PropertyId::Opacity, Some(StyleValue::Number(0.5)));
    assert_eq!(
        result,
        Err(TreeError::Property(StyleError::UnknownProperty("opacity".to_owned())))
    );
    assert_eq!(tree.get_raw(node, PropertyId::Opacity), None);
}
