#![cfg(test)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Result;
use style_engine::{
    ColorRgba, NodeId, Origin, PropertyId, Specificity, StyleConfig, StyleContext, StyleRegistry,
    StyleRule, StyleSheet, StyleValue,
};

type Tags = Rc<RefCell<HashMap<NodeId, Vec<&'static str>>>>;

/// Matches `.name` (class) and `#name` (id) selectors against per-node tags.
fn context() -> (StyleContext, Tags) {
    let _ = env_logger::builder().is_test(true).try_init();
    let tags: Tags = Rc::default();
    let lookup = Rc::clone(&tags);
    let matcher = move |node: NodeId, selector: &str| -> Option<Specificity> {
        let table = lookup.borrow();
        let matched = table
            .get(&node)
            .is_some_and(|list| list.iter().any(|tag| *tag == selector));
        if !matched {
            return None;
        }
        Some(if selector.starts_with('#') {
            Specificity(1, 0, 0)
        } else {
            Specificity(0, 1, 0)
        })
    };
    let context = StyleContext::with_registry(
        StyleConfig::default(),
        Arc::new(StyleRegistry::standard()),
        matcher,
    );
    (context, tags)
}

fn tag(tags: &Tags, node: NodeId, selectors: &[&'static str]) {
    tags.borrow_mut().insert(node, selectors.to_vec());
}

fn opacity(context: &StyleContext, node: NodeId) -> f32 {
    context.get::<f32>(node, PropertyId::Opacity)
}

/// Higher specificity wins, then later source order.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn specificity_then_source_order() -> Result<()> {
    let (mut context, tags) = context();
    let node = context.create_node(None)?;
    tag(&tags, node, &[".card", "#main"]);

    context.insert_style(
        &StyleSheet::new(Origin::Author)
            .with_rule(StyleRule::new("#main").with("opacity", 0.3f32))
            .with_rule(StyleRule::new(".card").with("opacity", 0.6f32))
            .with_rule(StyleRule::new(".card").with("z-index", 2i32))
            .with_rule(StyleRule::new(".card").with("z-index", 5i32)),
    )?;
    context.resolve_style()?;

    assert!((opacity(&context, node) - 0.3).abs() < f32::EPSILON);
    assert_eq!(context.get::<i32>(node, PropertyId::ZIndex), 5);
    Ok(())
}

/// `!important` declarations outrank more specific normal ones.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn important_declarations_win() -> Result<()> {
    let (mut context, tags) = context();
    let node = context.create_node(None)?;
    tag(&tags, node, &[".card", "#main"]);

    context.insert_style(
        &StyleSheet::new(Origin::Author)
            .with_rule(StyleRule::new(".card").with_important("opacity", 0.9f32))
            .with_rule(StyleRule::new("#main").with("opacity", 0.1f32)),
    )?;
    context.resolve_style()?;
    assert!((opacity(&context, node) - 0.9).abs() < f32::EPSILON);

    context.set_style(node, "opacity", 0.5f32)?;
    context.resolve_style()?;
    assert!((opacity(&context, node) - 0.5).abs() < f32::EPSILON);
    Ok(())
}

/// A sheet inserted with a higher offset beats later, more specific sheets;
/// removing it restores the remaining cascade.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn importance_offset_and_removal() -> Result<()> {
    let (mut context, tags) = context();
    let node = context.create_node(None)?;
    tag(&tags, node, &[".card", "#main"]);

    let boosted = context.insert_style_with_offset(
        &StyleSheet::new(Origin::Author)
            .with_rule(StyleRule::new(".card").with("background-color", "green")),
        1,
    )?;
    context.insert_style(
        &StyleSheet::new(Origin::Author)
            .with_rule(StyleRule::new("#main").with("background-color", "red")),
    )?;
    context.resolve_style()?;
    assert_eq!(
        context.get::<ColorRgba>(node, PropertyId::BackgroundColor),
        ColorRgba::rgb(0, 128, 0)
    );

    assert!(context.remove_style(boosted));
    assert!(!context.remove_style(boosted));
    assert_eq!(context.sheet_count(), 1);
    context.resolve_style()?;
    assert_eq!(
        context.get::<ColorRgba>(node, PropertyId::BackgroundColor),
        ColorRgba::rgb(255, 0, 0)
    );
    Ok(())
}

/// Unknown property names reject the whole sheet.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn unknown_property_rejects_sheet() -> Result<()> {
    let (mut context, _tags) = context();
    let result = context.insert_style(
        &StyleSheet::new(Origin::Author)
            .with_rule(StyleRule::new(".card").with("opacity", 0.5f32))
            .with_rule(StyleRule::new(".card").with("margin-block", 2.0f32)),
    );
    assert!(result.is_err_and(|err| format!("{err:#}").contains("margin-block")));
    assert_eq!(context.sheet_count(), 0);
    let node = context.create_node(None)?;
    let rejected = context.set_style(node, "gap", 1.0f32);
    assert!(rejected.is_err_and(|err| err.to_string().contains("gap")));
    Ok(())
}

/// Authored text is converted on assignment; garbage becomes invalid and
/// leaves a diagnostic.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn set_style_converts_text() -> Result<()> {
    let (mut context, _tags) = context();
    let node = context.create_node(None)?;
    context.set_style(node, "backgroundColor", "#0000ff")?;
    assert_eq!(
        context.get::<ColorRgba>(node, PropertyId::BackgroundColor),
        ColorRgba::rgb(0, 0, 255)
    );

    context.set_style(node, "opacity", "cloudy")?;
    assert_eq!(context.get_raw(node, PropertyId::Opacity), None);
    assert!(context.has(node, PropertyId::Opacity));
    assert_eq!(context.take_diagnostics().len(), 1);

    assert!(context.clear_style(node, "opacity")?);
    assert_eq!(context.get_raw(node, PropertyId::Opacity), Some(StyleValue::Number(1.0)));
    Ok(())
}
