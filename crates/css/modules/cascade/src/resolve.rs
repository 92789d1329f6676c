//! Cascade resolution: reads, writes and keyword unwrapping on a [`StyleTree`].
//!
//! Read order for one property on one node:
//! direct override, first declaration block declaring it, the fallback chain,
//! the parent (inheritable properties only), and finally the registry default.

use core::any::type_name;

use css_properties::{PropertyDescriptor, PropertyId};
use css_values::{ColorRgba, CssKeyword, FromStyleValue, ResolveContext, StyleValue};
use indextree::NodeId;
use log::debug;

use crate::diagnostics::StyleDiagnostic;
use crate::resolved::ResolvedStyle;
use crate::tree::{StyleTree, TreeError};

impl StyleTree {
    /// Raw cascaded value of `property` on `node`, with global keywords
    /// unwrapped and computed values left as they are.
    pub fn get_raw(&self, node: NodeId, property: PropertyId) -> Option<StyleValue> {
        let descriptor = self.registry.get(property)?;
        self.cascade(node, descriptor, false, None)
    }

    fn cascade(
        &self,
        node: NodeId,
        descriptor: &PropertyDescriptor,
        from_child: bool,
        active: Option<NodeId>,
    ) -> Option<StyleValue> {
        let Ok(style) = self.style(node) else {
            return descriptor.default.clone();
        };
        if from_child {
            style.raise_inherited_changes();
        }
        let active = active.unwrap_or(node);

        let raw = if let Some(value) = style.own_value(descriptor.id) {
            Some(value.clone())
        } else if let Some(fallback) = style.fallback() {
            return self.cascade(fallback, descriptor, false, Some(active));
        } else if descriptor.inherited {
            style
                .parent()
                .and_then(|parent| self.inherit(parent, descriptor, true))
                .or_else(|| descriptor.default.clone())
        } else {
            descriptor.default.clone()
        };

        self.unwrap_keyword(raw?, descriptor, active)
    }

    /// Value `parent` hands down to its children. Parent-relative values are
    /// resolved against `parent`, which declared them.
    fn inherit(
        &self,
        parent: NodeId,
        descriptor: &PropertyDescriptor,
        from_child: bool,
    ) -> Option<StyleValue> {
        match self.cascade(parent, descriptor, from_child, None)? {
            StyleValue::Computed(computed) if computed.resolves_before_inheritance() => {
                self.compute(parent, descriptor, StyleValue::Computed(computed))
            }
            other => Some(other),
        }
    }

    /// Replace a global keyword by what it stands for on `active`.
    fn unwrap_keyword(
        &self,
        value: StyleValue,
        descriptor: &PropertyDescriptor,
        active: NodeId,
    ) -> Option<StyleValue> {
        let StyleValue::Keyword(keyword) = value else {
            return Some(value);
        };
        match keyword {
            CssKeyword::Auto | CssKeyword::Initial | CssKeyword::Unset => {
                descriptor.default.clone()
            }
            CssKeyword::None => descriptor.none_value.clone(),
            CssKeyword::Inherit => self
                .style(active)
                .ok()
                .and_then(|style| style.parent())
                .and_then(|parent| self.inherit(parent, descriptor, false))
                .or_else(|| descriptor.default.clone()),
            CssKeyword::Invalid => None,
        }
    }

    /// Cascaded value with computed values resolved against `node`.
    fn value(&self, node: NodeId, descriptor: &PropertyDescriptor) -> Option<StyleValue> {
        let raw = self.cascade(node, descriptor, false, None)?;
        self.compute(node, descriptor, raw)
    }

    fn compute(
        &self,
        node: NodeId,
        descriptor: &PropertyDescriptor,
        value: StyleValue,
    ) -> Option<StyleValue> {
        match value {
            StyleValue::Computed(computed) => computed.resolve(&NodeResolveContext {
                tree: self,
                node,
                descriptor,
            }),
            other => Some(other),
        }
    }

    /// Fully resolved untyped value, or `None` when the property has no value.
    pub fn get_value(&self, node: NodeId, property: PropertyId) -> Option<StyleValue> {
        let descriptor = self.registry.get(property)?;
        self.value(node, descriptor)
    }

    /// Typed read. A missing value or a value of another type gives
    /// `T::default()`.
    pub fn get<T: FromStyleValue>(&self, node: NodeId, property: PropertyId) -> T {
        self.typed(node, property, false)
    }

    /// Typed read that runs the property's converter when the stored value
    /// has another type.
    pub fn get_converted<T: FromStyleValue>(&self, node: NodeId, property: PropertyId) -> T {
        self.typed(node, property, true)
    }

    fn typed<T: FromStyleValue>(&self, node: NodeId, property: PropertyId, convert: bool) -> T {
        let Some(descriptor) = self.registry.get(property) else {
            debug!("StyleTree: read of unregistered property {}", property.name());
            return T::default();
        };
        let Some(value) = self.value(node, descriptor) else {
            return T::default();
        };
        if let Some(typed) = T::from_style_value(&value) {
            return typed;
        }

        let value = if convert {
            let converted = descriptor
                .convert(&value)
                .and_then(|converted| self.unwrap_keyword(converted, descriptor, node))
                .and_then(|converted| self.compute(node, descriptor, converted));
            match converted {
                Some(converted) => {
                    if let Some(typed) = T::from_style_value(&converted) {
                        return typed;
                    }
                    converted
                }
                None => value,
            }
        } else {
            value
        };

        if !T::IS_ENUM {
            self.diagnostics.report(StyleDiagnostic::TypeMismatch {
                node,
                property,
                expected: type_name::<T>(),
                found: value,
            });
        }
        T::default()
    }

    /// Read the longhand when it is assigned anywhere on the node or its
    /// fallbacks, otherwise its shorthand.
    pub fn get_or_shorthand<T: FromStyleValue>(&self, node: NodeId, property: PropertyId) -> T {
        let shorthand = self
            .registry
            .get(property)
            .and_then(|descriptor| descriptor.shorthand);
        match shorthand {
            Some(shorthand) if !self.has(node, property) => self.get(node, shorthand),
            _ => self.get(node, property),
        }
    }

    /// Whether `node` or its fallback chain assigns `property`. Inheritance is
    /// not consulted.
    pub fn has(&self, node: NodeId, property: PropertyId) -> bool {
        let Ok(style) = self.style(node) else {
            return false;
        };
        style.has_own(property)
            || style
                .fallback()
                .is_some_and(|fallback| self.has(fallback, property))
    }

    /// Assign (`Some`) or clear (`None`) a direct override. Returns whether
    /// the stored value changed.
    ///
    /// # Errors
    /// Returns `UnknownNode` for a missing node and `Property` for an
    /// unregistered property.
    pub fn set(
        &mut self,
        node: NodeId,
        property: PropertyId,
        value: Option<StyleValue>,
    ) -> Result<bool, TreeError> {
        let inherited = self.registry.descriptor(property)?.inherited;
        let style = self.style_mut(node)?;
        let changed = style.set_override(property, value);
        if changed && inherited {
            style.raise_inherited_changes();
        }
        Ok(changed)
    }

    /// Replace the overrides of `node` with a copy of `source`'s.
    ///
    /// # Errors
    /// Returns `UnknownNode` if either node does not exist.
    pub fn copy_style(&mut self, node: NodeId, source: NodeId) -> Result<(), TreeError> {
        let copied = self.style(source)?.overrides().clone();
        let style = self.style(node)?;
        let touches_inherited = style
            .overrides()
            .keys()
            .chain(copied.keys())
            .filter(|property| style.overrides().get(property) != copied.get(property))
            .any(|property| {
                self.registry
                    .get(*property)
                    .is_some_and(|descriptor| descriptor.inherited)
            });
        let target = self.style_mut(node)?;
        target.replace_overrides(copied);
        if touches_inherited {
            target.raise_inherited_changes();
        }
        Ok(())
    }

    /// Whether `node` must propagate an inheritable change to its subtree.
    pub fn has_inherited_changes(&self, node: NodeId) -> bool {
        self.style(node)
            .is_ok_and(|style| style.has_inherited_changes())
    }

    /// Clear the change flag of `node`.
    pub fn mark_changes_seen(&self, node: NodeId) {
        if let Ok(style) = self.style(node) {
            style.mark_changes_seen();
        }
    }

    /// Resolve every registered property of `node`.
    pub fn resolve_all(&self, node: NodeId) -> ResolvedStyle {
        let values = PropertyId::ALL
            .iter()
            .map(|id| {
                self.registry
                    .get(*id)
                    .and_then(|descriptor| self.value(node, descriptor))
            })
            .collect();
        ResolvedStyle::from_values(values)
    }
}

/// Resolution context of one `(property, node)` pair.
struct NodeResolveContext<'tree> {
    tree: &'tree StyleTree,
    node: NodeId,
    descriptor: &'tree PropertyDescriptor,
}

impl NodeResolveContext<'_> {
    fn parent(&self) -> Option<NodeId> {
        self.tree.style(self.node).ok().and_then(|style| style.parent())
    }
}

impl ResolveContext for NodeResolveContext<'_> {
    fn current_color(&self) -> Option<ColorRgba> {
        let color = if self.descriptor.id == PropertyId::Color {
            self.parent().map_or_else(
                || {
                    self.tree
                        .registry
                        .get(PropertyId::Color)
                        .and_then(PropertyDescriptor::default_value)
                        .cloned()
                },
                |parent| self.tree.get_value(parent, PropertyId::Color),
            )
        } else {
            self.tree.get_value(self.node, PropertyId::Color)
        };
        color.as_ref().and_then(ColorRgba::from_style_value)
    }

    fn parent_value(&self) -> Option<StyleValue> {
        self.parent()
            .and_then(|parent| self.tree.value(parent, self.descriptor))
    }

    fn default_value(&self) -> Option<StyleValue> {
        self.descriptor.default.clone()
    }
}
