use core::cell::Cell;
use core::mem;
use std::collections::HashMap;

use css_properties::PropertyId;
use css_values::StyleValue;
use indextree::NodeId;

use crate::block::{BlockList, SharedBlock};

/// Style state of one UI node or pseudo-element.
///
/// Parent and fallback are arena handles and never own the referenced style.
#[derive(Debug, Default)]
pub struct NodeStyle {
    /// Directly assigned values. A missing key means "not set here".
    overrides: HashMap<PropertyId, StyleValue>,
    /// Matched declaration blocks, highest priority first.
    blocks: BlockList,
    /// Style consulted before inheritance (pseudo-elements).
    fallback: Option<NodeId>,
    /// Inheritance source.
    parent: Option<NodeId>,
    /// Raised on the read path too, hence the `Cell`.
    has_inherited_changes: Cell<bool>,
}

impl NodeStyle {
    pub fn new(fallback: Option<NodeId>) -> Self {
        Self {
            fallback,
            ..Self::default()
        }
    }

    #[inline]
    pub const fn fallback(&self) -> Option<NodeId> {
        self.fallback
    }

    #[inline]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub fn overrides(&self) -> &HashMap<PropertyId, StyleValue> {
        &self.overrides
    }

    pub fn declaration_blocks(&self) -> &[SharedBlock] {
        &self.blocks
    }

    pub(crate) fn replace_blocks(&mut self, blocks: BlockList) -> BlockList {
        mem::replace(&mut self.blocks, blocks)
    }

    /// The override, else the first block declaring the property.
    pub fn own_value(&self, property: PropertyId) -> Option<&StyleValue> {
        self.overrides
            .get(&property)
            .or_else(|| self.blocks.iter().find_map(|block| block.get(property)))
    }

    pub fn has_own(&self, property: PropertyId) -> bool {
        self.overrides.contains_key(&property)
            || self.blocks.iter().any(|block| block.contains(property))
    }

    /// Store or remove an override. Returns whether the stored value changed.
    pub(crate) fn set_override(&mut self, property: PropertyId, value: Option<StyleValue>) -> bool {
        let current = self.overrides.get(&property);
        if current.is_none() && value.is_none() {
            return false;
        }
        let changed = current != value.as_ref();
        match value {
            Some(value) => {
                self.overrides.insert(property, value);
            }
            None => {
                self.overrides.remove(&property);
            }
        }
        changed
    }

    pub(crate) fn replace_overrides(&mut self, overrides: HashMap<PropertyId, StyleValue>) {
        self.overrides = overrides;
    }

    #[inline]
    pub fn has_inherited_changes(&self) -> bool {
        self.has_inherited_changes.get()
    }

    #[inline]
    pub(crate) fn raise_inherited_changes(&self) {
        self.has_inherited_changes.set(true);
    }

    #[inline]
    pub(crate) fn mark_changes_seen(&self) {
        self.has_inherited_changes.set(false);
    }
}
