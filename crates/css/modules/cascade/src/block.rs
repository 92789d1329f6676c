use std::collections::HashMap;
use std::sync::Arc;

use css_properties::PropertyId;
use css_values::StyleValue;
use smallvec::SmallVec;

use crate::priority::{CascadePriority, compare_priority};

/// Declarations contributed by one matched rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationBlock {
    declarations: HashMap<PropertyId, StyleValue>,
}

/// Blocks are shared by every node the rule matches.
pub type SharedBlock = Arc<DeclarationBlock>;

/// A node's blocks, highest priority first.
pub type BlockList = SmallVec<SharedBlock, 4>;

impl DeclarationBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, property: PropertyId, value: impl Into<StyleValue>) -> Self {
        self.insert(property, value.into());
        self
    }

    /// Insert a declaration; a later declaration of the same property replaces
    /// the earlier one.
    pub fn insert(&mut self, property: PropertyId, value: StyleValue) -> Option<StyleValue> {
        self.declarations.insert(property, value)
    }

    #[inline]
    pub fn get(&self, property: PropertyId) -> Option<&StyleValue> {
        self.declarations.get(&property)
    }

    #[inline]
    pub fn contains(&self, property: PropertyId) -> bool {
        self.declarations.contains_key(&property)
    }

    pub fn properties(&self) -> impl Iterator<Item = PropertyId> + '_ {
        self.declarations.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn into_shared(self) -> SharedBlock {
        Arc::new(self)
    }
}

/// A block that matched a node, with the priority of the rule it came from.
#[derive(Debug, Clone)]
pub struct MatchedBlock {
    pub priority: CascadePriority,
    pub block: SharedBlock,
}

/// Sort matched blocks so the winning block comes first. Ties keep their
/// relative order.
pub fn order_blocks(mut matched: Vec<MatchedBlock>) -> BlockList {
    matched.sort_by(|left, right| compare_priority(&right.priority, &left.priority));
    matched.into_iter().map(|entry| entry.block).collect()
}

/// Whether two block lists hold the same blocks in the same order.
pub fn same_blocks(left: &[SharedBlock], right: &[SharedBlock]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(lhs, rhs)| Arc::ptr_eq(lhs, rhs))
}
