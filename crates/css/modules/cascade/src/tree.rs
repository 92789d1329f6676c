use core::fmt;
use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;

use css_properties::{StyleError, StyleRegistry};
use indextree::{Arena, Node, NodeError, NodeId};
use log::{debug, trace};
use smallvec::SmallVec;

use crate::block::{BlockList, same_blocks};
use crate::diagnostics::Diagnostics;
use crate::node_style::NodeStyle;

/// Errors raised by structural operations on a [`StyleTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The handle was never created here, or its node was removed.
    UnknownNode(NodeId),
    /// The requested wiring would break the tree (cycles, pseudo children).
    InvalidTree(String),
    /// A property identity without a registered descriptor.
    Property(StyleError),
}

impl fmt::Display for TreeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(node) => write!(formatter, "unknown style node {node:?}"),
            Self::InvalidTree(reason) => write!(formatter, "invalid style tree: {reason}"),
            Self::Property(err) => write!(formatter, "{err}"),
        }
    }
}

impl Error for TreeError {}

impl From<StyleError> for TreeError {
    #[inline]
    fn from(err: StyleError) -> Self {
        Self::Property(err)
    }
}

impl From<NodeError> for TreeError {
    #[inline]
    fn from(err: NodeError) -> Self {
        Self::InvalidTree(err.to_string())
    }
}

pub type PseudoList = SmallVec<NodeId, 2>;

/// Arena of node styles wired into a parent/child tree.
///
/// Pseudo-element styles live in the same arena but are not children of
/// anything: they hang off their base node and share its parent.
#[derive(Debug)]
pub struct StyleTree {
    pub(crate) registry: Arc<StyleRegistry>,
    arena: Arena<NodeStyle>,
    /// Parentless regular nodes, in creation order.
    roots: Vec<NodeId>,
    /// Base node to its pseudo-element styles.
    pseudos: HashMap<NodeId, PseudoList>,
    pub(crate) diagnostics: Diagnostics,
}

impl StyleTree {
    pub fn new(registry: Arc<StyleRegistry>) -> Self {
        Self::with_diagnostics(registry, Diagnostics::default())
    }

    pub fn with_diagnostics(registry: Arc<StyleRegistry>, diagnostics: Diagnostics) -> Self {
        Self {
            registry,
            arena: Arena::new(),
            roots: Vec::new(),
            pseudos: HashMap::new(),
            diagnostics,
        }
    }

    pub fn registry(&self) -> &Arc<StyleRegistry> {
        &self.registry
    }

    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Create a parentless node.
    pub fn create_node(&mut self) -> NodeId {
        let node = self.arena.new_node(NodeStyle::new(None));
        self.roots.push(node);
        trace!("StyleTree: created {node:?}");
        node
    }

    /// Create a pseudo-element style that falls back to `base` and inherits
    /// from `base`'s parent.
    ///
    /// # Errors
    /// Returns `UnknownNode` if `base` does not exist.
    pub fn create_pseudo(&mut self, base: NodeId) -> Result<NodeId, TreeError> {
        let parent = self.style(base)?.parent();
        let pseudo = self.arena.new_node(NodeStyle::new(Some(base)));
        self.style_mut(pseudo)?.set_parent(parent);
        self.pseudos.entry(base).or_default().push(pseudo);
        trace!("StyleTree: created pseudo {pseudo:?} of {base:?}");
        Ok(pseudo)
    }

    /// Make `node` the last child of `parent`, detaching it first if needed.
    ///
    /// # Errors
    /// Returns `UnknownNode` for missing nodes and `InvalidTree` when the
    /// append would create a cycle or either node is a pseudo-element.
    pub fn attach(&mut self, node: NodeId, parent: NodeId) -> Result<(), TreeError> {
        if self.is_pseudo(node)? || self.is_pseudo(parent)? {
            return Err(TreeError::InvalidTree(format!(
                "pseudo-element styles cannot take part in the tree ({node:?} under {parent:?})"
            )));
        }
        if parent.ancestors(&self.arena).any(|ancestor| ancestor == node) {
            return Err(TreeError::InvalidTree(format!(
                "{node:?} is an ancestor of {parent:?}"
            )));
        }
        node.detach(&mut self.arena);
        parent.checked_append(node, &mut self.arena)?;
        self.roots.retain(|root| *root != node);
        self.update_parent(node, Some(parent))?;
        debug!("StyleTree: attached {node:?} under {parent:?}");
        Ok(())
    }

    /// Detach `node` from its parent, making it a root.
    ///
    /// # Errors
    /// Returns `UnknownNode` for a missing node, `InvalidTree` for a pseudo.
    pub fn detach(&mut self, node: NodeId) -> Result<(), TreeError> {
        if self.is_pseudo(node)? {
            return Err(TreeError::InvalidTree(format!(
                "pseudo-element style {node:?} has no tree position"
            )));
        }
        if self.parent(node)?.is_none() {
            return Ok(());
        }
        node.detach(&mut self.arena);
        self.roots.push(node);
        self.update_parent(node, None)
    }

    /// Remove `node`, its descendants and all their pseudo-element styles.
    /// Returns every removed handle.
    ///
    /// # Errors
    /// Returns `UnknownNode` if `node` does not exist.
    pub fn remove(&mut self, node: NodeId) -> Result<Vec<NodeId>, TreeError> {
        let fallback = self.style(node)?.fallback();
        let removed = self.top_down_from(node);

        if let Some(base) = fallback {
            if let Some(list) = self.pseudos.get_mut(&base) {
                list.retain(|pseudo| *pseudo != node);
            }
        }
        for id in &removed {
            self.pseudos.remove(id);
        }
        self.roots.retain(|root| !removed.contains(root));

        let pseudos: Vec<NodeId> = removed
            .iter()
            .copied()
            .filter(|id| self.style(*id).is_ok_and(|style| style.fallback().is_some()))
            .collect();
        for pseudo in pseudos {
            pseudo.remove(&mut self.arena);
        }
        if !node.is_removed(&self.arena) {
            node.remove_subtree(&mut self.arena);
        }
        debug!("StyleTree: removed {} styles under {node:?}", removed.len());
        Ok(removed)
    }

    /// Rebind the parent of `node` and of its whole fallback chain, then of
    /// its pseudo-element styles.
    ///
    /// # Errors
    /// Returns `UnknownNode` if `node` or a fallback does not exist.
    pub fn update_parent(&mut self, node: NodeId, parent: Option<NodeId>) -> Result<(), TreeError> {
        let mut current = Some(node);
        while let Some(id) = current {
            let style = self.style_mut(id)?;
            style.set_parent(parent);
            current = style.fallback();
        }
        let pseudos = self.pseudos.get(&node).cloned().unwrap_or_default();
        for pseudo in pseudos {
            self.update_parent(pseudo, parent)?;
        }
        Ok(())
    }

    /// Replace the matched declaration blocks of `node`. Returns whether the
    /// list changed; a change touching an inheritable property raises the
    /// node's change flag.
    ///
    /// # Errors
    /// Returns `UnknownNode` if `node` does not exist.
    pub fn set_declaration_blocks(
        &mut self,
        node: NodeId,
        blocks: BlockList,
    ) -> Result<bool, TreeError> {
        let registry = Arc::clone(&self.registry);
        let style = self.style_mut(node)?;
        if same_blocks(style.declaration_blocks(), &blocks) {
            return Ok(false);
        }
        let previous = style.replace_blocks(blocks);
        let touches_inherited = previous
            .iter()
            .chain(style.declaration_blocks())
            .flat_map(|block| block.properties())
            .any(|property| registry.get(property).is_some_and(|desc| desc.inherited));
        if touches_inherited {
            style.raise_inherited_changes();
        }
        Ok(true)
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.arena
            .get(node)
            .is_some_and(|entry| !entry.is_removed())
    }

    /// # Errors
    /// Returns `UnknownNode` if `node` does not exist.
    pub fn style(&self, node: NodeId) -> Result<&NodeStyle, TreeError> {
        self.arena
            .get(node)
            .filter(|entry| !entry.is_removed())
            .map(Node::get)
            .ok_or(TreeError::UnknownNode(node))
    }

    /// # Errors
    /// Returns `UnknownNode` if `node` does not exist.
    pub fn style_mut(&mut self, node: NodeId) -> Result<&mut NodeStyle, TreeError> {
        self.arena
            .get_mut(node)
            .filter(|entry| !entry.is_removed())
            .map(Node::get_mut)
            .ok_or(TreeError::UnknownNode(node))
    }

    /// Inheritance parent of `node` (for a pseudo, its base's parent).
    ///
    /// # Errors
    /// Returns `UnknownNode` if `node` does not exist.
    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>, TreeError> {
        Ok(self.style(node)?.parent())
    }

    /// # Errors
    /// Returns `UnknownNode` if `node` does not exist.
    pub fn is_pseudo(&self, node: NodeId) -> Result<bool, TreeError> {
        Ok(self.style(node)?.fallback().is_some())
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        if !self.contains(node) {
            return Vec::new();
        }
        node.children(&self.arena).collect()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn pseudos(&self, node: NodeId) -> &[NodeId] {
        self.pseudos.get(&node).map_or(&[], |list| list.as_slice())
    }

    /// Live styles, regular and pseudo.
    pub fn len(&self) -> usize {
        self.arena.iter().filter(|entry| !entry.is_removed()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every live style, parents before children and each pseudo-element
    /// right after its base.
    pub fn top_down(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.arena.count());
        for root in &self.roots {
            order.extend(self.top_down_from(*root));
        }
        order
    }

    /// `node` and everything below it in [`Self::top_down`] order.
    pub fn top_down_from(&self, node: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        if !self.contains(node) {
            return order;
        }
        for id in node.descendants(&self.arena) {
            self.push_with_pseudos(id, &mut order);
        }
        order
    }

    fn push_with_pseudos(&self, node: NodeId, order: &mut Vec<NodeId>) {
        order.push(node);
        for pseudo in self.pseudos(node) {
            self.push_with_pseudos(*pseudo, order);
        }
    }
}
