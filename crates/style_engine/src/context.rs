use core::mem;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::{Context as _, Result, anyhow};
use css_cascade::{
    BlockList, CascadePriority, Diagnostics, MatchedBlock, NodeId, ResolvedStyle, StyleDiagnostic,
    StyleTree, order_blocks,
};
use css_properties::{PropertyId, StyleRegistry};
use css_values::{FromStyleValue, StyleValue};
use log::{debug, info, trace};
use tracing::info_span;

use crate::config::StyleConfig;
use crate::matcher::RuleMatcher;
use crate::sheet::{CompiledSheet, SheetId, StyleSheet, compile, convert_authored};

pub type ComputedMap = HashMap<NodeId, ResolvedStyle>;

/// Owns the style tree and the active stylesheets, hands every node its
/// ordered declaration blocks and keeps resolved snapshots up to date.
pub struct StyleContext {
    config: StyleConfig,
    tree: StyleTree,
    sheets: Vec<CompiledSheet>,
    next_sheet: u64,
    /// Source order of the next inserted rule, across all sheets.
    next_order: u32,
    matcher: Box<dyn RuleMatcher>,
    /// Set when the sheet list changed; every node is rematched.
    rules_dirty: bool,
    /// Nodes to rematch and re-resolve at the next pass.
    pending: HashSet<NodeId>,
    computed: ComputedMap,
    /// Nodes whose snapshots changed in the last pass; drained by `take_changed_nodes`.
    changed_nodes: HashSet<NodeId>,
    last_resolved_count: u64,
    total_resolved_count: u64,
}

impl StyleContext {
    /// A context over the process-wide registry, configured from the environment.
    pub fn new(matcher: impl RuleMatcher + 'static) -> Self {
        Self::with_registry(StyleConfig::from_env(), StyleRegistry::shared(), matcher)
    }

    pub fn with_registry(
        config: StyleConfig,
        registry: Arc<StyleRegistry>,
        matcher: impl RuleMatcher + 'static,
    ) -> Self {
        let diagnostics = Diagnostics::new(config.report_type_mismatch, config.max_diagnostics);
        Self {
            config,
            tree: StyleTree::with_diagnostics(registry, diagnostics),
            sheets: Vec::new(),
            next_sheet: 0,
            next_order: 0,
            matcher: Box::new(matcher),
            rules_dirty: false,
            pending: HashSet::new(),
            computed: HashMap::new(),
            changed_nodes: HashSet::new(),
            last_resolved_count: 0,
            total_resolved_count: 0,
        }
    }

    pub const fn config(&self) -> &StyleConfig {
        &self.config
    }

    pub const fn tree(&self) -> &StyleTree {
        &self.tree
    }

    pub fn registry(&self) -> &Arc<StyleRegistry> {
        self.tree.registry()
    }

    /// Create a node, optionally as the last child of `parent`.
    ///
    /// # Errors
    /// Returns an error if `parent` does not exist.
    pub fn create_node(&mut self, parent: Option<NodeId>) -> Result<NodeId> {
        let node = self.tree.create_node();
        if let Some(parent) = parent {
            self.tree
                .attach(node, parent)
                .with_context(|| format!("attaching new node under {parent:?}"))?;
        }
        self.pending.insert(node);
        Ok(node)
    }

    /// Create a pseudo-element style falling back to `base`.
    ///
    /// # Errors
    /// Returns an error if `base` does not exist.
    pub fn create_pseudo(&mut self, base: NodeId) -> Result<NodeId> {
        let pseudo = self
            .tree
            .create_pseudo(base)
            .with_context(|| format!("creating pseudo-element of {base:?}"))?;
        self.pending.insert(pseudo);
        Ok(pseudo)
    }

    /// Move `node` under `parent`, or make it a root with `None`.
    ///
    /// # Errors
    /// Returns an error for unknown nodes or when the move would form a cycle.
    pub fn reparent(&mut self, node: NodeId, parent: Option<NodeId>) -> Result<()> {
        let moved = match parent {
            Some(parent) => self.tree.attach(node, parent),
            None => self.tree.detach(node),
        };
        moved.with_context(|| format!("reparenting {node:?}"))?;
        let subtree = self.tree.top_down_from(node);
        self.pending.extend(subtree);
        Ok(())
    }

    /// Remove `node` with its subtree and pseudo-elements.
    ///
    /// # Errors
    /// Returns an error if `node` does not exist.
    pub fn remove_node(&mut self, node: NodeId) -> Result<()> {
        let removed = self
            .tree
            .remove(node)
            .with_context(|| format!("removing {node:?}"))?;
        for id in removed {
            self.pending.remove(&id);
            self.computed.remove(&id);
            self.changed_nodes.remove(&id);
        }
        Ok(())
    }

    /// Rematch `node` at the next pass, e.g. after its classes changed.
    pub fn mark_for_rematch(&mut self, node: NodeId) {
        if self.tree.contains(node) {
            self.pending.insert(node);
        }
    }

    /// Assign a direct override by property name. The value is converted to the
    /// property's type; unconvertible values are stored as invalid.
    /// Returns whether the stored value changed.
    ///
    /// # Errors
    /// Returns an error for unknown properties or nodes.
    pub fn set_style(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<StyleValue>,
    ) -> Result<bool> {
        let authored = value.into();
        let descriptor = self.tree.registry().lookup(name)?;
        let property = descriptor.id;
        let converted = convert_authored(descriptor, &authored, self.tree.diagnostics());
        self.set_property(node, property, Some(converted))
    }

    /// Remove a direct override by property name.
    ///
    /// # Errors
    /// Returns an error for unknown properties or nodes.
    pub fn clear_style(&mut self, node: NodeId, name: &str) -> Result<bool> {
        let property = self.tree.registry().lookup(name)?.id;
        self.set_property(node, property, None)
    }

    /// Assign or clear an already typed override.
    ///
    /// # Errors
    /// Returns an error for unregistered properties or unknown nodes.
    pub fn set_property(
        &mut self,
        node: NodeId,
        property: PropertyId,
        value: Option<StyleValue>,
    ) -> Result<bool> {
        let changed = self
            .tree
            .set(node, property, value)
            .with_context(|| format!("setting {} on {node:?}", property.name()))?;
        if changed {
            self.pending.insert(node);
        }
        Ok(changed)
    }

    /// Replace the overrides of `node` with a copy of `source`'s.
    ///
    /// # Errors
    /// Returns an error if either node does not exist.
    pub fn copy_style(&mut self, node: NodeId, source: NodeId) -> Result<()> {
        self.tree
            .copy_style(node, source)
            .with_context(|| format!("copying style of {source:?} to {node:?}"))?;
        self.pending.insert(node);
        Ok(())
    }

    #[inline]
    pub fn get<T: FromStyleValue>(&self, node: NodeId, property: PropertyId) -> T {
        self.tree.get(node, property)
    }

    #[inline]
    pub fn get_converted<T: FromStyleValue>(&self, node: NodeId, property: PropertyId) -> T {
        self.tree.get_converted(node, property)
    }

    #[inline]
    pub fn get_or_shorthand<T: FromStyleValue>(&self, node: NodeId, property: PropertyId) -> T {
        self.tree.get_or_shorthand(node, property)
    }

    #[inline]
    pub fn get_raw(&self, node: NodeId, property: PropertyId) -> Option<StyleValue> {
        self.tree.get_raw(node, property)
    }

    #[inline]
    pub fn has(&self, node: NodeId, property: PropertyId) -> bool {
        self.tree.has(node, property)
    }

    /// Insert a stylesheet at the base importance level.
    ///
    /// # Errors
    /// Returns an error if a declaration names an unknown property.
    pub fn insert_style(&mut self, sheet: &StyleSheet) -> Result<SheetId> {
        self.insert_style_with_offset(sheet, 0)
    }

    /// Insert a stylesheet whose rules outrank every sheet with a lower offset.
    ///
    /// # Errors
    /// Returns an error if a declaration names an unknown property.
    pub fn insert_style_with_offset(
        &mut self,
        sheet: &StyleSheet,
        importance_offset: i32,
    ) -> Result<SheetId> {
        let id = SheetId(self.next_sheet);
        let compiled = compile(
            sheet,
            self.tree.registry(),
            id,
            importance_offset,
            &mut self.next_order,
            self.tree.diagnostics(),
        )
        .with_context(|| format!("inserting {id}"))?;
        self.next_sheet = self.next_sheet.saturating_add(1);
        debug!(
            "StyleContext: inserted {id} (rules={}, offset={importance_offset})",
            compiled.rules.len()
        );
        self.sheets.push(compiled);
        self.rules_dirty = true;
        Ok(id)
    }

    /// Remove a stylesheet. Returns whether it was present.
    pub fn remove_style(&mut self, id: SheetId) -> bool {
        let before = self.sheets.len();
        self.sheets.retain(|sheet| sheet.id != id);
        let removed = self.sheets.len() != before;
        if removed {
            debug!("StyleContext: removed {id}");
            self.rules_dirty = true;
        }
        removed
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Rematch rules where needed, then re-resolve. Returns whether any
    /// snapshot changed.
    ///
    /// # Errors
    /// Returns an error if a tracked node vanished from the tree.
    pub fn resolve_style(&mut self) -> Result<bool> {
        let _span = info_span!("style.resolve_style").entered();
        let targets: Vec<NodeId> = if self.rules_dirty {
            self.tree.top_down()
        } else {
            self.pending
                .iter()
                .copied()
                .filter(|node| self.tree.contains(*node))
                .collect()
        };
        for node in targets {
            let blocks = self.matched_blocks(node);
            let changed = self
                .tree
                .set_declaration_blocks(node, blocks)
                .with_context(|| format!("rematching {node:?}"))?;
            if changed {
                self.pending.insert(node);
            }
        }
        self.rules_dirty = false;
        Ok(self.update_elements_recursively())
    }

    /// Blocks of every rule matching `node`, highest priority first.
    fn matched_blocks(&self, node: NodeId) -> BlockList {
        let mut matched = Vec::new();
        for sheet in &self.sheets {
            for rule in &sheet.rules {
                let Some(specificity) = self.matcher.match_rule(node, &rule.selector) else {
                    continue;
                };
                let levels = [(false, &rule.normal), (true, &rule.important)];
                for (important, block) in levels {
                    if let Some(block) = block {
                        matched.push(MatchedBlock {
                            priority: CascadePriority::new(
                                important,
                                sheet.importance_offset,
                                sheet.origin,
                                specificity,
                                rule.source_order,
                            ),
                            block: Arc::clone(block),
                        });
                    }
                }
            }
        }
        trace!("StyleContext: {node:?} matched {} blocks", matched.len());
        order_blocks(matched)
    }

    /// Walk the tree top-down and re-resolve every node that is new, pending,
    /// flagged with inherited changes, or below a node whose snapshot changed.
    /// Flags are cleared once a node's subtree is done. Returns whether any
    /// snapshot changed.
    pub fn update_elements_recursively(&mut self) -> bool {
        let _span = info_span!("style.update_elements").entered();
        let pending = mem::take(&mut self.pending);
        self.changed_nodes.clear();
        let mut resolved = 0u64;
        for root in self.tree.roots().to_vec() {
            self.update_subtree(root, false, &pending, &mut resolved);
        }
        self.last_resolved_count = resolved;
        self.total_resolved_count = self.total_resolved_count.saturating_add(resolved);
        let message = format!(
            "StyleContext: resolved {resolved} of {} styles, {} changed",
            self.tree.len(),
            self.changed_nodes.len()
        );
        if self.config.log_passes {
            info!("{message}");
        } else {
            debug!("{message}");
        }
        !self.changed_nodes.is_empty()
    }

    fn update_subtree(
        &mut self,
        node: NodeId,
        ancestor_changed: bool,
        pending: &HashSet<NodeId>,
        resolved: &mut u64,
    ) {
        let dirty = ancestor_changed
            || pending.contains(&node)
            || self.tree.has_inherited_changes(node)
            || !self.computed.contains_key(&node);
        let mut changed = false;
        if dirty {
            let style = self.tree.resolve_all(node);
            *resolved = resolved.saturating_add(1);
            changed = self.computed.get(&node) != Some(&style);
            if changed {
                self.changed_nodes.insert(node);
                self.computed.insert(node, style);
            }
        }
        for pseudo in self.tree.pseudos(node).to_vec() {
            self.update_subtree(pseudo, changed || ancestor_changed, pending, resolved);
        }
        for child in self.tree.children(node) {
            self.update_subtree(child, changed, pending, resolved);
        }
        self.tree.mark_changes_seen(node);
    }

    /// Snapshot of every resolved node.
    pub fn computed_snapshot(&self) -> ComputedMap {
        self.computed.clone()
    }

    pub fn computed(&self, node: NodeId) -> Option<&ResolvedStyle> {
        self.computed.get(&node)
    }

    /// Resolved snapshot of `node`, failing when no pass has covered it yet.
    ///
    /// # Errors
    /// Returns an error if `node` has no snapshot.
    pub fn require_computed(&self, node: NodeId) -> Result<&ResolvedStyle> {
        self.computed
            .get(&node)
            .ok_or_else(|| anyhow!("no resolved style for {node:?}"))
    }

    /// Drain the nodes whose snapshots changed during the last pass.
    pub fn take_changed_nodes(&mut self) -> Vec<NodeId> {
        self.changed_nodes.drain().collect()
    }

    pub fn take_diagnostics(&self) -> Vec<StyleDiagnostic> {
        self.tree.diagnostics().take()
    }

    /// Styles resolved by the last pass.
    pub const fn perf_last_resolved_count(&self) -> u64 {
        self.last_resolved_count
    }

    /// Styles resolved across all passes.
    pub const fn perf_total_resolved_count(&self) -> u64 {
        self.total_resolved_count
    }
}
