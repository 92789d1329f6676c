use css_cascade::{NodeId, Specificity};

/// Selector matching, supplied by the embedder.
///
/// The engine never interprets selectors itself: it asks the matcher whether
/// a rule's selector applies to a node and with which specificity.
pub trait RuleMatcher {
    /// `Some(specificity)` when `selector` matches `node`.
    fn match_rule(&self, node: NodeId, selector: &str) -> Option<Specificity>;
}

impl<F> RuleMatcher for F
where
    F: Fn(NodeId, &str) -> Option<Specificity>,
{
    #[inline]
    fn match_rule(&self, node: NodeId, selector: &str) -> Option<Specificity> {
        self(node, selector)
    }
}

/// Matcher for trees styled only through direct overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRules;

impl RuleMatcher for NoRules {
    #[inline]
    fn match_rule(&self, _node: NodeId, _selector: &str) -> Option<Specificity> {
        None
    }
}
