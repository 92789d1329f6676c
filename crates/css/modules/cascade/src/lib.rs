//! CSS Cascading and Inheritance Level 4: cascade, inheritance and change
//! tracking over an arena of node styles.
//! Spec: <https://www.w3.org/TR/css-cascade-4/>

#![forbid(unsafe_code)]

mod block;
mod diagnostics;
mod node_style;
mod priority;
mod resolve;
mod resolved;
mod tree;

pub use block::{BlockList, DeclarationBlock, MatchedBlock, SharedBlock, order_blocks, same_blocks};
pub use diagnostics::{Diagnostics, StyleDiagnostic};
pub use indextree::NodeId;
pub use node_style::NodeStyle;
pub use priority::{CascadePriority, Origin, Specificity, compare_priority};
pub use resolved::ResolvedStyle;
pub use tree::{PseudoList, StyleTree, TreeError};
