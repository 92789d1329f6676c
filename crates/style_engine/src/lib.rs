//! Style engine: stylesheet management, rule-to-node wiring and incremental
//! re-resolution on top of the cascade.

#![forbid(unsafe_code)]

mod config;
mod context;
mod matcher;
mod sheet;

pub use config::StyleConfig;
pub use context::{ComputedMap, StyleContext};
pub use matcher::{NoRules, RuleMatcher};
pub use sheet::{Declaration, SheetId, StyleRule, StyleSheet};

pub use css_cascade::{NodeId, Origin, ResolvedStyle, Specificity, StyleDiagnostic};
pub use css_properties::{PropertyId, StyleRegistry};
pub use css_values::{ColorRgba, StyleValue};
