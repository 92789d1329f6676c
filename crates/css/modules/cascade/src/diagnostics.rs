use core::cell::{Cell, RefCell};
use core::fmt;
use core::mem;

use css_properties::PropertyId;
use css_values::StyleValue;
use indextree::NodeId;
use log::{debug, warn};

/// Non-fatal condition found while resolving or assigning styles.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleDiagnostic {
    /// A typed read found a value of another type, even after conversion.
    TypeMismatch {
        node: NodeId,
        property: PropertyId,
        expected: &'static str,
        found: StyleValue,
    },
    /// An authored value could not be converted and was stored as `Invalid`.
    InvalidValue {
        property: PropertyId,
        value: StyleValue,
    },
}

impl fmt::Display for StyleDiagnostic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch {
                node,
                property,
                expected,
                found,
            } => write!(
                formatter,
                "{} on {node:?}: expected {expected}, found {} `{found}`",
                property.name(),
                found.kind()
            ),
            Self::InvalidValue { property, value } => {
                write!(formatter, "{}: invalid value `{value}`", property.name())
            }
        }
    }
}

/// Bounded collection of diagnostics.
///
/// Reporting happens on the read path, so the buffer uses interior mutability.
#[derive(Debug)]
pub struct Diagnostics {
    report_type_mismatch: bool,
    limit: usize,
    records: RefCell<Vec<StyleDiagnostic>>,
    dropped: Cell<usize>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(true, 256)
    }
}

impl Diagnostics {
    pub fn new(report_type_mismatch: bool, limit: usize) -> Self {
        Self {
            report_type_mismatch,
            limit: limit.max(1),
            records: RefCell::new(Vec::new()),
            dropped: Cell::new(0),
        }
    }

    /// Log and retain a diagnostic. Past the limit, diagnostics are only counted.
    pub fn report(&self, diagnostic: StyleDiagnostic) {
        if matches!(diagnostic, StyleDiagnostic::TypeMismatch { .. }) {
            if !self.report_type_mismatch {
                return;
            }
            warn!("style: {diagnostic}");
        } else {
            debug!("style: {diagnostic}");
        }
        let mut records = self.records.borrow_mut();
        if records.len() >= self.limit {
            self.dropped.set(self.dropped.get().saturating_add(1));
            return;
        }
        records.push(diagnostic);
    }

    /// Drain retained diagnostics.
    pub fn take(&self) -> Vec<StyleDiagnostic> {
        self.dropped.set(0);
        mem::take(&mut *self.records.borrow_mut())
    }

    pub fn snapshot(&self) -> Vec<StyleDiagnostic> {
        self.records.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Diagnostics discarded because the buffer was full.
    pub fn dropped(&self) -> usize {
        self.dropped.get()
    }
}
