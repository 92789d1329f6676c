use core::fmt;
use std::error::Error;

/// Registry-level failures. Both are programming errors: a property must be
/// registered exactly once before anything references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// A name or identity that no registered descriptor answers to.
    UnknownProperty(String),
    /// A second descriptor for an already registered identity.
    DuplicateProperty(&'static str),
}

impl fmt::Display for StyleError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownProperty(name) => write!(formatter, "Unknown style property: {name}"),
            Self::DuplicateProperty(name) => {
                write!(formatter, "Style property registered twice: {name}")
            }
        }
    }
}

impl Error for StyleError {}
