//! Style property registry: the closed set of property identities and the
//! immutable descriptor (default, "none" value, inheritance, conversion) of
//! each one.

#![forbid(unsafe_code)]

mod descriptor;
mod error;
mod id;
mod registry;
mod standard;

pub use descriptor::PropertyDescriptor;
pub use error::StyleError;
pub use id::PropertyId;
pub use registry::StyleRegistry;
pub use standard::standard_properties;
