//! Style values: the raw values stored by the cascade, the global keywords
//! that the cascade unwraps, computed values resolved per node, and the
//! conversions from authored text into typed values.

#![forbid(unsafe_code)]

mod color;
mod computed;
pub mod convert;
mod keyword;
mod typed;
mod value;

pub use color::parse_css_color;
pub use computed::{ComputedValue, ResolveContext};
pub use convert::{Converter, ValueType};
pub use keyword::{CssKeyword, parse_keyword};
pub use typed::FromStyleValue;
pub use value::{
    Appearance, ColorRgba, Display, FontStyle, Length, ObjectFit, PointerEvents, StyleValue,
    TextAlign, TextOverflow,
};
