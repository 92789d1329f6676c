/// Global keywords that carry cascade meaning instead of a concrete value.
///
/// These never leave resolution as-is: the cascade unwraps each one into the
/// property's default, its "none" value, the parent's value, or no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CssKeyword {
    Auto,
    Inherit,
    Initial,
    Unset,
    None,
    /// Produced when an authored value could not be converted.
    Invalid,
}

impl CssKeyword {
    /// Authored spelling of the keyword. `Invalid` has none.
    pub const fn as_str(self) -> Option<&'static str> {
        match self {
            Self::Auto => Some("auto"),
            Self::Inherit => Some("inherit"),
            Self::Initial => Some("initial"),
            Self::Unset => Some("unset"),
            Self::None => Some("none"),
            Self::Invalid => None,
        }
    }
}

/// Recognise a global keyword, ignoring ASCII case and surrounding whitespace.
pub fn parse_keyword(input: &str) -> Option<CssKeyword> {
    let trimmed = input.trim();
    [
        CssKeyword::Auto,
        CssKeyword::Inherit,
        CssKeyword::Initial,
        CssKeyword::Unset,
        CssKeyword::None,
    ]
    .into_iter()
    .find(|keyword| {
        keyword
            .as_str()
            .is_some_and(|spelling| spelling.eq_ignore_ascii_case(trimmed))
    })
}
