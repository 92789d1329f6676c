/// Declare the closed set of property identities with their canonical names.
macro_rules! property_ids {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Identity of a style property. Dense: usable as an array index.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum PropertyId {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )+
        }

        impl PropertyId {
            /// Every identity in index order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Number of identities; the length of dense per-property tables.
            pub const COUNT: usize = Self::ALL.len();

            /// Canonical kebab-case name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }
    };
}

property_ids! {
    Opacity => "opacity",
    ZIndex => "z-index",
    Visibility => "visibility",
    Cursor => "cursor",
    PointerEvents => "pointer-events",
    BackgroundColor => "background-color",
    BackgroundImage => "background-image",
    BorderRadius => "border-radius",
    BorderTopLeftRadius => "border-top-left-radius",
    BorderTopRightRadius => "border-top-right-radius",
    BorderBottomLeftRadius => "border-bottom-left-radius",
    BorderBottomRightRadius => "border-bottom-right-radius",
    BorderColor => "border-color",
    BorderLeftColor => "border-left-color",
    BorderRightColor => "border-right-color",
    BorderTopColor => "border-top-color",
    BorderBottomColor => "border-bottom-color",
    BoxShadow => "box-shadow",
    TransformOrigin => "transform-origin",
    Translate => "translate",
    Scale => "scale",
    Rotate => "rotate",
    FontFamily => "font-family",
    Color => "color",
    FontWeight => "font-weight",
    FontStyle => "font-style",
    FontSize => "font-size",
    LineHeight => "line-height",
    LetterSpacing => "letter-spacing",
    WordSpacing => "word-spacing",
    TextAlign => "text-align",
    TextOverflow => "text-overflow",
    TextWrap => "text-wrap",
    Content => "content",
    Appearance => "appearance",
    Transition => "transition",
    Animation => "animation",
    ObjectFit => "object-fit",
    ObjectPosition => "object-position",
    Fill => "fill",
    Stroke => "stroke",
    Display => "display",
    Width => "width",
    Height => "height",
}

impl PropertyId {
    /// Position in dense per-property tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}
