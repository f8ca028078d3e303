//! Token classes and the color each one is painted with.

/// Lexical class of a highlighted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// Unclassified text (element content, whitespace, `=`).
    Plain,
    Comment,
    /// `<`, `</`, `<!`, `>`, `/>`.
    TagBracket,
    TagName,
    AttrName,
    /// Quoted string, quotes included.
    String,
    Selector,
    Property,
    Value,
    /// `{`, `}`, `:`, `;` in CSS.
    Punctuation,
}

impl TokenClass {
    pub const ALL: [TokenClass; 10] = [
        TokenClass::Plain,
        TokenClass::Comment,
        TokenClass::TagBracket,
        TokenClass::TagName,
        TokenClass::AttrName,
        TokenClass::String,
        TokenClass::Selector,
        TokenClass::Property,
        TokenClass::Value,
        TokenClass::Punctuation,
    ];

    /// CSS class suffix used in rendered markup (`jf-<name>`).
    pub fn name(self) -> &'static str {
        match self {
            TokenClass::Plain => "plain",
            TokenClass::Comment => "comment",
            TokenClass::TagBracket => "bracket",
            TokenClass::TagName => "tag",
            TokenClass::AttrName => "attr",
            TokenClass::String => "string",
            TokenClass::Selector => "selector",
            TokenClass::Property => "property",
            TokenClass::Value => "value",
            TokenClass::Punctuation => "punct",
        }
    }
}

/// Color map for token classes, `#rrggbb` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub plain: &'static str,
    pub comment: &'static str,
    pub tag_bracket: &'static str,
    pub tag_name: &'static str,
    pub attr_name: &'static str,
    pub string: &'static str,
    pub selector: &'static str,
    pub property: &'static str,
    pub value: &'static str,
    pub punctuation: &'static str,
    /// Caret color of the transparent input layer.
    pub caret: &'static str,
    pub background: &'static str,
    pub gutter: &'static str,
}

pub const JELLYFISH_DARK: Theme = Theme {
    plain: "#d4d4d4",
    comment: "#6a9955",
    tag_bracket: "#808080",
    tag_name: "#569cd6",
    attr_name: "#9cdcfe",
    string: "#ce9178",
    selector: "#d7ba7d",
    property: "#9cdcfe",
    value: "#ce9178",
    punctuation: "#d4d4d4",
    caret: "#aeafad",
    background: "#1e1e1e",
    gutter: "#858585",
};

impl Theme {
    pub fn color(&self, class: TokenClass) -> &'static str {
        match class {
            TokenClass::Plain => self.plain,
            TokenClass::Comment => self.comment,
            TokenClass::TagBracket => self.tag_bracket,
            TokenClass::TagName => self.tag_name,
            TokenClass::AttrName => self.attr_name,
            TokenClass::String => self.string,
            TokenClass::Selector => self.selector,
            TokenClass::Property => self.property,
            TokenClass::Value => self.value,
            TokenClass::Punctuation => self.punctuation,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        JELLYFISH_DARK
    }
}
