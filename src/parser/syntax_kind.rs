//! Token kinds produced by the lexer.

/// All token kinds of the expression language.
///
/// Keyword kinds only ever come from `$`-prefixed words written by the
/// keyword preprocessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,

    // =========================================================================
    // LITERALS
    // =========================================================================
    WORD,     // one word of a phrase
    PHRASE,   // a run of words, merged by `tokenize`
    NUMERAL,  // 42
    STRING,   // "hello"

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,   // (
    R_PAREN,   // )
    SEMICOLON, // ;
    COMMA,     // ,
    PLUS,      // +
    MINUS,     // -
    STAR,      // *
    SLASH,     // /
    AMP,       // &
    ARROW,     // -> 's ' .
    QUESTION,  // ?
    RELATION,  // = != < <= > >= and every relation keyword

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    IF_KW,
    THEN_KW,
    ELSE_KW,
    OR_KW,
    AND_KW,
    NOT_KW,
    MOD_KW,
    EXISTS_KW,
    NOT_EXISTS_KW,
    ITS_KW,
    IT_KW,
    WHOSE_KW,
    AS_KW,
    OF_KW,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    ERROR,
    EOF,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE)
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::IF_KW
                | Self::THEN_KW
                | Self::ELSE_KW
                | Self::OR_KW
                | Self::AND_KW
                | Self::NOT_KW
                | Self::MOD_KW
                | Self::EXISTS_KW
                | Self::NOT_EXISTS_KW
                | Self::ITS_KW
                | Self::IT_KW
                | Self::WHOSE_KW
                | Self::AS_KW
                | Self::OF_KW
        )
    }

    pub fn is_literal(self) -> bool {
        matches!(self, Self::NUMERAL | Self::STRING)
    }

    /// Tokens that can start a phrase argument (`file "x"`, `item 2`, `file ?`).
    pub fn starts_primary(self) -> bool {
        matches!(
            self,
            Self::L_PAREN | Self::STRING | Self::NUMERAL | Self::IT_KW | Self::QUESTION
        )
    }

    /// Short human-readable name for error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::WHITESPACE => "whitespace",
            Self::WORD | Self::PHRASE => "phrase",
            Self::NUMERAL => "number",
            Self::STRING => "string",
            Self::L_PAREN => "'('",
            Self::R_PAREN => "')'",
            Self::SEMICOLON => "';'",
            Self::COMMA => "','",
            Self::PLUS => "'+'",
            Self::MINUS => "'-'",
            Self::STAR => "'*'",
            Self::SLASH => "'/'",
            Self::AMP => "'&'",
            Self::ARROW => "property arrow",
            Self::QUESTION => "'?'",
            Self::RELATION => "relation",
            Self::IF_KW => "'if'",
            Self::THEN_KW => "'then'",
            Self::ELSE_KW => "'else'",
            Self::OR_KW => "'or'",
            Self::AND_KW => "'and'",
            Self::NOT_KW => "'not'",
            Self::MOD_KW => "'mod'",
            Self::EXISTS_KW => "'exists'",
            Self::NOT_EXISTS_KW => "'not exists'",
            Self::ITS_KW => "'its'",
            Self::IT_KW => "'it'",
            Self::WHOSE_KW => "'whose'",
            Self::AS_KW => "'as'",
            Self::OF_KW => "'of'",
            Self::ERROR => "invalid token",
            Self::EOF => "end of input",
        }
    }
}
