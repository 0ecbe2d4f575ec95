//! Logos-based lexer for Relevance expressions
//!
//! Runs on preprocessed text, so every multi-word keyword already arrives as
//! a single `$`-prefixed word. Plain words are lexed one at a time and then
//! merged into phrases by [`tokenize`].

use super::syntax_kind::SyntaxKind;
use crate::base::{TextRange, TextSize, text_size};
use logos::Logos;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = text_size(self.inner.span().start);

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize preprocessed text for the parser.
///
/// Whitespace is dropped, each run of whitespace-separated words becomes a
/// single [`SyntaxKind::PHRASE`] spanning the whole run, and an
/// [`SyntaxKind::EOF`] token closes the stream.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens: Vec<Token<'_>> = Vec::new();
    for token in Lexer::new(input) {
        match token.kind {
            SyntaxKind::WHITESPACE => {}
            SyntaxKind::WORD => match tokens.last_mut() {
                Some(last) if last.kind == SyntaxKind::PHRASE => {
                    let start = usize::from(last.offset);
                    let end = usize::from(token.offset) + token.text.len();
                    last.text = &input[start..end];
                }
                _ => tokens.push(Token {
                    kind: SyntaxKind::PHRASE,
                    ..token
                }),
            },
            _ => tokens.push(token),
        }
    }
    tokens.push(Token {
        kind: SyntaxKind::EOF,
        text: "",
        offset: text_size(input.len()),
    });
    tokens
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*")]
    Word,

    #[regex(r"[0-9]+")]
    Numeral,

    #[regex(r#""[^"]*""#)]
    String,

    // =========================================================================
    // KEYWORD GROUPS
    // =========================================================================
    #[regex(r"\$(there-do-not-exist|there-does-not-exist|there-exist-no|there-exists-no|exists-no|exist-no)")]
    NotExistsKw,

    #[regex(r"\$(there-exists|there-exist|exists|exist)")]
    ExistsKw,

    #[regex(r"\$(does-not-end-with|ends-with|does-not-start-with|starts-with|is-not-contained-by|is-contained-by|does-not-contain|is-not-greater-than-or-equal-to|is-greater-than-or-equal-to|is-not-less-than-or-equal-to|is-less-than-or-equal-to|is-not-less-than|is-less-than|is-not-greater-than|is-greater-than|is-equal-to|is-not-equal-to|is-not|is|does-not-equal|equals|contains)")]
    #[token("!=")]
    #[token(">=")]
    #[token("<=")]
    #[token(">")]
    #[token("<")]
    #[token("=")]
    Relation,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("$not")]
    NotKw,
    #[token("$its")]
    ItsKw,
    #[token("$it")]
    ItKw,
    #[token("$whose")]
    WhoseKw,
    #[token("$as")]
    AsKw,
    #[token("$of")]
    OfKw,
    #[token("$and")]
    AndKw,
    #[token("$or")]
    OrKw,
    #[token("$mod")]
    ModKw,
    #[token("$if")]
    IfKw,
    #[token("$then")]
    ThenKw,
    #[token("$else")]
    ElseKw,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("->")]
    #[token("'s")]
    #[token("'")]
    #[token(".")]
    Arrow,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("&")]
    Amp,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("?")]
    Question,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => SyntaxKind::WHITESPACE,
            Word => SyntaxKind::WORD,
            Numeral => SyntaxKind::NUMERAL,
            String => SyntaxKind::STRING,
            NotExistsKw => SyntaxKind::NOT_EXISTS_KW,
            ExistsKw => SyntaxKind::EXISTS_KW,
            Relation => SyntaxKind::RELATION,
            NotKw => SyntaxKind::NOT_KW,
            ItsKw => SyntaxKind::ITS_KW,
            ItKw => SyntaxKind::IT_KW,
            WhoseKw => SyntaxKind::WHOSE_KW,
            AsKw => SyntaxKind::AS_KW,
            OfKw => SyntaxKind::OF_KW,
            AndKw => SyntaxKind::AND_KW,
            OrKw => SyntaxKind::OR_KW,
            ModKw => SyntaxKind::MOD_KW,
            IfKw => SyntaxKind::IF_KW,
            ThenKw => SyntaxKind::THEN_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            Arrow => SyntaxKind::ARROW,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Amp => SyntaxKind::AMP,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            Semicolon => SyntaxKind::SEMICOLON,
            Comma => SyntaxKind::COMMA,
            Question => SyntaxKind::QUESTION,
        }
    }
}
