//! Keyword preprocessing.
//!
//! Relevance spells most operators as English phrases (`is not equal to`,
//! `there exists no`). Before lexing, every such phrase standing on its own
//! is rewritten into one sentinel-prefixed word (`$is-not-equal-to`) so the
//! lexer never has to look across whitespace. Indefinite articles are
//! dropped first.
//!
//! This is plain text rewriting. It knows nothing about the grammar and
//! accepts any input, including unbalanced parentheses.

/// Prefix marking a rewritten keyword.
pub const KEYWORD_SENTINEL: char = '$';

/// Replaces the spaces inside a multi-word keyword.
pub const KEYWORD_JOINER: char = '-';

/// Standalone words removed before keyword rewriting.
pub const ARTICLES: &[&str] = &["a", "an"];

/// Relation keywords, in their spoken form.
pub const RELATION_KEYWORDS: &[&str] = &[
    "does not end with",
    "ends with",
    "does not start with",
    "starts with",
    "is not contained by",
    "is contained by",
    "does not contain",
    "is not greater than or equal to",
    "is greater than or equal to",
    "is not less than or equal to",
    "is less than or equal to",
    "is not less than",
    "is less than",
    "is not greater than",
    "is greater than",
    "is equal to",
    "is not equal to",
    "is not",
    "is",
    "does not equal",
    "equals",
    "contains",
];

/// Negated existence keywords.
pub const NOT_EXISTS_KEYWORDS: &[&str] = &[
    "there do not exist",
    "there does not exist",
    "there exist no",
    "there exists no",
    "exists no",
    "exist no",
];

/// Existence keywords.
pub const EXISTS_KEYWORDS: &[&str] = &["there exists", "there exist", "exists", "exist"];

/// Single-word keywords.
pub const WORD_KEYWORDS: &[&str] = &[
    "its", "of", "whose", "as", "it", "not", "and", "or", "mod", "if", "then", "else",
];

/// Rewrite `text` so every keyword phrase is a single `$`-prefixed token.
pub fn preprocess(text: &str) -> String {
    let without_articles = rewrite_phrases(text, ARTICLES.iter().copied(), |_| String::new());
    rewrite_phrases(&without_articles, all_keywords(), encode_keyword)
}

/// Turn a sentinel token back into its spoken form
/// (`$is-not-equal-to` becomes `is not equal to`).
pub fn cleanup_keyword(token: &str) -> String {
    token
        .trim_start_matches(KEYWORD_SENTINEL)
        .replace(KEYWORD_JOINER, " ")
}

fn encode_keyword(phrase: &str) -> String {
    let mut out = String::with_capacity(phrase.len() + 1);
    out.push(KEYWORD_SENTINEL);
    out.extend(
        phrase
            .chars()
            .map(|ch| if ch == ' ' { KEYWORD_JOINER } else { ch }),
    );
    out
}

fn all_keywords() -> impl Iterator<Item = &'static str> + Clone {
    RELATION_KEYWORDS
        .iter()
        .chain(NOT_EXISTS_KEYWORDS)
        .chain(EXISTS_KEYWORDS)
        .chain(WORD_KEYWORDS)
        .copied()
}

fn is_boundary(ch: char) -> bool {
    ch.is_whitespace() || ch == '(' || ch == ')'
}

/// Replace each standalone occurrence of a phrase, preferring the longest
/// phrase that matches at a position.
///
/// A match must start at the beginning of the text or after a boundary, and
/// end at the end of the text or before one. The boundary characters stay
/// in place and are not consumed, so adjacent keywords sharing a single
/// space are both found. Double-quoted literals are copied verbatim.
fn rewrite_phrases<'p>(
    text: &str,
    phrases: impl Iterator<Item = &'p str> + Clone,
    replace: impl Fn(&str) -> String,
) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut in_string = false;
    let mut prev: Option<char> = None;
    let mut pos = 0;

    while let Some(ch) = text[pos..].chars().next() {
        if !in_string && prev.is_none_or(is_boundary) {
            let longest = phrases
                .clone()
                .filter_map(|phrase| match_phrase(&text[pos..], phrase).map(|len| (phrase, len)))
                .max_by_key(|(_, len)| *len);
            if let Some((phrase, len)) = longest {
                out.push_str(&replace(phrase));
                prev = text[..pos + len].chars().next_back();
                pos += len;
                continue;
            }
        }
        if ch == '"' {
            in_string = !in_string;
        }
        out.push(ch);
        prev = Some(ch);
        pos += ch.len_utf8();
    }
    out
}

/// Byte length of `phrase` at the start of `rest`, allowing any run of
/// whitespace between its words, if it is followed by a boundary.
fn match_phrase(rest: &str, phrase: &str) -> Option<usize> {
    let mut len = 0;
    for (i, word) in phrase.split(' ').enumerate() {
        if i > 0 {
            let gap = rest[len..].len() - rest[len..].trim_start().len();
            if gap == 0 {
                return None;
            }
            len += gap;
        }
        if !rest[len..].starts_with(word) {
            return None;
        }
        len += word.len();
    }
    match rest[len..].chars().next() {
        None => Some(len),
        Some(ch) if is_boundary(ch) => Some(len),
        Some(_) => None,
    }
}
