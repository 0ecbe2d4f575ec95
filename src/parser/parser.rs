//! Recursive-descent parser for Relevance expressions.
//!
//! Precedence, loosest first:
//!
//! ```text
//! expression  = IF expression THEN expression ELSE expression | collection
//! collection  = tuple (';' tuple)*
//! tuple       = or (',' or)*
//! or          = and (OR and)*
//! and         = relation (AND relation)*
//! relation    = sum (RELATION sum)?
//! sum         = product (('+' | '-') product)*
//! product     = unary (('*' | '/' | MOD | '&') unary)*
//! unary       = (EXISTS | NOT_EXISTS | NOT | '-') unary | cast
//! cast        = property (AS PHRASE)*
//! property    = selection OF property
//!             | (ITS selection | selection) ('->' (selection | EXISTS | NOT_EXISTS))*
//! selection   = index (WHOSE primary)*
//! index       = PHRASE primary? | primary
//! primary     = '(' expression ')' | STRING | NUMERAL | IT | '?'
//! ```
//!
//! `a of b` and `b -> a` both build `Property { prop: a, source: b }`.
//!
//! Nesting is capped twice: the parser refuses to descend more than
//! [`MAX_NESTING`] sub-expressions deep, and refuses trees deeper than
//! [`MAX_DEPTH`] nodes, which left-associative chains such as `a -> b -> c`
//! can build without nesting. Everything that walks a tree recursively relies
//! on the second cap.

use tracing::trace;

use super::errors::{ErrorCode, ParseContext, SyntaxError, format_context_error};
use super::keywords::cleanup_keyword;
use super::lexer::{Token, tokenize};
use super::syntax_kind::SyntaxKind;
use crate::base::{Name, TextRange, TextSize};
use crate::syntax::{Ast, BinaryOperator, Node, NodeId, NodeKind, UnaryOperator};

type ParseResult<T> = Result<T, SyntaxError>;

/// Deepest chain of nested sub-expressions the parser descends into.
pub const MAX_NESTING: usize = 64;

/// Deepest tree the parser produces.
pub const MAX_DEPTH: u32 = 256;

/// Parse preprocessed text into an [`Ast`] without running the scope pass.
pub fn parse(input: &str) -> ParseResult<Ast> {
    let tokens = tokenize(input);
    trace!(tokens = tokens.len(), "parsing expression");
    let mut parser = Parser::new(&tokens);
    let root = parser.parse_root()?;
    if let Some(range) = parser.too_deep {
        return Err(nested_too_deeply(range));
    }
    Ok(Ast::from_parts(parser.nodes, root))
}

/// The parser state
struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    nodes: Vec<Node>,
    /// Height of the subtree under each node, parallel to `nodes`.
    depths: Vec<u32>,
    /// First node that exceeded [`MAX_DEPTH`].
    too_deep: Option<TextRange>,
    contexts: Vec<ParseContext>,
    last_end: TextSize,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            nodes: Vec::new(),
            depths: Vec::new(),
            too_deep: None,
            contexts: vec![ParseContext::TopLevel],
            last_end: TextSize::new(0),
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::EOF)
    }

    fn current_range(&self) -> TextRange {
        self.current()
            .map(Token::range)
            .unwrap_or_else(|| TextRange::empty(self.last_end))
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn context(&self) -> ParseContext {
        self.contexts
            .last()
            .copied()
            .unwrap_or(ParseContext::TopLevel)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.current()?.clone();
        if token.kind != SyntaxKind::EOF {
            self.pos += 1;
            self.last_end = token.range().end();
        }
        Some(token)
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn start(&self) -> TextSize {
        self.current_range().start()
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn alloc(&mut self, kind: NodeKind, start: TextSize) -> NodeId {
        let end = self.last_end.max(start);
        let range = TextRange::new(start, end);
        let depth = 1 + kind
            .children()
            .iter()
            .filter_map(|child| self.depths.get(child.index()).copied())
            .max()
            .unwrap_or(0);
        if depth > MAX_DEPTH && self.too_deep.is_none() {
            self.too_deep = Some(range);
        }
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node::new(kind, range));
        self.depths.push(depth);
        id
    }

    fn with_context<T>(
        &mut self,
        context: ParseContext,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.contexts.len() > MAX_NESTING {
            return Err(nested_too_deeply(self.current_range()));
        }
        self.contexts.push(context);
        let result = f(self);
        self.contexts.pop();
        result
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    /// Error for the current token when it cannot start or continue the
    /// construct being parsed.
    fn unexpected(&self) -> SyntaxError {
        let range = self.current_range();
        let text = self.current().map(|t| t.text).unwrap_or("");
        match self.current_kind() {
            SyntaxKind::EOF => SyntaxError::builder(ErrorCode::E0406)
                .message(format!(
                    "unexpected end of input {}, expected {}",
                    self.context().description(),
                    self.context().expected_description()
                ))
                .range(range)
                .build(),
            SyntaxKind::ERROR if text.starts_with('"') => SyntaxError::builder(ErrorCode::E0102)
                .range(range)
                .hint("close the string with '\"'")
                .build(),
            SyntaxKind::ERROR if text.starts_with('$') => SyntaxError::builder(ErrorCode::E0103)
                .message(format!("unknown keyword '{text}'"))
                .range(range)
                .build(),
            SyntaxKind::ERROR => SyntaxError::builder(ErrorCode::E0101)
                .message(format!("invalid character '{text}'"))
                .range(range)
                .build(),
            SyntaxKind::R_PAREN => {
                format_context_error("')'", self.context(), ErrorCode::E0205, range)
            }
            kind => format_context_error(kind.display_name(), self.context(), ErrorCode::E0901, range),
        }
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    fn parse_root(&mut self) -> ParseResult<NodeId> {
        let root = self.parse_expression()?;
        if !self.at(SyntaxKind::EOF) {
            return Err(self.unexpected());
        }
        Ok(root)
    }

    /// expression = IF expression THEN expression ELSE expression | collection
    fn parse_expression(&mut self) -> ParseResult<NodeId> {
        if !self.at(SyntaxKind::IF_KW) {
            return self.parse_collection();
        }
        let start = self.start();
        self.bump();
        let condition = self.with_context(ParseContext::Condition, Self::parse_expression)?;
        if !self.eat(SyntaxKind::THEN_KW) {
            return Err(self.missing_keyword(ErrorCode::E0407, "then"));
        }
        let then_branch = self.with_context(ParseContext::Branch, Self::parse_expression)?;
        if !self.eat(SyntaxKind::ELSE_KW) {
            return Err(self.missing_keyword(ErrorCode::E0408, "else"));
        }
        let else_branch = self.with_context(ParseContext::Branch, Self::parse_expression)?;
        Ok(self.alloc(
            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            },
            start,
        ))
    }

    fn missing_keyword(&self, code: ErrorCode, keyword: &str) -> SyntaxError {
        if self.at(SyntaxKind::EOF) {
            SyntaxError::builder(code)
                .range(self.current_range())
                .hint(format!("add '{keyword}' followed by an expression"))
                .build()
        } else {
            SyntaxError::builder(code)
                .message(format!(
                    "expected '{keyword}', found {}",
                    self.current_kind().display_name()
                ))
                .range(self.current_range())
                .build()
        }
    }

    /// collection = tuple (';' tuple)*
    fn parse_collection(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let first = self.parse_tuple()?;
        if !self.at(SyntaxKind::SEMICOLON) {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.eat(SyntaxKind::SEMICOLON) {
            items.push(self.with_context(ParseContext::Operand, Self::parse_tuple)?);
        }
        Ok(self.alloc(NodeKind::Collection { items }, start))
    }

    /// tuple = or (',' or)*
    fn parse_tuple(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let first = self.parse_or()?;
        if !self.at(SyntaxKind::COMMA) {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.eat(SyntaxKind::COMMA) {
            items.push(self.with_context(ParseContext::Operand, Self::parse_or)?);
        }
        Ok(self.alloc(NodeKind::Tuple { items }, start))
    }

    /// or = and (OR and)*
    fn parse_or(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let mut left = self.parse_and()?;
        while self.eat(SyntaxKind::OR_KW) {
            let right = self.parse_operand(Self::parse_and)?;
            left = self.binary(BinaryOperator::Or, left, right, start);
        }
        Ok(left)
    }

    /// and = relation (AND relation)*
    fn parse_and(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let mut left = self.parse_relation()?;
        while self.eat(SyntaxKind::AND_KW) {
            let right = self.parse_operand(Self::parse_relation)?;
            left = self.binary(BinaryOperator::And, left, right, start);
        }
        Ok(left)
    }

    /// relation = sum (RELATION sum)?
    fn parse_relation(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let left = self.parse_sum()?;
        if !self.at(SyntaxKind::RELATION) {
            return Ok(left);
        }
        let op = match self.bump() {
            Some(token) => Name::new(cleanup_keyword(token.text)),
            None => return Err(self.unexpected()),
        };
        let right = self.parse_operand(Self::parse_sum)?;
        if self.at(SyntaxKind::RELATION) {
            return Err(SyntaxError::builder(ErrorCode::E0403)
                .message("relations cannot be chained")
                .range(self.current_range())
                .hint("parenthesize one side of the comparison")
                .build());
        }
        Ok(self.binary(BinaryOperator::Relation(op), left, right, start))
    }

    /// sum = product (('+' | '-') product)*
    fn parse_sum(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let mut left = self.parse_product()?;
        loop {
            let op = match self.current_kind() {
                SyntaxKind::PLUS => BinaryOperator::Plus,
                SyntaxKind::MINUS => BinaryOperator::Minus,
                _ => return Ok(left),
            };
            self.bump();
            let right = self.parse_operand(Self::parse_product)?;
            left = self.binary(op, left, right, start);
        }
    }

    /// product = unary (('*' | '/' | MOD | '&') unary)*
    fn parse_product(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.current_kind() {
                SyntaxKind::STAR => BinaryOperator::Times,
                SyntaxKind::SLASH => BinaryOperator::Divide,
                SyntaxKind::MOD_KW => BinaryOperator::Mod,
                SyntaxKind::AMP => BinaryOperator::Concat,
                _ => return Ok(left),
            };
            self.bump();
            let right = self.parse_operand(Self::parse_unary)?;
            left = self.binary(op, left, right, start);
        }
    }

    fn parse_operand(&mut self, f: fn(&mut Self) -> ParseResult<NodeId>) -> ParseResult<NodeId> {
        if self.at(SyntaxKind::EOF) {
            return Err(SyntaxError::builder(ErrorCode::E0402)
                .range(self.current_range())
                .build());
        }
        self.with_context(ParseContext::Operand, f)
    }

    fn binary(&mut self, op: BinaryOperator, left: NodeId, right: NodeId, start: TextSize) -> NodeId {
        self.alloc(NodeKind::Binary { op, left, right }, start)
    }

    /// unary = (EXISTS | NOT_EXISTS | NOT | '-') unary | cast
    fn parse_unary(&mut self) -> ParseResult<NodeId> {
        let op = match self.current_kind() {
            SyntaxKind::EXISTS_KW => UnaryOperator::Exists,
            SyntaxKind::NOT_EXISTS_KW => UnaryOperator::NotExists,
            SyntaxKind::NOT_KW => UnaryOperator::Not,
            SyntaxKind::MINUS => UnaryOperator::Negate,
            _ => return self.parse_cast(),
        };
        let start = self.start();
        self.bump();
        let operand = self.parse_operand(Self::parse_unary)?;
        Ok(self.alloc(NodeKind::Unary { op, operand }, start))
    }

    /// cast = property (AS PHRASE)*
    fn parse_cast(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let mut source = self.parse_property()?;
        while self.eat(SyntaxKind::AS_KW) {
            if !self.at(SyntaxKind::PHRASE) {
                return Err(SyntaxError::builder(ErrorCode::E0409)
                    .message(format!(
                        "expected a type name after 'as', found {}",
                        self.current_kind().display_name()
                    ))
                    .range(self.current_range())
                    .build());
            }
            let target = self.bump().map(|t| phrase_name(t.text)).unwrap_or_default();
            source = self.alloc(NodeKind::Cast { source, target }, start);
        }
        Ok(source)
    }

    /// property = selection OF property
    ///          | (ITS selection | selection) ('->' (selection | EXISTS | NOT_EXISTS))*
    fn parse_property(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let mut node = if self.at(SyntaxKind::ITS_KW) {
            self.bump();
            let it = self.alloc(NodeKind::It, start);
            let prop = self.with_context(ParseContext::PropertyChain, Self::parse_selection)?;
            self.alloc(NodeKind::Property { prop, source: it }, start)
        } else {
            let selection = self.parse_selection()?;
            if self.eat(SyntaxKind::OF_KW) {
                let source = self.with_context(ParseContext::PropertyChain, Self::parse_property)?;
                return Ok(self.alloc(
                    NodeKind::Property {
                        prop: selection,
                        source,
                    },
                    start,
                ));
            }
            selection
        };

        while self.eat(SyntaxKind::ARROW) {
            let op = match self.current_kind() {
                SyntaxKind::EXISTS_KW => Some(UnaryOperator::Exists),
                SyntaxKind::NOT_EXISTS_KW => Some(UnaryOperator::NotExists),
                _ => None,
            };
            node = match op {
                Some(op) => {
                    self.bump();
                    self.alloc(NodeKind::Unary { op, operand: node }, start)
                }
                None => {
                    let prop =
                        self.with_context(ParseContext::PropertyChain, Self::parse_selection)?;
                    self.alloc(NodeKind::Property { prop, source: node }, start)
                }
            };
        }
        Ok(node)
    }

    /// selection = index (WHOSE primary)*
    fn parse_selection(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let mut source = self.parse_index()?;
        while self.eat(SyntaxKind::WHOSE_KW) {
            let filter = self.with_context(ParseContext::WhoseFilter, Self::parse_primary)?;
            source = self.alloc(NodeKind::Whose { source, filter }, start);
        }
        Ok(source)
    }

    /// index = PHRASE primary? | primary
    fn parse_index(&mut self) -> ParseResult<NodeId> {
        if !self.at(SyntaxKind::PHRASE) {
            return self.parse_primary();
        }
        let start = self.start();
        let name = self.bump().map(|t| phrase_name(t.text)).unwrap_or_default();
        let params = if self.current_kind().starts_primary() {
            Some(self.with_context(ParseContext::PhraseArgument, Self::parse_primary)?)
        } else {
            None
        };
        Ok(self.alloc(NodeKind::Phrase { name, params }, start))
    }

    /// primary = '(' expression ')' | STRING | NUMERAL | IT | '?'
    fn parse_primary(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        match self.current_kind() {
            SyntaxKind::L_PAREN => {
                let open = self.current_range();
                self.bump();
                let content = self.with_context(ParseContext::Parenthesized, Self::parse_expression)?;
                if !self.eat(SyntaxKind::R_PAREN) {
                    return Err(SyntaxError::builder(ErrorCode::E0203)
                        .message(format!(
                            "expected ')', found {}",
                            self.current_kind().display_name()
                        ))
                        .range(self.current_range())
                        .related("opened here", open)
                        .build());
                }
                Ok(self.alloc(NodeKind::Parens { content }, start))
            }
            SyntaxKind::STRING => {
                let text = self.bump().map(|t| t.text).unwrap_or("\"\"");
                let value = Name::new(text.trim_matches('"'));
                Ok(self.alloc(NodeKind::String { value }, start))
            }
            SyntaxKind::NUMERAL => {
                let value = self.bump().map(|t| Name::new(t.text)).unwrap_or_default();
                Ok(self.alloc(NodeKind::Number { value }, start))
            }
            SyntaxKind::IT_KW => {
                self.bump();
                Ok(self.alloc(NodeKind::It, start))
            }
            SyntaxKind::QUESTION => {
                self.bump();
                Ok(self.alloc(NodeKind::TypeHint, start))
            }
            _ => Err(self.unexpected()),
        }
    }
}

fn nested_too_deeply(range: TextRange) -> SyntaxError {
    SyntaxError::builder(ErrorCode::E0401)
        .range(range)
        .hint("split the expression or drop redundant parentheses")
        .build()
}

/// Collapse the internal whitespace of a phrase to single spaces.
fn phrase_name(text: &str) -> Name {
    let mut name = String::with_capacity(text.len());
    for (i, word) in text.split_whitespace().enumerate() {
        if i > 0 {
            name.push(' ');
        }
        name.push_str(word);
    }
    Name::new(name)
}
