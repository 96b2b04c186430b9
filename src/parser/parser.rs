//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and recursive descent for items and statements.
//!
//! Dispatch goes through the read-only tables in [`LOOKUPS`]:
//! - Item and statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix and postfix expressions
//! - Binding powers for operator precedence
//! - Type parsing handlers
//!
//! Syntax errors propagate as `Result` up to the nearest item or statement
//! boundary, where they are recorded and the parser resynchronizes.

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{Ast, ItemId, SourceFile},
        items::ItemKind,
    },
    config::ParserConfig,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::TokenStream,
        tokens::{Token, TokenKind},
    },
    Span, MK_TOKEN,
};

use super::{
    item::parse_item,
    lookups::{Lookups, LOOKUPS},
};

/// Where a failed construct sits, which decides how far recovery skips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryScope {
    /// Top-level items. A stray `}` is consumed.
    TopLevel,
    /// Items inside `impl`, `trait` or `mod` braces.
    Members,
    /// Statements inside a block.
    Block,
}

/// The main parser structure that maintains parsing state.
///
/// Holds the token stream, the cursor, the arena under construction and
/// the syntax errors recorded so far.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// End offset of the last consumed token.
    last_end: u32,
    lookups: &'static Lookups,
    pub(super) ast: Ast,
    errors: Vec<Error>,
    depth: usize,
    max_depth: usize,
    /// Set while parsing `if`/`while`/`for`/`match` heads, where `Name {`
    /// opens the body instead of a struct literal.
    no_struct: bool,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>, config: &ParserConfig) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EOF) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span::new(end, end),
                0,
                0
            ));
        }

        Parser {
            tokens,
            pos: 0,
            last_end: 0,
            lookups: &LOOKUPS,
            ast: Ast::new(),
            errors: vec![],
            depth: 0,
            max_depth: config.max_depth,
            no_struct: false,
        }
    }

    pub fn lookups(&self) -> &'static Lookups {
        self.lookups
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Kind of the token `offset` positions ahead; `EOF` past the end.
    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::EOF)
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.current_token_kind() == kind
    }

    /// Advances to the next token and returns the previous token. The
    /// cursor never moves past `EOF`.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos;
        self.last_end = self.tokens[index].span.end;
        if self.tokens[index].kind != TokenKind::EOF {
            self.pos += 1;
        }
        &self.tokens[index]
    }

    /// Consumes the current token if it is of `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(self.unexpected(&format!("expected {}", expected_kind))),
            }
        } else {
            Ok(self.advance().clone())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Expects the `>` closing a generic list. A `>>`, `>=` or `>>=` token
    /// is split: its first `>` is consumed and the rest stays current.
    pub fn expect_gt(&mut self) -> Result<(), Error> {
        let (rest, value) = match self.current_token_kind() {
            TokenKind::Greater => {
                self.advance();
                return Ok(());
            }
            TokenKind::Shr => (TokenKind::Greater, ">"),
            TokenKind::GreaterEquals => (TokenKind::Assignment, "="),
            TokenKind::ShrEquals => (TokenKind::GreaterEquals, ">="),
            _ => return Err(self.unexpected("expected `>`")),
        };

        trace!(token = %self.current_token().value, "splitting token at `>`");
        let token = &mut self.tokens[self.pos];
        token.kind = rest;
        token.value = String::from(value);
        token.span.start += 1;
        token.column += 1;
        self.last_end = token.span.start;
        Ok(())
    }

    /// Whether the current token begins with `>`.
    pub fn at_gt(&self) -> bool {
        self.current_token().is_one_of_many(&[
            TokenKind::Greater,
            TokenKind::Shr,
            TokenKind::GreaterEquals,
            TokenKind::ShrEquals,
        ])
    }

    /// Builds an error for the current token. At `EOF` the error says what
    /// was expected instead.
    pub fn unexpected(&self, message: &str) -> Error {
        let token = self.current_token();
        let error = match token.kind {
            TokenKind::EOF => ErrorImpl::UnexpectedEof {
                expected: message.trim_start_matches("expected ").to_string(),
            },
            _ => ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: message.to_string(),
            },
        };
        Error::new(error, token.span)
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Start offset of the current token.
    pub fn start(&self) -> u32 {
        self.current_token().span.start
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.last_end.max(start))
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn no_struct(&self) -> bool {
        self.no_struct
    }

    /// Runs `parse` one nesting level deeper, failing with a
    /// `RecursionLimit` error once the configured depth is exceeded.
    pub fn with_depth<T>(
        &mut self,
        parse: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.descend()?;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Counts one more level of nesting, failing once the limit is reached.
    pub fn descend(&mut self) -> Result<(), Error> {
        if self.depth >= self.max_depth {
            return Err(Error::new(
                ErrorImpl::RecursionLimit {
                    limit: self.max_depth,
                },
                self.current_token().span,
            ));
        }

        self.depth += 1;
        Ok(())
    }

    /// Runs `parse` and releases every level it took with [`Parser::descend`].
    pub fn with_chain<T>(
        &mut self,
        parse: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let depth = self.depth;
        let result = parse(self);
        self.depth = depth;
        result
    }

    /// Runs `parse` with the struct-literal restriction set to `no_struct`,
    /// restoring the previous setting afterwards.
    pub fn with_restriction<T>(
        &mut self,
        no_struct: bool,
        parse: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let previous = self.no_struct;
        self.no_struct = no_struct;
        let result = parse(self);
        self.no_struct = previous;
        result
    }

    pub fn report(&mut self, error: Error) {
        debug!(error = %error, "syntax error");
        self.errors.push(error);
    }

    /// Skips to a safe boundary after a construct starting at token index
    /// `start` failed, returning the span of everything consumed for it.
    ///
    /// Stops after a `;` or after the `}` (and any `;` right behind it)
    /// closing a brace the construct opened. Stops before the `}` of the
    /// enclosing scope, an item keyword or (in blocks) a statement keyword.
    /// Always consumes at least one token unless it sits at `EOF` or before
    /// the enclosing `}`.
    pub fn recover(&mut self, start: usize, scope: RecoveryScope) -> Span {
        let start_offset = self.tokens[start].span.start;
        let mut depth = self.tokens[start..self.pos]
            .iter()
            .fold(0usize, |depth, token| match token.kind {
                TokenKind::OpenCurly => depth + 1,
                TokenKind::CloseCurly => depth.saturating_sub(1),
                _ => depth,
            });
        let opened = depth > 0;
        let skip_from = self.pos;

        loop {
            let kind = self.current_token_kind();
            match kind {
                TokenKind::EOF => break,
                TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    break;
                }
                TokenKind::CloseCurly if depth == 0 => {
                    if scope == RecoveryScope::TopLevel {
                        self.advance();
                    }
                    break;
                }
                TokenKind::CloseCurly => {
                    self.advance();
                    depth -= 1;
                    if depth == 0 && opened {
                        // `match x { .. };` leaves no stray `;` behind
                        self.eat(TokenKind::Semicolon);
                        break;
                    }
                }
                TokenKind::OpenCurly => {
                    self.advance();
                    depth += 1;
                }
                _ if kind.starts_item() => break,
                TokenKind::Let | TokenKind::While | TokenKind::For
                    if depth == 0 && scope == RecoveryScope::Block =>
                {
                    break
                }
                _ => {
                    self.advance();
                }
            }
        }

        let before_scope_end = scope != RecoveryScope::TopLevel && self.at(TokenKind::CloseCurly);
        if self.pos == start && self.has_tokens() && !before_scope_end {
            self.advance();
        }

        debug!(
            skipped = self.pos - skip_from,
            scope = ?scope,
            "recovered from syntax error"
        );

        let end = if self.pos > start {
            self.last_end
        } else {
            start_offset
        };
        Span::new(start_offset, end.max(start_offset))
    }
}

/// Parses a token stream into a [`SourceFile`].
///
/// This is the main entry point for parsing. It never fails: syntax errors
/// are recorded on the result next to the lexical errors from the stream,
/// and the offending regions become `Error` nodes.
pub fn parse(stream: TokenStream, config: &ParserConfig) -> SourceFile {
    let TokenStream {
        tokens,
        trivia,
        errors: lexical_errors,
    } = stream;

    let mut parser = Parser::new(tokens.clone(), config);
    let items = parse_top_level(&mut parser);

    let end = parser.current_token().span.end;
    let mut errors = lexical_errors;
    errors.append(&mut parser.errors);

    debug!(
        file = %config.file,
        items = items.len(),
        errors = errors.len(),
        "parsed source file"
    );

    SourceFile {
        file: config.file.clone(),
        items,
        ast: parser.ast,
        span: Span::new(0, end),
        tokens,
        trivia: if config.retain_trivia { trivia } else { vec![] },
        errors,
    }
}

fn parse_top_level(parser: &mut Parser) -> Vec<ItemId> {
    let mut items = vec![];

    while parser.has_tokens() {
        let start = parser.pos();
        match parse_item(parser) {
            Ok(item) => items.push(item),
            Err(error) => {
                parser.report(error);
                let span = parser.recover(start, RecoveryScope::TopLevel);
                items.push(parser.ast.alloc_item(None, ItemKind::Error, span));
            }
        }
    }

    items
}
