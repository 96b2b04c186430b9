use crate::{
    ast::{
        ast::{Ident, IdentRole, Lit, PatId, Path},
        patterns::{PatKind, RangeEnd},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    expr::{expect_ident, is_literal, parse_lit, parse_path_segment, starts_path_segment},
    parser::Parser,
};

pub fn parse_pattern(parser: &mut Parser) -> Result<PatId, Error> {
    parser.with_depth(|parser| {
        let start = parser.start();

        let kind = match parser.current_token_kind() {
            TokenKind::Underscore => {
                parser.advance();
                PatKind::Wildcard
            }
            // the lexer already reported it
            TokenKind::Error => {
                parser.advance();
                PatKind::Error
            }
            TokenKind::Ref => {
                parser.advance();
                PatKind::Borrow(parse_pattern(parser)?)
            }
            TokenKind::Mut => {
                parser.advance();
                PatKind::Mut(parse_pattern(parser)?)
            }
            TokenKind::Ampersand => {
                parser.advance();
                PatKind::Ref(parse_pattern(parser)?)
            }
            TokenKind::Identifier if parser.peek_kind(1) == TokenKind::At => {
                let name = expect_ident(parser, IdentRole::Binding)?;
                parser.advance();
                PatKind::Bind {
                    name,
                    pat: parse_pattern(parser)?,
                }
            }
            TokenKind::Dash => {
                let (negative, lit) = parse_signed_lit(parser)?;
                maybe_range(parser, RangeEnd::Lit { negative, lit })?
            }
            kind if is_literal(kind) => {
                let (negative, lit) = parse_signed_lit(parser)?;
                maybe_range(parser, RangeEnd::Lit { negative, lit })?
            }
            kind if kind == TokenKind::ColonColon || starts_path_segment(kind) => {
                let path = parse_pattern_path(parser)?;
                if is_range_op(parser.current_token_kind()) {
                    maybe_range(parser, RangeEnd::Path(path))?
                } else {
                    match path.as_single_ident() {
                        Some(ident) => PatKind::Ident(Ident {
                            role: IdentRole::Binding,
                            ..ident.clone()
                        }),
                        None => {
                            return Err(parser.unexpected("expected `..` or `..=` after a path"))
                        }
                    }
                }
            }
            _ => return Err(parser.unexpected("expected a pattern")),
        };

        Ok(parser.ast.alloc_pat(kind, parser.span_from(start)))
    })
}

fn is_range_op(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::DotDot | TokenKind::DotDotEq)
}

/// A literal with an optional leading `-`, which only numbers accept.
fn parse_signed_lit(parser: &mut Parser) -> Result<(bool, Lit), Error> {
    let negative = parser.eat(TokenKind::Dash);
    if negative && !matches!(parser.current_token_kind(), TokenKind::Int | TokenKind::Float) {
        return Err(parser.unexpected("expected a number after `-`"));
    }
    Ok((negative, parse_lit(parser)?))
}

/// Paths in patterns never carry generic arguments.
fn parse_pattern_path(parser: &mut Parser) -> Result<Path, Error> {
    let start = parser.start();
    let global = parser.eat(TokenKind::ColonColon);
    let mut segments = vec![parse_path_segment(parser, IdentRole::Value)?];

    while parser.at(TokenKind::ColonColon) && starts_path_segment(parser.peek_kind(1)) {
        parser.advance();
        segments.push(parse_path_segment(parser, IdentRole::Value)?);
    }

    Ok(Path {
        global,
        segments,
        span: parser.span_from(start),
    })
}

fn parse_range_end(parser: &mut Parser) -> Result<RangeEnd, Error> {
    let kind = parser.current_token_kind();
    if kind == TokenKind::Dash || is_literal(kind) {
        let (negative, lit) = parse_signed_lit(parser)?;
        Ok(RangeEnd::Lit { negative, lit })
    } else if kind == TokenKind::ColonColon || starts_path_segment(kind) {
        Ok(RangeEnd::Path(parse_pattern_path(parser)?))
    } else {
        Err(parser.unexpected("expected the end of a range pattern"))
    }
}

/// Completes `lo..hi` or `lo..=hi` if a range operator follows; otherwise
/// `lo` stands alone, which only a literal may do.
fn maybe_range(parser: &mut Parser, lo: RangeEnd) -> Result<PatKind, Error> {
    if !is_range_op(parser.current_token_kind()) {
        return match lo {
            RangeEnd::Lit { negative, lit } => Ok(PatKind::Lit { negative, lit }),
            RangeEnd::Path(_) => Err(parser.unexpected("expected `..` or `..=` after a path")),
        };
    }

    let inclusive = parser.advance().kind == TokenKind::DotDotEq;
    let hi = parse_range_end(parser)?;

    Ok(PatKind::Range { lo, inclusive, hi })
}
