//! Type parsing implementation.
//!
//! This module handles parsing of type annotations and type expressions.
//! It supports:
//!
//! - Primitive types, unit `()` and the never type `!`
//! - Tuple types `(T, U)` and function types `(T, U) -> R`
//! - Slice `[T]` and array `[T; N]` types
//! - Reference `&T` and mutable `mut T` wrappers
//! - Paths and generic instantiations `a::B<T>`
//!
//! Similar to expression parsing, dispatch goes through a NUD table keyed
//! by the first token.

use crate::{
    ast::{
        ast::{IdentRole, Path, PathSegment, PathSegmentKind, TypeId},
        types::{PrimType, TypeKind},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_expr, parse_path_segment, starts_path_segment},
    item::parse_gen_args,
    lookups::BindingPower,
    parser::Parser,
};

pub fn parse_type(parser: &mut Parser) -> Result<TypeId, Error> {
    parser.with_depth(|parser| {
        let token_kind = parser.current_token_kind();
        match parser.lookups().type_nud.get(&token_kind) {
            Some(nud) => nud(parser),
            None => Err(parser.unexpected("expected a type")),
        }
    })
}

pub fn parse_prim_type(parser: &mut Parser) -> Result<TypeId, Error> {
    if parser.peek_kind(1) == TokenKind::ColonColon {
        return parse_path_type(parser);
    }

    let token = parser.expect(TokenKind::Prim)?;
    match PrimType::from_name(&token.value) {
        Some(prim) => Ok(parser.ast.alloc_type(TypeKind::Prim(prim), token.span)),
        None => Err(parser.unexpected("expected a primitive type")),
    }
}

/// Parses a path in type position, where `<` directly after a segment
/// opens generic arguments (`::<` is accepted too).
pub fn parse_type_path(parser: &mut Parser) -> Result<Path, Error> {
    let start = parser.start();
    let global = parser.eat(TokenKind::ColonColon);
    let mut segments: Vec<PathSegment> = vec![];

    loop {
        let mut segment = parse_path_segment(parser, IdentRole::Type)?;

        if parser.at(TokenKind::ColonColon) && parser.peek_kind(1) == TokenKind::Less {
            parser.advance();
        }
        if parser.at(TokenKind::Less) {
            let gen_args = parse_gen_args(parser)?;
            segment.span = segment.span.to(gen_args.span);
            segment.gen_args = Some(gen_args);
        }
        segments.push(segment);

        if parser.at(TokenKind::ColonColon) && starts_path_segment(parser.peek_kind(1)) {
            parser.advance();
        } else {
            break;
        }
    }

    let last = segments.len() - 1;
    for segment in &mut segments[..last] {
        if let PathSegmentKind::Ident(ident) = &mut segment.kind {
            ident.role = IdentRole::Module;
        }
    }

    Ok(Path {
        global,
        segments,
        span: parser.span_from(start),
    })
}

pub fn parse_path_type(parser: &mut Parser) -> Result<TypeId, Error> {
    let mut path = parse_type_path(parser)?;
    let span = path.span;

    let gen_args = path
        .segments
        .last_mut()
        .and_then(|segment| segment.gen_args.take());

    let kind = match gen_args {
        Some(gen_args) => {
            if let Some(segment) = path.segments.last_mut() {
                segment.span.end = gen_args.span.start;
            }
            path.span.end = gen_args.span.start;
            TypeKind::Generic { path, gen_args }
        }
        None => TypeKind::Path(path),
    };

    Ok(parser.ast.alloc_type(kind, span))
}

/// `()`, `(T)`, `(T, U)`, or a function type when `->` follows.
pub fn parse_paren_type(parser: &mut Parser) -> Result<TypeId, Error> {
    let start = parser.expect(TokenKind::OpenParen)?.span.start;

    let mut elements = vec![];
    while !parser.at(TokenKind::CloseParen) {
        elements.push(parse_type(parser)?);
        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    let kind = if parser.eat(TokenKind::Arrow) {
        let ret = parse_type(parser)?;
        TypeKind::Func {
            params: elements,
            ret,
        }
    } else if elements.is_empty() {
        TypeKind::Unit
    } else {
        TypeKind::Tuple(elements)
    };

    Ok(parser.ast.alloc_type(kind, parser.span_from(start)))
}

/// `[T]` or `[T; len]`, where the length is any expression.
pub fn parse_bracket_type(parser: &mut Parser) -> Result<TypeId, Error> {
    let start = parser.expect(TokenKind::OpenBracket)?.span.start;
    let elem = parse_type(parser)?;

    let kind = if parser.eat(TokenKind::Semicolon) {
        let len = parser.with_restriction(false, |parser| {
            parse_expr(parser, BindingPower::Default)
        })?;
        TypeKind::Array { elem, len }
    } else {
        TypeKind::Slice(elem)
    };
    parser.expect(TokenKind::CloseBracket)?;

    Ok(parser.ast.alloc_type(kind, parser.span_from(start)))
}

pub fn parse_ref_type(parser: &mut Parser) -> Result<TypeId, Error> {
    let start = parser.expect(TokenKind::Ampersand)?.span.start;
    let inner = parse_type(parser)?;
    Ok(parser
        .ast
        .alloc_type(TypeKind::Ref(inner), parser.span_from(start)))
}

pub fn parse_mut_type(parser: &mut Parser) -> Result<TypeId, Error> {
    let start = parser.expect(TokenKind::Mut)?.span.start;
    let inner = parse_type(parser)?;
    Ok(parser
        .ast
        .alloc_type(TypeKind::Mut(inner), parser.span_from(start)))
}

pub fn parse_never_type(parser: &mut Parser) -> Result<TypeId, Error> {
    let span = parser.expect(TokenKind::Not)?.span;
    Ok(parser.ast.alloc_type(TypeKind::Never, span))
}

/// A lexical error token in type position, already reported by the lexer.
pub fn parse_error_type(parser: &mut Parser) -> Result<TypeId, Error> {
    let span = parser.advance().span;
    Ok(parser.ast.alloc_type(TypeKind::Error, span))
}
