//! Item parsing: declarations dispatched on their leading keyword, their
//! generic parameter lists and use-trees.

use tracing::trace;

use crate::{
    ast::{
        ast::{Ident, IdentRole, ItemId, OptBody, Path},
        expressions::ExprKind,
        items::{
            Bound, Field, FuncBody, GenArg, GenArgs, GenParam, GenParams, ItemKind, Param,
            StructBody, TupleField, UseTree, UseTreeKind, Variant, VariantBody,
        },
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    expr::{
        expect_ident, is_literal, parse_expr, parse_lit, parse_path_segment, starts_path_segment,
    },
    lookups::BindingPower,
    parser::{Parser, RecoveryScope},
    patterns::parse_pattern,
    stmt::parse_block,
    types::parse_type,
};

/// `pub? item`
pub fn parse_item(parser: &mut Parser) -> Result<ItemId, Error> {
    parser.with_depth(|parser| {
        let start = parser.start();
        let vis = if parser.at(TokenKind::Pub) {
            Some(parser.advance().span)
        } else {
            None
        };

        let token_kind = parser.current_token_kind();
        if token_kind == TokenKind::Error {
            // already reported by the lexer, so skip the run without a
            // second diagnostic
            while parser.at(TokenKind::Error) {
                parser.advance();
            }
            return Ok(parser
                .ast
                .alloc_item(vis, ItemKind::Error, parser.span_from(start)));
        }

        let handler = match parser.lookups().item.get(&token_kind) {
            Some(handler) => *handler,
            None => return Err(parser.unexpected("expected an item")),
        };

        trace!(token = %token_kind, "item");
        let kind = handler(parser)?;
        Ok(parser.ast.alloc_item(vis, kind, parser.span_from(start)))
    })
}

/// `{ item* }` inside `impl`, `trait` and `mod`.
fn parse_member_list(parser: &mut Parser) -> Result<Vec<ItemId>, Error> {
    parser.expect(TokenKind::OpenCurly)?;
    let mut items = vec![];

    while !parser.at(TokenKind::CloseCurly) && parser.has_tokens() {
        let start = parser.pos();
        match parse_item(parser) {
            Ok(item) => items.push(item),
            Err(error) => {
                parser.report(error);
                let span = parser.recover(start, RecoveryScope::Members);
                items.push(parser.ast.alloc_item(None, ItemKind::Error, span));
            }
        }
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(items)
}

fn parse_lifetime(parser: &mut Parser) -> Result<Ident, Error> {
    let start = parser.expect(TokenKind::Quote)?.span.start;
    let mut name = expect_ident(parser, IdentRole::Lifetime)?;
    name.span = parser.span_from(start);
    Ok(name)
}

/// `bound (+ bound)*`, each a type or a lifetime.
fn parse_bounds(parser: &mut Parser) -> Result<Vec<Bound>, Error> {
    let mut bounds = vec![];

    loop {
        if parser.at(TokenKind::Quote) {
            bounds.push(Bound::Lifetime(parse_lifetime(parser)?));
        } else {
            bounds.push(Bound::Type(parse_type(parser)?));
        }
        if !parser.eat(TokenKind::Plus) {
            break;
        }
    }

    Ok(bounds)
}

fn parse_opt_bounds(parser: &mut Parser) -> Result<Vec<Bound>, Error> {
    if parser.eat(TokenKind::Colon) {
        parse_bounds(parser)
    } else {
        Ok(vec![])
    }
}

/// `<'a, T: Bound = Default, const N: int = 1>`, if present.
pub fn parse_opt_gen_params(parser: &mut Parser) -> Result<Option<GenParams>, Error> {
    if !parser.at(TokenKind::Less) {
        return Ok(None);
    }

    let start = parser.expect(TokenKind::Less)?.span.start;
    let mut params = vec![];

    while !parser.at_gt() {
        let param = match parser.current_token_kind() {
            TokenKind::Quote => GenParam::Lifetime(parse_lifetime(parser)?),
            TokenKind::Const => {
                parser.advance();
                let name = expect_ident(parser, IdentRole::Value)?;
                parser.expect(TokenKind::Colon)?;
                let ty = parse_type(parser)?;
                // above `cmp`, so the closing `>` is never a comparison
                let default = if parser.eat(TokenKind::Assignment) {
                    Some(parse_expr(parser, BindingPower::Comparison)?)
                } else {
                    None
                };
                GenParam::Const { name, ty, default }
            }
            TokenKind::Identifier => {
                let name = expect_ident(parser, IdentRole::Type)?;
                let bounds = parse_opt_bounds(parser)?;
                let default = if parser.eat(TokenKind::Assignment) {
                    Some(parse_type(parser)?)
                } else {
                    None
                };
                GenParam::Type {
                    name,
                    bounds,
                    default,
                }
            }
            _ => return Err(parser.unexpected("expected a generic parameter")),
        };
        params.push(param);

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect_gt()?;

    Ok(Some(GenParams {
        params,
        span: parser.span_from(start),
    }))
}

/// `<T, 'a, 1, {N + 1}, Item = T>`
pub fn parse_gen_args(parser: &mut Parser) -> Result<GenArgs, Error> {
    let start = parser.expect(TokenKind::Less)?.span.start;

    let args = parser.with_restriction(false, |parser| {
        let mut args = vec![];

        while !parser.at_gt() {
            let kind = parser.current_token_kind();
            let arg = if kind == TokenKind::Quote {
                GenArg::Lifetime(parse_lifetime(parser)?)
            } else if is_literal(kind) {
                GenArg::Lit(parse_lit(parser)?)
            } else if kind == TokenKind::OpenCurly {
                let block = parse_block(parser)?;
                let span = block.span;
                GenArg::Block(parser.ast.alloc_expr(ExprKind::Block(block), span))
            } else if kind == TokenKind::Identifier && parser.peek_kind(1) == TokenKind::Assignment
            {
                let name = expect_ident(parser, IdentRole::Type)?;
                parser.advance();
                GenArg::Binding {
                    name,
                    ty: parse_type(parser)?,
                }
            } else {
                GenArg::Type(parse_type(parser)?)
            };
            args.push(arg);

            if !parser.eat(TokenKind::Comma) {
                break;
            }
        }

        Ok(args)
    })?;

    parser.expect_gt()?;

    Ok(GenArgs {
        args,
        span: parser.span_from(start),
    })
}

/// `(mut? pat (: Type)?, ...)`, for functions and lambdas.
pub fn parse_params(parser: &mut Parser) -> Result<Vec<Param>, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let mut params = vec![];

    while !parser.at(TokenKind::CloseParen) {
        let start = parser.start();
        let mutable = parser.eat(TokenKind::Mut);
        let pat = parse_pattern(parser)?;
        let ty = if parser.eat(TokenKind::Colon) {
            Some(parse_type(parser)?)
        } else {
            None
        };
        params.push(Param {
            mutable,
            pat,
            ty,
            span: parser.span_from(start),
        });

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(params)
}

/// `func name<..>? (params)? (: Type)? (; | = expr ; | block)`
pub fn parse_func_item(parser: &mut Parser) -> Result<ItemKind, Error> {
    parser.expect(TokenKind::Func)?;
    let name = expect_ident(parser, IdentRole::Value)?;
    let gen_params = parse_opt_gen_params(parser)?;

    let params = if parser.at(TokenKind::OpenParen) {
        Some(parse_params(parser)?)
    } else {
        None
    };

    let return_type = if parser.eat(TokenKind::Colon) {
        Some(parse_type(parser)?)
    } else {
        None
    };

    let body = match parser.current_token_kind() {
        TokenKind::Semicolon => {
            parser.advance();
            OptBody::NoBody
        }
        TokenKind::Assignment => {
            parser.advance();
            let expr = parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::Semicolon)?;
            OptBody::Body(FuncBody::Expr(expr))
        }
        TokenKind::OpenCurly => OptBody::Body(FuncBody::Block(parse_block(parser)?)),
        _ => return Err(parser.unexpected("expected `;`, `=` or a function body")),
    };

    Ok(ItemKind::Func {
        name,
        gen_params,
        params,
        return_type,
        body,
    })
}

/// `{ pub? name: Type, ... }`
fn parse_field_list(parser: &mut Parser) -> Result<Vec<Field>, Error> {
    parser.expect(TokenKind::OpenCurly)?;
    let mut fields = vec![];

    while !parser.at(TokenKind::CloseCurly) {
        let start = parser.start();
        let vis = if parser.at(TokenKind::Pub) {
            Some(parser.advance().span)
        } else {
            None
        };
        let name = expect_ident(parser, IdentRole::Field)?;
        parser.expect(TokenKind::Colon)?;
        let ty = parse_type(parser)?;
        fields.push(Field {
            vis,
            name,
            ty,
            span: parser.span_from(start),
        });

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(fields)
}

/// `( pub? Type, ... )`
fn parse_tuple_field_list(parser: &mut Parser) -> Result<Vec<TupleField>, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let mut fields = vec![];

    while !parser.at(TokenKind::CloseParen) {
        let start = parser.start();
        let vis = if parser.at(TokenKind::Pub) {
            Some(parser.advance().span)
        } else {
            None
        };
        let ty = parse_type(parser)?;
        fields.push(TupleField {
            vis,
            index: fields.len(),
            ty,
            span: parser.span_from(start),
        });

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(fields)
}

/// `enum Name<..>? { Variant, Variant { .. }, Variant(..), Variant = expr }`
pub fn parse_enum_item(parser: &mut Parser) -> Result<ItemKind, Error> {
    parser.expect(TokenKind::Enum)?;
    let name = expect_ident(parser, IdentRole::Type)?;
    let gen_params = parse_opt_gen_params(parser)?;

    parser.expect(TokenKind::OpenCurly)?;
    let mut variants = vec![];

    while !parser.at(TokenKind::CloseCurly) {
        let start = parser.start();
        let name = expect_ident(parser, IdentRole::Type)?;
        let body = match parser.current_token_kind() {
            TokenKind::OpenCurly => VariantBody::Fields(parse_field_list(parser)?),
            TokenKind::OpenParen => VariantBody::Tuple(parse_tuple_field_list(parser)?),
            _ => VariantBody::Unit,
        };
        let discriminant = if parser.eat(TokenKind::Assignment) {
            Some(parse_expr(parser, BindingPower::Default)?)
        } else {
            None
        };
        variants.push(Variant {
            name,
            body,
            discriminant,
            span: parser.span_from(start),
        });

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(ItemKind::Enum {
        name,
        gen_params,
        variants,
    })
}

/// `impl<..>? (Trait for)? Type { items }`
pub fn parse_impl_item(parser: &mut Parser) -> Result<ItemKind, Error> {
    parser.expect(TokenKind::Impl)?;
    let gen_params = parse_opt_gen_params(parser)?;

    let first = parse_type(parser)?;
    let (trait_, ty) = if parser.eat(TokenKind::For) {
        (Some(first), parse_type(parser)?)
    } else {
        (None, first)
    };

    let body = parse_member_list(parser)?;

    Ok(ItemKind::Impl {
        gen_params,
        trait_,
        ty,
        body,
    })
}

/// `type Name<..>? = Type;` is an alias; `type Name (: bounds)?;` declares
/// an associated type.
pub fn parse_type_item(parser: &mut Parser) -> Result<ItemKind, Error> {
    parser.expect(TokenKind::Type)?;
    let name = expect_ident(parser, IdentRole::Type)?;
    let gen_params = parse_opt_gen_params(parser)?;

    if parser.eat(TokenKind::Assignment) {
        let ty = parse_type(parser)?;
        parser.expect(TokenKind::Semicolon)?;
        return Ok(ItemKind::TypeAlias {
            name,
            gen_params,
            ty,
        });
    }

    if gen_params.is_some() {
        return Err(parser.unexpected("expected `=` after generic parameters"));
    }

    let bounds = parse_opt_bounds(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(ItemKind::AssocType { name, bounds })
}

/// `mod name;` or `mod name { items }`
pub fn parse_mod_item(parser: &mut Parser) -> Result<ItemKind, Error> {
    parser.expect(TokenKind::Mod)?;
    let name = expect_ident(parser, IdentRole::Module)?;

    let body = if parser.eat(TokenKind::Semicolon) {
        OptBody::NoBody
    } else {
        OptBody::Body(parse_member_list(parser)?)
    };

    Ok(ItemKind::Mod { name, body })
}

/// `struct Name<..>? (; | { fields } | ( fields ) ;)`
pub fn parse_struct_item(parser: &mut Parser) -> Result<ItemKind, Error> {
    parser.expect(TokenKind::Struct)?;
    let name = expect_ident(parser, IdentRole::Type)?;
    let gen_params = parse_opt_gen_params(parser)?;

    let body = match parser.current_token_kind() {
        TokenKind::Semicolon => {
            parser.advance();
            OptBody::NoBody
        }
        TokenKind::OpenCurly => OptBody::Body(StructBody::Fields(parse_field_list(parser)?)),
        TokenKind::OpenParen => {
            let fields = parse_tuple_field_list(parser)?;
            parser.expect(TokenKind::Semicolon)?;
            OptBody::Body(StructBody::Tuple(fields))
        }
        _ => return Err(parser.unexpected("expected `;`, `{` or `(` after the struct name")),
    };

    Ok(ItemKind::Struct {
        name,
        gen_params,
        body,
    })
}

/// `use tree;`
pub fn parse_use_item(parser: &mut Parser) -> Result<ItemKind, Error> {
    parser.expect(TokenKind::Use)?;
    let tree = parse_use_tree(parser)?;
    parser.expect(TokenKind::Semicolon)?;
    Ok(ItemKind::Use(tree))
}

/// `trait Name<..>? (: bounds)? { items }`
pub fn parse_trait_item(parser: &mut Parser) -> Result<ItemKind, Error> {
    parser.expect(TokenKind::Trait)?;
    let name = expect_ident(parser, IdentRole::Type)?;
    let gen_params = parse_opt_gen_params(parser)?;
    let bounds = parse_opt_bounds(parser)?;
    let body = parse_member_list(parser)?;

    Ok(ItemKind::Trait {
        name,
        gen_params,
        bounds,
        body,
    })
}

/// A use path stops before `::{` and `::*`, which belong to the tree.
fn parse_use_path(parser: &mut Parser) -> Result<Path, Error> {
    let start = parser.start();
    let global = parser.eat(TokenKind::ColonColon);
    let mut segments = vec![parse_path_segment(parser, IdentRole::Module)?];

    while parser.at(TokenKind::ColonColon) && starts_path_segment(parser.peek_kind(1)) {
        parser.advance();
        segments.push(parse_path_segment(parser, IdentRole::Module)?);
    }

    Ok(Path {
        global,
        segments,
        span: parser.span_from(start),
    })
}

fn parse_use_list(parser: &mut Parser) -> Result<Vec<UseTree>, Error> {
    parser.expect(TokenKind::OpenCurly)?;
    let mut list = vec![];

    while !parser.at(TokenKind::CloseCurly) {
        list.push(parse_use_tree(parser)?);
        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(list)
}

/// `path`, `path as name`, `{..}`, `::{..}`, `path::{..}`, `*` or
/// `path::*`, nested to any depth.
pub fn parse_use_tree(parser: &mut Parser) -> Result<UseTree, Error> {
    parser.with_depth(|parser| {
        let start = parser.start();

        let kind = match parser.current_token_kind() {
            TokenKind::OpenCurly => UseTreeKind::List {
                global: false,
                list: parse_use_list(parser)?,
            },
            TokenKind::Star => {
                parser.advance();
                UseTreeKind::Glob(None)
            }
            TokenKind::ColonColon if parser.peek_kind(1) == TokenKind::OpenCurly => {
                parser.advance();
                UseTreeKind::List {
                    global: true,
                    list: parse_use_list(parser)?,
                }
            }
            _ => {
                let path = parse_use_path(parser)?;

                if parser.eat(TokenKind::ColonColon) {
                    match parser.current_token_kind() {
                        TokenKind::OpenCurly => UseTreeKind::PathList {
                            path,
                            list: parse_use_list(parser)?,
                        },
                        TokenKind::Star => {
                            parser.advance();
                            UseTreeKind::Glob(Some(path))
                        }
                        _ => return Err(parser.unexpected("expected `{`, `*` or a path segment")),
                    }
                } else if parser.eat(TokenKind::As) {
                    UseTreeKind::Alias {
                        path,
                        binding: expect_ident(parser, IdentRole::Binding)?,
                    }
                } else {
                    UseTreeKind::Path(path)
                }
            }
        };

        Ok(UseTree {
            kind,
            span: parser.span_from(start),
        })
    })
}
