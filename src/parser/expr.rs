use tracing::trace;

use crate::{
    ast::{
        ast::{
            ExprId, Ident, IdentRole, Lit, LitKind, OptBody, Path, PathSegment, PathSegmentKind,
        },
        expressions::{
            Arg, AssignOp, BinOp, Cond, ExprKind, FieldInit, FieldName, IfBranch, MatchArm,
            PrefixOp, TryOp,
        },
        statements::Block,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{
    item::{parse_gen_args, parse_params},
    lookups::BindingPower,
    parser::Parser,
    patterns::parse_pattern,
    stmt::parse_block,
    types::parse_type,
};

/// Suffixes a numeric literal may carry, longest first so `uint` is not
/// mistaken for `int`.
const LITERAL_SUFFIXES: [&str; 16] = [
    "isize", "usize", "i128", "u128", "uint", "i16", "i32", "i64", "u16", "u32", "u64", "f32",
    "f64", "int", "i8", "u8",
];

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<ExprId, Error> {
    parser.with_depth(|parser| {
        // First parse NUD
        let token_kind = parser.current_token_kind();
        let nud = match parser.lookups().nud.get(&token_kind) {
            Some(nud) => *nud,
            None => return Err(parser.unexpected("expected an expression")),
        };

        trace!(token = %token_kind, "nud");
        let left = nud(parser)?;
        parse_infix(parser, left, bp)
    })
}

/// Applies LED handlers to `left` while the next operator binds tighter
/// than `bp`.
///
/// Every fold nests `left` one level deeper, so each counts against the
/// recursion limit until the chain ends.
pub fn parse_infix(
    parser: &mut Parser,
    mut left: ExprId,
    bp: BindingPower,
) -> Result<ExprId, Error> {
    parser.with_chain(|parser| {
        loop {
            let token_kind = parser.current_token_kind();
            let led = match parser.lookups().led.get(&token_kind) {
                Some(led) => *led,
                None => break,
            };
            let operator_bp = parser.lookups().bp(token_kind);
            if operator_bp <= bp {
                break;
            }

            trace!(token = %token_kind, bp = ?operator_bp, "led");
            parser.descend()?;
            left = led(parser, left, operator_bp)?;
        }

        Ok(left)
    })
}

/// Parses an expression in an `if`/`while`/`for`/`match` head, where a
/// path followed by `{` is not a struct literal.
pub fn parse_head_expr(parser: &mut Parser, bp: BindingPower) -> Result<ExprId, Error> {
    parser.with_restriction(true, |parser| parse_expr(parser, bp))
}

fn span_of(parser: &Parser, expr: ExprId) -> Span {
    parser.ast.expr(expr).span
}

/// Splits a numeric literal's text into its digits and type suffix.
fn split_suffix(text: &str, is_float: bool) -> (String, Option<String>) {
    let is_hex = text.starts_with("0x");
    for suffix in LITERAL_SUFFIXES {
        // hex digits swallow `f32`/`f64`, so a hex literal never has one
        if is_hex && suffix.starts_with('f') {
            continue;
        }
        if is_float && !suffix.starts_with('f') {
            continue;
        }
        if text.len() > suffix.len() && text.ends_with(suffix) {
            let digits = &text[..text.len() - suffix.len()];
            return (digits.to_string(), Some(suffix.to_string()));
        }
    }
    (text.to_string(), None)
}

/// Builds a literal from a literal token, or `None` for any other token.
pub fn lit_from_token(token: &Token) -> Option<Lit> {
    let (kind, text, suffix) = match token.kind {
        TokenKind::True | TokenKind::False => (LitKind::Bool, token.value.clone(), None),
        TokenKind::Int => {
            let (text, suffix) = split_suffix(&token.value, false);
            (LitKind::Int, text, suffix)
        }
        TokenKind::Float => {
            let (text, suffix) = split_suffix(&token.value, true);
            (LitKind::Float, text, suffix)
        }
        TokenKind::Char => (LitKind::Char, token.value.clone(), None),
        TokenKind::String => (LitKind::Str, token.value.clone(), None),
        _ => return None,
    };

    Some(Lit {
        kind,
        text,
        suffix,
        span: token.span,
    })
}

pub fn is_literal(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Int
            | TokenKind::Float
            | TokenKind::Char
            | TokenKind::String
            | TokenKind::True
            | TokenKind::False
    )
}

/// Consumes the current literal token.
pub fn parse_lit(parser: &mut Parser) -> Result<Lit, Error> {
    match lit_from_token(parser.current_token()) {
        Some(lit) => {
            parser.advance();
            Ok(lit)
        }
        None => Err(parser.unexpected("expected a literal")),
    }
}

pub fn parse_literal_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let lit = parse_lit(parser)?;
    let span = lit.span;
    Ok(parser.ast.alloc_expr(ExprKind::Lit(lit), span))
}

/// A lexical error token in expression position. The lexer already
/// reported it.
pub fn parse_error_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let span = parser.advance().span;
    Ok(parser.ast.alloc_expr(ExprKind::Error, span))
}

pub fn expect_ident(parser: &mut Parser, role: IdentRole) -> Result<Ident, Error> {
    let message = match role {
        IdentRole::Type => "expected a type name",
        IdentRole::Field => "expected a field name",
        IdentRole::Label => "expected a label",
        IdentRole::Lifetime => "expected a lifetime name",
        IdentRole::Module => "expected a module name",
        IdentRole::Value | IdentRole::Binding => "expected an identifier",
    };
    if !parser.at(TokenKind::Identifier) {
        return Err(parser.unexpected(message));
    }
    Ok(Ident::new(parser.advance(), role))
}

pub fn starts_path_segment(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier
            | TokenKind::SelfValue
            | TokenKind::Super
            | TokenKind::Party
            | TokenKind::Prim
    )
}

pub fn parse_path_segment(parser: &mut Parser, role: IdentRole) -> Result<PathSegment, Error> {
    let token = parser.current_token().clone();
    let kind = match token.kind {
        TokenKind::Identifier => PathSegmentKind::Ident(Ident::new(&token, role)),
        TokenKind::SelfValue => PathSegmentKind::SelfValue,
        TokenKind::Super => PathSegmentKind::Super,
        TokenKind::Party => PathSegmentKind::Party,
        TokenKind::Prim => PathSegmentKind::Prim(token.value.clone()),
        _ => return Err(parser.unexpected("expected a path segment")),
    };
    parser.advance();

    Ok(PathSegment {
        kind,
        gen_args: None,
        span: token.span,
    })
}

/// Parses `::? segment (:: segment | ::<args>)*`. `<` directly after `::`
/// always opens generic arguments; a bare `<` is left for the caller.
pub fn parse_expr_path(parser: &mut Parser) -> Result<Path, Error> {
    let start = parser.start();
    let global = parser.eat(TokenKind::ColonColon);
    let mut segments = vec![parse_path_segment(parser, IdentRole::Value)?];

    while parser.at(TokenKind::ColonColon) {
        match parser.peek_kind(1) {
            TokenKind::Less => {
                parser.advance();
                let gen_args = parse_gen_args(parser)?;
                if let Some(last) = segments.last_mut() {
                    last.span = last.span.to(gen_args.span);
                    last.gen_args = Some(gen_args);
                }
            }
            kind if starts_path_segment(kind) => {
                parser.advance();
                if let Some(PathSegment {
                    kind: PathSegmentKind::Ident(ident),
                    ..
                }) = segments.last_mut()
                {
                    ident.role = IdentRole::Module;
                }
                segments.push(parse_path_segment(parser, IdentRole::Value)?);
            }
            _ => break,
        }
    }

    Ok(Path {
        global,
        segments,
        span: parser.span_from(start),
    })
}

pub fn parse_path_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let mut path = parse_expr_path(parser)?;

    let names_type = matches!(
        path.segments.last(),
        Some(PathSegment {
            kind: PathSegmentKind::Ident(_),
            ..
        })
    );
    if names_type && !parser.no_struct() && parser.at(TokenKind::OpenCurly) {
        for segment in path.segments.iter_mut() {
            if let PathSegmentKind::Ident(ident) = &mut segment.kind {
                if ident.role == IdentRole::Value {
                    ident.role = IdentRole::Type;
                }
            }
        }
        return parse_struct_expr(parser, path);
    }

    let span = path.span;
    if let Some(ident) = path.as_single_ident() {
        let ident = ident.clone();
        return Ok(parser.ast.alloc_expr(ExprKind::Ident(ident), span));
    }
    Ok(parser.ast.alloc_expr(ExprKind::Path(path), span))
}

fn parse_struct_expr(parser: &mut Parser, name: Path) -> Result<ExprId, Error> {
    let start = name.span.start;
    parser.expect(TokenKind::OpenCurly)?;

    let fields = parser.with_restriction(false, |parser| {
        let mut fields = vec![];

        while !parser.at(TokenKind::CloseCurly) {
            if parser.eat(TokenKind::Ellipsis) {
                fields.push(FieldInit::Spread(parse_expr(parser, BindingPower::Default)?));
            } else {
                let name = expect_ident(parser, IdentRole::Field)?;
                if parser.eat(TokenKind::Colon) {
                    let value = parse_expr(parser, BindingPower::Default)?;
                    fields.push(FieldInit::Named { name, value });
                } else {
                    fields.push(FieldInit::Shorthand(name));
                }
            }

            if !parser.eat(TokenKind::Comma) {
                break;
            }
        }

        Ok(fields)
    })?;

    parser.expect(TokenKind::CloseCurly)?;

    Ok(parser
        .ast
        .alloc_expr(ExprKind::Struct { name, fields }, parser.span_from(start)))
}

/// `()`, `(expr)` or a tuple `(a, b)`. A single element needs a trailing
/// comma to be a tuple.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let start = parser.expect(TokenKind::OpenParen)?.span.start;

    if parser.eat(TokenKind::CloseParen) {
        return Ok(parser.ast.alloc_expr(ExprKind::Unit, parser.span_from(start)));
    }

    let kind = parser.with_restriction(false, |parser| {
        let first = parse_expr(parser, BindingPower::Default)?;
        if parser.eat(TokenKind::CloseParen) {
            return Ok(ExprKind::Paren(first));
        }

        parser.expect(TokenKind::Comma)?;
        let mut elements = vec![first];
        while !parser.at(TokenKind::CloseParen) {
            elements.push(parse_expr(parser, BindingPower::Default)?);
            if !parser.eat(TokenKind::Comma) {
                break;
            }
        }
        parser.expect(TokenKind::CloseParen)?;

        Ok(ExprKind::Tuple(elements))
    })?;

    Ok(parser.ast.alloc_expr(kind, parser.span_from(start)))
}

pub fn parse_block_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let block = parse_block(parser)?;
    let span = block.span;
    Ok(parser.ast.alloc_expr(ExprKind::Block(block), span))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let operator_token = parser.advance().clone();
    let operand = parse_expr(parser, BindingPower::Unary)?;
    let span = operator_token.span.to(span_of(parser, operand));

    let op = match operator_token.kind {
        TokenKind::Dash => PrefixOp::Neg,
        TokenKind::Not => PrefixOp::Not,
        TokenKind::StarStar => {
            // `**x` dereferences twice
            let inner_span = Span::new(operator_token.span.start + 1, span.end);
            let inner = parser.ast.alloc_expr(
                ExprKind::Prefix {
                    op: PrefixOp::Deref,
                    operand,
                },
                inner_span,
            );
            return Ok(parser.ast.alloc_expr(
                ExprKind::Prefix {
                    op: PrefixOp::Deref,
                    operand: inner,
                },
                span,
            ));
        }
        _ => PrefixOp::Deref,
    };

    Ok(parser
        .ast
        .alloc_expr(ExprKind::Prefix { op, operand }, span))
}

/// `&expr` or `&mut expr`
pub fn parse_ref_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let start = parser.expect(TokenKind::Ampersand)?.span.start;
    let mutable = parser.eat(TokenKind::Mut);
    let value = parse_expr(parser, BindingPower::Unary)?;

    Ok(parser
        .ast
        .alloc_expr(ExprKind::Ref { mutable, value }, parser.span_from(start)))
}

/// `\(params) -> body`
pub fn parse_lambda_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let start = parser.expect(TokenKind::Backslash)?.span.start;
    let params = parse_params(parser)?;
    parser.expect(TokenKind::Arrow)?;
    let body = parse_expr(parser, BindingPower::Default)?;

    Ok(parser
        .ast
        .alloc_expr(ExprKind::Lambda { params, body }, parser.span_from(start)))
}

fn binary_op(kind: TokenKind) -> Option<BinOp> {
    let op = match kind {
        TokenKind::Pipe => BinOp::Pipe,
        TokenKind::DotDot => BinOp::Range,
        TokenKind::DotDotEq => BinOp::RangeInclusive,
        TokenKind::Or => BinOp::Or,
        TokenKind::And => BinOp::And,
        TokenKind::Equals => BinOp::Eq,
        TokenKind::NotEquals => BinOp::NotEq,
        TokenKind::StrictEq => BinOp::StrictEq,
        TokenKind::StrictNotEq => BinOp::StrictNotEq,
        TokenKind::Less => BinOp::Less,
        TokenKind::LessEquals => BinOp::LessEq,
        TokenKind::Greater => BinOp::Greater,
        TokenKind::GreaterEquals => BinOp::GreaterEq,
        TokenKind::Spaceship => BinOp::Spaceship,
        TokenKind::Bar => BinOp::BitOr,
        TokenKind::Caret => BinOp::Xor,
        TokenKind::Ampersand => BinOp::BitAnd,
        TokenKind::Shl => BinOp::Shl,
        TokenKind::Shr => BinOp::Shr,
        TokenKind::Plus => BinOp::Add,
        TokenKind::Dash => BinOp::Sub,
        TokenKind::Star => BinOp::Mul,
        TokenKind::Slash => BinOp::Div,
        TokenKind::Percent => BinOp::Rem,
        TokenKind::StarStar => BinOp::Pow,
        _ => return None,
    };
    Some(op)
}

fn assign_op(kind: TokenKind) -> Option<AssignOp> {
    let op = match kind {
        TokenKind::Assignment => AssignOp::Assign,
        TokenKind::PlusEquals => AssignOp::Add,
        TokenKind::MinusEquals => AssignOp::Sub,
        TokenKind::StarEquals => AssignOp::Mul,
        TokenKind::SlashEquals => AssignOp::Div,
        TokenKind::PercentEquals => AssignOp::Rem,
        TokenKind::StarStarEquals => AssignOp::Pow,
        TokenKind::AmpersandEquals => AssignOp::BitAnd,
        TokenKind::BarEquals => AssignOp::BitOr,
        TokenKind::CaretEquals => AssignOp::Xor,
        TokenKind::ShlEquals => AssignOp::Shl,
        TokenKind::ShrEquals => AssignOp::Shr,
        _ => return None,
    };
    Some(op)
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: ExprId,
    bp: BindingPower,
) -> Result<ExprId, Error> {
    let operator_token = parser.advance().clone();
    let op = match binary_op(operator_token.kind) {
        Some(op) => op,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span,
            ))
        }
    };

    // the operator's own level as minimum makes every level left-associative
    let right = parse_expr(parser, bp)?;
    let span = span_of(parser, left).to(span_of(parser, right));

    Ok(parser.ast.alloc_expr(
        ExprKind::Infix {
            lhs: left,
            op,
            rhs: right,
        },
        span,
    ))
}

/// Assignment shares the left-associative scheme: `a = b = c` groups as
/// `(a = b) = c`.
pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: ExprId,
    bp: BindingPower,
) -> Result<ExprId, Error> {
    let operator_token = parser.advance().clone();
    let op = match assign_op(operator_token.kind) {
        Some(op) => op,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span,
            ))
        }
    };

    let rhs = parse_expr(parser, bp)?;
    let span = span_of(parser, left).to(span_of(parser, rhs));

    Ok(parser
        .ast
        .alloc_expr(ExprKind::Assign { lhs: left, op, rhs }, span))
}

/// `expr as Type`
pub fn parse_cast_expr(
    parser: &mut Parser,
    left: ExprId,
    _bp: BindingPower,
) -> Result<ExprId, Error> {
    parser.expect(TokenKind::As)?;
    let ty = parse_type(parser)?;
    let span = span_of(parser, left).to(parser.ast.ty(ty).span);

    Ok(parser
        .ast
        .alloc_expr(ExprKind::Cast { expr: left, ty }, span))
}

/// Postfix `?` or `!`.
pub fn parse_try_expr(
    parser: &mut Parser,
    left: ExprId,
    _bp: BindingPower,
) -> Result<ExprId, Error> {
    let operator_token = parser.advance().clone();
    let op = if operator_token.kind == TokenKind::Question {
        TryOp::Question
    } else {
        TryOp::Bang
    };
    let span = span_of(parser, left).to(operator_token.span);

    Ok(parser.ast.alloc_expr(ExprKind::Try { expr: left, op }, span))
}

/// `func(args)`, where an argument may be named: `f(x: 1, 2)`.
pub fn parse_call_expr(
    parser: &mut Parser,
    left: ExprId,
    _bp: BindingPower,
) -> Result<ExprId, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let args = parser.with_restriction(false, |parser| {
        let mut args = vec![];

        while !parser.at(TokenKind::CloseParen) {
            let name = if parser.at(TokenKind::Identifier)
                && parser.peek_kind(1) == TokenKind::Colon
            {
                let name = expect_ident(parser, IdentRole::Binding)?;
                parser.advance();
                Some(name)
            } else {
                None
            };
            let value = parse_expr(parser, BindingPower::Default)?;
            args.push(Arg { name, value });

            if !parser.eat(TokenKind::Comma) {
                break;
            }
        }

        Ok(args)
    })?;

    parser.expect(TokenKind::CloseParen)?;
    let span = parser.span_from(span_of(parser, left).start);

    Ok(parser
        .ast
        .alloc_expr(ExprKind::Call { func: left, args }, span))
}

fn parse_tuple_index(text: &str, token: &Token) -> Result<u32, Error> {
    let invalid = || {
        Error::new(
            ErrorImpl::InvalidTupleIndex {
                token: token.value.clone(),
            },
            token.span,
        )
    };
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    text.parse().map_err(|_| invalid())
}

/// `.name`, `.0`, and `.0.1`, which the lexer hands over as one float.
pub fn parse_field_expr(
    parser: &mut Parser,
    left: ExprId,
    _bp: BindingPower,
) -> Result<ExprId, Error> {
    parser.expect(TokenKind::Dot)?;
    let start = span_of(parser, left).start;
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Identifier => {
            let field = FieldName::Named(expect_ident(parser, IdentRole::Field)?);
            Ok(parser
                .ast
                .alloc_expr(ExprKind::Field { expr: left, field }, parser.span_from(start)))
        }
        TokenKind::Int => {
            let index = parse_tuple_index(&token.value, &token)?;
            parser.advance();
            let field = FieldName::Index {
                index,
                span: token.span,
            };
            Ok(parser
                .ast
                .alloc_expr(ExprKind::Field { expr: left, field }, parser.span_from(start)))
        }
        TokenKind::Float => {
            let (first, second) = match token.value.split_once('.') {
                Some(parts) => parts,
                None => return Err(parser.unexpected("expected a tuple index")),
            };
            let first_index = parse_tuple_index(first, &token)?;
            let second_index = parse_tuple_index(second, &token)?;
            parser.advance();

            let dot = token.span.start + first.len() as u32;
            let first_span = Span::new(token.span.start, dot);
            let inner = parser.ast.alloc_expr(
                ExprKind::Field {
                    expr: left,
                    field: FieldName::Index {
                        index: first_index,
                        span: first_span,
                    },
                },
                Span::new(start, dot),
            );
            let field = FieldName::Index {
                index: second_index,
                span: Span::new(dot + 1, token.span.end),
            };
            Ok(parser
                .ast
                .alloc_expr(ExprKind::Field { expr: inner, field }, parser.span_from(start)))
        }
        _ => Err(parser.unexpected("expected a field name or tuple index")),
    }
}

/// `let pat = expr` or a plain expression, in struct-restricted position.
pub fn parse_cond(parser: &mut Parser) -> Result<Cond, Error> {
    if parser.eat(TokenKind::Let) {
        let pat = parse_pattern(parser)?;
        parser.expect(TokenKind::Assignment)?;
        let expr = parse_head_expr(parser, BindingPower::Assignment)?;
        Ok(Cond::Let { pat, expr })
    } else {
        Ok(Cond::Expr(parse_head_expr(parser, BindingPower::Default)?))
    }
}

/// `;` for a body-less form, otherwise a block.
pub fn parse_opt_block(parser: &mut Parser) -> Result<OptBody<Block>, Error> {
    if parser.eat(TokenKind::Semicolon) {
        Ok(OptBody::NoBody)
    } else {
        Ok(OptBody::Body(parse_block(parser)?))
    }
}

fn parse_if_branch(parser: &mut Parser) -> Result<IfBranch, Error> {
    // `if` or `elif`
    let start = parser.advance().span.start;
    let cond = parse_cond(parser)?;
    let body = parse_opt_block(parser)?;

    Ok(IfBranch {
        cond,
        body,
        span: parser.span_from(start),
    })
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let start = parser.start();
    let mut branches = vec![parse_if_branch(parser)?];

    while parser.at(TokenKind::Elif) {
        branches.push(parse_if_branch(parser)?);
    }

    let else_block = if parser.eat(TokenKind::Else) {
        Some(parse_block(parser)?)
    } else {
        None
    };

    Ok(parser.ast.alloc_expr(
        ExprKind::If {
            branches,
            else_block,
        },
        parser.span_from(start),
    ))
}

fn parse_match_arm(parser: &mut Parser) -> Result<MatchArm, Error> {
    let start = parser.start();
    parser.eat(TokenKind::Bar);

    let mut pats = vec![parse_pattern(parser)?];
    while parser.eat(TokenKind::Bar) {
        pats.push(parse_pattern(parser)?);
    }

    parser.expect(TokenKind::FatArrow)?;
    let body = parse_expr(parser, BindingPower::Default)?;

    Ok(MatchArm {
        pats,
        body,
        span: parser.span_from(start),
    })
}

pub fn parse_match_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let start = parser.expect(TokenKind::Match)?.span.start;
    let scrutinee = parse_head_expr(parser, BindingPower::Default)?;

    let arms = if parser.eat(TokenKind::Semicolon) {
        OptBody::NoBody
    } else {
        parser.expect(TokenKind::OpenCurly)?;
        let arms = parser.with_restriction(false, |parser| {
            let mut arms = vec![];

            while !parser.at(TokenKind::CloseCurly) {
                let arm = parse_match_arm(parser)?;
                let ends_in_block = parser.ast.expr(arm.body).kind.is_block_like();
                arms.push(arm);

                // a comma is optional after an arm whose body ends in `}`
                if !parser.eat(TokenKind::Comma)
                    && !ends_in_block
                    && !parser.at(TokenKind::CloseCurly)
                {
                    return Err(parser.unexpected("expected `,` or `}` after a match arm"));
                }
            }

            Ok(arms)
        })?;
        parser.expect(TokenKind::CloseCurly)?;
        OptBody::Body(arms)
    };

    Ok(parser
        .ast
        .alloc_expr(ExprKind::Match { scrutinee, arms }, parser.span_from(start)))
}

pub fn parse_loop_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let start = parser.expect(TokenKind::Loop)?.span.start;
    let body = parse_opt_block(parser)?;

    Ok(parser
        .ast
        .alloc_expr(ExprKind::Loop { body }, parser.span_from(start)))
}

/// Operand of `return`/`break`, present only when the next token can
/// start an expression.
fn parse_opt_operand(parser: &mut Parser) -> Result<Option<ExprId>, Error> {
    if parser.lookups().starts_expr(parser.current_token_kind()) {
        Ok(Some(parse_expr(parser, BindingPower::Default)?))
    } else {
        Ok(None)
    }
}

pub fn parse_return_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let start = parser.expect(TokenKind::Return)?.span.start;
    let value = parse_opt_operand(parser)?;

    Ok(parser
        .ast
        .alloc_expr(ExprKind::Return(value), parser.span_from(start)))
}

/// `break @label? expr?`
pub fn parse_break_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let start = parser.expect(TokenKind::Break)?.span.start;
    let label = if parser.eat(TokenKind::At) {
        Some(expect_ident(parser, IdentRole::Label)?)
    } else {
        None
    };
    let value = parse_opt_operand(parser)?;

    Ok(parser
        .ast
        .alloc_expr(ExprKind::Break { label, value }, parser.span_from(start)))
}

pub fn parse_continue_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let span = parser.expect(TokenKind::Continue)?.span;
    Ok(parser.ast.alloc_expr(ExprKind::Continue, span))
}
