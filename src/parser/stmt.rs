use tracing::trace;

use crate::{
    ast::{
        ast::StmtId,
        statements::{Block, StmtKind},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_cond, parse_expr, parse_head_expr, parse_infix, parse_opt_block},
    item::parse_item,
    lookups::BindingPower,
    parser::{Parser, RecoveryScope},
    patterns::parse_pattern,
    types::parse_type,
};

pub fn parse_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let kind = parser.current_token_kind();

    if let Some(handler) = parser.lookups().stmt.get(&kind) {
        trace!(token = %kind, "statement");
        return handler(parser);
    }

    if kind.starts_item() {
        let item = parse_item(parser)?;
        let span = parser.ast.item(item).span;
        return Ok(parser.ast.alloc_stmt(StmtKind::Item(item), span));
    }

    parse_expression_stmt(parser)
}

/// An expression statement. A block-like expression (`if`, `match`,
/// `loop`, `{`) ends the statement by itself unless an operator that can
/// only continue an expression follows; any other expression needs a `;`
/// unless it is the last thing in the block.
fn parse_expression_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let start = parser.start();
    let block_like = parser.current_token().is_one_of_many(&[
        TokenKind::If,
        TokenKind::Match,
        TokenKind::Loop,
        TokenKind::OpenCurly,
    ]);

    let (expr, semi) = if block_like {
        let head = parse_expr(parser, BindingPower::Primary)?;
        let expr = if parser.lookups().is_led_only(parser.current_token_kind()) {
            parse_infix(parser, head, BindingPower::Default)?
        } else {
            head
        };
        let ends_in_block = parser.ast.expr(expr).kind.is_block_like();
        let semi = if ends_in_block {
            parser.eat(TokenKind::Semicolon)
        } else {
            parse_terminator(parser)?
        };
        (expr, semi)
    } else {
        let expr = parse_expr(parser, BindingPower::Default)?;
        (expr, parse_terminator(parser)?)
    };

    Ok(parser
        .ast
        .alloc_stmt(StmtKind::Expr { expr, semi }, parser.span_from(start)))
}

/// `;`, or nothing before the closing `}` of a block.
fn parse_terminator(parser: &mut Parser) -> Result<bool, Error> {
    if parser.at(TokenKind::CloseCurly) {
        return Ok(false);
    }
    parser.expect(TokenKind::Semicolon)?;
    Ok(true)
}

pub fn parse_empty_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let span = parser.expect(TokenKind::Semicolon)?.span;
    Ok(parser.ast.alloc_stmt(StmtKind::Empty, span))
}

/// `let pat (: Type)? (= expr)? ;`
pub fn parse_let_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let start = parser.expect(TokenKind::Let)?.span.start;
    let pat = parse_pattern(parser)?;

    let ty = if parser.eat(TokenKind::Colon) {
        Some(parse_type(parser)?)
    } else {
        None
    };

    let value = if parser.eat(TokenKind::Assignment) {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(parser
        .ast
        .alloc_stmt(StmtKind::Let { pat, ty, value }, parser.span_from(start)))
}

/// `while cond body` and `while let pat = expr body`.
pub fn parse_while_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let start = parser.expect(TokenKind::While)?.span.start;
    let cond = parse_cond(parser)?;
    let body = parse_opt_block(parser)?;

    Ok(parser
        .ast
        .alloc_stmt(StmtKind::While { cond, body }, parser.span_from(start)))
}

/// `for pat in expr body`
pub fn parse_for_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let start = parser.expect(TokenKind::For)?.span.start;
    let pat = parse_pattern(parser)?;
    parser.expect(TokenKind::In)?;
    let iter = parse_head_expr(parser, BindingPower::Default)?;
    let body = parse_opt_block(parser)?;

    Ok(parser
        .ast
        .alloc_stmt(StmtKind::For { pat, iter, body }, parser.span_from(start)))
}

/// `{ stmt* }`. A statement that fails to parse becomes an `Error`
/// statement and parsing resumes at the next statement boundary.
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    parser.with_depth(|parser| {
        let start = parser.expect(TokenKind::OpenCurly)?.span.start;

        let stmts = parser.with_restriction(false, |parser| {
            let mut stmts = vec![];

            while !parser.at(TokenKind::CloseCurly) && parser.has_tokens() {
                let stmt_start = parser.pos();
                match parse_stmt(parser) {
                    Ok(stmt) => stmts.push(stmt),
                    Err(error) => {
                        parser.report(error);
                        let span = parser.recover(stmt_start, RecoveryScope::Block);
                        stmts.push(parser.ast.alloc_stmt(StmtKind::Error, span));
                    }
                }
            }

            Ok(stmts)
        })?;

        parser.expect(TokenKind::CloseCurly)?;

        Ok(Block {
            stmts,
            span: parser.span_from(start),
        })
    })
}
