use crate::Span;

use super::{
    ast::{Ast, ExprId, ItemId, OptBody, PatId, StmtId, TypeId},
    expressions::{Cond, ExprKind},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `semi` is false for a tail expression or a block-like expression
    /// written without `;`.
    Expr {
        expr: ExprId,
        semi: bool,
    },
    Item(ItemId),
    Let {
        pat: PatId,
        ty: Option<TypeId>,
        value: Option<ExprId>,
    },
    While {
        cond: Cond,
        body: OptBody<Block>,
    },
    For {
        pat: PatId,
        iter: ExprId,
        body: OptBody<Block>,
    },
    /// A lone `;`.
    Empty,
    Error,
}

/// `{ stmt* }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<StmtId>,
    pub span: Span,
}

impl Block {
    /// The expression whose value the block produces: the last statement,
    /// when that statement is an expression statement.
    ///
    /// A trailing `;` does not change this: `{ a; b; }` still yields `b`.
    pub fn value(&self, ast: &Ast) -> Option<ExprId> {
        let last = self.stmts.last()?;
        match &ast.stmt(*last).kind {
            StmtKind::Expr { expr, .. } => Some(*expr),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

impl StmtKind {
    pub fn is_error(&self) -> bool {
        matches!(self, StmtKind::Error)
    }

    /// Convenience for tests and consumers: the expression of an expression
    /// statement.
    pub fn as_expr<'a>(&self, ast: &'a Ast) -> Option<&'a ExprKind> {
        match self {
            StmtKind::Expr { expr, .. } => Some(&ast.expr(*expr).kind),
            _ => None,
        }
    }
}
