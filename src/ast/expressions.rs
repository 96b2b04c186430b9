use std::fmt::Display;

use crate::Span;

use super::{
    ast::{ExprId, Ident, Lit, OptBody, PatId, Path, TypeId},
    items::Param,
    statements::Block,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Pipe,
    Range,
    RangeInclusive,
    Or,
    And,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Spaceship,
    BitOr,
    Xor,
    BitAnd,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            BinOp::Pipe => "|>",
            BinOp::Range => "..",
            BinOp::RangeInclusive => "..=",
            BinOp::Or => "or",
            BinOp::And => "and",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::StrictEq => "===",
            BinOp::StrictNotEq => "!==",
            BinOp::Less => "<",
            BinOp::LessEq => "<=",
            BinOp::Greater => ">",
            BinOp::GreaterEq => ">=",
            BinOp::Spaceship => "<=>",
            BinOp::BitOr => "|",
            BinOp::Xor => "^",
            BinOp::BitAnd => "&",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Pow => "**",
        };
        write!(f, "{}", op)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    BitAnd,
    BitOr,
    Xor,
    Shl,
    Shr,
}

impl Display for AssignOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Rem => "%=",
            AssignOp::Pow => "**=",
            AssignOp::BitAnd => "&=",
            AssignOp::BitOr => "|=",
            AssignOp::Xor => "^=",
            AssignOp::Shl => "<<=",
            AssignOp::Shr => ">>=",
        };
        write!(f, "{}", op)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixOp {
    Neg,
    Deref,
    Not,
}

impl Display for PrefixOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefixOp::Neg => write!(f, "-"),
            PrefixOp::Deref => write!(f, "*"),
            PrefixOp::Not => write!(f, "!"),
        }
    }
}

/// Postfix `?` or `!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TryOp {
    Question,
    Bang,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldName {
    Named(Ident),
    Index { index: u32, span: Span },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub name: Option<Ident>,
    pub value: ExprId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cond {
    Expr(ExprId),
    Let { pat: PatId, expr: ExprId },
}

/// One `if` or `elif` arm of a conditional chain.
#[derive(Debug, Clone, PartialEq)]
pub struct IfBranch {
    pub cond: Cond,
    pub body: OptBody<Block>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchArm {
    /// Or-patterns, in source order.
    pub pats: Vec<PatId>,
    pub body: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldInit {
    /// `{ x }`
    Shorthand(Ident),
    /// `{ x: expr }`
    Named { name: Ident, value: ExprId },
    /// `{ ...base }`
    Spread(ExprId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Lit(Lit),
    Ident(Ident),
    Path(Path),
    Paren(ExprId),
    Block(Block),
    Infix {
        lhs: ExprId,
        op: BinOp,
        rhs: ExprId,
    },
    Prefix {
        op: PrefixOp,
        operand: ExprId,
    },
    Field {
        expr: ExprId,
        field: FieldName,
    },
    Call {
        func: ExprId,
        args: Vec<Arg>,
    },
    Try {
        expr: ExprId,
        op: TryOp,
    },
    Assign {
        lhs: ExprId,
        op: AssignOp,
        rhs: ExprId,
    },
    Cast {
        expr: ExprId,
        ty: TypeId,
    },
    Lambda {
        params: Vec<Param>,
        body: ExprId,
    },
    Tuple(Vec<ExprId>),
    Unit,
    If {
        branches: Vec<IfBranch>,
        else_block: Option<Block>,
    },
    Match {
        scrutinee: ExprId,
        arms: OptBody<Vec<MatchArm>>,
    },
    Loop {
        body: OptBody<Block>,
    },
    Return(Option<ExprId>),
    Break {
        label: Option<Ident>,
        value: Option<ExprId>,
    },
    Continue,
    Ref {
        mutable: bool,
        value: ExprId,
    },
    Struct {
        name: Path,
        fields: Vec<FieldInit>,
    },
    Error,
}

impl ExprKind {
    /// Forms that end in a block and may stand as a statement without `;`.
    pub fn is_block_like(&self) -> bool {
        matches!(
            self,
            ExprKind::Block(_) | ExprKind::If { .. } | ExprKind::Match { .. } | ExprKind::Loop { .. }
        )
    }
}
