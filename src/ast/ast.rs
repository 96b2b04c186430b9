//! Core AST definitions: the node arena, handles and the pieces shared by
//! every node family (identifiers, paths, literals, optional bodies).

use std::fmt::Display;

use crate::{
    errors::errors::Error,
    lexer::tokens::{Token, Trivia},
    Span, MK_NODE_ID,
};

use super::{
    expressions::{Expr, ExprKind},
    items::{GenArgs, Item, ItemKind},
    patterns::{PatKind, Pattern},
    statements::{Stmt, StmtKind},
    types::{Type, TypeKind},
};

MK_NODE_ID!(ExprId, "Handle to an expression in the [`Ast`] arena.");
MK_NODE_ID!(TypeId, "Handle to a type in the [`Ast`] arena.");
MK_NODE_ID!(PatId, "Handle to a pattern in the [`Ast`] arena.");
MK_NODE_ID!(StmtId, "Handle to a statement in the [`Ast`] arena.");
MK_NODE_ID!(ItemId, "Handle to an item in the [`Ast`] arena.");

/// Owns every node produced by one parse. Nodes are appended once and
/// never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ast {
    exprs: Vec<Expr>,
    types: Vec<Type>,
    pats: Vec<Pattern>,
    stmts: Vec<Stmt>,
    items: Vec<Item>,
}

impl Ast {
    pub fn new() -> Self {
        Ast::default()
    }

    pub fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.exprs.push(Expr { kind, span });
        ExprId::new(self.exprs.len() - 1)
    }

    pub fn alloc_type(&mut self, kind: TypeKind, span: Span) -> TypeId {
        self.types.push(Type { kind, span });
        TypeId::new(self.types.len() - 1)
    }

    pub fn alloc_pat(&mut self, kind: PatKind, span: Span) -> PatId {
        self.pats.push(Pattern { kind, span });
        PatId::new(self.pats.len() - 1)
    }

    pub fn alloc_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        self.stmts.push(Stmt { kind, span });
        StmtId::new(self.stmts.len() - 1)
    }

    pub fn alloc_item(&mut self, vis: Option<Span>, kind: ItemKind, span: Span) -> ItemId {
        self.items.push(Item { vis, kind, span });
        ItemId::new(self.items.len() - 1)
    }

    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    pub fn ty(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    pub fn pat(&self, id: PatId) -> &Pattern {
        &self.pats[id.index()]
    }

    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    pub fn item(&self, id: ItemId) -> &Item {
        &self.items[id.index()]
    }

    pub fn exprs(&self) -> &[Expr] {
        &self.exprs
    }

    pub fn types(&self) -> &[Type] {
        &self.types
    }

    pub fn pats(&self) -> &[Pattern] {
        &self.pats
    }

    pub fn stmts(&self) -> &[Stmt] {
        &self.stmts
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of `Error` nodes across all arenas.
    pub fn error_node_count(&self) -> usize {
        self.exprs
            .iter()
            .filter(|e| matches!(e.kind, ExprKind::Error))
            .count()
            + self
                .types
                .iter()
                .filter(|t| matches!(t.kind, TypeKind::Error))
                .count()
            + self
                .pats
                .iter()
                .filter(|p| matches!(p.kind, PatKind::Error))
                .count()
            + self
                .stmts
                .iter()
                .filter(|s| matches!(s.kind, StmtKind::Error))
                .count()
            + self
                .items
                .iter()
                .filter(|i| matches!(i.kind, ItemKind::Error))
                .count()
    }
}

/// Grammatical position an identifier was found in. The lexer only knows
/// one identifier kind; the parser tags each use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentRole {
    Value,
    Type,
    Field,
    Label,
    Lifetime,
    Module,
    Binding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
    pub role: IdentRole,
}

impl Ident {
    pub fn new(token: &Token, role: IdentRole) -> Self {
        Ident {
            name: token.value.clone(),
            span: token.span,
            role,
        }
    }
}

impl Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathSegmentKind {
    Ident(Ident),
    SelfValue,
    Super,
    Party,
    /// A primitive type name used as a path head, e.g. `int::max`.
    Prim(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub kind: PathSegmentKind,
    /// Turbofish arguments in expressions, plain `<...>` in types.
    pub gen_args: Option<GenArgs>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Leading `::`.
    pub global: bool,
    pub segments: Vec<PathSegment>,
    pub span: Span,
}

impl Path {
    /// The identifier of a one-segment path without generic arguments.
    pub fn as_single_ident(&self) -> Option<&Ident> {
        match self.segments.as_slice() {
            [PathSegment {
                kind: PathSegmentKind::Ident(ident),
                gen_args: None,
                ..
            }] if !self.global => Some(ident),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Bool,
    Int,
    Float,
    Char,
    Str,
}

/// A literal as written. `text` excludes the type suffix; char and string
/// literals keep their raw contents without the quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lit {
    pub kind: LitKind,
    pub text: String,
    pub suffix: Option<String>,
    pub span: Span,
}

impl Lit {
    pub fn bool_value(&self) -> Option<bool> {
        match (self.kind, self.text.as_str()) {
            (LitKind::Bool, "true") => Some(true),
            (LitKind::Bool, "false") => Some(false),
            _ => None,
        }
    }
}

/// A construct that is either a forward declaration (`;`) or has a body.
#[derive(Debug, Clone, PartialEq)]
pub enum OptBody<T> {
    NoBody,
    Body(T),
}

impl<T> OptBody<T> {
    pub fn as_body(&self) -> Option<&T> {
        match self {
            OptBody::NoBody => None,
            OptBody::Body(body) => Some(body),
        }
    }

    pub fn is_body(&self) -> bool {
        matches!(self, OptBody::Body(_))
    }
}

/// Root of a parse: the arena, top-level items, the tokens they came from,
/// retained trivia and every lexical and syntax diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub file: String,
    pub items: Vec<ItemId>,
    pub ast: Ast,
    pub span: Span,
    pub tokens: Vec<Token>,
    pub trivia: Vec<Trivia>,
    pub errors: Vec<Error>,
}

impl SourceFile {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.ast.error_node_count() > 0
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index).map(|id| self.ast.item(*id))
    }
}
