//! Declarations: functions, enums, impls, type aliases and associated
//! types, modules, structs, use-declarations and traits, plus the generic
//! parameter and argument lists they share.

use crate::Span;

use super::{
    ast::{ExprId, Ident, ItemId, Lit, OptBody, PatId, Path, TypeId},
    statements::Block,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Span of a leading `pub`.
    pub vis: Option<Span>,
    pub kind: ItemKind,
    pub span: Span,
}

impl Item {
    pub fn is_pub(&self) -> bool {
        self.vis.is_some()
    }

    /// Declared name, for the items that have one.
    pub fn name(&self) -> Option<&Ident> {
        match &self.kind {
            ItemKind::Func { name, .. }
            | ItemKind::Enum { name, .. }
            | ItemKind::TypeAlias { name, .. }
            | ItemKind::AssocType { name, .. }
            | ItemKind::Mod { name, .. }
            | ItemKind::Struct { name, .. }
            | ItemKind::Trait { name, .. } => Some(name),
            ItemKind::Impl { .. } | ItemKind::Use(_) | ItemKind::Error => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub mutable: bool,
    pub pat: PatId,
    /// Optional only for lambda parameters.
    pub ty: Option<TypeId>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FuncBody {
    /// `= expr;`
    Expr(ExprId),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub vis: Option<Span>,
    pub name: Ident,
    pub ty: TypeId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleField {
    pub vis: Option<Span>,
    /// Position within the field list.
    pub index: usize,
    pub ty: TypeId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StructBody {
    Fields(Vec<Field>),
    Tuple(Vec<TupleField>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum VariantBody {
    Unit,
    Fields(Vec<Field>),
    Tuple(Vec<TupleField>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub name: Ident,
    pub body: VariantBody,
    pub discriminant: Option<ExprId>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    Type(TypeId),
    Lifetime(Ident),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenParam {
    Lifetime(Ident),
    Type {
        name: Ident,
        bounds: Vec<Bound>,
        default: Option<TypeId>,
    },
    Const {
        name: Ident,
        ty: TypeId,
        default: Option<ExprId>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenParams {
    pub params: Vec<GenParam>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenArg {
    Type(TypeId),
    Lifetime(Ident),
    Lit(Lit),
    Block(ExprId),
    /// `Name = Type`
    Binding { name: Ident, ty: TypeId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenArgs {
    pub args: Vec<GenArg>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UseTree {
    pub kind: UseTreeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UseTreeKind {
    /// `a::b`
    Path(Path),
    /// `a::b as c`
    Alias { path: Path, binding: Ident },
    /// `{...}`, or `::{...}` when `global`
    List { global: bool, list: Vec<UseTree> },
    /// `a::{...}`
    PathList { path: Path, list: Vec<UseTree> },
    /// `*` or `a::*`
    Glob(Option<Path>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Func {
        name: Ident,
        gen_params: Option<GenParams>,
        /// `None` when the parameter list is omitted entirely.
        params: Option<Vec<Param>>,
        return_type: Option<TypeId>,
        body: OptBody<FuncBody>,
    },
    Enum {
        name: Ident,
        gen_params: Option<GenParams>,
        variants: Vec<Variant>,
    },
    Impl {
        gen_params: Option<GenParams>,
        trait_: Option<TypeId>,
        ty: TypeId,
        body: Vec<ItemId>,
    },
    TypeAlias {
        name: Ident,
        gen_params: Option<GenParams>,
        ty: TypeId,
    },
    AssocType {
        name: Ident,
        bounds: Vec<Bound>,
    },
    Mod {
        name: Ident,
        body: OptBody<Vec<ItemId>>,
    },
    Struct {
        name: Ident,
        gen_params: Option<GenParams>,
        body: OptBody<StructBody>,
    },
    Use(UseTree),
    Trait {
        name: Ident,
        gen_params: Option<GenParams>,
        bounds: Vec<Bound>,
        body: Vec<ItemId>,
    },
    Error,
}
