//! Type expressions as they appear in annotations, signatures and generic
//! argument lists.

use crate::Span;

use super::{
    ast::{ExprId, Path, TypeId},
    items::GenArgs,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub kind: TypeKind,
    pub span: Span,
}

/// Represents the primitive type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimType {
    Bool,
    Char,
    Str,
    Int,
    Uint,
    Isize,
    Usize,
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F32,
    F64,
}

impl PrimType {
    pub fn from_name(name: &str) -> Option<PrimType> {
        let prim = match name {
            "bool" => PrimType::Bool,
            "char" => PrimType::Char,
            "str" => PrimType::Str,
            "int" => PrimType::Int,
            "uint" => PrimType::Uint,
            "isize" => PrimType::Isize,
            "usize" => PrimType::Usize,
            "i8" => PrimType::I8,
            "i16" => PrimType::I16,
            "i32" => PrimType::I32,
            "i64" => PrimType::I64,
            "i128" => PrimType::I128,
            "u8" => PrimType::U8,
            "u16" => PrimType::U16,
            "u32" => PrimType::U32,
            "u64" => PrimType::U64,
            "u128" => PrimType::U128,
            "f32" => PrimType::F32,
            "f64" => PrimType::F64,
            _ => return None,
        };
        Some(prim)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PrimType::Bool => "bool",
            PrimType::Char => "char",
            PrimType::Str => "str",
            PrimType::Int => "int",
            PrimType::Uint => "uint",
            PrimType::Isize => "isize",
            PrimType::Usize => "usize",
            PrimType::I8 => "i8",
            PrimType::I16 => "i16",
            PrimType::I32 => "i32",
            PrimType::I64 => "i64",
            PrimType::I128 => "i128",
            PrimType::U8 => "u8",
            PrimType::U16 => "u16",
            PrimType::U32 => "u32",
            PrimType::U64 => "u64",
            PrimType::U128 => "u128",
            PrimType::F32 => "f32",
            PrimType::F64 => "f64",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Prim(PrimType),
    /// `()`
    Unit,
    /// `(T, U)`; `(T)` is a one-element tuple.
    Tuple(Vec<TypeId>),
    /// `(T, U) -> R`
    Func { params: Vec<TypeId>, ret: TypeId },
    /// `[T]`
    Slice(TypeId),
    /// `[T; N]`, the length is any expression.
    Array { elem: TypeId, len: ExprId },
    /// `&T`
    Ref(TypeId),
    /// `mut T`
    Mut(TypeId),
    /// `a::B`, with generic arguments on any segment but the last.
    Path(Path),
    /// `Name<Args>`
    Generic { path: Path, gen_args: GenArgs },
    /// `!`
    Never,
    Error,
}
