use crate::Span;

use super::ast::{Ident, Lit, PatId, Path};

#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub kind: PatKind,
    pub span: Span,
}

/// One end of a range pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeEnd {
    Path(Path),
    Lit { negative: bool, lit: Lit },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatKind {
    /// `1`, `-1`, `"s"`, `true`
    Lit { negative: bool, lit: Lit },
    /// `name @ pat`
    Bind { name: Ident, pat: PatId },
    /// `ref pat`
    Borrow(PatId),
    /// `mut pat`
    Mut(PatId),
    /// `&pat`
    Ref(PatId),
    Ident(Ident),
    /// `a..b` or `a..=b`
    Range {
        lo: RangeEnd,
        inclusive: bool,
        hi: RangeEnd,
    },
    /// `_`
    Wildcard,
    Error,
}
