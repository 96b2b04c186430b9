use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::{
        ast::{ExprId, StmtId, TypeId},
        items::ItemKind,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, item::*, parser::Parser, stmt::*, types::*};

/// Binding levels, lowest to highest. Derived ordering is the precedence.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    Pipe,
    Range,
    Or,
    And,
    Comparison,
    BitOr,
    Xor,
    BitAnd,
    Shift,
    Additive,
    Multiplicative,
    Power,
    Cast,
    Unary,
    Try,
    Call,
    Field,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<StmtId, Error>;
pub type ItemHandler = fn(&mut Parser) -> Result<ItemKind, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<ExprId, Error>;
pub type LEDHandler = fn(&mut Parser, ExprId, BindingPower) -> Result<ExprId, Error>;
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeId, Error>;

pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type ItemLookup = HashMap<TokenKind, ItemHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Dispatch tables for one language. Built once and shared read-only by
/// every parse.
#[derive(Default)]
pub struct Lookups {
    pub stmt: StmtLookup,
    pub item: ItemLookup,
    pub nud: NUDLookup,
    pub led: LEDLookup,
    pub binding_power: BPLookup,
    pub type_nud: TypeNUDLookup,
}

impl Lookups {
    fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power.insert(kind, binding_power);
        self.led.insert(kind, led_fn);
    }

    fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud.insert(kind, nud_fn);
    }

    fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt.insert(kind, stmt_fn);
    }

    fn item(&mut self, kind: TokenKind, item_fn: ItemHandler) {
        self.item.insert(kind, item_fn);
    }

    fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud.insert(kind, nud_fn);
    }

    /// Binding power of `kind` in infix or postfix position.
    pub fn bp(&self, kind: TokenKind) -> BindingPower {
        self.binding_power
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Whether `kind` can begin an expression.
    pub fn starts_expr(&self, kind: TokenKind) -> bool {
        self.nud.contains_key(&kind)
    }

    /// Infix/postfix operators that cannot also begin an expression. After a
    /// block-like statement only these continue the expression.
    pub fn is_led_only(&self, kind: TokenKind) -> bool {
        self.led.contains_key(&kind) && !self.nud.contains_key(&kind)
    }
}

lazy_static! {
    pub static ref LOOKUPS: Lookups = create_token_lookups();
}

pub fn create_token_lookups() -> Lookups {
    let mut lookups = Lookups::default();

    // Assignment, left-associative like every other binary level
    for kind in [
        TokenKind::Assignment,
        TokenKind::PlusEquals,
        TokenKind::MinusEquals,
        TokenKind::StarEquals,
        TokenKind::SlashEquals,
        TokenKind::PercentEquals,
        TokenKind::StarStarEquals,
        TokenKind::AmpersandEquals,
        TokenKind::BarEquals,
        TokenKind::CaretEquals,
        TokenKind::ShlEquals,
        TokenKind::ShrEquals,
    ] {
        lookups.led(kind, BindingPower::Assignment, parse_assignment_expr);
    }

    lookups.led(TokenKind::Pipe, BindingPower::Pipe, parse_binary_expr);
    lookups.led(TokenKind::DotDot, BindingPower::Range, parse_binary_expr);
    lookups.led(TokenKind::DotDotEq, BindingPower::Range, parse_binary_expr);

    // Logical
    lookups.led(TokenKind::Or, BindingPower::Or, parse_binary_expr);
    lookups.led(TokenKind::And, BindingPower::And, parse_binary_expr);

    // Comparison
    for kind in [
        TokenKind::Equals,
        TokenKind::NotEquals,
        TokenKind::StrictEq,
        TokenKind::StrictNotEq,
        TokenKind::Less,
        TokenKind::Greater,
        TokenKind::LessEquals,
        TokenKind::GreaterEquals,
        TokenKind::Spaceship,
    ] {
        lookups.led(kind, BindingPower::Comparison, parse_binary_expr);
    }

    // Bitwise
    lookups.led(TokenKind::Bar, BindingPower::BitOr, parse_binary_expr);
    lookups.led(TokenKind::Caret, BindingPower::Xor, parse_binary_expr);
    lookups.led(TokenKind::Ampersand, BindingPower::BitAnd, parse_binary_expr);
    lookups.led(TokenKind::Shl, BindingPower::Shift, parse_binary_expr);
    lookups.led(TokenKind::Shr, BindingPower::Shift, parse_binary_expr);

    // Additive and multiplicative
    lookups.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    lookups.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    lookups.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    lookups.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    lookups.led(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);
    lookups.led(TokenKind::StarStar, BindingPower::Power, parse_binary_expr);

    lookups.led(TokenKind::As, BindingPower::Cast, parse_cast_expr);

    // Postfix
    lookups.led(TokenKind::Question, BindingPower::Try, parse_try_expr);
    lookups.led(TokenKind::Not, BindingPower::Try, parse_try_expr);
    lookups.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
    lookups.led(TokenKind::Dot, BindingPower::Field, parse_field_expr);

    // Literals and paths
    for kind in [
        TokenKind::Int,
        TokenKind::Float,
        TokenKind::Char,
        TokenKind::String,
        TokenKind::True,
        TokenKind::False,
    ] {
        lookups.nud(kind, parse_literal_expr);
    }
    for kind in [
        TokenKind::Identifier,
        TokenKind::Prim,
        TokenKind::SelfValue,
        TokenKind::Super,
        TokenKind::Party,
        TokenKind::ColonColon,
    ] {
        lookups.nud(kind, parse_path_expr);
    }
    lookups.nud(TokenKind::Error, parse_error_expr);

    // Grouping
    lookups.nud(TokenKind::OpenParen, parse_grouping_expr);
    lookups.nud(TokenKind::OpenCurly, parse_block_expr);

    // Prefix
    lookups.nud(TokenKind::Dash, parse_prefix_expr);
    lookups.nud(TokenKind::Star, parse_prefix_expr);
    lookups.nud(TokenKind::StarStar, parse_prefix_expr);
    lookups.nud(TokenKind::Not, parse_prefix_expr);
    lookups.nud(TokenKind::Ampersand, parse_ref_expr);
    lookups.nud(TokenKind::Backslash, parse_lambda_expr);

    // Control flow
    lookups.nud(TokenKind::If, parse_if_expr);
    lookups.nud(TokenKind::Match, parse_match_expr);
    lookups.nud(TokenKind::Loop, parse_loop_expr);
    lookups.nud(TokenKind::Return, parse_return_expr);
    lookups.nud(TokenKind::Break, parse_break_expr);
    lookups.nud(TokenKind::Continue, parse_continue_expr);

    // Statements
    lookups.stmt(TokenKind::Let, parse_let_stmt);
    lookups.stmt(TokenKind::While, parse_while_stmt);
    lookups.stmt(TokenKind::For, parse_for_stmt);
    lookups.stmt(TokenKind::Semicolon, parse_empty_stmt);

    // Items
    lookups.item(TokenKind::Func, parse_func_item);
    lookups.item(TokenKind::Enum, parse_enum_item);
    lookups.item(TokenKind::Impl, parse_impl_item);
    lookups.item(TokenKind::Type, parse_type_item);
    lookups.item(TokenKind::Mod, parse_mod_item);
    lookups.item(TokenKind::Struct, parse_struct_item);
    lookups.item(TokenKind::Use, parse_use_item);
    lookups.item(TokenKind::Trait, parse_trait_item);

    // Types
    lookups.type_nud(TokenKind::Prim, parse_prim_type);
    for kind in [
        TokenKind::Identifier,
        TokenKind::SelfValue,
        TokenKind::Super,
        TokenKind::Party,
        TokenKind::ColonColon,
    ] {
        lookups.type_nud(kind, parse_path_type);
    }
    lookups.type_nud(TokenKind::OpenParen, parse_paren_type);
    lookups.type_nud(TokenKind::OpenBracket, parse_bracket_type);
    lookups.type_nud(TokenKind::Ampersand, parse_ref_type);
    lookups.type_nud(TokenKind::Mut, parse_mut_type);
    lookups.type_nud(TokenKind::Not, parse_never_type);
    lookups.type_nud(TokenKind::Error, parse_error_type);

    lookups
}
