use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("func", TokenKind::Func);
        map.insert("enum", TokenKind::Enum);
        map.insert("impl", TokenKind::Impl);
        map.insert("type", TokenKind::Type);
        map.insert("mod", TokenKind::Mod);
        map.insert("struct", TokenKind::Struct);
        map.insert("use", TokenKind::Use);
        map.insert("trait", TokenKind::Trait);
        map.insert("pub", TokenKind::Pub);
        map.insert("let", TokenKind::Let);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("in", TokenKind::In);
        map.insert("if", TokenKind::If);
        map.insert("elif", TokenKind::Elif);
        map.insert("else", TokenKind::Else);
        map.insert("match", TokenKind::Match);
        map.insert("loop", TokenKind::Loop);
        map.insert("return", TokenKind::Return);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("mut", TokenKind::Mut);
        map.insert("ref", TokenKind::Ref);
        map.insert("const", TokenKind::Const);
        map.insert("as", TokenKind::As);
        map.insert("or", TokenKind::Or);
        map.insert("and", TokenKind::And);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("self", TokenKind::SelfValue);
        map.insert("super", TokenKind::Super);
        map.insert("party", TokenKind::Party);
        map.insert("_", TokenKind::Underscore);
        for prim in PRIM_TYPE_NAMES {
            map.insert(prim, TokenKind::Prim);
        }
        map
    };
}

/// Every primitive type name. The sized integer and float names contain
/// digits and are matched by their own lexer pattern.
pub const PRIM_TYPE_NAMES: [&str; 19] = [
    "bool", "char", "str", "i8", "i16", "i32", "int", "i64", "i128", "u8", "u16", "u32", "uint",
    "u64", "u128", "usize", "isize", "f32", "f64",
];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Error,

    Int,
    Float,
    Char,
    String,
    Identifier,
    Prim,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment,  // =
    Equals,      // ==
    StrictEq,    // ===
    Not,         // !
    NotEquals,   // !=
    StrictNotEq, // !==
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Spaceship, // <=>

    Pipe,      // |>
    Bar,       // |
    Caret,     // ^
    Ampersand, // &
    Shl,       // <<
    Shr,       // >>

    Dot,
    DotDot,
    DotDotEq,
    Ellipsis,
    Semicolon,
    Colon,
    ColonColon,
    Question,
    Comma,
    Arrow,    // ->
    FatArrow, // =>
    At,
    Backslash,
    Quote,

    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    PercentEquals,
    StarStarEquals,
    AmpersandEquals,
    BarEquals,
    CaretEquals,
    ShlEquals,
    ShrEquals,

    Plus,
    Dash,
    Slash,
    Star,
    StarStar,
    Percent,

    // Reserved
    Func,
    Enum,
    Impl,
    Type,
    Mod,
    Struct,
    Use,
    Trait,
    Pub,
    Let,
    While,
    For,
    In,
    If,
    Elif,
    Else,
    Match,
    Loop,
    Return,
    Break,
    Continue,
    Mut,
    Ref,
    Const,
    As,
    Or,
    And,
    True,
    False,
    SelfValue,
    Super,
    Party,
    Underscore,
}

impl TokenKind {
    /// Keywords that start an item, used for dispatch and error recovery.
    pub fn starts_item(&self) -> bool {
        matches!(
            self,
            TokenKind::Pub
                | TokenKind::Func
                | TokenKind::Enum
                | TokenKind::Impl
                | TokenKind::Type
                | TokenKind::Mod
                | TokenKind::Struct
                | TokenKind::Use
                | TokenKind::Trait
        )
    }

    /// Keywords that start a non-expression statement.
    pub fn starts_statement(&self) -> bool {
        self.starts_item() || matches!(self, TokenKind::Let | TokenKind::While | TokenKind::For)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }
}

/// Non-significant source text between tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaKind {
    Whitespace,
    /// A backslash immediately followed by a newline.
    LineContinuation,
    LineComment,
    BlockComment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub span: Span,
}
