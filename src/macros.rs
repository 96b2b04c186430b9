//! Utility macros for the parser.
//!
//! This module defines helper macros used throughout the crate:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed punctuation
//! - `MK_NODE_ID!` - Declares an arena handle type for one node family
//!
//! These macros reduce boilerplate in the lexer and AST implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
/// * `$line`, `$column` - 1-based position of the first character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42".to_string(), span, 1, 1);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr, $line:expr, $column:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
            line: $line,
            column: $column,
        }
    };
}

/// Creates a default lexer handler for fixed punctuation.
///
/// Generates a handler function that pushes a token with the given kind
/// and advances the lexer position by the token's length.
///
/// # Arguments
///
/// * `$kind` - The TokenKind to create
/// * `$value` - The literal string value (used for length calculation)
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("\\A\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| {
            lexer.push($kind, String::from($value), $value.len());
        }
    };
}

/// Declares a `Copy` handle into one of the [`Ast`](crate::ast::ast::Ast)
/// arenas.
///
/// # Example
///
/// ```ignore
/// MK_NODE_ID!(ExprId, "Handle to an expression node.");
/// ```
#[macro_export]
macro_rules! MK_NODE_ID {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            pub fn new(index: usize) -> Self {
                $name(index as u32)
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}
