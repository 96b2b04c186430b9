use std::fmt::Display;

use thiserror::Error;

use crate::Span;

/// A lexical or syntax error with the source range it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
}

/// Which stage produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPhase {
    Lexical,
    Syntax,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
        }
    }

    pub fn get_span(&self) -> Span {
        self.span
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn phase(&self) -> ErrorPhase {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::InvalidDigit { .. }
            | ErrorImpl::MissingDigits { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::EscapeInLiteral
            | ErrorImpl::UnterminatedComment => ErrorPhase::Lexical,
            _ => ErrorPhase::Syntax,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::InvalidDigit { .. } => "InvalidDigit",
            ErrorImpl::MissingDigits { .. } => "MissingDigits",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::EscapeInLiteral => "EscapeInLiteral",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnexpectedEof { .. } => "UnexpectedEof",
            ErrorImpl::InvalidTupleIndex { .. } => "InvalidTupleIndex",
            ErrorImpl::RecursionLimit { .. } => "RecursionLimit",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::InvalidDigit { token, base } => ErrorTip::Suggestion(format!(
                "`{}` contains a digit that is not valid in base {}",
                token, base
            )),
            ErrorImpl::MissingDigits { token } => {
                ErrorTip::Suggestion(format!("`{}` needs at least one digit after the prefix", token))
            }
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("add a closing `\"` on the same line"))
            }
            ErrorImpl::EscapeInLiteral => ErrorTip::Suggestion(String::from(
                "escape sequences are not supported in string literals",
            )),
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("add a closing `*/`"))
            }
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnexpectedEof { expected } => {
                ErrorTip::Suggestion(format!("file ended while expecting {}", expected))
            }
            ErrorImpl::InvalidTupleIndex { token } => ErrorTip::Suggestion(format!(
                "`{}` is not a tuple index, use a plain decimal integer",
                token
            )),
            ErrorImpl::RecursionLimit { limit } => ErrorTip::Suggestion(format!(
                "nesting exceeds the limit of {}, split the construct up",
                limit
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.span)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexical
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("invalid digit for base {base} in {token:?}")]
    InvalidDigit { token: String, base: u32 },
    #[error("missing digits after base prefix in {token:?}")]
    MissingDigits { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("escape sequence in string literal")]
    EscapeInLiteral,
    #[error("unterminated block comment")]
    UnterminatedComment,

    // Syntax
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEof { expected: String },
    #[error("invalid tuple index: {token:?}")]
    InvalidTupleIndex { token: String },
    #[error("recursion limit of {limit} exceeded")]
    RecursionLimit { limit: usize },
}
