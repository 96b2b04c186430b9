//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, primitive type names, identifiers, literals and operators
//! - Token position tracking for error reporting
//! - Comments, whitespace and line continuations, kept aside as trivia
//! - Lexical errors, emitted as error tokens so lexing never stops early

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
