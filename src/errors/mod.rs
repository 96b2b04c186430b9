//! Error types and error handling for the parser.
//!
//! This module defines the error types produced while lexing and parsing.
//! It includes:
//!
//! - Error structures with source span information
//! - Specific error variants for the lexical and syntax phases
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
