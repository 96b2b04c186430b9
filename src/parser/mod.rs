//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a token stream into an
//! arena-backed [`SourceFile`](crate::ast::ast::SourceFile). It uses a
//! Pratt parser for expressions and recursive descent for the rest:
//!
//! - Item parsing (functions, enums, structs, traits, impls, modules, uses)
//! - Statement parsing (`let`, `while`, `for`, expression statements)
//! - Expression parsing (operators, calls, control-flow expressions)
//! - Type and pattern parsing
//!
//! Expressions dispatch through NUD (null denotation) and LED (left
//! denotation) tables, with binding powers for precedence. Errors are
//! recovered at item and statement boundaries, so one parse reports every
//! syntax error in the file.

pub mod expr;
pub mod item;
pub mod lookups;
pub mod parser;
pub mod patterns;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
