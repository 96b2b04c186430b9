#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    ast::ast::SourceFile,
    config::ParserConfig,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod ast;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// The smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Slices the covered text out of `source`.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source
            .get(self.start as usize..self.end as usize)
            .unwrap_or_default()
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Lexes and parses `source` with the default configuration.
pub fn parse_source(source: &str) -> SourceFile {
    parse_source_with(source, &ParserConfig::default())
}

/// Lexes and parses `source`. Lexical and syntax errors are both collected
/// on the returned file; parsing never aborts.
pub fn parse_source_with(source: &str, config: &ParserConfig) -> SourceFile {
    let stream = tokenize(source);
    parse(stream, config)
}

/// Finds the line containing byte offset `position`.
///
/// Returns the 1-based line number, the line's text (including its newline)
/// and the offset of `position` within that line. Offsets at the very end of
/// the source map to the last line.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    // `pos == source.len()`: point just past the final character
    match source.split_inclusive('\n').last() {
        Some(last) if !last.ends_with('\n') => {
            Some((line_number - 1, last.to_string(), last.len()))
        }
        _ => Some((line_number, String::new(), 0)),
    }
}

/// Renders an error against the source it came from.
///
/// ```text
/// error: UnexpectedToken (Unexpected token: `}`, expected an expression)
/// -> main.jc
///    |
/// 20 | let a = };
///    | --------^
/// ```
pub fn render_error(error: &Error, file: &str, source: &str) -> String {
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", file));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_span().start)
    else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += c.len_utf8();
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
