//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, primitive type names and identifiers
//! - Numeric literals (integers, floats, bases and suffixes)
//! - Char and string literals without escape decoding
//! - Operators and punctuation
//! - Comments, line continuations and trivia
//! - Error tokens and forward progress

use pretty_assertions::assert_eq;

use super::{
    lexer::tokenize,
    tokens::{TokenKind, TriviaKind},
};
use crate::errors::errors::ErrorImpl;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).tokens.iter().map(|t| t.kind).collect()
}

fn values(source: &str) -> Vec<String> {
    tokenize(source)
        .tokens
        .into_iter()
        .filter(|t| t.kind != TokenKind::EOF)
        .map(|t| t.value)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "func enum impl type mod struct use trait pub let while for in if elif else";
    let tokens = tokenize(source).tokens;

    assert_eq!(tokens[0].kind, TokenKind::Func);
    assert_eq!(tokens[1].kind, TokenKind::Enum);
    assert_eq!(tokens[2].kind, TokenKind::Impl);
    assert_eq!(tokens[3].kind, TokenKind::Type);
    assert_eq!(tokens[4].kind, TokenKind::Mod);
    assert_eq!(tokens[5].kind, TokenKind::Struct);
    assert_eq!(tokens[6].kind, TokenKind::Use);
    assert_eq!(tokens[7].kind, TokenKind::Trait);
    assert_eq!(tokens[8].kind, TokenKind::Pub);
    assert_eq!(tokens[9].kind, TokenKind::Let);
    assert_eq!(tokens[10].kind, TokenKind::While);
    assert_eq!(tokens[11].kind, TokenKind::For);
    assert_eq!(tokens[12].kind, TokenKind::In);
    assert_eq!(tokens[13].kind, TokenKind::If);
    assert_eq!(tokens[14].kind, TokenKind::Elif);
    assert_eq!(tokens[15].kind, TokenKind::Else);
    assert_eq!(tokens[16].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_more_keywords() {
    assert_eq!(
        kinds("match loop return break continue mut ref const as or and true false self super party _"),
        vec![
            TokenKind::Match,
            TokenKind::Loop,
            TokenKind::Return,
            TokenKind::Break,
            TokenKind::Continue,
            TokenKind::Mut,
            TokenKind::Ref,
            TokenKind::Const,
            TokenKind::As,
            TokenKind::Or,
            TokenKind::And,
            TokenKind::True,
            TokenKind::False,
            TokenKind::SelfValue,
            TokenKind::Super,
            TokenKind::Party,
            TokenKind::Underscore,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar_baz _underscore CamelCase").tokens;

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "bar_baz");
    assert_eq!(tokens[2].value, "_underscore");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "CamelCase");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_identifiers_stop_at_digits() {
    assert_eq!(
        kinds("x1"),
        vec![TokenKind::Identifier, TokenKind::Int, TokenKind::EOF]
    );
    assert_eq!(values("abc123def"), vec!["abc", "123", "def"]);
}

#[test]
fn test_tokenize_primitive_types() {
    let source = "bool char str int uint isize usize i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64";
    let tokens = tokenize(source).tokens;

    assert_eq!(tokens.len(), 20);
    for token in &tokens[..19] {
        assert_eq!(token.kind, TokenKind::Prim, "{}", token.value);
    }
    assert_eq!(tokens[11].value, "i128");
}

#[test]
fn test_sized_primitive_wins_over_identifier_prefix() {
    assert_eq!(values("i32x"), vec!["i32", "x"]);
    assert_eq!(kinds("i32x")[0], TokenKind::Prim);
    assert_eq!(kinds("interior")[0], TokenKind::Identifier);
}

#[test]
fn test_tokenize_integers() {
    let tokens = tokenize("42 0x1F 0b1010 0o17 1_000").tokens;

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0x1F");
    assert_eq!(tokens[2].value, "0b1010");
    assert_eq!(tokens[3].value, "0o17");
    // decimal literals do not accept `_`
    assert_eq!(tokens[4].value, "1");
    assert_eq!(tokens[5].kind, TokenKind::Underscore);
    assert_eq!(tokens[6].kind, TokenKind::Int);
    assert_eq!(tokens[6].value, "000");
}

#[test]
fn test_decimal_literal_tolerates_plus() {
    assert_eq!(values("1+2"), vec!["1+2"]);
    assert_eq!(values("1 + 2"), vec!["1", "+", "2"]);
}

#[test]
fn test_literal_suffixes() {
    let tokens = tokenize("1i32 255u8 3uint 2f64 0xFFusize 1.5f32").tokens;

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].value, "1i32");
    assert_eq!(tokens[1].value, "255u8");
    assert_eq!(tokens[2].value, "3uint");
    assert_eq!(tokens[3].kind, TokenKind::Int);
    assert_eq!(tokens[3].value, "2f64");
    assert_eq!(tokens[4].value, "0xFFusize");
    assert_eq!(tokens[5].kind, TokenKind::Float);
    assert_eq!(tokens[5].value, "1.5f32");
}

#[test]
fn test_tokenize_floats() {
    let tokens = tokenize("3.14 1.0e10 2.5E-3 1_0.0_1").tokens;

    assert_eq!(tokens[0].kind, TokenKind::Float);
    assert_eq!(tokens[0].value, "3.14");
    assert_eq!(tokens[1].value, "1.0e10");
    assert_eq!(tokens[2].value, "2.5E-3");
    assert_eq!(tokens[3].kind, TokenKind::Float);
    assert_eq!(tokens[3].value, "1_0.0_1");
}

#[test]
fn test_range_between_integers_is_not_a_float() {
    assert_eq!(
        kinds("1..2"),
        vec![TokenKind::Int, TokenKind::DotDot, TokenKind::Int, TokenKind::EOF]
    );
    assert_eq!(
        kinds("1.foo"),
        vec![TokenKind::Int, TokenKind::Dot, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_strings_without_escapes() {
    let tokens = tokenize(r#""hello" "multiple words" """#).tokens;

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[0].span.start, 0);
    assert_eq!(tokens[0].span.end, 7);
    assert_eq!(tokens[1].value, "multiple words");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, "");
}

#[test]
fn test_string_with_backslash_is_an_error() {
    let stream = tokenize(r#"let s = "a\nb"; x"#);

    assert_eq!(stream.errors.len(), 1);
    assert_eq!(*stream.errors[0].get_impl(), ErrorImpl::EscapeInLiteral);

    let kinds: Vec<TokenKind> = stream.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Error,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
    assert_eq!(stream.tokens[3].value, r#""a\nb""#);
}

#[test]
fn test_unterminated_string() {
    let stream = tokenize("\"abc\nnext");

    assert_eq!(*stream.errors[0].get_impl(), ErrorImpl::UnterminatedString);
    assert_eq!(stream.tokens[0].kind, TokenKind::Error);
    assert_eq!(stream.tokens[0].value, "\"abc");
    assert_eq!(stream.tokens[1].value, "next");
}

#[test]
fn test_char_literal_and_lifetime_quote() {
    let tokens = tokenize("'a' 'b 'é'").tokens;

    assert_eq!(tokens[0].kind, TokenKind::Char);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].kind, TokenKind::Quote);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "b");
    assert_eq!(tokens[3].kind, TokenKind::Char);
    assert_eq!(tokens[3].value, "é");
}

#[test]
fn test_char_literal_does_not_decode_escapes() {
    assert_eq!(
        kinds(r"'\n'"),
        vec![
            TokenKind::Quote,
            TokenKind::Backslash,
            TokenKind::Identifier,
            TokenKind::Quote,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / % ** == != === !== < > <= >= <=> = & | ^ << >> |>";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::StarStar,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::StrictEq,
            TokenKind::StrictNotEq,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Spaceship,
            TokenKind::Assignment,
            TokenKind::Ampersand,
            TokenKind::Bar,
            TokenKind::Caret,
            TokenKind::Shl,
            TokenKind::Shr,
            TokenKind::Pipe,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_assignment_operators() {
    assert_eq!(
        kinds("+= -= *= /= %= **= &= |= ^= <<= >>="),
        vec![
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
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] ; : :: , . .. ..= ... -> => ? ! @ \\"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::ColonColon,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::DotDot,
            TokenKind::DotDotEq,
            TokenKind::Ellipsis,
            TokenKind::Arrow,
            TokenKind::FatArrow,
            TokenKind::Question,
            TokenKind::Not,
            TokenKind::At,
            TokenKind::Backslash,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_comments_are_trivia() {
    let source = "a // line comment\nb /* block ** comment */ c";
    let stream = tokenize(source);

    assert_eq!(values(source), vec!["a", "b", "c"]);

    let comments: Vec<&str> = stream
        .trivia
        .iter()
        .filter(|t| t.kind != TriviaKind::Whitespace)
        .map(|t| t.span.text(source))
        .collect();
    assert_eq!(comments, vec!["// line comment", "/* block ** comment */"]);
}

#[test]
fn test_line_comment_continues_across_backslash_newline() {
    let source = "// first \\\nstill comment\nx";
    assert_eq!(values(source), vec!["x"]);
}

#[test]
fn test_block_comments_do_not_nest() {
    assert_eq!(values("/* a /* b */ c */"), vec!["c", "*", "/"]);
}

#[test]
fn test_line_continuation_is_trivia() {
    let stream = tokenize("a \\\nb");

    assert_eq!(stream.tokens.len(), 3);
    assert!(stream
        .trivia
        .iter()
        .any(|t| t.kind == TriviaKind::LineContinuation));
}

#[test]
fn test_unterminated_block_comment() {
    let stream = tokenize("x /* never closed");

    assert_eq!(*stream.errors[0].get_impl(), ErrorImpl::UnterminatedComment);
    assert_eq!(stream.tokens[1].kind, TokenKind::Error);
    assert_eq!(stream.tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_invalid_digit_for_base() {
    let stream = tokenize("0b102 0o78 0x");

    assert_eq!(stream.errors.len(), 3);
    assert_eq!(
        *stream.errors[0].get_impl(),
        ErrorImpl::InvalidDigit {
            token: "0b102".to_string(),
            base: 2
        }
    );
    assert_eq!(
        *stream.errors[1].get_impl(),
        ErrorImpl::InvalidDigit {
            token: "0o78".to_string(),
            base: 8
        }
    );
    assert_eq!(
        *stream.errors[2].get_impl(),
        ErrorImpl::MissingDigits {
            token: "0x".to_string()
        }
    );
}

#[test]
fn test_unrecognised_character_makes_progress() {
    let stream = tokenize("a # $ b");

    assert_eq!(stream.errors.len(), 2);
    assert_eq!(
        kinds("a # $ b"),
        vec![
            TokenKind::Identifier,
            TokenKind::Error,
            TokenKind::Error,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_unrecognised_multibyte_character() {
    let stream = tokenize("a→b");

    assert_eq!(stream.tokens[1].kind, TokenKind::Error);
    assert_eq!(stream.tokens[1].value, "→");
    assert_eq!(stream.tokens[2].value, "b");
}

#[test]
fn test_token_line_and_column() {
    let tokens = tokenize("func f() {\n    let x = 1;\n}").tokens;

    assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    assert_eq!((tokens[1].line, tokens[1].column), (1, 6));
    let let_token = tokens.iter().find(|t| t.kind == TokenKind::Let).unwrap();
    assert_eq!((let_token.line, let_token.column), (2, 5));
    let close = tokens
        .iter()
        .find(|t| t.kind == TokenKind::CloseCurly)
        .unwrap();
    assert_eq!((close.line, close.column), (3, 1));
}

#[test]
fn test_column_counts_chars_not_bytes() {
    let tokens = tokenize("s \"é\" x").tokens;

    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!((tokens[2].line, tokens[2].column), (1, 7));
    assert_eq!(tokens[2].span.start, 7);
}

#[test]
fn test_empty_source() {
    let stream = tokenize("");

    assert_eq!(stream.tokens.len(), 1);
    assert_eq!(stream.tokens[0].kind, TokenKind::EOF);
    assert!(stream.errors.is_empty());
}

#[test]
fn test_spans_cover_token_text() {
    let source = "use a::{b, c as d};";
    let stream = tokenize(source);

    for token in stream.tokens.iter().filter(|t| t.kind != TokenKind::EOF) {
        assert_eq!(token.span.text(source), token.value);
    }
}
