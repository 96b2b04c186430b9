use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, Trivia, TriviaKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

/// Suffixes shared by integer and float literals.
const LITERAL_SUFFIX: &str =
    "(?:i128|i16|i32|i64|i8|int|isize|u128|u16|u32|u64|u8|uint|usize|f32|f64)?";

fn pattern(source: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(&format!("\\A(?:{})", source)).expect("lexer pattern must compile"),
        handler,
    }
}

lazy_static! {
    /// Tried in order at the cursor; the first pattern that matches wins, so
    /// longer punctuation is listed before its prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("\\s+", whitespace_handler),
        pattern("\\\\\\r?\\n", line_continuation_handler),
        pattern("//(?:\\\\(?:.|\\r?\\n)|[^\\\\\\n])*", line_comment_handler),
        pattern("/\\*[^*]*\\*+(?:[^/*][^*]*\\*+)*/", block_comment_handler),
        pattern("/\\*", unterminated_comment_handler),
        pattern(
            "[0-9][0-9_]*\\.[0-9][0-9_]*(?:[eE][+-]?[0-9_]*[0-9][0-9_]*)?(?:f32|f64)?",
            float_handler,
        ),
        pattern(
            &format!("0(?:x[0-9a-fA-F_]+|b[01_]+|o[0-7_]+){}", LITERAL_SUFFIX),
            based_int_handler,
        ),
        pattern("0[xbo]", base_prefix_handler),
        pattern(&format!("[0-9][0-9+]*{}", LITERAL_SUFFIX), int_handler),
        pattern("'[^\\n]'", char_handler),
        pattern("\"[^\\\\\"\\n]*\"", string_handler),
        pattern("\"", bad_string_handler),
        pattern("i128|i16|i32|i64|i8|u128|u16|u32|u64|u8|f32|f64", sized_prim_handler),
        pattern("[a-zA-Z_]+", symbol_handler),
        pattern("\\.\\.\\.", MK_DEFAULT_HANDLER!(TokenKind::Ellipsis, "...")),
        pattern("\\.\\.=", MK_DEFAULT_HANDLER!(TokenKind::DotDotEq, "..=")),
        pattern("===", MK_DEFAULT_HANDLER!(TokenKind::StrictEq, "===")),
        pattern("!==", MK_DEFAULT_HANDLER!(TokenKind::StrictNotEq, "!==")),
        pattern("<=>", MK_DEFAULT_HANDLER!(TokenKind::Spaceship, "<=>")),
        pattern("\\*\\*=", MK_DEFAULT_HANDLER!(TokenKind::StarStarEquals, "**=")),
        pattern("<<=", MK_DEFAULT_HANDLER!(TokenKind::ShlEquals, "<<=")),
        pattern(">>=", MK_DEFAULT_HANDLER!(TokenKind::ShrEquals, ">>=")),
        pattern("\\.\\.", MK_DEFAULT_HANDLER!(TokenKind::DotDot, "..")),
        pattern("::", MK_DEFAULT_HANDLER!(TokenKind::ColonColon, "::")),
        pattern("->", MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->")),
        pattern("=>", MK_DEFAULT_HANDLER!(TokenKind::FatArrow, "=>")),
        pattern("\\|>", MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|>")),
        pattern("==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern("!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern("<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern(">=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern("<<", MK_DEFAULT_HANDLER!(TokenKind::Shl, "<<")),
        pattern(">>", MK_DEFAULT_HANDLER!(TokenKind::Shr, ">>")),
        pattern("\\*\\*", MK_DEFAULT_HANDLER!(TokenKind::StarStar, "**")),
        pattern("\\+=", MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=")),
        pattern("-=", MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=")),
        pattern("\\*=", MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=")),
        pattern("/=", MK_DEFAULT_HANDLER!(TokenKind::SlashEquals, "/=")),
        pattern("%=", MK_DEFAULT_HANDLER!(TokenKind::PercentEquals, "%=")),
        pattern("&=", MK_DEFAULT_HANDLER!(TokenKind::AmpersandEquals, "&=")),
        pattern("\\|=", MK_DEFAULT_HANDLER!(TokenKind::BarEquals, "|=")),
        pattern("\\^=", MK_DEFAULT_HANDLER!(TokenKind::CaretEquals, "^=")),
        pattern("\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern("\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern("\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern("\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern("\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern("\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern(";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern(":", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern(",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern("\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern("=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern("<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(">", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern("!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern("\\?", MK_DEFAULT_HANDLER!(TokenKind::Question, "?")),
        pattern("\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern("-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern("\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern("/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern("%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
        pattern("&", MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&")),
        pattern("\\|", MK_DEFAULT_HANDLER!(TokenKind::Bar, "|")),
        pattern("\\^", MK_DEFAULT_HANDLER!(TokenKind::Caret, "^")),
        pattern("@", MK_DEFAULT_HANDLER!(TokenKind::At, "@")),
        pattern("\\\\", MK_DEFAULT_HANDLER!(TokenKind::Backslash, "\\")),
        pattern("'", MK_DEFAULT_HANDLER!(TokenKind::Quote, "'")),
    ];
}

/// Output of [`tokenize`]: significant tokens (terminated by `EOF`), the
/// trivia between them and any lexical errors.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    pub tokens: Vec<Token>,
    pub trivia: Vec<Trivia>,
    pub errors: Vec<Error>,
}

pub struct Lexer {
    tokens: Vec<Token>,
    trivia: Vec<Trivia>,
    errors: Vec<Error>,
    source: String,
    pos: usize,
    line: u32,
    column: u32,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            tokens: vec![],
            trivia: vec![],
            errors: vec![],
            source: source.to_string(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for byte in &self.source.as_bytes()[self.pos..end] {
            if *byte == b'\n' {
                self.line += 1;
                self.column = 1;
            } else if *byte & 0xC0 != 0x80 {
                // continuation bytes belong to the previous char
                self.column += 1;
            }
        }
        self.pos = end;
    }

    fn span_of(&self, len: usize) -> Span {
        Span::new(self.pos as u32, (self.pos + len) as u32)
    }

    /// Pushes a token of `len` bytes starting at the cursor and moves past it.
    pub fn push(&mut self, kind: TokenKind, value: String, len: usize) {
        let token = MK_TOKEN!(kind, value, self.span_of(len), self.line, self.column);
        self.tokens.push(token);
        self.advance_n(len);
    }

    fn push_trivia(&mut self, kind: TriviaKind, len: usize) {
        self.trivia.push(Trivia {
            kind,
            span: self.span_of(len),
        });
        self.advance_n(len);
    }

    /// Records a lexical error and emits an `Error` token covering `len`
    /// bytes (at least one character).
    fn push_error(&mut self, error: ErrorImpl, len: usize) {
        let len = len.max(self.at().map(char::len_utf8).unwrap_or(1));
        let value = self.remainder()[..len].to_string();
        trace!(error = %error, token = %value, "lexical error");
        self.errors.push(Error::new(error, self.span_of(len)));
        self.push(TokenKind::Error, value, len);
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

fn whitespace_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = lexer.matched(regex).len();
    lexer.push_trivia(TriviaKind::Whitespace, len);
}

fn line_continuation_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = lexer.matched(regex).len();
    lexer.push_trivia(TriviaKind::LineContinuation, len);
}

fn line_comment_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = lexer.matched(regex).len();
    lexer.push_trivia(TriviaKind::LineComment, len);
}

fn block_comment_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = lexer.matched(regex).len();
    lexer.push_trivia(TriviaKind::BlockComment, len);
}

fn unterminated_comment_handler(lexer: &mut Lexer, _regex: &Regex) {
    let len = lexer.remainder().len();
    lexer.push_error(ErrorImpl::UnterminatedComment, len);
}

fn float_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let len = matched.len();
    lexer.push(TokenKind::Float, matched, len);
}

fn int_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let len = matched.len();
    lexer.push(TokenKind::Int, matched, len);
}

/// Length of the run of ASCII alphanumerics and underscores at the start of `text`.
fn alnum_run(text: &str) -> usize {
    text.bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count()
}

fn base_of(prefix: u8) -> u32 {
    match prefix {
        b'x' => 16,
        b'b' => 2,
        _ => 8,
    }
}

fn based_int_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let len = matched.len();

    // `0b102`: the pattern stops at `0b10`, but a trailing digit belongs to
    // the same literal
    let rest = &lexer.remainder()[len..];
    if rest.starts_with(|c: char| c.is_ascii_digit()) {
        let base = base_of(matched.as_bytes()[1]);
        let full = len + alnum_run(rest);
        let token = lexer.remainder()[..full].to_string();
        lexer.push_error(ErrorImpl::InvalidDigit { token, base }, full);
        return;
    }

    lexer.push(TokenKind::Int, matched, len);
}

fn base_prefix_handler(lexer: &mut Lexer, _regex: &Regex) {
    let rest = &lexer.remainder()[2..];
    let run = alnum_run(rest);
    let full = 2 + run;
    let token = lexer.remainder()[..full].to_string();

    if run == 0 {
        lexer.push_error(ErrorImpl::MissingDigits { token }, full);
    } else {
        let base = base_of(token.as_bytes()[1]);
        lexer.push_error(ErrorImpl::InvalidDigit { token, base }, full);
    }
}

fn char_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let len = matched.len();
    let contents = matched[1..len - 1].to_string();
    lexer.push(TokenKind::Char, contents, len);
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let len = matched.len();
    let contents = matched[1..len - 1].to_string();
    lexer.push(TokenKind::String, contents, len);
}

/// A `"` that does not start a well-formed string literal: either a
/// backslash appears before the closing quote, or the line ends first.
fn bad_string_handler(lexer: &mut Lexer, _regex: &Regex) {
    let rest = lexer.remainder();
    let line_end = rest[1..].find('\n').map(|i| i + 1).unwrap_or(rest.len());
    let closing = rest[1..line_end].find('"').map(|i| i + 2);
    let len = closing.unwrap_or(line_end);

    if rest[..len].contains('\\') {
        lexer.push_error(ErrorImpl::EscapeInLiteral, len);
    } else {
        lexer.push_error(ErrorImpl::UnterminatedString, len);
    }
}

fn sized_prim_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let len = matched.len();
    lexer.push(TokenKind::Prim, matched, len);
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = lexer.matched(regex);
    let len = value.len();

    if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        lexer.push(*kind, value, len);
    } else {
        lexer.push(TokenKind::Identifier, value, len);
    }
}

/// Splits `source` into tokens. Never fails: unrecognised input becomes
/// `Error` tokens plus entries in [`TokenStream::errors`].
pub fn tokenize(source: &str) -> TokenStream {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(lex.remainder()) {
                (pattern.handler)(&mut lex, &pattern.regex);
                matched = true;
                break;
            }
        }

        if !matched {
            let token = lex.at().map(String::from).unwrap_or_default();
            let len = token.len();
            lex.push_error(ErrorImpl::UnrecognisedToken { token }, len);
        }
    }

    lex.push(TokenKind::EOF, String::from("EOF"), 0);

    debug!(
        tokens = lex.tokens.len(),
        trivia = lex.trivia.len(),
        errors = lex.errors.len(),
        "tokenized source"
    );

    TokenStream {
        tokens: lex.tokens,
        trivia: lex.trivia,
        errors: lex.errors,
    }
}
