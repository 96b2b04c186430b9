//! Parser configuration.

/// Default limit on nested expressions, types, patterns, blocks and items.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options for a single parse.
///
/// ```ignore
/// let config = ParserConfig::default()
///     .with_file("main.jc")
///     .with_max_depth(64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Name reported in diagnostics. Parsing itself never touches the
    /// file system.
    pub file: String,
    /// Nesting depth at which the parser gives up on a construct and
    /// reports a recursion-limit error instead of growing the stack.
    pub max_depth: usize,
    /// Keep whitespace and comment spans on the resulting `SourceFile`.
    pub retain_trivia: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            file: String::from("<source>"),
            max_depth: DEFAULT_MAX_DEPTH,
            retain_trivia: true,
        }
    }
}

impl ParserConfig {
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn with_trivia(mut self, retain_trivia: bool) -> Self {
        self.retain_trivia = retain_trivia;
        self
    }
}
