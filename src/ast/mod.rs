/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The node arena, handles, identifiers, paths, literals and the root `SourceFile`
/// - expressions: Expression nodes and operators
/// - statements: Statement nodes and blocks
/// - items: Declarations, generics and use-trees
/// - types: Type expressions
/// - patterns: Patterns in `let`, `match`, `for` and parameters
/// - render: S-expression rendering used by tests and debugging
pub mod ast;
pub mod expressions;
pub mod items;
pub mod patterns;
pub mod render;
pub mod statements;
pub mod types;
