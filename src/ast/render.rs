//! Compact S-expression rendering of expressions, types, patterns and
//! use-trees.
//!
//! `1 + 2 * 3` renders as `Infix(+, 1, Infix(*, 2, 3))`. Leaves render as
//! their source text; every other node renders as `Kind(children...)`.

use super::{
    ast::{Ast, ExprId, Lit, LitKind, PatId, Path, PathSegmentKind, TypeId},
    expressions::{Arg, Cond, ExprKind, FieldInit, FieldName, IfBranch, TryOp},
    items::{GenArg, Param, UseTree, UseTreeKind},
    patterns::{PatKind, RangeEnd},
    statements::{Block, StmtKind},
    types::TypeKind,
};

impl Ast {
    pub fn render_expr(&self, id: ExprId) -> String {
        match &self.expr(id).kind {
            ExprKind::Lit(lit) => render_lit(lit),
            ExprKind::Ident(ident) => ident.name.clone(),
            ExprKind::Path(path) => self.render_path(path, true),
            ExprKind::Paren(inner) => format!("Paren({})", self.render_expr(*inner)),
            ExprKind::Block(block) => self.render_block(block),
            ExprKind::Infix { lhs, op, rhs } => format!(
                "Infix({}, {}, {})",
                op,
                self.render_expr(*lhs),
                self.render_expr(*rhs)
            ),
            ExprKind::Prefix { op, operand } => {
                format!("Prefix({}, {})", op, self.render_expr(*operand))
            }
            ExprKind::Field { expr, field } => {
                let field = match field {
                    FieldName::Named(name) => name.name.clone(),
                    FieldName::Index { index, .. } => index.to_string(),
                };
                format!("Field({}, {})", self.render_expr(*expr), field)
            }
            ExprKind::Call { func, args } => format!(
                "Call({}, [{}])",
                self.render_expr(*func),
                self.render_args(args)
            ),
            ExprKind::Try { expr, op } => match op {
                TryOp::Question => format!("Try({})", self.render_expr(*expr)),
                TryOp::Bang => format!("TryBang({})", self.render_expr(*expr)),
            },
            ExprKind::Assign { lhs, op, rhs } => format!(
                "Assign({}, {}, {})",
                op,
                self.render_expr(*lhs),
                self.render_expr(*rhs)
            ),
            ExprKind::Cast { expr, ty } => format!(
                "Cast({}, {})",
                self.render_expr(*expr),
                self.render_type(*ty)
            ),
            ExprKind::Lambda { params, body } => format!(
                "Lambda([{}], {})",
                self.render_params(params),
                self.render_expr(*body)
            ),
            ExprKind::Tuple(elements) => format!("Tuple({})", self.render_exprs(elements)),
            ExprKind::Unit => String::from("()"),
            ExprKind::If {
                branches,
                else_block,
            } => {
                let mut parts: Vec<String> =
                    branches.iter().map(|b| self.render_branch(b)).collect();
                if let Some(block) = else_block {
                    parts.push(format!("else {}", self.render_block(block)));
                }
                format!("If({})", parts.join(", "))
            }
            ExprKind::Match { scrutinee, arms } => {
                let arms = match arms.as_body() {
                    Some(arms) => format!(
                        "[{}]",
                        arms.iter()
                            .map(|arm| format!(
                                "{} => {}",
                                arm.pats
                                    .iter()
                                    .map(|p| self.render_pat(*p))
                                    .collect::<Vec<_>>()
                                    .join(" | "),
                                self.render_expr(arm.body)
                            ))
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                    None => String::from(";"),
                };
                format!("Match({}, {})", self.render_expr(*scrutinee), arms)
            }
            ExprKind::Loop { body } => match body.as_body() {
                Some(block) => format!("Loop({})", self.render_block(block)),
                None => String::from("Loop(;)"),
            },
            ExprKind::Return(value) => match value {
                Some(value) => format!("Return({})", self.render_expr(*value)),
                None => String::from("Return"),
            },
            ExprKind::Break { label, value } => {
                let mut parts = vec![];
                if let Some(label) = label {
                    parts.push(format!("@{}", label.name));
                }
                if let Some(value) = value {
                    parts.push(self.render_expr(*value));
                }
                if parts.is_empty() {
                    String::from("Break")
                } else {
                    format!("Break({})", parts.join(", "))
                }
            }
            ExprKind::Continue => String::from("Continue"),
            ExprKind::Ref { mutable, value } => {
                if *mutable {
                    format!("RefMut({})", self.render_expr(*value))
                } else {
                    format!("Ref({})", self.render_expr(*value))
                }
            }
            ExprKind::Struct { name, fields } => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|field| match field {
                        FieldInit::Shorthand(name) => name.name.clone(),
                        FieldInit::Named { name, value } => {
                            format!("{}: {}", name.name, self.render_expr(*value))
                        }
                        FieldInit::Spread(base) => format!("...{}", self.render_expr(*base)),
                    })
                    .collect();
                format!(
                    "Struct({}, {{{}}})",
                    self.render_path(name, true),
                    fields.join(", ")
                )
            }
            ExprKind::Error => String::from("Error"),
        }
    }

    pub fn render_type(&self, id: TypeId) -> String {
        match &self.ty(id).kind {
            TypeKind::Prim(prim) => prim.name().to_string(),
            TypeKind::Unit => String::from("()"),
            TypeKind::Tuple(elements) => format!("Tuple({})", self.render_types(elements)),
            TypeKind::Func { params, ret } => format!(
                "Func([{}], {})",
                self.render_types(params),
                self.render_type(*ret)
            ),
            TypeKind::Slice(elem) => format!("Slice({})", self.render_type(*elem)),
            TypeKind::Array { elem, len } => format!(
                "Array({}, {})",
                self.render_type(*elem),
                self.render_expr(*len)
            ),
            TypeKind::Ref(inner) => format!("Ref({})", self.render_type(*inner)),
            TypeKind::Mut(inner) => format!("Mut({})", self.render_type(*inner)),
            TypeKind::Path(path) => self.render_path(path, false),
            TypeKind::Generic { path, gen_args } => format!(
                "{}{}",
                self.render_path(path, false),
                self.render_gen_args(&gen_args.args)
            ),
            TypeKind::Never => String::from("!"),
            TypeKind::Error => String::from("Error"),
        }
    }

    pub fn render_pat(&self, id: PatId) -> String {
        match &self.pat(id).kind {
            PatKind::Lit { negative, lit } => render_signed_lit(*negative, lit),
            PatKind::Bind { name, pat } => format!("Bind({}, {})", name.name, self.render_pat(*pat)),
            PatKind::Borrow(inner) => format!("Borrow({})", self.render_pat(*inner)),
            PatKind::Mut(inner) => format!("Mut({})", self.render_pat(*inner)),
            PatKind::Ref(inner) => format!("Ref({})", self.render_pat(*inner)),
            PatKind::Ident(ident) => ident.name.clone(),
            PatKind::Range { lo, inclusive, hi } => format!(
                "Range({}, {}, {})",
                self.render_range_end(lo),
                if *inclusive { "..=" } else { ".." },
                self.render_range_end(hi)
            ),
            PatKind::Wildcard => String::from("_"),
            PatKind::Error => String::from("Error"),
        }
    }

    fn render_range_end(&self, end: &RangeEnd) -> String {
        match end {
            RangeEnd::Path(path) => self.render_path(path, false),
            RangeEnd::Lit { negative, lit } => render_signed_lit(*negative, lit),
        }
    }

    /// Turbofish (`::<T>`) in expression position, plain `<T>` otherwise.
    pub fn render_path(&self, path: &Path, turbofish: bool) -> String {
        let segments: Vec<String> = path
            .segments
            .iter()
            .map(|segment| {
                let mut text = match &segment.kind {
                    PathSegmentKind::Ident(ident) => ident.name.clone(),
                    PathSegmentKind::SelfValue => String::from("self"),
                    PathSegmentKind::Super => String::from("super"),
                    PathSegmentKind::Party => String::from("party"),
                    PathSegmentKind::Prim(name) => name.clone(),
                };
                if let Some(gen_args) = &segment.gen_args {
                    if turbofish {
                        text.push_str("::");
                    }
                    text.push_str(&self.render_gen_args(&gen_args.args));
                }
                text
            })
            .collect();

        let prefix = if path.global { "::" } else { "" };
        format!("{}{}", prefix, segments.join("::"))
    }

    /// `use a::{b, c as d};` renders its tree as `a::{b, c as d}`.
    pub fn render_use_tree(&self, tree: &UseTree) -> String {
        match &tree.kind {
            UseTreeKind::Path(path) => self.render_path(path, false),
            UseTreeKind::Alias { path, binding } => {
                format!("{} as {}", self.render_path(path, false), binding.name)
            }
            UseTreeKind::List { global, list: trees } => {
                let prefix = if *global { "::" } else { "" };
                format!("{}{}", prefix, self.render_use_list(trees))
            }
            UseTreeKind::PathList { path, list: trees } => {
                format!("{}::{}", self.render_path(path, false), self.render_use_list(trees))
            }
            UseTreeKind::Glob(None) => String::from("*"),
            UseTreeKind::Glob(Some(path)) => format!("{}::*", self.render_path(path, false)),
        }
    }

    fn render_use_list(&self, list: &[UseTree]) -> String {
        let trees: Vec<String> = list.iter().map(|tree| self.render_use_tree(tree)).collect();
        format!("{{{}}}", trees.join(", "))
    }

    fn render_gen_args(&self, args: &[GenArg]) -> String {
        let args: Vec<String> = args
            .iter()
            .map(|arg| match arg {
                GenArg::Type(ty) => self.render_type(*ty),
                GenArg::Lifetime(name) => format!("'{}", name.name),
                GenArg::Lit(lit) => render_lit(lit),
                GenArg::Block(expr) => self.render_expr(*expr),
                GenArg::Binding { name, ty } => format!("{} = {}", name.name, self.render_type(*ty)),
            })
            .collect();
        format!("<{}>", args.join(", "))
    }

    pub fn render_block(&self, block: &Block) -> String {
        let stmts: Vec<String> = block
            .stmts
            .iter()
            .map(|id| match &self.stmt(*id).kind {
                StmtKind::Expr { expr, semi } => {
                    let rendered = self.render_expr(*expr);
                    if *semi {
                        format!("{};", rendered)
                    } else {
                        rendered
                    }
                }
                StmtKind::Item(_) => String::from("Item"),
                StmtKind::Let { pat, ty, value } => {
                    let mut parts = vec![self.render_pat(*pat)];
                    if let Some(ty) = ty {
                        parts.push(self.render_type(*ty));
                    }
                    if let Some(value) = value {
                        parts.push(self.render_expr(*value));
                    }
                    format!("Let({})", parts.join(", "))
                }
                StmtKind::While { cond, body } => format!(
                    "While({}, {})",
                    self.render_cond(cond),
                    body.as_body()
                        .map(|b| self.render_block(b))
                        .unwrap_or_else(|| String::from(";"))
                ),
                StmtKind::For { pat, iter, body } => format!(
                    "For({}, {}, {})",
                    self.render_pat(*pat),
                    self.render_expr(*iter),
                    body.as_body()
                        .map(|b| self.render_block(b))
                        .unwrap_or_else(|| String::from(";"))
                ),
                StmtKind::Empty => String::from(";"),
                StmtKind::Error => String::from("Error"),
            })
            .collect();
        format!("Block[{}]", stmts.join(" "))
    }

    fn render_cond(&self, cond: &Cond) -> String {
        match cond {
            Cond::Expr(expr) => self.render_expr(*expr),
            Cond::Let { pat, expr } => format!(
                "Let({}, {})",
                self.render_pat(*pat),
                self.render_expr(*expr)
            ),
        }
    }

    fn render_branch(&self, branch: &IfBranch) -> String {
        let body = branch
            .body
            .as_body()
            .map(|b| self.render_block(b))
            .unwrap_or_else(|| String::from(";"));
        format!("{} => {}", self.render_cond(&branch.cond), body)
    }

    fn render_args(&self, args: &[Arg]) -> String {
        args.iter()
            .map(|arg| match &arg.name {
                Some(name) => format!("{}: {}", name.name, self.render_expr(arg.value)),
                None => self.render_expr(arg.value),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn render_params(&self, params: &[Param]) -> String {
        params
            .iter()
            .map(|param| {
                let mut text = self.render_pat(param.pat);
                if param.mutable {
                    text = format!("mut {}", text);
                }
                if let Some(ty) = param.ty {
                    text = format!("{}: {}", text, self.render_type(ty));
                }
                text
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn render_exprs(&self, exprs: &[ExprId]) -> String {
        exprs
            .iter()
            .map(|e| self.render_expr(*e))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn render_types(&self, types: &[TypeId]) -> String {
        types
            .iter()
            .map(|t| self.render_type(*t))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn render_lit(lit: &Lit) -> String {
    let suffix = lit.suffix.as_deref().unwrap_or_default();
    match lit.kind {
        LitKind::Char => format!("'{}'", lit.text),
        LitKind::Str => format!("\"{}\"", lit.text),
        LitKind::Bool | LitKind::Int | LitKind::Float => format!("{}{}", lit.text, suffix),
    }
}

fn render_signed_lit(negative: bool, lit: &Lit) -> String {
    if negative {
        format!("-{}", render_lit(lit))
    } else {
        render_lit(lit)
    }
}

/// Breaks a rendering over several lines, one child per line, indenting
/// by nesting depth.
pub fn pretty_print(rendered: &str) -> String {
    let mut result = String::new();
    let mut indent = 0usize;
    let mut ignore_next_space = false;

    for c in rendered.chars() {
        match c {
            '(' | '[' | '{' => {
                indent += 1;
                result.push(c);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
            }
            ')' | ']' | '}' => {
                indent = indent.saturating_sub(1);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
                result.push(c);
            }
            ',' => {
                result.push(c);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
                ignore_next_space = true;
            }
            ' ' if ignore_next_space => {
                ignore_next_space = false;
            }
            _ => {
                ignore_next_space = false;
                result.push(c);
            }
        }
    }

    result
}
