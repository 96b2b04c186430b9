//! Unit tests for the parser module.
//!
//! Expressions, types and patterns are checked through their S-expression
//! rendering; items through the node fields directly.

use pretty_assertions::assert_eq;

use crate::{
    ast::{
        ast::{IdentRole, OptBody, PathSegmentKind, SourceFile},
        expressions::ExprKind,
        items::{
            Bound, FuncBody, GenParam, ItemKind, StructBody, UseTreeKind, VariantBody,
        },
        statements::StmtKind,
        types::TypeKind,
    },
    config::ParserConfig,
    errors::errors::ErrorImpl,
    parse_source, parse_source_with,
};

fn parse_clean(source: &str) -> SourceFile {
    let file = parse_source(source);
    assert!(
        file.errors.is_empty(),
        "unexpected errors in {:?}: {:?}",
        source,
        file.errors
    );
    assert_eq!(file.ast.error_node_count(), 0, "error nodes in {:?}", source);
    file
}

fn func_kind(file: &SourceFile, index: usize) -> &ItemKind {
    &file.item(index).expect("missing item").kind
}

/// Renders `source` parsed as the body of `func f() = source;`.
fn expr(source: &str) -> String {
    let file = parse_clean(&format!("func f() = {};", source));
    match func_kind(&file, 0) {
        ItemKind::Func {
            body: OptBody::Body(FuncBody::Expr(e)),
            ..
        } => file.ast.render_expr(*e),
        other => panic!("expected an expression body, got {:?}", other),
    }
}

/// Renders the block of `func f() { source }`.
fn block(source: &str) -> String {
    let file = parse_clean(&format!("func f() {{ {} }}", source));
    match func_kind(&file, 0) {
        ItemKind::Func {
            body: OptBody::Body(FuncBody::Block(b)),
            ..
        } => file.ast.render_block(b),
        other => panic!("expected a block body, got {:?}", other),
    }
}

/// Renders the aliased type of `type T = source;`.
fn ty(source: &str) -> String {
    let file = parse_clean(&format!("type T = {};", source));
    match func_kind(&file, 0) {
        ItemKind::TypeAlias { ty, .. } => file.ast.render_type(*ty),
        other => panic!("expected a type alias, got {:?}", other),
    }
}

/// Renders the patterns of the single arm in `match x { source => 0 }`.
fn pat(source: &str) -> String {
    let rendered = expr(&format!("match x {{ {} => 0 }}", source));
    rendered
        .trim_start_matches("Match(x, [")
        .trim_end_matches(" => 0])")
        .to_string()
}

#[test]
fn test_binary_precedence() {
    assert_eq!(expr("1 + 2 * 3"), "Infix(+, 1, Infix(*, 2, 3))");
    assert_eq!(expr("1 * 2 + 3"), "Infix(+, Infix(*, 1, 2), 3)");
    assert_eq!(expr("a or b and c"), "Infix(or, a, Infix(and, b, c))");
    assert_eq!(expr("a == b | c"), "Infix(==, a, Infix(|, b, c))");
    assert_eq!(expr("a & b ^ c"), "Infix(^, Infix(&, a, b), c)");
    assert_eq!(expr("a << 1 + 2"), "Infix(<<, a, Infix(+, 1, 2))");
    assert_eq!(expr("x |> a..b"), "Infix(|>, x, Infix(.., a, b))");
    assert_eq!(expr("a <=> b"), "Infix(<=>, a, b)");
}

#[test]
fn test_left_associativity() {
    assert_eq!(expr("1 - 2 - 3"), "Infix(-, Infix(-, 1, 2), 3)");
    assert_eq!(expr("2 ** 3 ** 2"), "Infix(**, Infix(**, 2, 3), 2)");
    assert_eq!(expr("a |> b |> c"), "Infix(|>, Infix(|>, a, b), c)");
    assert_eq!(expr("a = b = c"), "Assign(=, Assign(=, a, b), c)");
    assert_eq!(expr("a += b"), "Assign(+=, a, b)");
}

#[test]
fn test_prefix_and_cast() {
    assert_eq!(expr("-a.b"), "Prefix(-, Field(a, b))");
    assert_eq!(expr("-x ** 2"), "Infix(**, Prefix(-, x), 2)");
    assert_eq!(expr("!f()?"), "Prefix(!, Try(Call(f, [])))");
    assert_eq!(expr("**p"), "Prefix(*, Prefix(*, p))");
    assert_eq!(expr("&x.y"), "Ref(Field(x, y))");
    assert_eq!(expr("&mut x"), "RefMut(x)");
    assert_eq!(expr("x as int + 1"), "Infix(+, Cast(x, int), 1)");
    assert_eq!(expr("x as int as u8"), "Cast(Cast(x, int), u8)");
}

#[test]
fn test_postfix_chain() {
    assert_eq!(
        expr("a.b(c).d?"),
        "Try(Field(Call(Field(a, b), [c]), d))"
    );
    assert_eq!(expr("x!"), "TryBang(x)");
    assert_eq!(expr("f(x: 1, 2)"), "Call(f, [x: 1, 2])");
    assert_eq!(expr("t.0.1"), "Field(Field(t, 0), 1)");
    assert_eq!(expr("t.2"), "Field(t, 2)");
}

#[test]
fn test_generic_args_vs_comparison() {
    assert_eq!(expr("x::<T>(y)"), "Call(x::<T>, [y])");
    assert_eq!(expr("a < b"), "Infix(<, a, b)");
    assert_eq!(expr("a < b > c"), "Infix(>, Infix(<, a, b), c)");
    assert_eq!(
        expr("Vec::<Vec<int>>::new()"),
        "Call(Vec::<Vec<int>>::new, [])"
    );
    assert_eq!(
        expr("size::<int, 'a, 4, {N}, Item = T>()"),
        "Call(size::<int, 'a, 4, Block[N], Item = T>, [])"
    );
}

#[test]
fn test_grouping_and_literals() {
    assert_eq!(expr("()"), "()");
    assert_eq!(expr("(1)"), "Paren(1)");
    assert_eq!(expr("(1,)"), "Tuple(1)");
    assert_eq!(expr("(1, 'c', \"s\")"), "Tuple(1, 'c', \"s\")");
    assert_eq!(expr("255u8 + 2.5f32"), "Infix(+, 255u8, 2.5f32)");
    assert_eq!(expr("true and false"), "Infix(and, true, false)");
}

#[test]
fn test_literal_suffix_split() {
    let file = parse_clean("func f() = 0xffu8;");
    let lit = file
        .ast
        .exprs()
        .iter()
        .find_map(|e| match &e.kind {
            ExprKind::Lit(lit) => Some(lit.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(lit.text, "0xff");
    assert_eq!(lit.suffix.as_deref(), Some("u8"));
}

#[test]
fn test_paths() {
    assert_eq!(expr("a::b::c"), "a::b::c");
    assert_eq!(expr("::std::io"), "::std::io");
    assert_eq!(expr("self::x + super::y"), "Infix(+, self::x, super::y)");
    assert_eq!(expr("int::max"), "int::max");

    let file = parse_clean("func f() = a::b;");
    let path = file
        .ast
        .exprs()
        .iter()
        .find_map(|e| match &e.kind {
            ExprKind::Path(path) => Some(path.clone()),
            _ => None,
        })
        .unwrap();
    let roles: Vec<IdentRole> = path
        .segments
        .iter()
        .filter_map(|s| match &s.kind {
            PathSegmentKind::Ident(ident) => Some(ident.role),
            _ => None,
        })
        .collect();
    assert_eq!(roles, vec![IdentRole::Module, IdentRole::Value]);
}

#[test]
fn test_struct_literal() {
    assert_eq!(
        expr("Point { x, y: 1, ...base }"),
        "Struct(Point, {x, y: 1, ...base})"
    );
    assert_eq!(expr("a::B {}"), "Struct(a::B, {})");
}

#[test]
fn test_struct_restriction_in_heads() {
    assert_eq!(
        expr("if p { x } else { y }"),
        "If(p => Block[x], else Block[y])"
    );
    assert_eq!(
        expr("if (P { x }) == y { z }"),
        "If(Infix(==, Paren(Struct(P, {x})), y) => Block[z])"
    );
    assert_eq!(expr("match p { _ => 1 }"), "Match(p, [_ => 1])");
    assert_eq!(block("while p { }"), "Block[While(p, Block[])]");
    assert_eq!(block("for i in p { }"), "Block[For(i, p, Block[])]");
    // restriction does not leak into blocks or call arguments
    assert_eq!(
        expr("if f(P { x }) { P { y } }"),
        "If(Call(f, [Struct(P, {x})]) => Block[Struct(P, {y})])"
    );
}

#[test]
fn test_if_chain() {
    assert_eq!(
        expr("if a { 1 } elif b { 2 } else { 3 }"),
        "If(a => Block[1], b => Block[2], else Block[3])"
    );
    assert_eq!(
        expr("if let x = y { x }"),
        "If(Let(x, y) => Block[x])"
    );
    assert_eq!(expr("if a;"), "If(a => ;)");
}

#[test]
fn test_match_arms() {
    assert_eq!(
        expr("match x { 1 | 2 => a, _ => b }"),
        "Match(x, [1 | 2 => a, _ => b])"
    );
    assert_eq!(
        expr("match x { | 1 => { a } _ => b, }"),
        "Match(x, [1 => Block[a], _ => b])"
    );
    assert_eq!(expr("match x;"), "Match(x, ;)");
}

#[test]
fn test_match_arm_needs_comma() {
    let file = parse_source("func f() = match x { 1 => a 2 => b };");
    assert_eq!(file.errors.len(), 1);
}

#[test]
fn test_loops_and_jumps() {
    assert_eq!(expr("loop { break; }"), "Loop(Block[Break;])");
    assert_eq!(
        expr("loop { break @outer 1; }"),
        "Loop(Block[Break(@outer, 1);])"
    );
    assert_eq!(expr("loop { continue }"), "Loop(Block[Continue])");
    assert_eq!(expr("return"), "Return");
    assert_eq!(expr("return a + 1"), "Return(Infix(+, a, 1))");
}

#[test]
fn test_lambda() {
    assert_eq!(
        expr("\\(x: int, y) -> x + y"),
        "Lambda([x: int, y], Infix(+, x, y))"
    );
    assert_eq!(expr("\\() -> 1"), "Lambda([], 1)");
}

#[test]
fn test_block_statements() {
    assert_eq!(
        block("let x: int = 1; x"),
        "Block[Let(x, int, 1) x]"
    );
    assert_eq!(block("let mut y;"), "Block[Let(Mut(y))]");
    assert_eq!(block("; a;"), "Block[; a;]");
    assert_eq!(
        block("while let x = next() { }"),
        "Block[While(Let(x, Call(next, [])), Block[])]"
    );
    assert_eq!(block("while a;"), "Block[While(a, ;)]");
    assert_eq!(block("for x in y;"), "Block[For(x, y, ;)]");
    assert_eq!(block("loop;"), "Block[Loop(;)]");
    assert_eq!(block("for x in y; loop; a"), "Block[For(x, y, ;) Loop(;) a]");
    assert_eq!(
        block("for i in 0..10 { total += i; }"),
        "Block[For(i, Infix(.., 0, 10), Block[Assign(+=, total, i);])]"
    );
    assert_eq!(block("*r = 1;"), "Block[Assign(=, Prefix(*, r), 1);]");
}

#[test]
fn test_block_like_statement_ends_early() {
    // `-` can start an expression, so the `if` statement ends at `}`
    assert_eq!(
        block("if a { b } - 1"),
        "Block[If(a => Block[b]) Prefix(-, 1)]"
    );
    // `.` cannot, so the match continues into a method call
    assert_eq!(
        block("match x { _ => a }.len()"),
        "Block[Call(Field(Match(x, [_ => a]), len), [])]"
    );
    assert_eq!(
        block("loop { } { }"),
        "Block[Loop(Block[]) Block[]]"
    );
    assert_eq!(block("if a { };"), "Block[If(a => Block[]);]");
}

#[test]
fn test_block_value() {
    let file = parse_clean("func f() { let a = 1; a + 1 }");
    let ItemKind::Func {
        body: OptBody::Body(FuncBody::Block(body)),
        ..
    } = func_kind(&file, 0)
    else {
        panic!("expected a block body");
    };
    let value = body.value(&file.ast).unwrap();
    assert_eq!(file.ast.render_expr(value), "Infix(+, a, 1)");

    let file = parse_clean("func f() { let a = 1; }");
    let ItemKind::Func {
        body: OptBody::Body(FuncBody::Block(body)),
        ..
    } = func_kind(&file, 0)
    else {
        panic!("expected a block body");
    };
    assert_eq!(body.value(&file.ast), None);
}

#[test]
fn test_nested_item_in_block() {
    let file = parse_clean("func f() { struct Local; Local }");
    let ItemKind::Func {
        body: OptBody::Body(FuncBody::Block(body)),
        ..
    } = func_kind(&file, 0)
    else {
        panic!("expected a block body");
    };
    assert!(matches!(
        file.ast.stmt(body.stmts[0]).kind,
        StmtKind::Item(_)
    ));
    assert_eq!(file.ast.render_block(body), "Block[Item Local]");
}

#[test]
fn test_types() {
    assert_eq!(ty("int"), "int");
    assert_eq!(ty("Vec<Vec<int>>"), "Vec<Vec<int>>");
    assert_eq!(ty("HashMap<str, Vec<int>>"), "HashMap<str, Vec<int>>");
    assert_eq!(ty("(int, bool) -> str"), "Func([int, bool], str)");
    assert_eq!(ty("() -> !"), "Func([], !)");
    assert_eq!(ty("()"), "()");
    assert_eq!(ty("(int)"), "Tuple(int)");
    assert_eq!(ty("(int, bool)"), "Tuple(int, bool)");
    assert_eq!(ty("[int; 4]"), "Array(int, 4)");
    assert_eq!(ty("[u8; N * 2]"), "Array(u8, Infix(*, N, 2))");
    assert_eq!(ty("[str]"), "Slice(str)");
    assert_eq!(ty("&mut T"), "Ref(Mut(T))");
    assert_eq!(ty("a::b::C<T>"), "a::b::C<T>");
    assert_eq!(ty("Iter<Item = int>"), "Iter<Item = int>");
    assert_eq!(ty("Ref<'a, T>"), "Ref<'a, T>");
}

#[test]
fn test_generic_type_node() {
    let file = parse_clean("type T = Vec<int>;");
    let ItemKind::TypeAlias { ty, .. } = func_kind(&file, 0) else {
        panic!("expected a type alias");
    };
    let TypeKind::Generic { path, gen_args } = &file.ast.ty(*ty).kind else {
        panic!("expected a generic type");
    };
    assert_eq!(path.segments.len(), 1);
    assert!(path.segments[0].gen_args.is_none());
    assert_eq!(gen_args.args.len(), 1);
}

#[test]
fn test_split_shift_equals_in_let() {
    assert_eq!(
        block("let x: Vec<Vec<int>>= v;"),
        "Block[Let(x, Vec<Vec<int>>, v)]"
    );
    assert_eq!(block("let x: Vec<int>= v;"), "Block[Let(x, Vec<int>, v)]");
}

#[test]
fn test_patterns() {
    assert_eq!(pat("_"), "_");
    assert_eq!(pat("ref mut a"), "Borrow(Mut(a))");
    assert_eq!(pat("&x"), "Ref(x)");
    assert_eq!(pat("n @ 1..=5"), "Bind(n, Range(1, ..=, 5))");
    assert_eq!(pat("-1..0"), "Range(-1, .., 0)");
    assert_eq!(pat("'a'..='z'"), "Range('a', ..=, 'z')");
    assert_eq!(pat("a::B..=c::D"), "Range(a::B, ..=, c::D)");
    assert_eq!(pat("\"s\""), "\"s\"");
    assert_eq!(pat("true"), "true");
    assert_eq!(pat("-2.5"), "-2.5");
}

#[test]
fn test_bad_patterns() {
    let file = parse_source("func f() = match x { a::b => 0 };");
    assert_eq!(file.errors.len(), 1);

    let file = parse_source("func f() = match x { -true => 0 };");
    assert_eq!(file.errors.len(), 1);
}

#[test]
fn test_func_forms() {
    let file = parse_clean("func f(x: int); func g(x: int) = x; func h { } func k<T>(mut a: T): T { a }");

    let ItemKind::Func { params, body, .. } = func_kind(&file, 0) else {
        panic!("expected a function");
    };
    assert_eq!(params.as_ref().map(|p| p.len()), Some(1));
    assert_eq!(*body, OptBody::NoBody);

    let ItemKind::Func { body, .. } = func_kind(&file, 1) else {
        panic!("expected a function");
    };
    assert!(matches!(body, OptBody::Body(FuncBody::Expr(_))));

    let ItemKind::Func { params, body, .. } = func_kind(&file, 2) else {
        panic!("expected a function");
    };
    assert!(params.is_none());
    assert!(matches!(body, OptBody::Body(FuncBody::Block(_))));

    let ItemKind::Func {
        gen_params,
        params,
        return_type,
        ..
    } = func_kind(&file, 3)
    else {
        panic!("expected a function");
    };
    assert_eq!(gen_params.as_ref().map(|g| g.params.len()), Some(1));
    let params = params.as_ref().unwrap();
    assert!(params[0].mutable);
    assert_eq!(file.ast.render_type(return_type.unwrap()), "T");
}

#[test]
fn test_struct_forms() {
    let file = parse_clean(
        "pub struct P<T = int> { pub x: T, y: T, } struct Pair(int, pub bool); struct Unit;",
    );

    let item = file.item(0).unwrap();
    assert!(item.is_pub());
    let ItemKind::Struct {
        name,
        gen_params,
        body,
    } = &item.kind
    else {
        panic!("expected a struct");
    };
    assert_eq!(name.name, "P");
    assert_eq!(name.role, IdentRole::Type);
    let Some(GenParam::Type { default, .. }) = gen_params.as_ref().map(|g| &g.params[0]) else {
        panic!("expected a type parameter");
    };
    assert_eq!(file.ast.render_type(default.unwrap()), "int");
    let Some(StructBody::Fields(fields)) = body.as_body() else {
        panic!("expected named fields");
    };
    assert_eq!(fields.len(), 2);
    assert!(fields[0].vis.is_some());
    assert!(fields[1].vis.is_none());

    let ItemKind::Struct { body, .. } = func_kind(&file, 1) else {
        panic!("expected a struct");
    };
    let Some(StructBody::Tuple(fields)) = body.as_body() else {
        panic!("expected tuple fields");
    };
    assert_eq!(fields[1].index, 1);
    assert!(fields[1].vis.is_some());

    let ItemKind::Struct { body, .. } = func_kind(&file, 2) else {
        panic!("expected a struct");
    };
    assert!(!body.is_body());
}

#[test]
fn test_enum_variants() {
    let file = parse_clean(
        "enum Shape<T> { Circle { radius: f64 }, Rect(f64, f64), Empty = 0 }",
    );
    let ItemKind::Enum {
        gen_params,
        variants,
        ..
    } = func_kind(&file, 0)
    else {
        panic!("expected an enum");
    };
    assert!(gen_params.is_some());
    assert_eq!(variants.len(), 3);
    assert!(matches!(variants[0].body, VariantBody::Fields(ref f) if f.len() == 1));
    assert!(matches!(variants[1].body, VariantBody::Tuple(ref f) if f.len() == 2));
    assert_eq!(variants[2].body, VariantBody::Unit);
    assert_eq!(
        file.ast.render_expr(variants[2].discriminant.unwrap()),
        "0"
    );
}

#[test]
fn test_gen_params() {
    let file = parse_clean("struct S<'a, T: Clone + 'a, const N: int = 4> { x: [T; N] }");
    let ItemKind::Struct { gen_params, .. } = func_kind(&file, 0) else {
        panic!("expected a struct");
    };
    let params = &gen_params.as_ref().unwrap().params;
    assert_eq!(params.len(), 3);
    assert!(matches!(&params[0], GenParam::Lifetime(name) if name.name == "a"));
    let GenParam::Type { bounds, .. } = &params[1] else {
        panic!("expected a type parameter");
    };
    assert!(matches!(bounds[0], Bound::Type(_)));
    assert!(matches!(&bounds[1], Bound::Lifetime(name) if name.role == IdentRole::Lifetime));
    let GenParam::Const { default, .. } = &params[2] else {
        panic!("expected a const parameter");
    };
    assert_eq!(file.ast.render_expr(default.unwrap()), "4");
}

#[test]
fn test_impl_and_trait() {
    let file = parse_clean(
        "trait Area: Sized { type Output: Copy; func area(s: &Self): f64; }
         impl<T> Area for Point<T> { type Output = f64; func area(p: &Point<T>): f64 = 1.0; }
         impl Point { }",
    );

    let ItemKind::Trait { bounds, body, .. } = func_kind(&file, 0) else {
        panic!("expected a trait");
    };
    assert_eq!(bounds.len(), 1);
    assert_eq!(body.len(), 2);
    assert!(matches!(
        file.ast.item(body[0]).kind,
        ItemKind::AssocType { ref bounds, .. } if bounds.len() == 1
    ));

    let ItemKind::Impl {
        gen_params,
        trait_,
        ty,
        body,
    } = func_kind(&file, 1)
    else {
        panic!("expected an impl");
    };
    assert!(gen_params.is_some());
    assert_eq!(file.ast.render_type(trait_.unwrap()), "Area");
    assert_eq!(file.ast.render_type(*ty), "Point<T>");
    assert!(matches!(
        file.ast.item(body[0]).kind,
        ItemKind::TypeAlias { .. }
    ));

    let ItemKind::Impl { trait_, .. } = func_kind(&file, 2) else {
        panic!("expected an impl");
    };
    assert!(trait_.is_none());
}

#[test]
fn test_mod_forms() {
    let file = parse_clean("mod util; pub mod shapes { func f; }");
    let ItemKind::Mod { name, body } = func_kind(&file, 0) else {
        panic!("expected a module");
    };
    assert_eq!(name.role, IdentRole::Module);
    assert_eq!(*body, OptBody::NoBody);

    let ItemKind::Mod { body, .. } = func_kind(&file, 1) else {
        panic!("expected a module");
    };
    assert_eq!(body.as_body().map(|b| b.len()), Some(1));
}

#[test]
fn test_use_trees() {
    let file = parse_clean(
        "use a::b as c; use super::*; use ::{x, y}; use {z}; use *; use self::m;",
    );
    let kinds: Vec<&UseTreeKind> = file
        .items
        .iter()
        .map(|id| match &file.ast.item(*id).kind {
            ItemKind::Use(tree) => &tree.kind,
            other => panic!("expected a use, got {:?}", other),
        })
        .collect();

    assert!(matches!(kinds[0], UseTreeKind::Alias { binding, .. } if binding.name == "c"));
    assert!(matches!(kinds[1], UseTreeKind::Glob(Some(_))));
    assert!(matches!(kinds[2], UseTreeKind::List { global: true, list } if list.len() == 2));
    assert!(matches!(kinds[3], UseTreeKind::List { global: false, list } if list.len() == 1));
    assert!(matches!(kinds[4], UseTreeKind::Glob(None)));
    assert!(matches!(kinds[5], UseTreeKind::Path(_)));
}

#[test]
fn test_use_tree_rendering_keeps_global_prefix() {
    let file = parse_clean("use {a}; use ::{a}; use ::a::{b, c::*}; use a::b as c;");
    let rendered: Vec<String> = file
        .items
        .iter()
        .map(|id| match &file.ast.item(*id).kind {
            ItemKind::Use(tree) => file.ast.render_use_tree(tree),
            other => panic!("expected a use, got {:?}", other),
        })
        .collect();

    assert_eq!(
        rendered,
        vec!["{a}", "::{a}", "::a::{b, c::*}", "a::b as c"]
    );
}

#[test]
fn test_type_item_with_generics_needs_alias() {
    let file = parse_source("type T<U>;");
    assert_eq!(file.errors.len(), 1);
}

#[test]
fn test_statement_recovery() {
    let file = parse_source("func f() { let = 1; let y = 2; }");
    assert_eq!(file.errors.len(), 1);
    let ItemKind::Func {
        body: OptBody::Body(FuncBody::Block(body)),
        ..
    } = func_kind(&file, 0)
    else {
        panic!("expected a block body");
    };
    assert_eq!(file.ast.render_block(body), "Block[Error Let(y, 2)]");
}

#[test]
fn test_missing_semicolon_recovers_in_block() {
    let file = parse_source("func f() { a b } func g() {}");
    assert_eq!(file.errors.len(), 1);
    assert_eq!(file.items.len(), 2);
    assert!(matches!(func_kind(&file, 1), ItemKind::Func { .. }));
}

#[test]
fn test_member_recovery() {
    let file = parse_source("impl A { func f() = ; func g() {} }");
    assert_eq!(file.errors.len(), 1);
    let ItemKind::Impl { body, .. } = func_kind(&file, 0) else {
        panic!("expected an impl");
    };
    assert_eq!(body.len(), 2);
    assert_eq!(file.ast.item(body[0]).kind, ItemKind::Error);
    assert_eq!(
        file.ast.item(body[1]).name().map(|n| n.name.as_str()),
        Some("g")
    );
}

#[test]
fn test_stray_close_brace_at_top_level() {
    let file = parse_source("} func f() {}");
    assert_eq!(file.errors.len(), 1);
    assert_eq!(file.items.len(), 2);
    assert_eq!(func_kind(&file, 0), &ItemKind::Error);
    assert!(matches!(func_kind(&file, 1), ItemKind::Func { .. }));
}

#[test]
fn test_statement_at_top_level() {
    let file = parse_source("let x = 1; func f() {}");
    assert_eq!(file.errors.len(), 1);
    assert_eq!(file.items.len(), 2);
    assert_eq!(
        file.item(1).and_then(|i| i.name()).map(|n| n.name.as_str()),
        Some("f")
    );
}

#[test]
fn test_unexpected_eof() {
    let file = parse_source("func f() {");
    assert_eq!(file.errors.len(), 1);
    assert!(matches!(
        file.errors[0].get_impl(),
        ErrorImpl::UnexpectedEof { .. }
    ));
}

#[test]
fn test_lexical_error_token_becomes_error_node() {
    let file = parse_source("func f() = #;");
    assert_eq!(file.errors.len(), 1);
    assert!(matches!(
        file.errors[0].get_impl(),
        ErrorImpl::UnrecognisedToken { .. }
    ));
    assert_eq!(file.ast.error_node_count(), 1);
}

#[test]
fn test_lexical_error_in_item_position_is_reported_once() {
    let file = parse_source("# func g() {}");

    assert_eq!(file.errors.len(), 1);
    assert!(matches!(
        file.errors[0].get_impl(),
        ErrorImpl::UnrecognisedToken { .. }
    ));
    assert_eq!(func_kind(&file, 0), &ItemKind::Error);
    assert_eq!(
        file.item(1).and_then(|i| i.name()).map(|n| n.name.as_str()),
        Some("g")
    );
}

#[test]
fn test_lexical_error_in_pattern_position_is_reported_once() {
    let file = parse_source("func f() = match x { # => 0 };");

    assert_eq!(file.errors.len(), 1);
    assert!(matches!(
        file.errors[0].get_impl(),
        ErrorImpl::UnrecognisedToken { .. }
    ));
    let ItemKind::Func {
        body: OptBody::Body(FuncBody::Expr(e)),
        ..
    } = func_kind(&file, 0)
    else {
        panic!("expected an expression body");
    };
    assert_eq!(file.ast.render_expr(*e), "Match(x, [Error => 0])");
}

#[test]
fn test_invalid_tuple_index() {
    let file = parse_source("func f() = t.1u8;");
    assert!(file
        .errors
        .iter()
        .any(|e| matches!(e.get_impl(), ErrorImpl::InvalidTupleIndex { .. })));
}

#[test]
fn test_recursion_limit() {
    let config = ParserConfig::default().with_max_depth(16);
    let source = format!("func f() = {}1{};", "(".repeat(40), ")".repeat(40));
    let file = parse_source_with(&source, &config);

    assert_eq!(file.errors.len(), 1);
    assert!(matches!(
        file.errors[0].get_impl(),
        ErrorImpl::RecursionLimit { limit: 16 }
    ));
    assert_eq!(func_kind(&file, 0), &ItemKind::Error);
}

#[test]
fn test_long_operator_chain_hits_limit() {
    let source = format!("func f() = a{};", " + a".repeat(200_000));
    let file = parse_source(&source);

    assert_eq!(file.errors.len(), 1);
    assert!(matches!(
        file.errors[0].get_impl(),
        ErrorImpl::RecursionLimit { limit: 128 }
    ));
    assert_eq!(func_kind(&file, 0), &ItemKind::Error);
}

#[test]
fn test_long_field_chain_hits_limit() {
    let config = ParserConfig::default().with_max_depth(32);
    let source = format!("func f() = a{}; func g() = 1;", ".b".repeat(1_000));
    let file = parse_source_with(&source, &config);

    assert_eq!(file.errors.len(), 1);
    assert!(matches!(
        file.errors[0].get_impl(),
        ErrorImpl::RecursionLimit { limit: 32 }
    ));
    assert_eq!(func_kind(&file, 0), &ItemKind::Error);
    assert_eq!(
        file.item(1).and_then(|i| i.name()).map(|n| n.name.as_str()),
        Some("g")
    );
}

#[test]
fn test_operator_chain_within_limit() {
    let config = ParserConfig::default().with_max_depth(32);
    let source = format!("func f() = a{};", " + a".repeat(20));
    let file = parse_source_with(&source, &config);
    assert!(file.errors.is_empty());

    let ItemKind::Func {
        body: OptBody::Body(FuncBody::Expr(e)),
        ..
    } = func_kind(&file, 0)
    else {
        panic!("expected an expression body");
    };
    assert_eq!(file.ast.render_expr(*e).matches("Infix(+").count(), 20);
}

#[test]
fn test_depth_within_limit() {
    let config = ParserConfig::default().with_max_depth(64);
    let source = format!("func f() = {}1{};", "(".repeat(20), ")".repeat(20));
    let file = parse_source_with(&source, &config);
    assert!(file.errors.is_empty());
}
