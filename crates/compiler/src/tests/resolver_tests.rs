/*
 * Copyright (c) 2026. Mikhail Kulik.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */



use ast::{ExprKind, Span, StatementBlock, StmtKind, TypeName};

use super::{lines, parse};
use crate::options::ResolverOptions;
use crate::resolver::{FunctionRegistration, FunctionSignature, Resolver, VariableContainer};
use crate::rewriter::Rewriter;

fn resolve_with(source: &str, options: ResolverOptions) -> (StatementBlock, Vec<String>) {
    let mut block = parse(source);
    Rewriter::new().rewrite_block(&mut block);
    let diagnostics = Resolver::new(options).resolve(&mut block);
    let messages = diagnostics.iter().map(|d| d.message.clone()).collect();
    (block, messages)
}

fn resolve(source: &str) -> (StatementBlock, Vec<String>) {
    resolve_with(source, ResolverOptions::default())
}

/// Resolves without rewriting first, so nested expressions keep their shape.
fn resolve_unrewritten(source: &str) -> (StatementBlock, Vec<String>) {
    let mut block = parse(source);
    let diagnostics = Resolver::new(ResolverOptions::default()).resolve(&mut block);
    let messages = diagnostics.iter().map(|d| d.message.clone()).collect();
    (block, messages)
}

fn initializer_type(block: &StatementBlock, index: usize) -> TypeName {
    match &block.statements[index].kind {
        StmtKind::Declaration(d) => d.initializer.as_ref().expect("initializer").type_name,
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_well_typed_script() {
    let (_, messages) = resolve(
        "int total = 0;
         int[] xs = { 1, 2, 3 };
         for (int i = 0; i < 3; i += 1) { total += xs[i] * 2; }
         string s = \"ab\";
         char c = s[0];
         float f = (float)total;
         bool done = total > 10 || !(c == 'a');
         yield total;",
    );
    assert!(messages.is_empty(), "unexpected diagnostics: {:?}", messages);
}

#[test]
fn test_temporaries_take_resolved_type() {
    let (block, messages) = resolve("int x = 1; int y = 2; x += y;");
    assert!(messages.is_empty());
    assert_eq!(
        lines(&block),
        vec!["int x = 1;", "int y = 2;", "int __tmp0 = (x + y);", "x = __tmp0;"]
    );
}

#[test]
fn test_comparison_temporary_is_bool() {
    let (block, messages) = resolve("float a = 1.5; bool b = true; b = a < 2.0;");
    assert!(messages.is_empty());
    assert_eq!(lines(&block)[2], "bool __tmp0 = (a < 2.0);");
}

#[test]
fn test_forward_function_call() {
    let (block, messages) = resolve("int y = f(); func f() -> int { return 1; }");
    assert!(messages.is_empty(), "{:?}", messages);
    assert_eq!(initializer_type(&block, 0), TypeName::Int);
}

#[test]
fn test_mutually_recursive_functions() {
    let (_, messages) = resolve(
        "func even(int n) -> bool { if (n == 0) { return true; } return odd(n - 1); }
         func odd(int n) -> bool { if (n == 0) { return false; } return even(n - 1); }
         bool r = even(4);",
    );
    assert!(messages.is_empty(), "{:?}", messages);
}

#[test]
fn test_pass_cap_reports_non_convergence() {
    let options = ResolverOptions { max_passes: 1 };
    let (_, messages) = resolve_with("int y = f(); func f() -> int { return 1; }", options);
    let reported: Vec<_> = messages.iter().filter(|m| m.contains("did not converge")).collect();
    assert_eq!(reported.len(), 1, "{:?}", messages);
    assert_eq!(reported[0], "Type resolution did not converge after 1 passes");
}

#[test]
fn test_duplicate_declaration_reported_once() {
    let (_, messages) = resolve("int x = 1; int x = 2;");
    assert_eq!(messages, vec!["Multiple definitions found of 'x'"]);
}

#[test]
fn test_duplicate_declaration_with_different_type() {
    let (_, messages) = resolve("int x = 1; float x = 2.0;");
    assert_eq!(
        messages,
        vec!["Multiple definitions found of 'x' with different types (float vs. int)"]
    );
}

#[test]
fn test_loop_variables_scoped_to_loop() {
    let (_, messages) = resolve(
        "for (int i = 0; i < 3; i += 1) { int t = i; } int i = 5; while (i > 0) { int t = i; i -= 1; }",
    );
    assert!(messages.is_empty(), "{:?}", messages);
}

#[test]
fn test_block_variables_not_visible_outside() {
    let (_, messages) = resolve("{ int hidden = 1; } hidden = 2;");
    assert_eq!(messages, vec!["Identifier \"hidden\" not found"]);
}

#[test]
fn test_unknown_identifier() {
    let (_, messages) = resolve("int y = z + 1;");
    assert_eq!(messages, vec!["Identifier \"z\" not found"]);
}

#[test]
fn test_ternary_branch_mismatch() {
    let (block, messages) = resolve_unrewritten(
        "int a = 1; float b = 2.0; bool c = true; float r = c ? a : b;",
    );
    assert_eq!(messages, vec!["Mismatched types (int vs. float)"]);
    assert_eq!(initializer_type(&block, 3), TypeName::None);
}

#[test]
fn test_binary_mismatch_in_nested_expression() {
    let (block, messages) = resolve_unrewritten("int a = 1; float b = 2.0; int c = (a + 1) * b;");
    assert_eq!(messages, vec!["Mismatched types (int vs. float)"]);
    match &block.statements[2].kind {
        StmtKind::Declaration(d) => match d.initializer.as_ref().map(|e| &e.kind) {
            Some(ExprKind::BinaryOperation { lhs, .. }) => assert_eq!(lhs.type_name, TypeName::Int),
            other => panic!("unexpected initializer {:?}", other),
        },
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_declared_type_mismatch() {
    let (_, messages) = resolve("int n = 1.5;");
    assert_eq!(messages, vec!["Mismatched types (int vs. float)"]);
}

#[test]
fn test_condition_must_be_bool() {
    let (_, messages) = resolve("if (1) { }");
    assert_eq!(
        messages,
        vec!["Condition statement must evaluate to a boolean value (not int)"]
    );

    let (_, messages) = resolve("if (true) { }");
    assert!(messages.is_empty());

    let (_, messages) = resolve("int i = 3; while (i) { i -= 1; }");
    assert_eq!(
        messages,
        vec!["Condition statement must evaluate to a boolean value (not int)"]
    );
}

#[test]
fn test_yield_requires_value() {
    let (_, messages) = resolve("yield;");
    assert_eq!(messages, vec!["Yield value must be non-void"]);

    let (_, messages) = resolve("func v() -> void { } yield v();");
    assert_eq!(messages, vec!["Yield value must be non-void"]);

    let (_, messages) = resolve("yield 1;");
    assert!(messages.is_empty());
}

#[test]
fn test_return_checks() {
    let (_, messages) = resolve("func g() -> int { return; }");
    assert_eq!(messages, vec!["Return value must be non-void"]);

    let (_, messages) = resolve("func h() -> void { return 1; }");
    assert_eq!(messages, vec!["Function returning void cannot return a value"]);

    let (_, messages) = resolve("func k() -> int { return 1.5; }");
    assert_eq!(messages, vec!["Mismatched types (int vs. float)"]);

    let (_, messages) = resolve("func m() -> int { int x = 1; }");
    assert_eq!(messages, vec!["Expected return type from function"]);
}

#[test]
fn test_function_arguments_checked() {
    let (_, messages) = resolve("func f(int a) -> int { return a; } int r = f(1, 2);");
    assert_eq!(messages, vec!["Function \"f\" expects 1 arguments but 2 were given"]);

    let (_, messages) = resolve("func f(int a) -> int { return a; } int r = f(1.5);");
    assert_eq!(messages, vec!["Mismatched types (int vs. float)"]);

    let (_, messages) = resolve("g();");
    assert_eq!(messages, vec!["Function \"g\" not found"]);
}

#[test]
fn test_function_arguments_scoped_to_body() {
    let (_, messages) = resolve("func f(int a) -> int { return a; } int a = f(2);");
    assert!(messages.is_empty(), "{:?}", messages);
}

#[test]
fn test_function_redefinition() {
    let (_, messages) = resolve("func f() -> void { } func f() -> int { return 1; }");
    assert_eq!(messages.len(), 1, "{:?}", messages);
    assert!(messages[0].starts_with("Multiple definitions found of function 'f' (first declared at "));
}

#[test]
fn test_empty_list_takes_declared_type() {
    let (block, messages) = resolve("int[] xs = { }; xs = { };");
    assert!(messages.is_empty(), "{:?}", messages);
    assert_eq!(initializer_type(&block, 0), TypeName::IntList);
}

#[test]
fn test_list_element_checks() {
    let (_, messages) = resolve("int[] ys = { 1.5 };");
    assert_eq!(messages, vec!["Mismatched types (int[] vs. float[])"]);

    let (_, messages) = resolve("int[] zs = { 1, 2.5 };");
    assert_eq!(messages, vec!["Mismatched types (int vs. float)"]);

    let (_, messages) = resolve("func v() -> void { } int[] ws = { v() };");
    assert_eq!(messages, vec!["Lists of void are not supported"]);
}

#[test]
fn test_index_checks() {
    let (_, messages) = resolve("int[] xs = { 1, 2 }; int v = xs[true];");
    assert_eq!(messages, vec!["Index must be an int (not bool)"]);

    let (_, messages) = resolve("int n = 3; int m = n[0];");
    assert_eq!(messages, vec!["Cannot index into a value of type int"]);

    let (_, messages) = resolve("int m = missing[0];");
    assert_eq!(messages, vec!["Identifier \"missing\" not found"]);
}

#[test]
fn test_unary_operand_checks() {
    let (_, messages) = resolve("bool b = !1;");
    assert_eq!(messages, vec!["Operator ! cannot be applied to int"]);

    let (_, messages) = resolve("float f = 2.5; float g = -f; int i = ~3; bool n = !true;");
    assert!(messages.is_empty(), "{:?}", messages);
}

#[test]
fn test_resolution_is_stable() {
    let (mut block, messages) = resolve("int y = f(2); func f(int a) -> int { return a * a + 1; }");
    assert!(messages.is_empty());
    let before = block.clone();
    let again = Resolver::new(ResolverOptions::default()).resolve(&mut block);
    assert!(again.is_empty());
    assert_eq!(block, before);
}

#[test]
fn test_variable_container_frames() {
    let mut container = VariableContainer::new();
    container.push_frame();
    container.declare("x", TypeName::Int);
    container.push_frame();
    container.declare("y", TypeName::Float);
    assert_eq!(container.lookup("x"), Some(TypeName::Int));
    assert_eq!(container.depth(), 2);

    container.clear_frame();
    assert!(!container.is_declared("y"));
    container.pop_frame();
    assert!(container.is_declared("x"));
    container.pop_frame();
    assert_eq!(container.lookup("x"), None);
}

#[test]
fn test_variable_container_write_flag() {
    let mut container = VariableContainer::new();
    container.set_write_flag();
    let outer = container.write_flag();
    container.clear_write_flag();
    assert!(!container.write_flag());
    container.restore_write_flag(outer);
    assert!(container.write_flag());
    assert_eq!(container.change_count(), 1);
}

#[test]
fn test_variable_container_functions() {
    let mut container = VariableContainer::new();
    let signature = FunctionSignature {
        return_type: TypeName::Int,
        parameters: vec![TypeName::Int],
        span: Span::new(0, 10),
    };
    assert_eq!(container.declare_function("f", signature.clone()), FunctionRegistration::Changed);
    assert_eq!(container.declare_function("f", signature.clone()), FunctionRegistration::Unchanged);

    let other = FunctionSignature {
        span: Span::new(20, 30),
        ..signature.clone()
    };
    assert_eq!(container.declare_function("f", other), FunctionRegistration::Conflict(signature));
    assert_eq!(container.lookup_function("f").map(|s| s.return_type), Some(TypeName::Int));
}

#[test]
fn test_globals_are_readable_and_assignable() {
    let mut block = parse("out0 = 1; int y = out0 + 2; out0 += y;");
    Rewriter::new().rewrite_block(&mut block);
    let diagnostics = Resolver::new(ResolverOptions::default())
        .with_globals([("out0", TypeName::Int)])
        .resolve(&mut block);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);

    let mut block = parse("out0 = 1.5;");
    let diagnostics = Resolver::new(ResolverOptions::default())
        .with_globals([("out0", TypeName::Int)])
        .resolve(&mut block);
    let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, vec!["Mismatched types (int vs. float)"]);
}

#[test]
fn test_empty_list_in_ternary_takes_other_branch_type() {
    let (block, messages) = resolve("int[] ys = { 1 }; int[] xs = true ? { } : ys;");
    assert!(messages.is_empty(), "{:?}", messages);
    assert_eq!(initializer_type(&block, 1), TypeName::IntList);
}

#[test]
fn test_empty_list_ternary_takes_declared_type() {
    let (block, messages) = resolve("bool b = true; float[] zs = b ? { } : { };");
    assert!(messages.is_empty(), "{:?}", messages);
    assert_eq!(initializer_type(&block, 1), TypeName::FloatList);
    match &block.statements[1].kind {
        StmtKind::Declaration(d) => match d.initializer.as_ref().map(|e| &e.kind) {
            Some(ExprKind::TernaryOperation { if_true, if_false, .. }) => {
                assert_eq!(if_true.type_name, TypeName::FloatList);
                assert_eq!(if_false.type_name, TypeName::FloatList);
            }
            other => panic!("unexpected initializer {:?}", other),
        },
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_empty_list_ternary_without_target() {
    let (_, messages) = resolve("bool b = true; int[] w = { }; w = b ? { } : { };");
    assert_eq!(messages, vec!["Cannot infer type of empty list"]);
}

#[test]
fn test_empty_list_compared_with_list() {
    let (_, messages) = resolve("bool same = { } == { 1 };");
    assert!(messages.is_empty(), "{:?}", messages);
}

#[test]
fn test_if_body_declarations_scoped_to_if() {
    let (_, messages) = resolve("bool c = true; if (c) int y = 1; y = 2;");
    assert_eq!(messages, vec!["Identifier \"y\" not found"]);

    let (_, messages) = resolve("bool c = true; if (c) int y = 1; int y = 2;");
    assert!(messages.is_empty(), "{:?}", messages);
}
