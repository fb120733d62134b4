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



use ast::{Expr, ExprKind, StatementBlock, Stmt, StmtKind};

use super::{lines, parse};
use crate::rewriter::{RewriteResult, Rewriter};

fn rewrite(source: &str) -> (StatementBlock, usize) {
    let mut block = parse(source);
    let mut rewriter = Rewriter::new();
    rewriter.rewrite_block(&mut block);
    (block, rewriter.temp_count())
}

fn assert_flat_expr(expr: &Expr) {
    assert!(expr.is_flat(), "nested operation left in {}", expr);
}

/// Every expression directly owned by a simple statement has only simple
/// operands after rewriting.
fn assert_flat(stmt: &Stmt) {
    match &stmt.kind {
        StmtKind::Block(block) => block.statements.iter().for_each(assert_flat),
        StmtKind::If { condition, then, otherwise } => {
            assert!(condition.is_simple(), "condition not hoisted: {}", condition);
            assert_flat(then);
            if let Some(otherwise) = otherwise {
                assert_flat(otherwise);
            }
        }
        StmtKind::While { condition, condition_prelude, body }
        | StmtKind::DoWhile { body, condition, condition_prelude } => {
            assert!(condition.is_simple());
            condition_prelude.iter().for_each(assert_flat);
            assert_flat(body);
        }
        StmtKind::For { setup, condition, condition_prelude, update, body } => {
            setup.iter().for_each(|s| assert_flat(s));
            assert!(condition.as_ref().map_or(true, Expr::is_simple));
            condition_prelude.iter().for_each(assert_flat);
            update.iter().for_each(|s| assert_flat(s));
            assert_flat(body);
        }
        StmtKind::FunctionDeclaration { body, .. } => body.statements.iter().for_each(assert_flat),
        StmtKind::Yield(value) | StmtKind::Return(value) => {
            if let Some(value) = value {
                assert!(value.is_simple());
            }
        }
        StmtKind::Declaration(declaration) => {
            if let Some(initializer) = &declaration.initializer {
                assert_flat_expr(initializer);
            }
        }
        StmtKind::Assignment { rhs, .. } => assert!(rhs.is_simple(), "rhs not hoisted: {}", rhs),
        StmtKind::CompoundAssignment { .. } => panic!("compound assignment survived rewriting"),
        StmtKind::Expr(expr) => assert_flat_expr(expr),
        StmtKind::Break => {}
    }
}

#[test]
fn test_operands_hoisted_in_evaluation_order() {
    let (block, temps) = rewrite("x = f(a) + g(b);");
    assert_eq!(temps, 3);
    assert_eq!(
        lines(&block),
        vec![
            "none __tmp0 = f(a);",
            "none __tmp1 = g(b);",
            "none __tmp2 = (__tmp0 + __tmp1);",
            "x = __tmp2;",
        ]
    );
}

#[test]
fn test_compound_assignment_desugared() {
    let (block, _) = rewrite("x += y;");
    assert_eq!(lines(&block), vec!["none __tmp0 = (x + y);", "x = __tmp0;"]);
    assert!(block.statements.iter().all(|s| s.span.is_generated()));
}

#[test]
fn test_compound_assignment_with_nested_value() {
    let (block, _) = rewrite("x *= a - b;");
    assert_eq!(
        lines(&block),
        vec![
            "none __tmp0 = (a - b);",
            "none __tmp1 = (x * __tmp0);",
            "x = __tmp1;",
        ]
    );
}

#[test]
fn test_declaration_keeps_top_operation() {
    let (block, temps) = rewrite("int z = a * (b + c);");
    assert_eq!(temps, 1);
    assert_eq!(
        lines(&block),
        vec!["none __tmp0 = (b + c);", "int z = (a * __tmp0);"]
    );
}

#[test]
fn test_expression_statement_keeps_call() {
    let (block, _) = rewrite("print(a + 1, b);");
    assert_eq!(lines(&block), vec!["none __tmp0 = (a + 1);", "print(__tmp0, b);"]);
}

#[test]
fn test_simple_statements_untouched() {
    let source = "int x = 1; x = y; f(x, 2); break;";
    let (block, temps) = rewrite(source);
    assert_eq!(temps, 0);
    assert_eq!(block, parse(source));
}

#[test]
fn test_if_condition_hoisted_before_statement() {
    let (block, _) = rewrite("if (a + b > c) { x = f(a); } else { yield -a; }");
    assert_eq!(block.statements.len(), 3);
    assert_eq!(lines(&block)[..2], ["none __tmp0 = (a + b);", "none __tmp1 = (__tmp0 > c);"]);
    match &block.statements[2].kind {
        StmtKind::If { condition, then, otherwise } => {
            assert!(matches!(&condition.kind, ExprKind::Identifier(n) if n == "__tmp1"));
            assert_eq!(then.to_string(), "{\n    none __tmp2 = f(a);\n    x = __tmp2;\n}");
            let otherwise = otherwise.as_deref().expect("else branch");
            assert_eq!(otherwise.to_string(), "{\n    none __tmp3 = -a;\n    yield __tmp3;\n}");
        }
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_loop_condition_gets_prelude() {
    let (block, _) = rewrite("while (i < n) i = i + 1;");
    assert_eq!(block.statements.len(), 1);
    assert_eq!(
        block.statements[0].to_string(),
        "while ({ none __tmp0 = (i < n); } __tmp0) {\n    none __tmp1 = (i + 1);\n    i = __tmp1;\n}"
    );
}

#[test]
fn test_do_while_prelude() {
    let (block, _) = rewrite("do { x = x; } while (x != 0);");
    match &block.statements[0].kind {
        StmtKind::DoWhile { condition_prelude, condition, .. } => {
            assert_eq!(condition_prelude.len(), 1);
            assert!(condition.is_simple());
        }
        other => panic!("expected do-while, got {:?}", other),
    }
}

#[test]
fn test_for_update_becomes_block() {
    let (block, temps) = rewrite("for (int i = 0; i < 10; i += 1) { }");
    assert_eq!(temps, 2);
    assert_eq!(block.statements.len(), 1);
    match &block.statements[0].kind {
        StmtKind::For { setup, condition_prelude, update, .. } => {
            assert_eq!(setup.as_ref().map(|s| s.to_string()).as_deref(), Some("int i = 0;"));
            assert_eq!(condition_prelude.len(), 1);
            assert_eq!(condition_prelude[0].to_string(), "none __tmp0 = (i < 10);");
            let update = update.as_deref().expect("update kept");
            assert!(matches!(&update.kind, StmtKind::Block(b) if b.len() == 2));
        }
        other => panic!("expected for, got {:?}", other),
    }
}

#[test]
fn test_for_setup_temps_go_before_loop() {
    let (block, _) = rewrite("for (x += 1; ; ) { break; }");
    assert_eq!(lines(&block)[..2], ["none __tmp0 = (x + 1);", "x = __tmp0;"]);
    assert!(matches!(&block.statements[2].kind, StmtKind::For { setup: None, .. }));
}

#[test]
fn test_function_body_rewritten() {
    let (block, _) = rewrite("func f(int a) -> int { return a * 2 + 1; }");
    match &block.statements[0].kind {
        StmtKind::FunctionDeclaration { body, .. } => {
            assert_eq!(
                lines(body),
                vec!["none __tmp0 = (a * 2);", "none __tmp1 = (__tmp0 + 1);", "return __tmp1;"]
            );
        }
        other => panic!("expected function, got {:?}", other),
    }
}

#[test]
fn test_ternary_branches_hoisted() {
    let (block, _) = rewrite("x = c ? a + 1 : b;");
    assert_eq!(
        lines(&block),
        vec!["none __tmp0 = (a + 1);", "none __tmp1 = (c ? __tmp0 : b);", "x = __tmp1;"]
    );
}

#[test]
fn test_index_and_list_operands() {
    let (block, _) = rewrite("int[] xs = { a + 1, 2 }; y = xs[i - 1];");
    assert_eq!(
        lines(&block),
        vec![
            "none __tmp0 = (a + 1);",
            "int[] xs = { __tmp0, 2 };",
            "none __tmp1 = (i - 1);",
            "none __tmp2 = xs[__tmp1];",
            "y = __tmp2;",
        ]
    );
}

#[test]
fn test_everything_flat_after_rewrite() {
    let (block, _) = rewrite(
        "int t = 0;
         for (int i = 0; i < n * 2; i += 1) {
             if (xs[i] > t && i % 2 == 0) t = xs[i] - 1; else t -= f(i, -i);
         }
         do { t = t / (2 + t); } while (t > n - 1);
         yield t + 1;",
    );
    block.statements.iter().for_each(assert_flat);
}

#[test]
fn test_rewrite_is_idempotent() {
    let (mut block, _) = rewrite(
        "x = f(a) + g(b); while (i < n) { i += 1; } for (int j = 0; j < 3; j += 1) y = y * j;",
    );
    let before = block.clone();
    let mut again = Rewriter::new();
    again.rewrite_block(&mut block);
    assert_eq!(again.temp_count(), 0);
    assert_eq!(block, before);
}

#[test]
fn test_temp_names_are_unique() {
    let mut rewriter = Rewriter::new();
    assert_eq!(rewriter.next_temp_identifier(), "__tmp0");
    assert_eq!(rewriter.next_temp_identifier(), "__tmp1");
    assert_eq!(rewriter.temp_count(), 2);
}

#[test]
fn test_compound_statement_erased() {
    let mut block = parse("x -= 1;");
    let mut stmt = block.statements.remove(0);
    let mut temps = Vec::new();
    let result = Rewriter::new().rewrite_stmt(&mut stmt, &mut temps);
    assert_eq!(result, RewriteResult::Erase);
    assert_eq!(temps.len(), 2);
}

#[test]
fn test_cast_operand_hoisted() {
    let (block, _) = rewrite("x = (int)(a + b) * 2;");
    assert_eq!(
        lines(&block),
        vec![
            "none __tmp0 = (a + b);",
            "none __tmp1 = (int)__tmp0;",
            "none __tmp2 = (__tmp1 * 2);",
            "x = __tmp2;",
        ]
    );
    block.statements.iter().for_each(assert_flat);
}

#[test]
fn test_list_argument_hoisted() {
    let (block, _) = rewrite("f({ 1, a * 2 }, { });");
    assert_eq!(
        lines(&block),
        vec![
            "none __tmp0 = (a * 2);",
            "none __tmp1 = { 1, __tmp0 };",
            "f(__tmp1, {  });",
        ]
    );
    block.statements.iter().for_each(assert_flat);
}

#[test]
fn test_top_level_cast_kept() {
    let (block, temps) = rewrite("float f = (float)(a + 1); g = (int)f;");
    assert_eq!(temps, 1);
    assert_eq!(
        lines(&block),
        vec!["none __tmp0 = (a + 1);", "float f = (float)__tmp0;", "g = (int)f;"]
    );
}
