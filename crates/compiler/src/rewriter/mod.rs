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

//! Compound-statement rewriting.
//!
//! Nested operations are hoisted into numbered temporaries declared right
//! before the statement that used them, so every statement ends up operating
//! on literals and identifiers only. Operands are hoisted left to right,
//! before the operation consuming them.

use ast::{BinaryOperator, Declaration, Expr, ExprKind, Span, StatementBlock, Stmt, StmtKind, TypeName};

/// What a node asks its parent to do with it after rewriting.
#[derive(Debug, Clone, PartialEq)]
pub enum RewriteResult<T> {
    /// Keep the node where it is.
    Unchanged,
    /// Put this node in its place.
    ReplaceWith(T),
    /// Remove the node; the statements that replace it were already emitted.
    Erase,
}

#[derive(Debug, Default)]
pub struct Rewriter {
    next_temp: usize,
}

impl Rewriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of temporaries introduced so far.
    pub fn temp_count(&self) -> usize {
        self.next_temp
    }

    pub fn next_temp_identifier(&mut self) -> String {
        let name = format!("__tmp{}", self.next_temp);
        self.next_temp += 1;
        name
    }

    pub fn rewrite_block(&mut self, block: &mut StatementBlock) {
        self.rewrite_statement_list(&mut block.statements);
    }

    /// Rewrites each statement, splicing its temporaries in right before it.
    fn rewrite_statement_list(&mut self, statements: &mut Vec<Stmt>) {
        let original = std::mem::take(statements);
        statements.reserve(original.len());
        for mut stmt in original {
            let mut temps = Vec::new();
            let result = self.rewrite_stmt(&mut stmt, &mut temps);
            statements.append(&mut temps);
            match result {
                RewriteResult::Unchanged => statements.push(stmt),
                RewriteResult::ReplaceWith(replacement) => statements.push(replacement),
                RewriteResult::Erase => {}
            }
        }
    }

    pub fn rewrite_stmt(&mut self, stmt: &mut Stmt, temps: &mut Vec<Stmt>) -> RewriteResult<Stmt> {
        let span = stmt.span;
        match &mut stmt.kind {
            StmtKind::Block(block) => self.rewrite_block(block),
            StmtKind::If {
                condition,
                then,
                otherwise,
            } => {
                // evaluated once, ahead of the whole chain
                self.hoist(condition, temps);
                self.rewrite_body(then);
                if let Some(otherwise) = otherwise {
                    self.rewrite_body(otherwise);
                }
            }
            StmtKind::For {
                setup,
                condition,
                condition_prelude,
                update,
                body,
            } => {
                if let Some(stmt) = setup {
                    if let RewriteResult::Erase = self.rewrite_stmt(stmt, temps) {
                        *setup = None;
                    }
                }
                self.rewrite_condition(condition.as_mut(), condition_prelude);
                if let Some(stmt) = update {
                    if let Some(replacement) = self.rewrite_nested(stmt) {
                        **stmt = replacement;
                    }
                }
                self.rewrite_body(body);
            }
            StmtKind::While {
                condition,
                condition_prelude,
                body,
            } => {
                self.rewrite_condition(Some(condition), condition_prelude);
                self.rewrite_body(body);
            }
            StmtKind::DoWhile {
                body,
                condition,
                condition_prelude,
            } => {
                self.rewrite_body(body);
                self.rewrite_condition(Some(condition), condition_prelude);
            }
            StmtKind::FunctionDeclaration { body, .. } => self.rewrite_block(body),
            StmtKind::Break => {}
            StmtKind::Yield(value) | StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.hoist(value, temps);
                }
            }
            StmtKind::Declaration(declaration) => {
                if let Some(initializer) = declaration.initializer.as_mut() {
                    self.rewrite_operands(initializer, temps);
                }
            }
            StmtKind::Assignment { rhs, .. } => self.hoist(rhs, temps),
            StmtKind::CompoundAssignment { lhs, op, rhs } => {
                self.hoist(rhs, temps);
                let rhs = std::mem::take(rhs);
                self.desugar_compound(span, lhs, *op, rhs, temps);
                return RewriteResult::Erase;
            }
            StmtKind::Expr(expr) => self.rewrite_operands(expr, temps),
        }
        RewriteResult::Unchanged
    }

    /// `x op= y` → `__tmpN = (x op y); x = __tmpN;`
    fn desugar_compound(&mut self, span: Span, lhs: &str, op: BinaryOperator, rhs: Expr, temps: &mut Vec<Stmt>) {
        let generated = span.generated();
        let value = Expr::binary(op, Expr::identifier(lhs, generated), rhs);
        let temp = self.push_temp(value, generated, temps);
        temps.push(Stmt::new(
            StmtKind::Assignment {
                lhs: lhs.to_string(),
                rhs: temp,
            },
            generated,
        ));
    }

    /// Loop conditions keep their temporaries in the loop's own prelude so
    /// they are recomputed before every test.
    fn rewrite_condition(&mut self, condition: Option<&mut Expr>, prelude: &mut Vec<Stmt>) {
        self.rewrite_statement_list(prelude);
        if let Some(condition) = condition {
            self.hoist(condition, prelude);
        }
    }

    /// Rewrites a statement that sits in a single-statement slot. Returns the
    /// block to put in its place when rewriting produced temporaries.
    fn rewrite_nested(&mut self, stmt: &mut Stmt) -> Option<Stmt> {
        let mut temps = Vec::new();
        let result = self.rewrite_stmt(stmt, &mut temps);
        if temps.is_empty() {
            return match result {
                RewriteResult::Unchanged => None,
                RewriteResult::ReplaceWith(replacement) => Some(replacement),
                RewriteResult::Erase => Some(Stmt::block(StatementBlock::new(Vec::new(), stmt.span.generated()))),
            };
        }

        let span = stmt.span.generated();
        let mut statements = temps;
        match result {
            RewriteResult::Unchanged => {
                let original = std::mem::replace(stmt, Stmt::new(StmtKind::Break, span));
                statements.push(original);
            }
            RewriteResult::ReplaceWith(replacement) => statements.push(replacement),
            RewriteResult::Erase => {}
        }
        Some(Stmt::block(StatementBlock::new(statements, span)))
    }

    fn rewrite_body(&mut self, body: &mut Stmt) {
        if let Some(replacement) = self.rewrite_nested(body) {
            *body = replacement;
        }
    }

    // ─── Expressions ─────────────────────────────────────────────────────

    /// Rewrites `expr`'s operands, then moves `expr` itself into a temporary
    /// when it is a reducible operation.
    pub fn rewrite_expr(&mut self, expr: &mut Expr, temps: &mut Vec<Stmt>) -> RewriteResult<Expr> {
        self.rewrite_operands(expr, temps);
        if !expr.can_be_reduced() {
            return RewriteResult::Unchanged;
        }
        let span = expr.span.generated();
        let value = std::mem::take(expr);
        RewriteResult::ReplaceWith(self.push_temp(value, span, temps))
    }

    fn hoist(&mut self, slot: &mut Expr, temps: &mut Vec<Stmt>) {
        if let RewriteResult::ReplaceWith(replacement) = self.rewrite_expr(slot, temps) {
            *slot = replacement;
        }
    }

    /// Like `hoist`, but an operand must not hold any operation at all, so
    /// casts and non-empty lists go into a temporary as well.
    fn hoist_operand(&mut self, slot: &mut Expr, temps: &mut Vec<Stmt>) {
        self.hoist(slot, temps);
        let compound = match &slot.kind {
            ExprKind::Cast { .. } => true,
            ExprKind::ListInitializer(values) => !values.is_empty(),
            _ => false,
        };
        if compound {
            let span = slot.span.generated();
            let value = std::mem::take(slot);
            *slot = self.push_temp(value, span, temps);
        }
    }

    /// Hoists every reducible direct operand of `expr`, leaving `expr` in place.
    pub fn rewrite_operands(&mut self, expr: &mut Expr, temps: &mut Vec<Stmt>) {
        match &mut expr.kind {
            ExprKind::IntLiteral(_)
            | ExprKind::FloatLiteral(_)
            | ExprKind::BoolLiteral(_)
            | ExprKind::StringLiteral(_)
            | ExprKind::CharLiteral(_)
            | ExprKind::Identifier(_) => {}
            ExprKind::ListInitializer(values) => {
                for value in values.iter_mut() {
                    self.hoist_operand(value, temps);
                }
            }
            ExprKind::IndexOperation { index, .. } => self.hoist_operand(index, temps),
            ExprKind::UnaryOperation { operand, .. } => self.hoist_operand(operand, temps),
            ExprKind::BinaryOperation { lhs, rhs, .. } => {
                self.hoist_operand(lhs, temps);
                self.hoist_operand(rhs, temps);
            }
            ExprKind::TernaryOperation {
                condition,
                if_true,
                if_false,
            } => {
                self.hoist_operand(condition, temps);
                self.hoist_operand(if_true, temps);
                self.hoist_operand(if_false, temps);
            }
            ExprKind::FunctionCall { arguments, .. } => {
                for argument in arguments.iter_mut() {
                    self.hoist_operand(argument, temps);
                }
            }
            ExprKind::Cast { target, .. } => self.hoist_operand(target, temps),
        }
    }

    /// Declares a fresh temporary holding `value` and returns a reference to it.
    fn push_temp(&mut self, value: Expr, span: Span, temps: &mut Vec<Stmt>) -> Expr {
        let name = self.next_temp_identifier();
        temps.push(Stmt::declaration(Declaration::new(
            name.clone(),
            TypeName::None,
            value,
            span,
        )));
        Expr::identifier(name, span)
    }
}
