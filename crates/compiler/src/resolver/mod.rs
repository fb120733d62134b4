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

//! Type/lifetime resolution.
//!
//! Every statement block is resolved to a fixed point: its statements are
//! re-resolved until a full pass changes no expression type. The whole root
//! is first driven to convergence with reporting off, then resolved once more
//! with reporting on, so each problem is reported once no matter how many
//! passes convergence took.

mod variable_container;

pub use variable_container::{FunctionRegistration, FunctionSignature, VariableContainer};

use ast::{
    Declaration, DiagnosticContainer, Expr, ExprKind, Span, StatementBlock, Stmt, StmtKind,
    TypeName, UnaryOperator,
};

use crate::options::ResolverOptions;

pub struct Resolver {
    container: VariableContainer,
    diagnostics: DiagnosticContainer,
    options: ResolverOptions,
    /// Diagnostics are only recorded while this is set.
    final_pass: bool,
    /// The declared return type of the enclosing function (None at top level).
    current_return_type: Option<TypeName>,
    /// Set once a block hit the pass cap on the final pass.
    reported_cap: bool,
    /// Host-owned variables visible to every script.
    globals: Vec<(String, TypeName)>,
}

impl Resolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self {
            container: VariableContainer::new(),
            diagnostics: DiagnosticContainer::new(),
            options,
            final_pass: false,
            current_return_type: None,
            reported_cap: false,
            globals: Vec::new(),
        }
    }

    /// Makes host-owned variables readable and assignable from the script.
    /// They live in a frame below the root block, so scripts cannot redeclare
    /// them.
    pub fn with_globals<S: Into<String>>(
        mut self,
        globals: impl IntoIterator<Item = (S, TypeName)>,
    ) -> Self {
        self.globals
            .extend(globals.into_iter().map(|(name, type_name)| (name.into(), type_name)));
        self
    }

    /// Resolves `root` in place and returns everything found wrong with it.
    pub fn resolve(mut self, root: &mut StatementBlock) -> DiagnosticContainer {
        self.container.push_frame();
        for (name, type_name) in &self.globals {
            self.container.declare(name, *type_name);
        }

        let mut runs = 0;
        let mut converged = false;
        while runs < self.options.max_passes {
            let before = self.container.change_count();
            self.resolve_block(root);
            runs += 1;
            if self.container.change_count() == before {
                converged = true;
                break;
            }
        }

        self.final_pass = true;
        self.resolve_block(root);

        if !converged && !self.reported_cap {
            self.error(
                root.span,
                format!("Type resolution did not converge after {} passes", runs),
            );
        }

        tracing::debug!(
            runs,
            converged,
            diagnostics = self.diagnostics.len(),
            "resolved types"
        );
        self.diagnostics
    }

    fn error(&mut self, span: Span, message: impl Into<String>) {
        if self.final_pass {
            self.diagnostics.add(span, message);
        }
    }

    /// Updates a node's type, raising the write flag when it changed.
    fn set_type(&mut self, expr: &mut Expr, type_name: TypeName) {
        if expr.type_name != type_name {
            expr.type_name = type_name;
            self.container.set_write_flag();
        }
    }

    // ─── Blocks ──────────────────────────────────────────────────────────

    fn resolve_block(&mut self, block: &mut StatementBlock) {
        let outer_flag = self.container.write_flag();
        self.container.push_frame();

        let mut passes = 0;
        loop {
            self.container.clear_frame();
            self.container.clear_write_flag();
            for stmt in &mut block.statements {
                self.resolve_stmt(stmt);
            }
            passes += 1;
            tracing::trace!(passes, changed = self.container.write_flag(), "block pass");

            if !self.container.write_flag() {
                break;
            }
            if passes >= self.options.max_passes {
                self.reported_cap |= self.final_pass;
                self.error(
                    block.span,
                    format!("Type resolution did not converge after {} passes", passes),
                );
                break;
            }
        }

        self.container.restore_write_flag(outer_flag);
        self.container.pop_frame();
    }

    // ─── Statements ──────────────────────────────────────────────────────

    fn resolve_stmt(&mut self, stmt: &mut Stmt) {
        let span = stmt.span;
        match &mut stmt.kind {
            StmtKind::Block(block) => self.resolve_block(block),
            StmtKind::If {
                condition,
                then,
                otherwise,
            } => {
                self.container.push_frame();
                self.resolve_condition(condition);
                self.resolve_stmt(then);
                if let Some(otherwise) = otherwise {
                    self.resolve_stmt(otherwise);
                }
                self.container.pop_frame();
            }
            StmtKind::For {
                setup,
                condition,
                condition_prelude,
                update,
                body,
            } => {
                self.container.push_frame();
                if let Some(setup) = setup {
                    self.resolve_stmt(setup);
                }
                for stmt in condition_prelude.iter_mut() {
                    self.resolve_stmt(stmt);
                }
                if let Some(condition) = condition {
                    self.resolve_condition(condition);
                }
                if let Some(update) = update {
                    self.resolve_stmt(update);
                }
                self.resolve_stmt(body);
                self.container.pop_frame();
            }
            StmtKind::While {
                condition,
                condition_prelude,
                body,
            } => {
                self.container.push_frame();
                for stmt in condition_prelude.iter_mut() {
                    self.resolve_stmt(stmt);
                }
                self.resolve_condition(condition);
                self.resolve_stmt(body);
                self.container.pop_frame();
            }
            StmtKind::DoWhile {
                body,
                condition,
                condition_prelude,
            } => {
                self.container.push_frame();
                self.resolve_stmt(body);
                for stmt in condition_prelude.iter_mut() {
                    self.resolve_stmt(stmt);
                }
                self.resolve_condition(condition);
                self.container.pop_frame();
            }
            StmtKind::FunctionDeclaration {
                name,
                arguments,
                return_type,
                body,
            } => self.resolve_function(span, name, arguments, *return_type, body),
            StmtKind::Break => {}
            StmtKind::Yield(value) => {
                let void = match value {
                    Some(value) => {
                        self.resolve_expr(value);
                        !value.type_name.is_known() || value.type_name == TypeName::Void
                    }
                    None => true,
                };
                if void {
                    self.error(span, "Yield value must be non-void");
                }
            }
            StmtKind::Return(value) => self.resolve_return(span, value.as_mut()),
            StmtKind::Declaration(declaration) => self.resolve_declaration(declaration),
            StmtKind::Assignment { lhs, rhs } => {
                self.resolve_expr(rhs);
                match self.container.lookup(lhs) {
                    Some(target) => self.check_assignable(target, rhs),
                    None => self.error(span, format!("Identifier \"{}\" not found", lhs)),
                }
            }
            StmtKind::CompoundAssignment { .. } => {
                debug_assert!(false, "compound assignments are rewritten before resolution");
                self.error(
                    span,
                    "Internal error: compound assignment reached type resolution",
                );
            }
            StmtKind::Expr(expr) => self.resolve_expr(expr),
        }
    }

    fn resolve_condition(&mut self, condition: &mut Expr) {
        self.resolve_expr(condition);
        let type_name = condition.type_name;
        if type_name.is_known() && type_name != TypeName::Bool {
            self.error(
                condition.span,
                format!(
                    "Condition statement must evaluate to a boolean value (not {})",
                    type_name
                ),
            );
        }
    }

    fn resolve_declaration(&mut self, declaration: &mut Declaration) {
        let name = declaration.identifier.as_str();
        if let Some(existing) = self.container.lookup(name) {
            let message = if existing != declaration.type_name {
                format!(
                    "Multiple definitions found of '{}' with different types ({} vs. {})",
                    name, declaration.type_name, existing
                )
            } else {
                format!("Multiple definitions found of '{}'", name)
            };
            self.error(declaration.span, message);
            return;
        }

        if let Some(initializer) = declaration.initializer.as_mut() {
            self.resolve_expr(initializer);

            if !declaration.type_name.is_known() {
                // temporaries take whatever their value resolves to
                if initializer.type_name.is_known() {
                    declaration.type_name = initializer.type_name;
                    self.container.set_write_flag();
                }
            } else {
                let target = declaration.type_name;
                self.check_assignable(target, initializer);
            }
        }

        self.container
            .declare(&declaration.identifier, declaration.type_name);
    }

    /// Checks a value stored into a binding of type `target`. An empty list
    /// literal takes on any list type.
    fn check_assignable(&mut self, target: TypeName, value: &mut Expr) {
        if self.adopt_list_type(value, target) {
            return;
        }

        let actual = value.type_name;
        if actual.is_known() && actual != target {
            self.error(
                value.span,
                format!("Mismatched types ({} vs. {})", target, actual),
            );
        }
    }

    /// Gives `target` to an untyped empty list, or to a ternary whose branches
    /// all end in such lists or already have `target`. Returns whether `value`
    /// now has that type.
    fn adopt_list_type(&mut self, value: &mut Expr, target: TypeName) -> bool {
        if !target.is_list() || value.type_name.is_known() {
            return false;
        }
        match &mut value.kind {
            ExprKind::ListInitializer(values) if values.is_empty() => {}
            ExprKind::TernaryOperation {
                if_true, if_false, ..
            } => {
                let t = if_true.type_name == target || self.adopt_list_type(if_true, target);
                let f = if_false.type_name == target || self.adopt_list_type(if_false, target);
                if !(t && f) {
                    return false;
                }
            }
            _ => return false,
        }
        self.set_type(value, target);
        true
    }

    fn resolve_function(
        &mut self,
        span: Span,
        name: &str,
        arguments: &mut [Declaration],
        return_type: TypeName,
        body: &mut StatementBlock,
    ) {
        let signature = FunctionSignature {
            return_type,
            parameters: arguments.iter().map(|a| a.type_name).collect(),
            span,
        };
        if let FunctionRegistration::Conflict(existing) =
            self.container.declare_function(name, signature)
        {
            self.error(
                span,
                format!(
                    "Multiple definitions found of function '{}' (first declared at {})",
                    name, existing.span
                ),
            );
        }

        self.container.push_frame();
        for argument in arguments.iter_mut() {
            self.resolve_declaration(argument);
        }

        let outer_return_type = self.current_return_type.replace(return_type);
        self.resolve_block(body);
        self.current_return_type = outer_return_type;
        self.container.pop_frame();

        if return_type != TypeName::Void && !contains_return(body) {
            self.error(span, "Expected return type from function");
        }
    }

    fn resolve_return(&mut self, span: Span, value: Option<&mut Expr>) {
        let expected = self.current_return_type;
        match value {
            Some(value) => {
                self.resolve_expr(value);
                let actual = value.type_name;
                if !actual.is_known() || actual == TypeName::Void {
                    self.error(span, "Return value must be non-void");
                } else if let Some(expected) = expected {
                    if expected == TypeName::Void {
                        self.error(value.span, "Function returning void cannot return a value");
                    } else {
                        self.check_assignable(expected, value);
                    }
                }
            }
            None => {
                if matches!(expected, Some(t) if t != TypeName::Void) {
                    self.error(span, "Return value must be non-void");
                }
            }
        }
    }

    // ─── Expressions ─────────────────────────────────────────────────────

    fn resolve_expr(&mut self, expr: &mut Expr) {
        let span = expr.span;
        let resolved = match &mut expr.kind {
            ExprKind::IntLiteral(_)
            | ExprKind::FloatLiteral(_)
            | ExprKind::BoolLiteral(_)
            | ExprKind::StringLiteral(_)
            | ExprKind::CharLiteral(_) => None,
            ExprKind::Identifier(name) => match self.container.lookup(name) {
                Some(type_name) => Some(type_name),
                None => {
                    let message = format!("Identifier \"{}\" not found", name);
                    self.error(span, message);
                    None
                }
            },
            ExprKind::ListInitializer(values) => self.resolve_list(span, values),
            ExprKind::IndexOperation { container, index } => {
                self.resolve_expr(index);
                if index.type_name.is_known() && index.type_name != TypeName::Int {
                    let message = format!("Index must be an int (not {})", index.type_name);
                    self.error(index.span, message);
                }
                match self.container.lookup(container) {
                    Some(container_type) => match container_type.element_type() {
                        Some(element) => Some(element),
                        None if container_type.is_known() => {
                            let message =
                                format!("Cannot index into a value of type {}", container_type);
                            self.error(span, message);
                            None
                        }
                        None => None,
                    },
                    None => {
                        let message = format!("Identifier \"{}\" not found", container);
                        self.error(span, message);
                        None
                    }
                }
            }
            ExprKind::UnaryOperation { op, operand } => {
                self.resolve_expr(operand);
                self.resolve_unary(span, *op, operand.type_name)
            }
            ExprKind::BinaryOperation { op, lhs, rhs } => {
                self.resolve_expr(lhs);
                self.resolve_expr(rhs);
                self.adopt_list_type(lhs, rhs.type_name);
                self.adopt_list_type(rhs, lhs.type_name);
                let (l, r) = (lhs.type_name, rhs.type_name);
                if !l.is_known() || !r.is_known() {
                    None
                } else if l != r {
                    self.error(span, format!("Mismatched types ({} vs. {})", l, r));
                    None
                } else if op.is_test() {
                    Some(TypeName::Bool)
                } else {
                    Some(l)
                }
            }
            ExprKind::TernaryOperation {
                condition,
                if_true,
                if_false,
            } => {
                self.resolve_condition(condition);
                self.resolve_expr(if_true);
                self.resolve_expr(if_false);
                self.adopt_list_type(if_true, if_false.type_name);
                self.adopt_list_type(if_false, if_true.type_name);
                let (t, f) = (if_true.type_name, if_false.type_name);
                if !t.is_known() || !f.is_known() {
                    if is_empty_list(if_true) && is_empty_list(if_false) {
                        self.error(span, "Cannot infer type of empty list");
                    }
                    None
                } else if t != f {
                    self.error(span, format!("Mismatched types ({} vs. {})", t, f));
                    None
                } else {
                    Some(t)
                }
            }
            ExprKind::FunctionCall { target, arguments } => {
                for argument in arguments.iter_mut() {
                    self.resolve_expr(argument);
                }
                match self.container.lookup_function(target).cloned() {
                    Some(signature) => {
                        self.check_arguments(span, target, &signature, arguments);
                        Some(signature.return_type)
                    }
                    None => {
                        let message = format!("Function \"{}\" not found", target);
                        self.error(span, message);
                        None
                    }
                }
            }
            ExprKind::Cast { target, .. } => {
                self.resolve_expr(target);
                None
            }
        };

        if let Some(type_name) = resolved {
            self.set_type(expr, type_name);
        }
    }

    fn resolve_unary(&mut self, span: Span, op: UnaryOperator, operand: TypeName) -> Option<TypeName> {
        if !operand.is_known() {
            return None;
        }
        let accepted = match op {
            UnaryOperator::Negate => matches!(operand, TypeName::Int | TypeName::Float),
            UnaryOperator::Not => operand == TypeName::Bool,
            UnaryOperator::BinInvert => operand == TypeName::Int,
        };
        if !accepted {
            self.error(
                span,
                format!("Operator {} cannot be applied to {}", op.as_str(), operand),
            );
            return None;
        }
        Some(operand)
    }

    fn resolve_list(&mut self, span: Span, values: &mut [Expr]) -> Option<TypeName> {
        for value in values.iter_mut() {
            self.resolve_expr(value);
        }
        let first = values.first()?.type_name;
        for value in values.iter().skip(1) {
            if value.type_name.is_known() && first.is_known() && value.type_name != first {
                self.error(
                    value.span,
                    format!("Mismatched types ({} vs. {})", first, value.type_name),
                );
                return None;
            }
        }
        if !first.is_known() {
            return None;
        }
        match first.list_variant() {
            Some(list) => Some(list),
            None => {
                self.error(span, format!("Lists of {} are not supported", first));
                None
            }
        }
    }

    fn check_arguments(
        &mut self,
        span: Span,
        target: &str,
        signature: &FunctionSignature,
        arguments: &mut [Expr],
    ) {
        if arguments.len() != signature.parameters.len() {
            self.error(
                span,
                format!(
                    "Function \"{}\" expects {} arguments but {} were given",
                    target,
                    signature.parameters.len(),
                    arguments.len()
                ),
            );
            return;
        }
        for (argument, parameter) in arguments.iter_mut().zip(&signature.parameters) {
            self.check_assignable(*parameter, argument);
        }
    }
}

fn is_empty_list(expr: &Expr) -> bool {
    matches!(&expr.kind, ExprKind::ListInitializer(values) if values.is_empty())
}

/// Whether a `return` appears anywhere in `block`, nested functions excluded.
fn contains_return(block: &StatementBlock) -> bool {
    block.statements.iter().any(stmt_contains_return)
}

fn stmt_contains_return(stmt: &Stmt) -> bool {
    match &stmt.kind {
        StmtKind::Return(_) => true,
        StmtKind::Block(block) => contains_return(block),
        StmtKind::If {
            then, otherwise, ..
        } => stmt_contains_return(then) || otherwise.as_deref().is_some_and(stmt_contains_return),
        StmtKind::For { body, .. } | StmtKind::While { body, .. } | StmtKind::DoWhile { body, .. } => {
            stmt_contains_return(body)
        }
        _ => false,
    }
}
