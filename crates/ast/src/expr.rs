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

use crate::op::{BinaryOperator, UnaryOperator};
use crate::span::Span;
use crate::types::TypeName;

/// An expression node. `type_name` starts out as `TypeName::None` for
/// everything except literals and casts, and is only updated by the resolver.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub type_name: TypeName,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `42`
    IntLiteral(i32),

    /// `3.5`
    FloatLiteral(f32),

    /// `true` / `false`
    BoolLiteral(bool),

    /// `"hello"`
    StringLiteral(String),

    /// `'c'`
    CharLiteral(char),

    /// A reference to a variable or function by name.
    Identifier(String),

    /// `{ a, b, c }`
    ListInitializer(Vec<Expr>),

    /// `container[index]`. The container is named, not owned.
    IndexOperation {
        container: String,
        index: Box<Expr>,
    },

    /// `-x`, `!x`, `~x`
    UnaryOperation {
        op: UnaryOperator,
        operand: Box<Expr>,
    },

    /// `lhs op rhs`
    BinaryOperation {
        op: BinaryOperator,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// `condition ? if_true : if_false`
    TernaryOperation {
        condition: Box<Expr>,
        if_true: Box<Expr>,
        if_false: Box<Expr>,
    },

    /// `target(arguments...)`
    FunctionCall {
        target: String,
        arguments: Vec<Expr>,
    },

    /// `(to)target`
    Cast {
        to: TypeName,
        target: Box<Expr>,
    },
}

/// Placeholder left behind when a node is moved out of its slot.
impl Default for ExprKind {
    fn default() -> Self {
        ExprKind::Identifier(String::new())
    }
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        let type_name = match &kind {
            ExprKind::IntLiteral(_) => TypeName::Int,
            ExprKind::FloatLiteral(_) => TypeName::Float,
            ExprKind::BoolLiteral(_) => TypeName::Bool,
            ExprKind::StringLiteral(_) => TypeName::String,
            ExprKind::CharLiteral(_) => TypeName::Char,
            ExprKind::Cast { to, .. } => *to,
            _ => TypeName::None,
        };
        Self {
            kind,
            span,
            type_name,
        }
    }

    pub fn identifier(name: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::Identifier(name.into()), span)
    }

    pub fn binary(op: BinaryOperator, lhs: Expr, rhs: Expr) -> Self {
        let span = lhs.span.extend(rhs.span);
        Self::new(
            ExprKind::BinaryOperation {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        )
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::IntLiteral(_)
                | ExprKind::FloatLiteral(_)
                | ExprKind::BoolLiteral(_)
                | ExprKind::StringLiteral(_)
                | ExprKind::CharLiteral(_)
        )
    }

    /// Literals and identifiers: operands a single backend instruction can
    /// consume directly.
    pub fn is_simple(&self) -> bool {
        self.is_literal() || matches!(self.kind, ExprKind::Identifier(_))
    }

    /// Operations the rewriter hoists into a temporary when they appear
    /// nested inside another expression or statement.
    pub fn can_be_reduced(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::IndexOperation { .. }
                | ExprKind::UnaryOperation { .. }
                | ExprKind::BinaryOperation { .. }
                | ExprKind::TernaryOperation { .. }
                | ExprKind::FunctionCall { .. }
        )
    }

    /// Direct sub-expressions in evaluation order.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::IntLiteral(_)
            | ExprKind::FloatLiteral(_)
            | ExprKind::BoolLiteral(_)
            | ExprKind::StringLiteral(_)
            | ExprKind::CharLiteral(_)
            | ExprKind::Identifier(_) => Vec::new(),
            ExprKind::ListInitializer(values) => values.iter().collect(),
            ExprKind::IndexOperation { index, .. } => vec![index],
            ExprKind::UnaryOperation { operand, .. } => vec![operand],
            ExprKind::BinaryOperation { lhs, rhs, .. } => vec![lhs, rhs],
            ExprKind::TernaryOperation {
                condition,
                if_true,
                if_false,
            } => vec![condition, if_true, if_false],
            ExprKind::FunctionCall { arguments, .. } => arguments.iter().collect(),
            ExprKind::Cast { target, .. } => vec![target],
        }
    }

    /// True when every direct child is a literal or identifier.
    pub fn is_flat(&self) -> bool {
        self.children().iter().all(|child| child.is_simple())
    }
}
