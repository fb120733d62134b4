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

use crate::expr::Expr;
use crate::op::BinaryOperator;
use crate::span::Span;
use crate::types::TypeName;

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn block(block: StatementBlock) -> Self {
        let span = block.span;
        Self::new(StmtKind::Block(block), span)
    }

    pub fn declaration(declaration: Declaration) -> Self {
        let span = declaration.span;
        Self::new(StmtKind::Declaration(declaration), span)
    }

    pub fn expr(expr: Expr) -> Self {
        let span = expr.span;
        Self::new(StmtKind::Expr(expr), span)
    }

    /// Statements printed with a trailing `;` inside a block.
    pub fn is_simple(&self) -> bool {
        matches!(
            self.kind,
            StmtKind::Declaration(_)
                | StmtKind::Assignment { .. }
                | StmtKind::CompoundAssignment { .. }
                | StmtKind::Expr(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `{ stmt; stmt; ... }`
    Block(StatementBlock),

    /// `if (condition) then [elif (...) ... | else otherwise]`
    ///
    /// An `elif` chain is an `If` in the `otherwise` slot.
    If {
        condition: Expr,
        then: Box<Stmt>,
        otherwise: Option<Box<Stmt>>,
    },

    /// `for (setup; condition; update) body`
    ///
    /// `condition_prelude` is empty until the rewriter hoists temporaries
    /// out of the condition; it runs before every condition test.
    For {
        setup: Option<Box<Stmt>>,
        condition: Option<Expr>,
        condition_prelude: Vec<Stmt>,
        update: Option<Box<Stmt>>,
        body: Box<Stmt>,
    },

    /// `while (condition) body`
    While {
        condition: Expr,
        condition_prelude: Vec<Stmt>,
        body: Box<Stmt>,
    },

    /// `do body while (condition);`
    DoWhile {
        body: Box<Stmt>,
        condition: Expr,
        condition_prelude: Vec<Stmt>,
    },

    /// `func name(type arg, ...) -> type { body }`
    FunctionDeclaration {
        name: String,
        arguments: Vec<Declaration>,
        return_type: TypeName,
        body: StatementBlock,
    },

    /// `break;`
    Break,

    /// `yield [value];`
    Yield(Option<Expr>),

    /// `return [value];`
    Return(Option<Expr>),

    /// `type name = initializer;` or a function argument definition.
    Declaration(Declaration),

    /// `lhs = rhs;`. `lhs` names an existing binding.
    Assignment { lhs: String, rhs: Expr },

    /// `lhs op= rhs;`. `op` is the plain operator (`Add` for `+=`).
    CompoundAssignment {
        lhs: String,
        op: BinaryOperator,
        rhs: Expr,
    },

    /// An expression evaluated for its effect, e.g. `print(x);`
    Expr(Expr),
}

/// Ordered list of owned statements: the program root and the body of every
/// compound construct.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatementBlock {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl StatementBlock {
    pub fn new(statements: Vec<Stmt>, span: Span) -> Self {
        Self { statements, span }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub identifier: String,
    pub type_name: TypeName,
    /// `None` only for function argument definitions.
    pub initializer: Option<Expr>,
    pub is_function_arg: bool,
    pub span: Span,
}

impl Declaration {
    pub fn new(identifier: impl Into<String>, type_name: TypeName, initializer: Expr, span: Span) -> Self {
        Self {
            identifier: identifier.into(),
            type_name,
            initializer: Some(initializer),
            is_function_arg: false,
            span,
        }
    }

    pub fn function_arg(identifier: impl Into<String>, type_name: TypeName, span: Span) -> Self {
        Self {
            identifier: identifier.into(),
            type_name,
            initializer: None,
            is_function_arg: true,
            span,
        }
    }
}
