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

pub mod diagnostics;
pub mod display;
pub mod expr;
pub mod op;
pub mod span;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;

pub use diagnostics::{Diagnostic, DiagnosticContainer};
pub use expr::{Expr, ExprKind};
pub use op::{BinaryOperator, UnaryOperator};
pub use span::{Span, SpanSource};
pub use stmt::{Declaration, StatementBlock, Stmt, StmtKind};
pub use types::TypeName;

/// Top-level program: the root statement block handed to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub body: StatementBlock,
}

impl Module {
    pub fn new(body: StatementBlock) -> Self {
        Self { body }
    }
}
