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

//! Source-like rendering of the tree. Output of a parsed program parses back
//! to the same tree; rewritten trees additionally show loop condition
//! preludes as `{ ... } condition`.

use std::fmt::{self, Display, Formatter, Write};

use crate::expr::{Expr, ExprKind};
use crate::op::UnaryOperator;
use crate::stmt::{Declaration, StatementBlock, Stmt, StmtKind};
use crate::Module;

const INDENT: &str = "    ";

fn write_indent(f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

fn write_escaped(f: &mut Formatter<'_>, c: char, quote: char) -> fmt::Result {
    match c {
        '\n' => f.write_str("\\n"),
        '\t' => f.write_str("\\t"),
        '\r' => f.write_str("\\r"),
        '\0' => f.write_str("\\0"),
        '\\' => f.write_str("\\\\"),
        c if c == quote => {
            f.write_char('\\')?;
            f.write_char(c)
        }
        c => f.write_char(c),
    }
}

fn write_list(f: &mut Formatter<'_>, values: &[Expr]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", value)?;
    }
    Ok(())
}

fn is_negative(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::IntLiteral(v) => *v < 0,
        ExprKind::FloatLiteral(v) => v.is_sign_negative(),
        ExprKind::UnaryOperation {
            op: UnaryOperator::Negate,
            ..
        } => true,
        _ => false,
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::IntLiteral(v) => write!(f, "{}", v),
            ExprKind::FloatLiteral(v) => write!(f, "{:?}", v),
            ExprKind::BoolLiteral(v) => write!(f, "{}", v),
            ExprKind::StringLiteral(s) => {
                f.write_char('"')?;
                for c in s.chars() {
                    write_escaped(f, c, '"')?;
                }
                f.write_char('"')
            }
            ExprKind::CharLiteral(c) => {
                f.write_char('\'')?;
                write_escaped(f, *c, '\'')?;
                f.write_char('\'')
            }
            ExprKind::Identifier(name) => f.write_str(name),
            ExprKind::ListInitializer(values) => {
                f.write_str("{ ")?;
                write_list(f, values)?;
                f.write_str(" }")
            }
            ExprKind::IndexOperation { container, index } => {
                write!(f, "{}[{}]", container, index)
            }
            ExprKind::UnaryOperation { op, operand } => {
                // `--` lexes as a single token
                if *op == UnaryOperator::Negate && is_negative(operand) {
                    write!(f, "-({})", operand)
                } else {
                    write!(f, "{}{}", op.as_str(), operand)
                }
            }
            ExprKind::BinaryOperation { op, lhs, rhs } => {
                write!(f, "({} {} {})", lhs, op.as_str(), rhs)
            }
            ExprKind::TernaryOperation {
                condition,
                if_true,
                if_false,
            } => write!(f, "({} ? {} : {})", condition, if_true, if_false),
            ExprKind::FunctionCall { target, arguments } => {
                write!(f, "{}(", target)?;
                write_list(f, arguments)?;
                f.write_char(')')
            }
            ExprKind::Cast { to, target } => write!(f, "({}){}", to, target),
        }
    }
}

impl Display for Declaration {
    /// Without the trailing `;`, which belongs to the enclosing statement.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.type_name, self.identifier)?;
        if let Some(initializer) = &self.initializer {
            write!(f, " = {}", initializer)?;
        }
        Ok(())
    }
}

/// Simple statements without their terminating `;`.
fn write_simple(f: &mut Formatter<'_>, stmt: &Stmt) -> fmt::Result {
    match &stmt.kind {
        StmtKind::Declaration(declaration) => write!(f, "{}", declaration),
        StmtKind::Assignment { lhs, rhs } => write!(f, "{} = {}", lhs, rhs),
        StmtKind::CompoundAssignment { lhs, op, rhs } => {
            write!(f, "{} {}= {}", lhs, op.as_str(), rhs)
        }
        StmtKind::Expr(expr) => write!(f, "{}", expr),
        _ => Ok(()),
    }
}

/// Setup and update slots of a `for` header.
fn write_header_stmt(f: &mut Formatter<'_>, stmt: &Stmt, depth: usize) -> fmt::Result {
    if stmt.is_simple() {
        write_simple(f, stmt)
    } else {
        write_stmt(f, stmt, depth)
    }
}

fn write_prelude(f: &mut Formatter<'_>, prelude: &[Stmt], depth: usize) -> fmt::Result {
    if prelude.is_empty() {
        return Ok(());
    }
    f.write_str("{ ")?;
    for stmt in prelude {
        write_stmt(f, stmt, depth)?;
        f.write_char(' ')?;
    }
    f.write_str("} ")
}

fn write_block(f: &mut Formatter<'_>, block: &StatementBlock, depth: usize) -> fmt::Result {
    if block.statements.is_empty() {
        return f.write_str("{ }");
    }
    f.write_str("{\n")?;
    for stmt in &block.statements {
        write_indent(f, depth + 1)?;
        write_stmt(f, stmt, depth + 1)?;
        f.write_char('\n')?;
    }
    write_indent(f, depth)?;
    f.write_char('}')
}

fn write_if_tail(f: &mut Formatter<'_>, stmt: &Stmt, depth: usize) -> fmt::Result {
    if let StmtKind::If {
        condition,
        then,
        otherwise,
    } = &stmt.kind
    {
        write!(f, "({}) ", condition)?;
        write_stmt(f, then, depth)?;
        match otherwise.as_deref() {
            Some(next) if matches!(next.kind, StmtKind::If { .. }) => {
                f.write_str(" elif ")?;
                write_if_tail(f, next, depth)
            }
            Some(other) => {
                f.write_str(" else ")?;
                write_stmt(f, other, depth)
            }
            None => Ok(()),
        }
    } else {
        write_stmt(f, stmt, depth)
    }
}

fn write_stmt(f: &mut Formatter<'_>, stmt: &Stmt, depth: usize) -> fmt::Result {
    match &stmt.kind {
        StmtKind::Block(block) => write_block(f, block, depth),
        StmtKind::If { .. } => {
            f.write_str("if ")?;
            write_if_tail(f, stmt, depth)
        }
        StmtKind::For {
            setup,
            condition,
            condition_prelude,
            update,
            body,
        } => {
            f.write_str("for (")?;
            if let Some(setup) = setup {
                write_header_stmt(f, setup, depth)?;
            }
            f.write_str("; ")?;
            write_prelude(f, condition_prelude, depth)?;
            if let Some(condition) = condition {
                write!(f, "{}", condition)?;
            }
            f.write_str("; ")?;
            if let Some(update) = update {
                write_header_stmt(f, update, depth)?;
            }
            f.write_str(") ")?;
            write_stmt(f, body, depth)
        }
        StmtKind::While {
            condition,
            condition_prelude,
            body,
        } => {
            f.write_str("while (")?;
            write_prelude(f, condition_prelude, depth)?;
            write!(f, "{}) ", condition)?;
            write_stmt(f, body, depth)
        }
        StmtKind::DoWhile {
            body,
            condition,
            condition_prelude,
        } => {
            f.write_str("do ")?;
            write_stmt(f, body, depth)?;
            f.write_str(" while (")?;
            write_prelude(f, condition_prelude, depth)?;
            write!(f, "{});", condition)
        }
        StmtKind::FunctionDeclaration {
            name,
            arguments,
            return_type,
            body,
        } => {
            write!(f, "func {}(", name)?;
            for (i, argument) in arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", argument)?;
            }
            write!(f, ") -> {} ", return_type)?;
            write_block(f, body, depth)
        }
        StmtKind::Break => f.write_str("break;"),
        StmtKind::Yield(value) => match value {
            Some(value) => write!(f, "yield {};", value),
            None => f.write_str("yield;"),
        },
        StmtKind::Return(value) => match value {
            Some(value) => write!(f, "return {};", value),
            None => f.write_str("return;"),
        },
        StmtKind::Declaration(_)
        | StmtKind::Assignment { .. }
        | StmtKind::CompoundAssignment { .. }
        | StmtKind::Expr(_) => {
            write_simple(f, stmt)?;
            f.write_char(';')
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_stmt(f, self, 0)
    }
}

impl Display for StatementBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_block(f, self, 0)
    }
}

impl Display for Module {
    /// The root block has no braces.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for stmt in &self.body.statements {
            write_stmt(f, stmt, 0)?;
            f.write_char('\n')?;
        }
        Ok(())
    }
}
