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

use super::*;
use ast::{Declaration, StmtKind};

use super::binop::compound_operator;

impl<'r, I: Iterator<Item = SpannedToken>> Parser<'r, I> {
    pub(crate) fn next_statement(&mut self) -> ParseResult<Stmt> {
        match self.peek_token() {
            Token::OpenCurly => Ok(Stmt::block(self.next_statement_block()?)),
            Token::If => self.next_if_statement(),
            Token::For => self.next_for_statement(),
            Token::Do => self.next_do_while_statement(),
            Token::While => self.next_while_statement(),
            Token::Func => self.next_function_declaration(),
            Token::Break => {
                let span = self.advance();
                let span = self.eat_into(span, Token::Semicolon);
                Ok(Stmt::new(StmtKind::Break, span))
            }
            Token::Yield => {
                let (value, span) = self.next_optional_value()?;
                Ok(Stmt::new(StmtKind::Yield(value), span))
            }
            Token::Return => {
                let (value, span) = self.next_optional_value()?;
                Ok(Stmt::new(StmtKind::Return(value), span))
            }
            _ if self.next_is_typename() || self.next_starts_expression() => {
                let stmt = self.next_simple_statement()?;
                let span = self.eat_into(stmt.span, Token::Semicolon);
                Ok(Stmt { span, ..stmt })
            }
            other => {
                let span = self.peek_span();
                self.diagnostics.add(
                    span,
                    format!("Expected expression, but found \"{}\"", other.describe()),
                );
                self.advance();
                Err(Aborted)
            }
        }
    }

    /// Declaration, assignment, compound assignment or bare expression,
    /// without the terminating `;`.
    pub(crate) fn next_simple_statement(&mut self) -> ParseResult<Stmt> {
        if self.next_is_typename() {
            let declaration = self.next_declaration()?;
            return Ok(Stmt::declaration(declaration));
        }

        if !self.next_is(Token::Identifier) {
            let expr = self.next_expression()?;
            return Ok(Stmt::expr(expr));
        }

        let span = self.advance();
        let name = self.last_text().to_string();

        if self.next_is(Token::Equals) {
            self.advance();
            let rhs = self.next_expression()?;
            let span = span.extend(rhs.span);
            return Ok(Stmt::new(StmtKind::Assignment { lhs: name, rhs }, span));
        }

        if let Some(op) = compound_operator(self.peek_token()) {
            self.advance();
            let rhs = self.next_expression()?;
            let span = span.extend(rhs.span);
            return Ok(Stmt::new(
                StmtKind::CompoundAssignment { lhs: name, op, rhs },
                span,
            ));
        }

        let primary = self.identifier_tail(name, span)?;
        let expr = self.expression_tail(primary)?;
        Ok(Stmt::expr(expr))
    }

    /// `type[ [] ] name = initializer`
    fn next_declaration(&mut self) -> ParseResult<Declaration> {
        let (type_name, span) = self.next_type_name(false)?;
        let (identifier, identifier_span) = self.eat_text(Token::Identifier)?;
        self.eat(Token::Equals);
        let initializer = self.next_expression()?;

        if self.names.is_terminal_output_var(&identifier) {
            return self.error(span.extend(identifier_span), "Cannot overwrite system variable");
        }

        let span = span.extend(initializer.span);
        Ok(Declaration::new(identifier, type_name, initializer, span))
    }

    /// `return`/`yield` with an optional value, through the `;`.
    fn next_optional_value(&mut self) -> ParseResult<(Option<Expr>, Span)> {
        let mut span = self.advance();
        let value = if self.next_is(Token::Semicolon) {
            None
        } else {
            let value = self.next_expression()?;
            span = span.extend(value.span);
            Some(value)
        };
        let span = self.eat_into(span, Token::Semicolon);
        Ok((value, span))
    }

    // --- Compound statements ---

    /// `if (c) stmt [elif (c) stmt]* [else stmt]`
    fn next_if_statement(&mut self) -> ParseResult<Stmt> {
        let token = self.peek_token();
        if token != Token::If && token != Token::Elif {
            let span = self.peek_span();
            return self.error(
                span,
                format!("Expected if or elif, instead got {}", token.describe()),
            );
        }

        let mut span = self.advance();
        self.eat(Token::OpenParen);
        let condition = self.next_expression()?;
        self.eat(Token::CloseParen);
        let then = self.next_statement()?;
        span = span.extend(then.span);

        let otherwise = match self.peek_token() {
            Token::Elif => Some(self.next_if_statement()?),
            Token::Else => {
                self.advance();
                Some(self.next_statement()?)
            }
            _ => None,
        };
        if let Some(otherwise) = &otherwise {
            span = span.extend(otherwise.span);
        }

        Ok(Stmt::new(
            StmtKind::If {
                condition,
                then: Box::new(then),
                otherwise: otherwise.map(Box::new),
            },
            span,
        ))
    }

    /// `for ([setup]; [condition]; [update]) body`
    fn next_for_statement(&mut self) -> ParseResult<Stmt> {
        let span = self.advance();
        self.eat(Token::OpenParen);

        let setup = if self.next_is(Token::Semicolon) {
            None
        } else {
            Some(Box::new(self.next_simple_statement()?))
        };
        self.eat(Token::Semicolon);

        let condition = if self.next_is(Token::Semicolon) {
            None
        } else {
            Some(self.next_expression()?)
        };
        self.eat(Token::Semicolon);

        let update = if self.next_is(Token::CloseParen) {
            None
        } else {
            Some(Box::new(self.next_simple_statement()?))
        };
        self.eat(Token::CloseParen);

        let body = self.next_statement()?;
        let span = span.extend(body.span);
        Ok(Stmt::new(
            StmtKind::For {
                setup,
                condition,
                condition_prelude: Vec::new(),
                update,
                body: Box::new(body),
            },
            span,
        ))
    }

    /// `while (condition) body`
    fn next_while_statement(&mut self) -> ParseResult<Stmt> {
        let span = self.advance();
        self.eat(Token::OpenParen);
        let condition = self.next_expression()?;
        self.eat(Token::CloseParen);
        let body = self.next_statement()?;
        let span = span.extend(body.span);
        Ok(Stmt::new(
            StmtKind::While {
                condition,
                condition_prelude: Vec::new(),
                body: Box::new(body),
            },
            span,
        ))
    }

    /// `do body while (condition);`
    fn next_do_while_statement(&mut self) -> ParseResult<Stmt> {
        let span = self.advance();
        let body = self.next_statement()?;
        self.eat(Token::While);
        self.eat(Token::OpenParen);
        let condition = self.next_expression()?;
        let span = self.eat_into(span.extend(condition.span), Token::CloseParen);
        let span = self.eat_into(span, Token::Semicolon);
        Ok(Stmt::new(
            StmtKind::DoWhile {
                body: Box::new(body),
                condition,
                condition_prelude: Vec::new(),
            },
            span,
        ))
    }

    /// `func name(type arg, ...) -> type { body }`
    fn next_function_declaration(&mut self) -> ParseResult<Stmt> {
        let span = self.advance();
        let (name, _) = self.eat_text(Token::Identifier)?;
        self.eat(Token::OpenParen);
        let arguments = self.next_argument_definition_list()?;
        self.eat(Token::CloseParen);
        self.eat(Token::Arrow);
        let (return_type, _) = self.next_type_name(true)?;
        let body = self.next_statement_block()?;
        let span = span.extend(body.span);
        Ok(Stmt::new(
            StmtKind::FunctionDeclaration {
                name,
                arguments,
                return_type,
                body,
            },
            span,
        ))
    }

    /// `type name, type name, ...` up to (not including) `)`.
    fn next_argument_definition_list(&mut self) -> ParseResult<Vec<Declaration>> {
        let mut arguments = Vec::new();
        if self.next_is(Token::CloseParen) {
            return Ok(arguments);
        }
        loop {
            let (type_name, span) = self.next_type_name(false)?;
            let (identifier, identifier_span) = self.eat_text(Token::Identifier)?;
            let span = span.extend(identifier_span);

            if self.names.is_terminal_output_var(&identifier) {
                return self.error(span, "Cannot overwrite system variable");
            }

            arguments.push(Declaration::function_arg(identifier, type_name, span));

            if !self.next_is(Token::Comma) {
                break;
            }
            self.advance();
        }
        Ok(arguments)
    }
}
