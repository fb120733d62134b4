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
use ast::{Expr, ExprKind, UnaryOperator};

use super::type_name::type_name_of;

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Strips the surrounding quote characters from a string or char token.
fn quoted_body(text: &str) -> &str {
    text.get(1..text.len().saturating_sub(1)).unwrap_or_default()
}

impl<'r, I: Iterator<Item = SpannedToken>> Parser<'r, I> {
    /// A primary followed by any binary operators, or a ternary.
    pub(crate) fn next_expression(&mut self) -> ParseResult<Expr> {
        let primary = self.next_primary()?;
        self.expression_tail(primary)
    }

    /// Continues an expression whose leading primary is already parsed.
    pub(crate) fn expression_tail(&mut self, primary: Expr) -> ParseResult<Expr> {
        if self.next_is_binary_operator() {
            self.next_binary(0, primary)
        } else if self.next_is(Token::Question) {
            self.next_ternary(primary)
        } else {
            Ok(primary)
        }
    }

    /// Tokens that may begin an expression statement.
    pub(crate) fn next_starts_expression(&mut self) -> bool {
        matches!(
            self.peek_token(),
            Token::Identifier
                | Token::OpenParen
                | Token::IntLiteral
                | Token::FloatLiteral
                | Token::StringLiteral
                | Token::CharLiteral
                | Token::True
                | Token::False
                | Token::Minus
                | Token::Bang
                | Token::Tilde
                | Token::PlusPlus
                | Token::MinusMinus
        )
    }

    pub(crate) fn next_primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek_token();
        let span = self.peek_span();
        match token {
            Token::OpenParen => self.next_parenthesized(),
            Token::IntLiteral => {
                self.advance();
                self.int_literal(span, false)
            }
            Token::FloatLiteral => {
                self.advance();
                self.float_literal(span, false)
            }
            Token::True | Token::False => {
                self.advance();
                Ok(Expr::new(ExprKind::BoolLiteral(token == Token::True), span))
            }
            Token::StringLiteral => {
                self.advance();
                let value = unescape(quoted_body(self.last_text()));
                Ok(Expr::new(ExprKind::StringLiteral(value), span))
            }
            Token::CharLiteral => {
                self.advance();
                let value = unescape(quoted_body(self.last_text()));
                match value.chars().next() {
                    Some(c) => Ok(Expr::new(ExprKind::CharLiteral(c), span)),
                    None => self.error(span, "Empty char literal"),
                }
            }
            Token::Identifier => {
                self.advance();
                let name = self.last_text().to_string();
                self.identifier_tail(name, span)
            }
            Token::Tilde | Token::Bang => self.next_unary(),
            Token::Minus => self.next_unary(),
            Token::OpenCurly => self.next_list_initializer(),
            Token::PlusPlus | Token::MinusMinus => {
                self.advance();
                self.error(span, "Increment/decrement operator not supported!")
            }
            other => self.error(
                span,
                format!("Expected expression, but found \"{}\"", other.describe()),
            ),
        }
    }

    /// Call, index or plain reference after an identifier.
    pub(crate) fn identifier_tail(&mut self, name: String, span: Span) -> ParseResult<Expr> {
        match self.peek_token() {
            Token::OpenParen => {
                self.advance();
                let arguments = self.next_argument_list()?;
                let span = self.eat_into(span, Token::CloseParen);
                Ok(Expr::new(
                    ExprKind::FunctionCall {
                        target: name,
                        arguments,
                    },
                    span,
                ))
            }
            Token::OpenSquare => {
                self.advance();
                let index = self.next_expression()?;
                let span = self.eat_into(span.extend(index.span), Token::CloseSquare);
                Ok(Expr::new(
                    ExprKind::IndexOperation {
                        container: name,
                        index: Box::new(index),
                    },
                    span,
                ))
            }
            Token::PlusPlus | Token::MinusMinus => {
                let op_span = self.advance();
                self.diagnostics
                    .add(op_span, "Increment/decrement operator not supported!");
                Ok(Expr::identifier(name, span))
            }
            _ => Ok(Expr::identifier(name, span)),
        }
    }

    /// `( type ) primary` or `( expression )`.
    fn next_parenthesized(&mut self) -> ParseResult<Expr> {
        let open = self.advance();

        let cast_type = if self.next_is_typename() {
            type_name_of(self.peek_token())
        } else {
            None
        };

        if let Some(to) = cast_type {
            self.advance();
            let span = self.eat(Token::CloseParen).map(|close| open.extend(close)).ok_or(Aborted)?;
            let target = self.next_primary()?;
            // redundant cast
            if target.type_name == to {
                return Ok(target);
            }
            let span = span.extend(target.span);
            return Ok(Expr::new(
                ExprKind::Cast {
                    to,
                    target: Box::new(target),
                },
                span,
            ));
        }

        let subexpression = self.next_expression()?;
        self.eat(Token::CloseParen);
        Ok(subexpression)
    }

    /// `-x`, `!x`, `~x`. A `-` directly before a numeric literal folds into it.
    fn next_unary(&mut self) -> ParseResult<Expr> {
        let token = self.peek_token();
        let span = self.advance();
        let op = match token {
            Token::Minus => UnaryOperator::Negate,
            Token::Bang => UnaryOperator::Not,
            _ => UnaryOperator::BinInvert,
        };

        if op == UnaryOperator::Negate {
            let literal_span = self.peek_span();
            match self.peek_token() {
                Token::IntLiteral => {
                    self.advance();
                    return self.int_literal(span.extend(literal_span), true);
                }
                Token::FloatLiteral => {
                    self.advance();
                    return self.float_literal(span.extend(literal_span), true);
                }
                _ => {}
            }
        }

        let operand = self.next_primary()?;
        let span = span.extend(operand.span);
        Ok(Expr::new(
            ExprKind::UnaryOperation {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// Parses the last consumed token as an int, negated when `negative`.
    fn int_literal(&mut self, span: Span, negative: bool) -> ParseResult<Expr> {
        let text = if negative {
            format!("-{}", self.last_text())
        } else {
            self.last_text().to_string()
        };
        match text.parse::<i32>() {
            Ok(value) => Ok(Expr::new(ExprKind::IntLiteral(value), span)),
            Err(_) => self.error(span, format!("Invalid int literal \"{}\"", text)),
        }
    }

    fn float_literal(&mut self, span: Span, negative: bool) -> ParseResult<Expr> {
        let text = if negative {
            format!("-{}", self.last_text())
        } else {
            self.last_text().to_string()
        };
        match text.parse::<f32>() {
            Ok(value) => Ok(Expr::new(ExprKind::FloatLiteral(value), span)),
            Err(_) => self.error(span, format!("Invalid float literal \"{}\"", text)),
        }
    }

    /// `{ a, b, c }`
    fn next_list_initializer(&mut self) -> ParseResult<Expr> {
        let start = self.advance();
        let mut values = Vec::new();
        if !self.next_is(Token::CloseCurly) {
            loop {
                values.push(self.next_expression()?);
                if self.next_is(Token::CloseCurly) {
                    break;
                }
                if self.eat(Token::Comma).is_none() {
                    return Err(Aborted);
                }
            }
        }
        let span = self.eat_into(start, Token::CloseCurly);
        Ok(Expr::new(ExprKind::ListInitializer(values), span))
    }

    /// Comma-separated call arguments up to (not including) `)`.
    pub(crate) fn next_argument_list(&mut self) -> ParseResult<Vec<Expr>> {
        let mut arguments = Vec::new();
        if self.next_is(Token::CloseParen) {
            return Ok(arguments);
        }
        loop {
            arguments.push(self.next_expression()?);
            if !self.next_is(Token::Comma) {
                break;
            }
            self.advance();
        }
        Ok(arguments)
    }
}
