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
use ast::{BinaryOperator, Expr, ExprKind};

/// Binding strength of a token in binary position; higher binds tighter.
/// Tokens that can't continue an expression get -1.
pub(crate) fn precedence(token: Token) -> i32 {
    match token {
        Token::Star | Token::Slash | Token::Percent => 1100,
        Token::Plus | Token::Minus => 1000,
        Token::Greater | Token::GreaterEqual | Token::Less | Token::LessEqual => 900,
        Token::EqualEqual | Token::NotEqual => 800,
        Token::BinaryAnd => 700,
        Token::BinaryXor => 600,
        Token::BinaryOr => 500,
        Token::BooleanAnd => 400,
        Token::BooleanOr => 300,
        Token::Question => 250,
        Token::Equals
        | Token::PlusEquals
        | Token::MinusEquals
        | Token::StarEquals
        | Token::SlashEquals
        | Token::PercentEquals
        | Token::BinaryAndEquals
        | Token::BinaryOrEquals
        | Token::BinaryXorEquals => 200,
        _ => -1,
    }
}

pub(crate) fn binary_operator(token: Token) -> Option<BinaryOperator> {
    let op = match token {
        Token::Plus => BinaryOperator::Add,
        Token::Minus => BinaryOperator::Sub,
        Token::Star => BinaryOperator::Mul,
        Token::Slash => BinaryOperator::Div,
        Token::Percent => BinaryOperator::Mod,
        Token::BinaryAnd => BinaryOperator::BinAnd,
        Token::BinaryOr => BinaryOperator::BinOr,
        Token::BinaryXor => BinaryOperator::BinXor,
        Token::EqualEqual => BinaryOperator::EqualTest,
        Token::NotEqual => BinaryOperator::NotEqualTest,
        Token::Greater => BinaryOperator::GreaterTest,
        Token::GreaterEqual => BinaryOperator::GreaterEqualTest,
        Token::Less => BinaryOperator::LessTest,
        Token::LessEqual => BinaryOperator::LessEqualTest,
        Token::BooleanAnd => BinaryOperator::BooleanAnd,
        Token::BooleanOr => BinaryOperator::BooleanOr,
        _ => return None,
    };
    Some(op)
}

/// The plain operator a compound assignment applies: `+=` → `Add`.
pub(crate) fn compound_operator(token: Token) -> Option<BinaryOperator> {
    let op = match token {
        Token::PlusEquals => BinaryOperator::Add,
        Token::MinusEquals => BinaryOperator::Sub,
        Token::StarEquals => BinaryOperator::Mul,
        Token::SlashEquals => BinaryOperator::Div,
        Token::PercentEquals => BinaryOperator::Mod,
        Token::BinaryAndEquals => BinaryOperator::BinAnd,
        Token::BinaryOrEquals => BinaryOperator::BinOr,
        Token::BinaryXorEquals => BinaryOperator::BinXor,
        _ => return None,
    };
    Some(op)
}

impl<'r, I: Iterator<Item = SpannedToken>> Parser<'r, I> {
    pub(crate) fn next_is_binary_operator(&mut self) -> bool {
        binary_operator(self.peek_token()).is_some()
    }

    /// Precedence climbing. Folds operators binding at least as tightly as
    /// `min_precedence` onto `lhs`; a tighter operator after the right operand
    /// climbs first so its subtree becomes the right operand.
    pub(crate) fn next_binary(&mut self, min_precedence: i32, mut lhs: Expr) -> ParseResult<Expr> {
        loop {
            let token = self.peek_token();
            let current = precedence(token);
            if current < min_precedence {
                return Ok(lhs);
            }

            if token == Token::Question {
                return self.next_ternary(lhs);
            }

            // assignment forms only bind at statement level
            let Some(op) = binary_operator(token) else {
                return Ok(lhs);
            };
            self.advance();

            let mut rhs = self.next_primary()?;

            if current < precedence(self.peek_token()) {
                rhs = self.next_binary(current + 1, rhs)?;
            }

            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    /// `condition ? if_true : if_false`
    pub(crate) fn next_ternary(&mut self, condition: Expr) -> ParseResult<Expr> {
        self.eat(Token::Question);
        let if_true = self.next_expression()?;
        self.eat(Token::Colon);
        let if_false = self.next_expression()?;
        let span = condition.span.extend(if_false.span);
        Ok(Expr::new(
            ExprKind::TernaryOperation {
                condition: Box::new(condition),
                if_true: Box::new(if_true),
                if_false: Box::new(if_false),
            },
            span,
        ))
    }
}
