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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
    Not,
    BinInvert,
}

impl UnaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::Not => "!",
            UnaryOperator::BinInvert => "~",
        }
    }
}

/// Binary operators that appear inside expressions. Compound assignments
/// (`+=` and friends) are not operators here: `CompoundAssignment` stores the
/// plain operator it applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BinAnd,
    BinOr,
    BinXor,
    EqualTest,
    NotEqualTest,
    GreaterTest,
    GreaterEqualTest,
    LessTest,
    LessEqualTest,
    BooleanAnd,
    BooleanOr,
}

impl BinaryOperator {
    /// Comparisons and logical connectives always produce `bool`.
    pub fn is_test(self) -> bool {
        matches!(
            self,
            BinaryOperator::EqualTest
                | BinaryOperator::NotEqualTest
                | BinaryOperator::GreaterTest
                | BinaryOperator::GreaterEqualTest
                | BinaryOperator::LessTest
                | BinaryOperator::LessEqualTest
                | BinaryOperator::BooleanAnd
                | BinaryOperator::BooleanOr
        )
    }

    /// Operators that have a `op=` compound form.
    pub fn has_compound_form(self) -> bool {
        matches!(
            self,
            BinaryOperator::Add
                | BinaryOperator::Sub
                | BinaryOperator::Mul
                | BinaryOperator::Div
                | BinaryOperator::Mod
                | BinaryOperator::BinAnd
                | BinaryOperator::BinOr
                | BinaryOperator::BinXor
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::BinAnd => "&",
            BinaryOperator::BinOr => "|",
            BinaryOperator::BinXor => "^",
            BinaryOperator::EqualTest => "==",
            BinaryOperator::NotEqualTest => "!=",
            BinaryOperator::GreaterTest => ">",
            BinaryOperator::GreaterEqualTest => ">=",
            BinaryOperator::LessTest => "<",
            BinaryOperator::LessEqualTest => "<=",
            BinaryOperator::BooleanAnd => "&&",
            BinaryOperator::BooleanOr => "||",
        }
    }
}
