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
use ast::TypeName;

/// Maps a type keyword to its scalar type.
pub(crate) fn type_name_of(token: Token) -> Option<TypeName> {
    match token {
        Token::IntKeyword => Some(TypeName::Int),
        Token::FloatKeyword => Some(TypeName::Float),
        Token::BoolKeyword => Some(TypeName::Bool),
        Token::StringKeyword => Some(TypeName::String),
        Token::CharKeyword => Some(TypeName::Char),
        Token::VoidKeyword => Some(TypeName::Void),
        _ => None,
    }
}

impl<'r, I: Iterator<Item = SpannedToken>> Parser<'r, I> {
    /// Value type keywords. `void` only appears as a return type.
    pub(crate) fn next_is_typename(&mut self) -> bool {
        matches!(
            self.peek_token(),
            Token::IntKeyword
                | Token::FloatKeyword
                | Token::BoolKeyword
                | Token::StringKeyword
                | Token::CharKeyword
        )
    }

    /// Parse a type keyword, promoting it to its list variant when followed
    /// by `[ ]`. With `allow_void`, also accepts `void` (never as a list).
    pub(crate) fn next_type_name(&mut self, allow_void: bool) -> ParseResult<(TypeName, Span)> {
        let token = self.peek_token();
        let span = self.peek_span();
        let type_name = match type_name_of(token) {
            Some(TypeName::Void) if allow_void => {
                self.advance();
                return Ok((TypeName::Void, span));
            }
            Some(type_name) if type_name != TypeName::Void => type_name,
            _ => {
                return self.error(
                    span,
                    format!("Expected type name but found \"{}\"", token.describe()),
                )
            }
        };
        self.advance();

        if self.next_is(Token::OpenSquare) {
            self.advance();
            let span = self.eat_into(span, Token::CloseSquare);
            // every value type has a list variant
            let list = type_name.list_variant().unwrap_or(type_name);
            return Ok((list, span));
        }

        Ok((type_name, span))
    }
}
