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

mod binop;
mod expr;
mod statement;
mod type_name;

use std::iter::Peekable;

use ast::{DiagnosticContainer, Expr, Span, StatementBlock, Stmt};

use crate::lexer::{SpannedToken, Token, TokenStream};
use crate::names::NameRegistry;

/// Upper bound on top-level statements in a single script.
pub const MAX_STATEMENTS: usize = 100_000;

/// A sub-parse gave up. The reason has already been recorded as a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Aborted;

type ParseResult<T> = Result<T, Aborted>;

pub struct Parser<'r, I: Iterator<Item = SpannedToken>> {
    tokens: Peekable<I>,
    current_span: logos::Span,
    /// Stores the source text for slicing identifiers / literals
    source: String,
    names: &'r dyn NameRegistry,
    diagnostics: DiagnosticContainer,
    max_statements: usize,
}

impl<'r, 'src> Parser<'r, TokenStream<'src>> {
    pub fn from_source(source: &'src str, names: &'r dyn NameRegistry) -> Self {
        Parser::new(source, TokenStream::new(source), names)
    }
}

impl<'r, I: Iterator<Item = SpannedToken>> Parser<'r, I> {
    pub fn new(source: &str, iterator: I, names: &'r dyn NameRegistry) -> Self {
        Self {
            tokens: iterator.peekable(),
            current_span: 0..0,
            source: source.to_string(),
            names,
            diagnostics: DiagnosticContainer::new(),
            max_statements: MAX_STATEMENTS,
        }
    }

    pub fn with_max_statements(mut self, max_statements: usize) -> Self {
        self.max_statements = max_statements;
        self
    }

    pub fn diagnostics(&self) -> &DiagnosticContainer {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> DiagnosticContainer {
        self.diagnostics
    }

    /// Peek at the next token. Past the end of input this is `EndOfFile`.
    fn peek_token(&mut self) -> Token {
        self.tokens
            .peek()
            .map(|(t, _)| *t)
            .unwrap_or(Token::EndOfFile)
    }

    /// Peek at the span of the next token.
    fn peek_span(&mut self) -> Span {
        let span = self
            .tokens
            .peek()
            .map(|(_, s)| s.clone())
            .unwrap_or(self.current_span.clone());
        Span::from(span)
    }

    fn next_is(&mut self, token: Token) -> bool {
        self.peek_token() == token
    }

    /// Advances to the next token, updating the current span.
    fn advance(&mut self) -> Span {
        if let Some((_, span)) = self.tokens.next() {
            self.current_span = span;
        }
        Span::from(self.current_span.clone())
    }

    /// Returns the source text of the last consumed token.
    fn last_text(&self) -> &str {
        self.source
            .get(self.current_span.clone())
            .unwrap_or_default()
    }

    /// Consumes the next token if it is `expected`. Otherwise records
    /// `Expected "X" but found "Y"` and returns `None` without consuming
    /// anything; the caller decides whether that is fatal.
    fn eat(&mut self, expected: Token) -> Option<Span> {
        let found = self.peek_token();
        if found == expected {
            return Some(self.advance());
        }
        let span = self.peek_span();
        self.diagnostics.add(
            span,
            format!(
                "Expected \"{}\" but found \"{}\"",
                expected.describe(),
                found.describe()
            ),
        );
        None
    }

    /// `eat`, folding the eaten token into `span` when it was present.
    fn eat_into(&mut self, span: Span, expected: Token) -> Span {
        match self.eat(expected) {
            Some(eaten) => span.extend(eaten),
            None => span,
        }
    }

    /// `eat` for tokens whose text the caller needs.
    fn eat_text(&mut self, expected: Token) -> ParseResult<(String, Span)> {
        match self.eat(expected) {
            Some(span) => Ok((self.last_text().to_string(), span)),
            None => Err(Aborted),
        }
    }

    fn error<T>(&mut self, span: Span, message: impl Into<String>) -> ParseResult<T> {
        self.diagnostics.add(span, message);
        Err(Aborted)
    }

    fn skip_semicolons(&mut self) {
        while self.next_is(Token::Semicolon) {
            self.advance();
        }
    }

    // --- Top-level ---

    /// Parse the whole token stream into the root block. Returns `None` once
    /// any statement fails to parse; the reason is in `diagnostics()`.
    pub fn parse(&mut self) -> Option<StatementBlock> {
        let mut statements: Vec<Stmt> = Vec::new();
        self.skip_semicolons();

        while !self.next_is(Token::EndOfFile) {
            let stmt = match self.next_statement() {
                Ok(stmt) => stmt,
                Err(Aborted) => {
                    tracing::debug!(
                        parsed = statements.len(),
                        diagnostics = self.diagnostics.len(),
                        "parse aborted"
                    );
                    return None;
                }
            };
            let span = stmt.span;
            statements.push(stmt);
            self.skip_semicolons();

            if statements.len() > self.max_statements {
                tracing::warn!(max = self.max_statements, "maximum number of statements reached");
                self.diagnostics
                    .add(span, "Maximum number of statements reached, aborting");
                break;
            }
        }

        self.eat(Token::EndOfFile);

        tracing::debug!(
            statements = statements.len(),
            diagnostics = self.diagnostics.len(),
            "parsed script"
        );
        Some(StatementBlock::new(statements, Span::new(0, self.source.len())))
    }

    // --- Block ---

    /// `{ stmt* }`
    fn next_statement_block(&mut self) -> ParseResult<StatementBlock> {
        let start = self.eat(Token::OpenCurly).ok_or(Aborted)?;
        let mut statements = Vec::new();
        self.skip_semicolons();
        while !self.next_is(Token::CloseCurly) && !self.next_is(Token::EndOfFile) {
            statements.push(self.next_statement()?);
            self.skip_semicolons();
        }
        let span = self.eat_into(start, Token::CloseCurly);
        Ok(StatementBlock::new(statements, span))
    }
}
