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

use logos::{Logos, Span};

#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum Token {
    // Type keywords
    #[token("int")] IntKeyword,
    #[token("float")] FloatKeyword,
    #[token("bool")] BoolKeyword,
    #[token("string")] StringKeyword,
    #[token("char")] CharKeyword,
    #[token("void")] VoidKeyword,

    // Control keywords
    #[token("if")] If,
    #[token("elif")] Elif,
    #[token("else")] Else,
    #[token("for")] For,
    #[token("while")] While,
    #[token("do")] Do,
    #[token("func")] Func,
    #[token("break")] Break,
    #[token("yield")] Yield,
    #[token("return")] Return,
    #[token("true")] True,
    #[token("false")] False,

    // Multi-char operators
    #[token("==")] EqualEqual,
    #[token("!=")] NotEqual,
    #[token(">=")] GreaterEqual,
    #[token("<=")] LessEqual,
    #[token("&&")] BooleanAnd,
    #[token("||")] BooleanOr,
    #[token("+=")] PlusEquals,
    #[token("-=")] MinusEquals,
    #[token("*=")] StarEquals,
    #[token("/=")] SlashEquals,
    #[token("%=")] PercentEquals,
    #[token("&=")] BinaryAndEquals,
    #[token("|=")] BinaryOrEquals,
    #[token("^=")] BinaryXorEquals,
    #[token("++")] PlusPlus,
    #[token("--")] MinusMinus,
    #[token("->")] Arrow,

    // Single-char operators
    #[token("+")] Plus,
    #[token("-")] Minus,
    #[token("*")] Star,
    #[token("/")] Slash,
    #[token("%")] Percent,
    #[token("&")] BinaryAnd,
    #[token("|")] BinaryOr,
    #[token("^")] BinaryXor,
    #[token("~")] Tilde,
    #[token("!")] Bang,
    #[token(">")] Greater,
    #[token("<")] Less,
    #[token("=")] Equals,
    #[token("?")] Question,
    #[token(":")] Colon,
    #[token(",")] Comma,
    #[token(";")] Semicolon,
    #[token("(")] OpenParen,
    #[token(")")] CloseParen,
    #[token("[")] OpenSquare,
    #[token("]")] CloseSquare,
    #[token("{")] OpenCurly,
    #[token("}")] CloseCurly,

    // Literals and identifiers
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    #[regex(r"[0-9]+")]
    IntLiteral,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    FloatLiteral,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    StringLiteral,

    #[regex(r"'([^'\\\n]|\\.)'")]
    CharLiteral,

    EndOfFile,

    // Logos error fallback
    Error,
}

impl Token {
    /// Human-readable name used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::IntKeyword => "int",
            Token::FloatKeyword => "float",
            Token::BoolKeyword => "bool",
            Token::StringKeyword => "string",
            Token::CharKeyword => "char",
            Token::VoidKeyword => "void",
            Token::If => "if",
            Token::Elif => "elif",
            Token::Else => "else",
            Token::For => "for",
            Token::While => "while",
            Token::Do => "do",
            Token::Func => "func",
            Token::Break => "break",
            Token::Yield => "yield",
            Token::Return => "return",
            Token::True => "true",
            Token::False => "false",
            Token::EqualEqual => "==",
            Token::NotEqual => "!=",
            Token::GreaterEqual => ">=",
            Token::LessEqual => "<=",
            Token::BooleanAnd => "&&",
            Token::BooleanOr => "||",
            Token::PlusEquals => "+=",
            Token::MinusEquals => "-=",
            Token::StarEquals => "*=",
            Token::SlashEquals => "/=",
            Token::PercentEquals => "%=",
            Token::BinaryAndEquals => "&=",
            Token::BinaryOrEquals => "|=",
            Token::BinaryXorEquals => "^=",
            Token::PlusPlus => "++",
            Token::MinusMinus => "--",
            Token::Arrow => "->",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::BinaryAnd => "&",
            Token::BinaryOr => "|",
            Token::BinaryXor => "^",
            Token::Tilde => "~",
            Token::Bang => "!",
            Token::Greater => ">",
            Token::Less => "<",
            Token::Equals => "=",
            Token::Question => "?",
            Token::Colon => ":",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::OpenSquare => "[",
            Token::CloseSquare => "]",
            Token::OpenCurly => "{",
            Token::CloseCurly => "}",
            Token::Identifier => "identifier",
            Token::IntLiteral => "int literal",
            Token::FloatLiteral => "float literal",
            Token::StringLiteral => "string literal",
            Token::CharLiteral => "char literal",
            Token::EndOfFile => "end of file",
            Token::Error => "unrecognized input",
        }
    }
}

pub type SpannedToken = (Token, Span);

/// Pull-based token source over a complete script. Yields a single
/// `EndOfFile` once the input is exhausted; the parser treats anything past
/// that as more `EndOfFile`.
pub struct TokenStream<'src> {
    source: &'src str,
    /// Pre-collected raw tokens from Logos (with spans)
    raw: Vec<SpannedToken>,
    pos: usize,
    finished: bool,
}

impl<'src> TokenStream<'src> {
    pub fn new(source: &'src str) -> Self {
        let raw = Token::lexer(source)
            .spanned()
            .map(|(token, span)| match token {
                Ok(token) => (token, span),
                Err(_) => (Token::Error, span),
            })
            .collect();

        Self {
            source,
            raw,
            pos: 0,
            finished: false,
        }
    }
}

impl<'src> Iterator for TokenStream<'src> {
    type Item = SpannedToken;

    fn next(&mut self) -> Option<SpannedToken> {
        if self.finished {
            return None;
        }

        if self.pos >= self.raw.len() {
            self.finished = true;
            let end = self.source.len();
            return Some((Token::EndOfFile, end..end));
        }

        let token = self.raw[self.pos].clone();
        self.pos += 1;
        Some(token)
    }
}
