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

//! Compiler errors

use ast::Diagnostic;
use thiserror::Error;

/// Compiler result type
pub type Result<T> = std::result::Result<T, Error>;

/// Why a script could not be handed to the backend. Both variants carry every
/// diagnostic recorded, in source order of discovery.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{} syntax error(s){}", .0.len(), first(.0))]
    Syntax(Vec<Diagnostic>),

    #[error("{} semantic error(s){}", .0.len(), first(.0))]
    Semantic(Vec<Diagnostic>),
}

impl Error {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Error::Syntax(diagnostics) | Error::Semantic(diagnostics) => diagnostics,
        }
    }
}

fn first(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .first()
        .map(|d| format!(", first at {}", d))
        .unwrap_or_default()
}
