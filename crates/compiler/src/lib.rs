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


pub mod error;
pub mod options;
pub mod resolver;
pub mod rewriter;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use options::{CompileOptions, ResolverOptions, DEFAULT_MAX_PASSES, TERMINAL_OUTPUT_TYPE};
pub use resolver::{Resolver, VariableContainer};
pub use rewriter::{RewriteResult, Rewriter};

use ast::{DiagnosticContainer, StatementBlock};
use parser::Parser;

/// How far a script has been taken through the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Empty,
    Parsed,
    Rewritten,
    Resolved,
}

/// Owns one script's tree as it moves through parse → rewrite → resolve.
///
/// The phases always run in that order; calling a later phase runs any
/// earlier one that is still missing. Diagnostics from every phase accumulate
/// in one container.
pub struct Ast {
    options: CompileOptions,
    root: Option<StatementBlock>,
    diagnostics: DiagnosticContainer,
    syntax_errors: usize,
    stage: Stage,
    valid: bool,
}

impl Ast {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            root: None,
            diagnostics: DiagnosticContainer::new(),
            syntax_errors: 0,
            stage: Stage::Empty,
            valid: false,
        }
    }

    /// Parses `source`, replacing any previous tree. Returns whether a tree
    /// was produced.
    pub fn generate(&mut self, source: &str) -> bool {
        self.destroy();

        let mut parser = Parser::from_source(source, &self.options.reserved);
        let root = parser.parse();
        let diagnostics = parser.into_diagnostics();

        self.syntax_errors = diagnostics.len();
        self.diagnostics = diagnostics;
        self.valid = root.is_some();
        self.root = root;
        self.stage = Stage::Parsed;

        tracing::debug!(
            valid = self.valid,
            diagnostics = self.syntax_errors,
            "generated ast"
        );
        self.valid
    }

    /// Flattens nested expressions into temporaries.
    pub fn rewrite(&mut self) {
        if self.stage >= Stage::Rewritten {
            return;
        }
        if let Some(root) = self.root.as_mut() {
            let mut rewriter = Rewriter::new();
            rewriter.rewrite_block(root);
            tracing::debug!(temporaries = rewriter.temp_count(), "rewrote compound statements");
        }
        self.stage = Stage::Rewritten;
    }

    /// Assigns types to every expression. Rewrites first if needed.
    pub fn resolve(&mut self) {
        if self.stage >= Stage::Resolved {
            return;
        }
        self.rewrite();
        if let Some(root) = self.root.as_mut() {
            let outputs = self
                .options
                .reserved
                .iter()
                .map(|name| (name, TERMINAL_OUTPUT_TYPE));
            let resolver = Resolver::new(self.options.resolver.clone()).with_globals(outputs);
            let found = resolver.resolve(root);
            self.diagnostics.extend(found);
        }
        self.stage = Stage::Resolved;
    }

    /// Runs every phase and hands back the tree for the backend, refusing it
    /// when any diagnostic was recorded.
    pub fn compile(&mut self, source: &str) -> Result<&StatementBlock> {
        if !self.generate(source) || self.syntax_errors > 0 {
            return Err(Error::Syntax(self.diagnostics.diagnostics().to_vec()));
        }
        self.resolve();
        if !self.diagnostics.is_empty() {
            return Err(Error::Semantic(self.diagnostics.diagnostics().to_vec()));
        }
        match self.root.as_ref() {
            Some(root) => Ok(root),
            None => Err(Error::Syntax(Vec::new())),
        }
    }

    /// Drops the tree and all diagnostics.
    pub fn destroy(&mut self) {
        self.root = None;
        self.diagnostics = DiagnosticContainer::new();
        self.syntax_errors = 0;
        self.stage = Stage::Empty;
        self.valid = false;
    }

    pub fn root(&self) -> Option<&StatementBlock> {
        self.root.as_ref()
    }

    pub fn diagnostics(&self) -> &DiagnosticContainer {
        &self.diagnostics
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }
}

impl Default for Ast {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}
