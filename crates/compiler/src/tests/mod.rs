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



mod resolver_tests;
mod rewriter_tests;

use ast::StatementBlock;
use parser::{Parser, TerminalOutputVars};

/// Parses `source`, failing the test on any syntax diagnostic.
pub(crate) fn parse(source: &str) -> StatementBlock {
    let names = TerminalOutputVars::default();
    let mut parser = Parser::from_source(source, &names);
    let block = parser.parse().expect("parse failed");
    assert!(
        parser.diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.diagnostics()
    );
    block
}

/// One printed line per top-level statement.
pub(crate) fn lines(block: &StatementBlock) -> Vec<String> {
    block.statements.iter().map(|stmt| stmt.to_string()).collect()
}
