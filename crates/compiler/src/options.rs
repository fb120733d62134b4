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

use ast::TypeName;
use parser::TerminalOutputVars;

/// Default cap on fixed-point passes per block.
pub const DEFAULT_MAX_PASSES: usize = 64;

/// Type scripts see for every reserved terminal output variable.
pub const TERMINAL_OUTPUT_TYPE: TypeName = TypeName::Int;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Passes a single block may take before resolution gives up on it.
    pub max_passes: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompileOptions {
    /// Names scripts may not declare.
    pub reserved: TerminalOutputVars,
    pub resolver: ResolverOptions,
}

impl CompileOptions {
    pub fn with_reserved<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.reserved = TerminalOutputVars::new(names);
        self
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.resolver.max_passes = max_passes.max(1);
        self
    }
}
