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

use std::collections::HashSet;

/// Names owned by the host machine. Scripts may read them but never declare
/// them.
pub trait NameRegistry {
    fn is_terminal_output_var(&self, name: &str) -> bool;
}

/// Reserved terminal output variables, `out0`..`out3` unless configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalOutputVars {
    names: HashSet<String>,
}

impl TerminalOutputVars {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// A registry that reserves nothing.
    pub fn empty() -> Self {
        Self {
            names: HashSet::new(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for TerminalOutputVars {
    fn default() -> Self {
        Self::new((0..4).map(|i| format!("out{}", i)))
    }
}

impl NameRegistry for TerminalOutputVars {
    fn is_terminal_output_var(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}
