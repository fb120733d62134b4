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

use std::collections::HashMap;

use ast::{Span, TypeName};

// ─── Function signature ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub return_type: TypeName,
    pub parameters: Vec<TypeName>,
    /// Where the function was declared. Tells a re-registration on a later
    /// pass apart from a second function with the same name.
    pub span: Span,
}

/// Outcome of registering a function.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionRegistration {
    /// First sighting, or the same declaration with a changed signature.
    Changed,
    Unchanged,
    /// A different declaration already owns the name.
    Conflict(FunctionSignature),
}

// ─── Variable container (scoped symbol table) ────────────────────────────────

/// Scoped symbol table for the resolver. Variable frames follow lexical
/// blocks; the function table outlives every frame so forward calls resolve
/// on later passes. The write flag records that some type changed during the
/// current pass.
#[derive(Debug, Default)]
pub struct VariableContainer {
    /// Innermost frame last. Each maps name → tracked type.
    frames: Vec<HashMap<String, TypeName>>,
    functions: HashMap<String, FunctionSignature>,
    write_flag: bool,
    /// Total number of times the write flag was raised.
    changes: usize,
}

impl VariableContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_frame(&mut self) {
        self.frames.push(HashMap::new());
    }

    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Forgets the variables declared in the innermost frame.
    pub fn clear_frame(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.clear();
        }
    }

    pub fn declare(&mut self, name: &str, type_name: TypeName) {
        if self.frames.is_empty() {
            self.push_frame();
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string(), type_name);
        }
    }

    /// Innermost visible binding.
    pub fn lookup(&self, name: &str) -> Option<TypeName> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name).copied())
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn declare_function(&mut self, name: &str, signature: FunctionSignature) -> FunctionRegistration {
        match self.functions.get(name) {
            Some(existing) if existing.span != signature.span => {
                FunctionRegistration::Conflict(existing.clone())
            }
            Some(existing) if *existing == signature => FunctionRegistration::Unchanged,
            _ => {
                self.functions.insert(name.to_string(), signature);
                self.set_write_flag();
                FunctionRegistration::Changed
            }
        }
    }

    pub fn lookup_function(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.get(name)
    }

    pub fn set_write_flag(&mut self) {
        self.write_flag = true;
        self.changes += 1;
    }

    pub fn clear_write_flag(&mut self) {
        self.write_flag = false;
    }

    /// Puts back a flag saved before a nested pass, without counting it as
    /// a new change.
    pub fn restore_write_flag(&mut self, write_flag: bool) {
        self.write_flag = self.write_flag || write_flag;
    }

    pub fn write_flag(&self) -> bool {
        self.write_flag
    }

    pub fn change_count(&self) -> usize {
        self.changes
    }
}
