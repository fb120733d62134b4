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

use std::fmt;

/// The closed set of value types the scripting language knows about.
/// `None` means "not inferred yet"; only the resolver replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeName {
    #[default]
    None,
    Int,
    Float,
    Bool,
    String,
    Char,
    IntList,
    FloatList,
    BoolList,
    StringList,
    CharList,
    Void,
}

impl TypeName {
    /// `int` → `int[]`, etc. Lists of lists and `void[]` don't exist.
    pub fn list_variant(self) -> Option<TypeName> {
        match self {
            TypeName::Int => Some(TypeName::IntList),
            TypeName::Float => Some(TypeName::FloatList),
            TypeName::Bool => Some(TypeName::BoolList),
            TypeName::String => Some(TypeName::StringList),
            TypeName::Char => Some(TypeName::CharList),
            _ => None,
        }
    }

    /// Type produced by indexing into a value of this type.
    pub fn element_type(self) -> Option<TypeName> {
        match self {
            TypeName::IntList => Some(TypeName::Int),
            TypeName::FloatList => Some(TypeName::Float),
            TypeName::BoolList => Some(TypeName::Bool),
            TypeName::StringList => Some(TypeName::String),
            TypeName::CharList => Some(TypeName::Char),
            TypeName::String => Some(TypeName::Char),
            _ => None,
        }
    }

    pub fn is_list(self) -> bool {
        matches!(
            self,
            TypeName::IntList
                | TypeName::FloatList
                | TypeName::BoolList
                | TypeName::StringList
                | TypeName::CharList
        )
    }

    pub fn is_known(self) -> bool {
        self != TypeName::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeName::None => "none",
            TypeName::Int => "int",
            TypeName::Float => "float",
            TypeName::Bool => "bool",
            TypeName::String => "string",
            TypeName::Char => "char",
            TypeName::IntList => "int[]",
            TypeName::FloatList => "float[]",
            TypeName::BoolList => "bool[]",
            TypeName::StringList => "string[]",
            TypeName::CharList => "char[]",
            TypeName::Void => "void",
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
