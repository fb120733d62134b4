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

/// Where a span's text came from. Nodes synthesized by the rewriter point at
/// the source they were derived from but are marked `Generated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpanSource {
    #[default]
    Original,
    Generated,
}

/// Half-open `[low, high)` byte range into the script source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub low: usize,
    pub high: usize,
    pub source: SpanSource,
}

impl Span {
    pub fn new(low: usize, high: usize) -> Self {
        Self {
            low,
            high,
            source: SpanSource::Original,
        }
    }

    /// Union of both ranges. Provenance is taken from `self`.
    pub fn extend(self, other: Span) -> Span {
        Span {
            low: self.low.min(other.low),
            high: self.high.max(other.high),
            source: self.source,
        }
    }

    /// Same range, marked as synthesized.
    pub fn generated(self) -> Span {
        Span {
            source: SpanSource::Generated,
            ..self
        }
    }

    pub fn is_generated(&self) -> bool {
        self.source == SpanSource::Generated
    }

    pub fn len(&self) -> usize {
        self.high.saturating_sub(self.low)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<logos::Span> for Span {
    fn from(range: logos::Span) -> Self {
        Span::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.low, self.high)
    }
}
