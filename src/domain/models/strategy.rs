// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// One generation of a source's listing markup, described as CSS selectors.
///
/// Each field list is ordered by preference; the first candidate that passes the
/// field's check wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionStrategy {
    pub name: &'static str,
    pub container: &'static str,
    pub title: &'static [&'static str],
    pub price: &'static [&'static str],
    pub link: &'static [&'static str],
}

/// Ordered strategies for one source, newest markup first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceStrategy {
    pub strategies: &'static [ExtractionStrategy],
}

impl SourceStrategy {
    pub const fn new(strategies: &'static [ExtractionStrategy]) -> Self {
        Self { strategies }
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
