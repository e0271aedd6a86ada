// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::product::Product;
use serde::Deserialize;

/// How aggressively titles collapse into one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupStrictness {
    /// Normalized titles must be equal
    #[default]
    Exact,
    /// Titles collapse when one's leading token appears in the other.
    /// Over-merges unrelated listings that share a first word.
    LeadingToken,
}

/// Decides whether two product titles describe the same listing.
pub trait TitleMatcher: Send + Sync {
    fn is_duplicate(&self, a: &str, b: &str) -> bool;
}

/// Lowercase and collapse whitespace so comparisons ignore layout noise.
pub fn comparable_title(title: &str) -> String {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExactTitleMatcher;

impl TitleMatcher for ExactTitleMatcher {
    fn is_duplicate(&self, a: &str, b: &str) -> bool {
        comparable_title(a) == comparable_title(b)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingTokenMatcher;

impl TitleMatcher for LeadingTokenMatcher {
    fn is_duplicate(&self, a: &str, b: &str) -> bool {
        let a = comparable_title(a);
        let b = comparable_title(b);
        if a == b {
            return true;
        }

        let contains_leading = |from: &str, other: &str| {
            from.split(' ')
                .next()
                .filter(|token| !token.is_empty())
                .is_some_and(|token| other.contains(token))
        };

        contains_leading(&a, &b) || contains_leading(&b, &a)
    }
}

/// Removes duplicate products, keeping the first-seen entry.
pub struct ResultDeduplicator {
    matcher: Box<dyn TitleMatcher>,
}

impl ResultDeduplicator {
    pub fn new(matcher: Box<dyn TitleMatcher>) -> Self {
        Self { matcher }
    }

    pub fn with_strictness(strictness: DedupStrictness) -> Self {
        match strictness {
            DedupStrictness::Exact => Self::new(Box::new(ExactTitleMatcher)),
            DedupStrictness::LeadingToken => Self::new(Box::new(LeadingTokenMatcher)),
        }
    }

    pub fn dedupe(&self, products: Vec<Product>) -> Vec<Product> {
        let mut unique: Vec<Product> = Vec::with_capacity(products.len());

        for product in products {
            let is_duplicate = unique
                .iter()
                .any(|existing| self.matcher.is_duplicate(&existing.title, &product.title));

            if !is_duplicate {
                unique.push(product);
            }
        }

        unique
    }
}

impl Default for ResultDeduplicator {
    fn default() -> Self {
        Self::with_strictness(DedupStrictness::default())
    }
}
