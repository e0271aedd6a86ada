// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use url::Url;

/// Unvalidated fields pulled out of one listing container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawItem {
    pub source: String,
    pub title: String,
    pub price: String,
    pub link: String,
}

/// Where a product came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductOrigin {
    /// Extracted from a live source page
    Extracted,
    /// Synthesized when real extraction came back empty or sparse
    Placeholder,
}

/// Canonical product listing.
///
/// Only constructed through [`Product::new`], which enforces a non-empty title,
/// a positive price and an absolute http(s) link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub source: String,
    pub title: String,
    pub price: u32,
    pub delivery: String,
    pub link: String,
    pub origin: ProductOrigin,
}

impl Product {
    pub fn new(
        source: impl Into<String>,
        title: impl Into<String>,
        price: u32,
        delivery: impl Into<String>,
        link: impl Into<String>,
        origin: ProductOrigin,
    ) -> Option<Self> {
        let title = title.into();
        let link = link.into();

        if title.trim().is_empty() || price == 0 || !is_absolute_http(&link) {
            return None;
        }

        Some(Self {
            source: source.into(),
            title,
            price,
            delivery: delivery.into(),
            link,
            origin,
        })
    }

    pub fn is_placeholder(&self) -> bool {
        self.origin == ProductOrigin::Placeholder
    }
}

/// Returns true when `link` parses as an absolute http or https URL with a host.
pub fn is_absolute_http(link: &str) -> bool {
    Url::parse(link)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false)
}

/// Final, presentation-ready entry of a search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    pub id: String,
    pub platform: String,
    pub platform_logo: String,
    pub title: String,
    pub price: u32,
    pub delivery_time: String,
    pub url: String,
    pub is_lowest_price: bool,
    pub is_placeholder: bool,
}
