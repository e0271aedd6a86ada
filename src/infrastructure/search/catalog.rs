// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::SourceOverride;
use crate::domain::models::strategy::{ExtractionStrategy, SourceStrategy};
use crate::domain::search::engine::{SearchError, SourceDescriptor};
use crate::engines::request_profile::DeviceClass;
use std::collections::HashMap;
use tracing::{info, warn};
use url::Url;

/// One way of reaching a source's search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPath {
    pub path: &'static str,
    /// Extra query parameters appended after the search term
    pub params: &'static [(&'static str, &'static str)],
    /// Identity restriction for this surface; `None` draws from the whole pool
    pub device: Option<DeviceClass>,
}

/// Static description of a marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceDefinition {
    pub name: &'static str,
    /// Lowercase key used for configuration overrides
    pub key: &'static str,
    pub logo: &'static str,
    pub base_url: &'static str,
    pub query_param: &'static str,
    pub primary: AccessPath,
    /// Tried once when the primary response is blocked
    pub alternate: AccessPath,
    pub delivery: &'static str,
    pub block_signatures: &'static [&'static str],
    pub strategy: SourceStrategy,
}

const AMAZON_STRATEGIES: &[ExtractionStrategy] = &[
    ExtractionStrategy {
        name: "search-result",
        container: "[data-component-type=\"s-search-result\"]",
        title: &["h2 a span[aria-label]", "h2 .a-link-normal span", "h2 a span"],
        price: &[".a-price-whole", ".a-price .a-offscreen", ".a-price-range .a-price .a-offscreen"],
        link: &["h2 a[href]", ".a-link-normal[href]"],
    },
    ExtractionStrategy {
        name: "asin-item",
        container: ".s-result-item[data-asin]",
        title: &[".a-size-mini span", ".a-size-base-plus", "[data-cy=\"title-recipe-title\"]"],
        price: &[".a-price-symbol + .a-price-whole", "[data-a-color=\"price\"] .a-offscreen"],
        link: &["a[href*=\"/dp/\"]", "a[href*=\"/gp/product/\"]"],
    },
    ExtractionStrategy {
        name: "widget",
        container: ".sg-col-inner .s-widget-container",
        title: &["h2 span", ".a-text-normal"],
        price: &[".a-price", ".a-color-price"],
        link: &["a[href]"],
    },
];

const FLIPKART_STRATEGIES: &[ExtractionStrategy] = &[
    ExtractionStrategy {
        name: "list-row",
        container: "._1AtVbE",
        title: &["._4rR01T", ".s1Q9rs", ".IRpwTa"],
        price: &["._30jeq3", "._1_WHN1", ".Nx9bqj"],
        link: &["a[href*=\"/p/\"]", "a[href]"],
    },
    ExtractionStrategy {
        name: "grid-card",
        container: "._13oc-S",
        title: &["._2WkVRV", ".KzDlHZ", ".wjcEIp"],
        price: &["._3tbKJL", "._25b18c", ".CEmiEU"],
        link: &["a[href*=\"/product/\"]", "a[href]"],
    },
    ExtractionStrategy {
        name: "compact-card",
        container: "._2kHMtA",
        title: &[".IRpwTa", "._4rR01T"],
        price: &["._30jeq3", "._1_WHN1"],
        link: &["a[href]"],
    },
    ExtractionStrategy {
        name: "data-id",
        container: "[data-id]",
        title: &["._25b18c", ".wjcEIp"],
        price: &[".CEmiEU", "._30jeq3"],
        link: &["a[href]"],
    },
];

pub const AMAZON: SourceDefinition = SourceDefinition {
    name: "Amazon",
    key: "amazon",
    logo: "🛒",
    base_url: "https://www.amazon.in",
    query_param: "k",
    primary: AccessPath {
        path: "/s",
        params: &[("ref", "sr_pg_1")],
        device: None,
    },
    alternate: AccessPath {
        path: "/s",
        params: &[("i", "mobile")],
        device: Some(DeviceClass::Mobile),
    },
    delivery: "Free delivery by tomorrow",
    block_signatures: &["Robot Check", "captcha", "blocked"],
    strategy: SourceStrategy::new(AMAZON_STRATEGIES),
};

pub const FLIPKART: SourceDefinition = SourceDefinition {
    name: "Flipkart",
    key: "flipkart",
    logo: "🛍️",
    base_url: "https://www.flipkart.com",
    query_param: "q",
    primary: AccessPath {
        path: "/search",
        params: &[],
        device: None,
    },
    alternate: AccessPath {
        path: "/search",
        params: &[("sort", "relevance")],
        device: None,
    },
    delivery: "Delivery in 2-3 days",
    block_signatures: &["blocked", "captcha", "Access Denied"],
    strategy: SourceStrategy::new(FLIPKART_STRATEGIES),
};

/// Built-in sources, in launch order.
pub const CATALOG: &[SourceDefinition] = &[AMAZON, FLIPKART];

/// A catalog entry bound to the base URL it will actually be queried at.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub definition: SourceDefinition,
    pub base_url: Url,
}

impl SourceConfig {
    pub fn new(definition: SourceDefinition, base_url: &str) -> Result<Self, SearchError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            SearchError::InvalidSource(format!("{}: invalid base URL {}: {}", definition.name, base_url, e))
        })?;

        Ok(Self { definition, base_url })
    }

    pub fn from_definition(definition: SourceDefinition) -> Result<Self, SearchError> {
        Self::new(definition, definition.base_url)
    }

    /// Build the search URL for `query` on one access path.
    pub fn search_url(&self, path: &AccessPath, query: &str) -> Result<Url, SearchError> {
        let mut url = self.base_url.join(path.path).map_err(|e| {
            SearchError::InvalidSource(format!("{}: invalid path {}: {}", self.definition.name, path.path, e))
        })?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(self.definition.query_param, query);
            for (key, value) in path.params {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    pub fn descriptor(&self) -> SourceDescriptor {
        SourceDescriptor {
            name: self.definition.name.to_string(),
            logo: self.definition.logo.to_string(),
            delivery: self.definition.delivery.to_string(),
            home_url: self.base_url.to_string(),
        }
    }
}

/// Apply configuration overrides to the built-in catalog.
///
/// Disabled sources are dropped; a replacement base URL lets tests and mirrors
/// point a source elsewhere while keeping its strategies.
pub fn configured_sources(
    overrides: &HashMap<String, SourceOverride>,
) -> Result<Vec<SourceConfig>, SearchError> {
    for key in overrides.keys() {
        if !CATALOG.iter().any(|definition| definition.key == key.as_str()) {
            warn!("Ignoring override for unknown source '{}'", key);
        }
    }

    let mut sources = Vec::with_capacity(CATALOG.len());
    for definition in CATALOG {
        let source_override = overrides.get(definition.key);

        if source_override.and_then(|o| o.enabled) == Some(false) {
            info!("Source {} disabled by configuration", definition.name);
            continue;
        }

        let base_url = source_override
            .and_then(|o| o.base_url.as_deref())
            .unwrap_or(definition.base_url);
        sources.push(SourceConfig::new(*definition, base_url)?);
    }

    Ok(sources)
}
