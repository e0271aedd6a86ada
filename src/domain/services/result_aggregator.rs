// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::SearchSettings;
use crate::domain::models::product::{Product, ProductOrigin, RankedResult};
use crate::domain::search::engine::SourceDescriptor;
use crate::domain::services::deduplicator::ResultDeduplicator;
use crate::domain::services::normalizer::normalize_title_with_cap;
use tracing::{debug, info};

const UNKNOWN_SOURCE_LOGO: &str = "🏷️";
const FALLBACK_HOME_URL: &str = "https://www.example.com";

/// Title suffix, price floor, price span and optional delivery override for
/// each synthesized entry.
const PLACEHOLDER_TEMPLATES: &[(&str, u32, u32, Option<&str>)] = &[
    ("Premium Edition", 15_000, 30_000, None),
    ("Best Seller", 15_000, 30_000, None),
    ("Latest Model", 20_000, 25_000, None),
    ("Special Offer", 18_000, 25_000, Some("Express delivery available")),
];

/// Limits applied while merging source batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorConfig {
    pub max_results: usize,
    pub placeholder_count: usize,
    pub padding_count: usize,
    pub sparse_threshold: usize,
    pub max_title_chars: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self::from(&SearchSettings::default())
    }
}

impl From<&SearchSettings> for AggregatorConfig {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            max_results: settings.max_results,
            placeholder_count: settings.placeholder_count.max(1),
            padding_count: settings.padding_count,
            sparse_threshold: settings.sparse_threshold,
            max_title_chars: settings.max_title_chars,
        }
    }
}

/// Merges per-source products into the final ranked response.
///
/// The response is never empty: when every source comes back empty the list is
/// made of placeholder entries, each marked `is_placeholder` and titled with a
/// "(Demo)" suffix.
pub struct ResultAggregator {
    config: AggregatorConfig,
    sources: Vec<SourceDescriptor>,
    deduplicator: ResultDeduplicator,
}

impl ResultAggregator {
    pub fn new(config: AggregatorConfig, sources: Vec<SourceDescriptor>) -> Self {
        Self {
            config,
            sources,
            deduplicator: ResultDeduplicator::default(),
        }
    }

    pub fn with_deduplicator(mut self, deduplicator: ResultDeduplicator) -> Self {
        self.deduplicator = deduplicator;
        self
    }

    pub fn aggregate(&self, query: &str, per_source: Vec<Vec<Product>>) -> Vec<RankedResult> {
        let mut products: Vec<Product> = per_source.into_iter().flatten().collect();

        if products.is_empty() {
            info!("No real results for '{}', using placeholder data", query);
            products = self.placeholders(query, self.config.placeholder_count);
        } else if products.len() < self.config.sparse_threshold && self.config.padding_count > 0 {
            debug!(
                "Padding {} sparse results with {} placeholders",
                products.len(),
                self.config.padding_count
            );
            products.extend(self.placeholders(query, self.config.padding_count));
        }

        let placeholders = products.iter().filter(|p| p.is_placeholder()).count();
        if placeholders > 0 {
            metrics::counter!("priceradar_placeholder_results_total").increment(placeholders as u64);
        }

        let mut products = self.deduplicator.dedupe(products);
        products.sort_by_key(|p| p.price);
        products.truncate(self.config.max_results.max(1));

        products
            .into_iter()
            .enumerate()
            .map(|(index, product)| RankedResult {
                id: (index + 1).to_string(),
                platform_logo: self.logo_for(&product.source).to_string(),
                is_placeholder: product.is_placeholder(),
                is_lowest_price: index == 0,
                platform: product.source,
                title: product.title,
                price: product.price,
                delivery_time: product.delivery,
                url: product.link,
            })
            .collect()
    }

    /// Build `count` placeholder products rotating over the known sources.
    ///
    /// Labels get a round number once the templates wrap so exact dedup keeps
    /// every entry.
    pub fn placeholders(&self, query: &str, count: usize) -> Vec<Product> {
        let fallback = SourceDescriptor {
            name: "PriceRadar".to_string(),
            logo: UNKNOWN_SOURCE_LOGO.to_string(),
            delivery: "Standard delivery".to_string(),
            home_url: FALLBACK_HOME_URL.to_string(),
        };

        (0..count)
            .map(|index| {
                let (label, floor, span, delivery) =
                    PLACEHOLDER_TEMPLATES[index % PLACEHOLDER_TEMPLATES.len()];
                let source = if self.sources.is_empty() {
                    &fallback
                } else {
                    &self.sources[index % self.sources.len()]
                };

                let round = index / PLACEHOLDER_TEMPLATES.len();
                let title = self.placeholder_title(query, label, round);
                let price = floor + rand::random_range(0..span);
                let delivery: &str = match delivery {
                    Some(delivery) => delivery,
                    None => &source.delivery,
                };

                Product::new(
                    source.name.as_str(),
                    title.as_str(),
                    price,
                    delivery,
                    source.home_url.as_str(),
                    ProductOrigin::Placeholder,
                )
                .unwrap_or(Product {
                    source: source.name.clone(),
                    title,
                    price,
                    delivery: delivery.to_string(),
                    link: FALLBACK_HOME_URL.to_string(),
                    origin: ProductOrigin::Placeholder,
                })
            })
            .collect()
    }

    /// Canonical placeholder title; the query is cut first so the "(Demo)"
    /// suffix always survives the cap.
    fn placeholder_title(&self, query: &str, label: &str, round: usize) -> String {
        let suffix = if round == 0 {
            format!(" - {} (Demo)", label)
        } else {
            format!(" - {} {} (Demo)", label, round + 1)
        };

        let budget = self.config.max_title_chars.saturating_sub(suffix.chars().count());
        let query = normalize_title_with_cap(query, budget);
        normalize_title_with_cap(&format!("{}{}", query, suffix), self.config.max_title_chars)
    }

    fn logo_for(&self, source: &str) -> &str {
        self.sources
            .iter()
            .find(|descriptor| descriptor.name == source)
            .map(|descriptor| descriptor.logo.as_str())
            .unwrap_or(UNKNOWN_SOURCE_LOGO)
    }
}
