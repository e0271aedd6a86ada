// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::models::product::RankedResult;
use crate::domain::search::engine::{ProductSource, SearchError};
use crate::domain::services::deduplicator::ResultDeduplicator;
use crate::domain::services::result_aggregator::{AggregatorConfig, ResultAggregator};
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::infrastructure::search::catalog::configured_sources;
use crate::infrastructure::search::orchestrator::FetchOrchestrator;
use crate::infrastructure::search::source_fetcher::MarketplaceSource;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Single entry point: query in, ranked listing out.
pub struct PriceSearchEngine {
    orchestrator: FetchOrchestrator,
    aggregator: ResultAggregator,
}

impl PriceSearchEngine {
    pub fn new(orchestrator: FetchOrchestrator, aggregator: ResultAggregator) -> Self {
        Self {
            orchestrator,
            aggregator,
        }
    }

    /// Build the catalog sources, each with its own HTTP client.
    pub fn from_settings(settings: &Settings) -> Result<Self, SearchError> {
        let search = &settings.search;

        let mut sources: Vec<Arc<dyn ProductSource>> = Vec::new();
        for config in configured_sources(&settings.sources)? {
            let fetcher = ReqwestEngine::new(search.request_timeout(), search.max_redirects)
                .map_err(|e| SearchError::Client(e.to_string()))?;
            info!("Registered source {} at {}", config.definition.name, config.base_url);
            sources.push(Arc::new(MarketplaceSource::new(
                config,
                Arc::new(fetcher),
                search,
                &settings.pacing,
            )?));
        }

        let orchestrator = FetchOrchestrator::from_settings(sources, search)?;
        let aggregator = ResultAggregator::new(AggregatorConfig::from(search), orchestrator.descriptors())
            .with_deduplicator(ResultDeduplicator::with_strictness(search.dedup_strictness));

        Ok(Self::new(orchestrator, aggregator))
    }

    pub async fn search(&self, query: &str) -> Vec<RankedResult> {
        let start = Instant::now();

        let batches = self.orchestrator.fetch_all(query).await;
        let results = self
            .aggregator
            .aggregate(query, batches.into_iter().map(|batch| batch.products).collect());

        let elapsed = start.elapsed();
        metrics::histogram!("priceradar_search_duration_seconds").record(elapsed.as_secs_f64());
        info!("Search '{}' returned {} results in {:?}", query, results.len(), elapsed);

        results
    }
}
