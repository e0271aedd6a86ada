// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{PacingSettings, SearchSettings};
use crate::domain::models::product::{Product, ProductOrigin, RawItem};
use crate::domain::search::engine::{ProductSource, SearchError, SourceDescriptor, SourceError};
use crate::domain::services::block_detector::BlockDetector;
use crate::domain::services::normalizer::{normalize_price, normalize_title_with_cap};
use crate::engines::request_profile::{random_duration, RequestProfileGenerator};
use crate::engines::traits::{FetchRequest, PageFetcher};
use crate::infrastructure::search::catalog::{AccessPath, SourceConfig};
use crate::infrastructure::search::extraction::ExtractionChain;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Which access path a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Primary,
    Alternate,
}

/// Lifecycle of one source fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Fetching(Attempt),
    Extracting,
    Done,
    Failed(SourceError),
}

/// Facts reported by the driver after running an effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    Started,
    Usable,
    Blocked,
    TransportFailed(String),
    Extracted,
    /// A usable page on which no strategy produced a product
    Missed,
    Cancelled,
}

impl FetchState {
    /// Pure transition function. Terminal states absorb every observation.
    pub fn next(self, observation: Observation) -> FetchState {
        use FetchState::*;

        match (self, observation) {
            (state @ (Done | Failed(_)), _) => state,
            (_, Observation::Cancelled) => Failed(SourceError::Cancelled),
            (Idle, Observation::Started) => Fetching(Attempt::Primary),
            (Fetching(Attempt::Primary), Observation::Blocked) => Fetching(Attempt::Alternate),
            (Fetching(Attempt::Alternate), Observation::Blocked) => Failed(SourceError::Blocked),
            (Fetching(_), Observation::Usable) => Extracting,
            (Fetching(_), Observation::TransportFailed(reason)) => Failed(SourceError::Network(reason)),
            (Extracting, Observation::Extracted) => Done,
            (Extracting, Observation::Missed) => Failed(SourceError::ExtractionMiss),
            (state, observation) => Failed(SourceError::Network(format!(
                "unexpected {:?} while {}",
                observation, state
            ))),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchState::Done | FetchState::Failed(_))
    }
}

impl fmt::Display for FetchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchState::Idle => write!(f, "idle"),
            FetchState::Fetching(Attempt::Primary) => write!(f, "fetching primary"),
            FetchState::Fetching(Attempt::Alternate) => write!(f, "fetching alternate"),
            FetchState::Extracting => write!(f, "extracting"),
            FetchState::Done => write!(f, "done"),
            FetchState::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

/// Per-source fetcher for a catalog marketplace.
///
/// Drives [`FetchState`] by executing effects (pacing sleeps, requests,
/// extraction) and feeding the results back as observations. Every failure
/// ends as an empty list.
pub struct MarketplaceSource {
    config: SourceConfig,
    fetcher: Arc<dyn PageFetcher>,
    profiles: RequestProfileGenerator,
    detector: BlockDetector,
    chain: ExtractionChain,
    pacing: PacingSettings,
    max_items: usize,
    max_title_chars: usize,
    descriptor: SourceDescriptor,
}

impl MarketplaceSource {
    pub fn new(
        config: SourceConfig,
        fetcher: Arc<dyn PageFetcher>,
        search: &SearchSettings,
        pacing: &PacingSettings,
    ) -> Result<Self, SearchError> {
        let definition = config.definition;
        let chain = ExtractionChain::new(
            definition.name,
            config.base_url.clone(),
            &definition.strategy,
            search.scan_limit,
            search.min_title_chars,
            search.max_title_chars,
        )
        .map_err(|e| SearchError::InvalidSource(e.to_string()))?;

        Ok(Self {
            descriptor: config.descriptor(),
            detector: BlockDetector::new(definition.block_signatures),
            profiles: RequestProfileGenerator::new(
                Duration::from_millis(pacing.think_min_ms),
                Duration::from_millis(pacing.think_max_ms),
            ),
            chain,
            fetcher,
            pacing: pacing.clone(),
            max_items: search.max_items_per_source,
            max_title_chars: search.max_title_chars,
            config,
        })
    }

    async fn run(&self, query: &str, cancel: &CancellationToken) -> Result<Vec<Product>, SourceError> {
        let mut page: Option<String> = None;
        let mut products = Vec::new();
        let mut state = FetchState::Idle.next(Observation::Started);

        loop {
            let observation = match &state {
                FetchState::Fetching(attempt) => self.attempt(*attempt, query, cancel, &mut page).await,
                FetchState::Extracting => {
                    products = page.take().map(|body| self.extract(&body)).unwrap_or_default();
                    if products.is_empty() {
                        Observation::Missed
                    } else {
                        Observation::Extracted
                    }
                }
                FetchState::Done => return Ok(products),
                FetchState::Failed(reason) => return Err(reason.clone()),
                FetchState::Idle => Observation::Started,
            };

            let previous = state.to_string();
            state = state.next(observation);
            debug!("{}: {} -> {}", self.descriptor.name, previous, state);
        }
    }

    /// Execute one request, with the pacing that precedes it.
    async fn attempt(
        &self,
        attempt: Attempt,
        query: &str,
        cancel: &CancellationToken,
        page: &mut Option<String>,
    ) -> Observation {
        let definition = &self.config.definition;
        let path: &AccessPath = match attempt {
            Attempt::Primary => &definition.primary,
            Attempt::Alternate => &definition.alternate,
        };

        let profile = match path.device {
            Some(device) => self.profiles.generate_for(device),
            None => self.profiles.generate(),
        };

        let delay = match attempt {
            Attempt::Primary if self.pacing.think_time_enabled => profile.think_time().sample(),
            Attempt::Primary => Duration::ZERO,
            Attempt::Alternate => random_duration(
                Duration::from_millis(self.pacing.retry_backoff_min_ms),
                Duration::from_millis(self.pacing.retry_backoff_max_ms),
            ),
        };
        if !pause(delay, cancel).await {
            return Observation::Cancelled;
        }

        let url = match self.config.search_url(path, query) {
            Ok(url) => url,
            Err(e) => return Observation::TransportFailed(e.to_string()),
        };
        info!(
            "{}: requesting {:?} {} via {}",
            definition.name,
            attempt,
            url,
            self.fetcher.name()
        );

        let request = FetchRequest { url, profile };
        let result = tokio::select! {
            _ = cancel.cancelled() => return Observation::Cancelled,
            result = self.fetcher.fetch(&request) => result,
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                if !e.is_transport() {
                    error!("{}: {} client error: {}", definition.name, self.fetcher.name(), e);
                }
                return Observation::TransportFailed(e.to_string());
            }
        };

        if self.detector.is_blocked(&response.content, response.status_code) {
            warn!(
                "{}: {:?} request blocked (status {}, signature {:?})",
                definition.name,
                attempt,
                response.status_code,
                self.detector.matched_signature(&response.content)
            );
            return Observation::Blocked;
        }

        if response.status_code >= 500 {
            return Observation::TransportFailed(format!("HTTP {}", response.status_code));
        }

        debug!(
            "{}: received {} bytes in {}ms",
            definition.name,
            response.content.len(),
            response.response_time_ms
        );
        *page = Some(response.content);
        Observation::Usable
    }

    fn extract(&self, body: &str) -> Vec<Product> {
        let items = self.chain.extract(body);
        self.normalize(items)
    }

    fn normalize(&self, items: Vec<RawItem>) -> Vec<Product> {
        items
            .into_iter()
            .filter_map(|item| {
                let title = normalize_title_with_cap(&item.title, self.max_title_chars);
                let price = normalize_price(&item.price);
                Product::new(
                    item.source,
                    title,
                    price,
                    self.descriptor.delivery.as_str(),
                    item.link,
                    ProductOrigin::Extracted,
                )
            })
            .take(self.max_items)
            .collect()
    }

    fn record(&self, outcome: &'static str) {
        metrics::counter!(
            "priceradar_source_fetch_total",
            "source" => self.descriptor.name.clone(),
            "outcome" => outcome
        )
        .increment(1);
    }
}

#[async_trait]
impl ProductSource for MarketplaceSource {
    async fn fetch(&self, query: &str, cancel: CancellationToken) -> Vec<Product> {
        match self.run(query, &cancel).await {
            Ok(products) => {
                info!("{}: extracted {} products", self.descriptor.name, products.len());
                self.record("success");
                products
            }
            Err(error) => {
                match &error {
                    SourceError::Cancelled => debug!("{}: cancelled", self.descriptor.name),
                    SourceError::ExtractionMiss => {
                        info!("{}: no strategy matched the page", self.descriptor.name)
                    }
                    other => warn!("{}: {}", self.descriptor.name, other),
                }
                self.record(error.outcome());
                Vec::new()
            }
        }
    }

    fn descriptor(&self) -> &SourceDescriptor {
        &self.descriptor
    }
}

/// Sleep for `duration` unless `cancel` fires first. Returns false on cancellation.
async fn pause(duration: Duration, cancel: &CancellationToken) -> bool {
    if duration.is_zero() {
        return !cancel.is_cancelled();
    }

    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}
