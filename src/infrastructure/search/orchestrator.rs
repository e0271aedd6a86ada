// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::SearchSettings;
use crate::domain::models::product::Product;
use crate::domain::search::engine::{ProductSource, SearchError, SourceDescriptor};
use crate::engines::request_profile::random_duration;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Products returned by one source within the deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBatch {
    pub source: String,
    pub products: Vec<Product>,
    /// False when the source was abandoned at the deadline or its task failed
    pub completed: bool,
}

/// Runs every source concurrently under one global deadline.
///
/// Source `i` starts after `i` times a random offset in the stagger window.
/// Whatever has finished when the deadline fires is kept; the rest is
/// cancelled and aborted.
pub struct FetchOrchestrator {
    sources: Vec<Arc<dyn ProductSource>>,
    deadline: Duration,
    stagger_min: Duration,
    stagger_max: Duration,
}

impl FetchOrchestrator {
    pub fn new(
        sources: Vec<Arc<dyn ProductSource>>,
        deadline: Duration,
        stagger_min: Duration,
        stagger_max: Duration,
    ) -> Result<Self, SearchError> {
        if sources.is_empty() {
            return Err(SearchError::NoSourcesConfigured);
        }

        Ok(Self {
            sources,
            deadline,
            stagger_min,
            stagger_max: stagger_max.max(stagger_min),
        })
    }

    pub fn from_settings(
        sources: Vec<Arc<dyn ProductSource>>,
        settings: &SearchSettings,
    ) -> Result<Self, SearchError> {
        Self::new(
            sources,
            settings.deadline(),
            Duration::from_millis(settings.stagger_min_ms),
            Duration::from_millis(settings.stagger_max_ms),
        )
    }

    pub fn descriptors(&self) -> Vec<SourceDescriptor> {
        self.sources.iter().map(|source| source.descriptor().clone()).collect()
    }

    /// Fetch every source and return one batch per source, in source order.
    pub async fn fetch_all(&self, query: &str) -> Vec<SourceBatch> {
        let cancel = CancellationToken::new();
        let mut tasks = JoinSet::new();

        for (index, source) in self.sources.iter().enumerate() {
            let source = Arc::clone(source);
            let query = query.to_string();
            let cancel = cancel.clone();
            let offset = random_duration(self.stagger_min, self.stagger_max) * index as u32;

            tasks.spawn(async move {
                if !offset.is_zero() {
                    debug!("{}: starting in {:?}", source.name(), offset);
                    tokio::select! {
                        _ = cancel.cancelled() => return (index, Vec::new()),
                        _ = tokio::time::sleep(offset) => {}
                    }
                }
                (index, source.fetch(&query, cancel).await)
            });
        }

        let mut slots: Vec<Option<Vec<Product>>> = vec![None; self.sources.len()];
        let deadline = Instant::now() + self.deadline;

        loop {
            match tokio::time::timeout_at(deadline, tasks.join_next()).await {
                Ok(Some(Ok((index, products)))) => slots[index] = Some(products),
                Ok(Some(Err(e))) => error!("Source task failed: {}", e),
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        "Search deadline of {:?} reached, abandoning {} sources",
                        self.deadline,
                        tasks.len()
                    );
                    cancel.cancel();
                    tasks.abort_all();
                    break;
                }
            }
        }

        let batches: Vec<SourceBatch> = self
            .sources
            .iter()
            .zip(slots)
            .map(|(source, slot)| SourceBatch {
                source: source.name().to_string(),
                completed: slot.is_some(),
                products: slot.unwrap_or_default(),
            })
            .collect();

        info!(
            "Fetched '{}': {}",
            query,
            batches
                .iter()
                .map(|batch| format!("{}={}", batch.source, batch.products.len()))
                .collect::<Vec<_>>()
                .join(", ")
        );

        batches
    }

    /// All products, flattened in source order.
    pub async fn search(&self, query: &str) -> Vec<Product> {
        self.fetch_all(query)
            .await
            .into_iter()
            .flat_map(|batch| batch.products)
            .collect()
    }
}
