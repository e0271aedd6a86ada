// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::fakes::{product, DelayedSource, PanickingSource};
use priceradar::domain::search::engine::ProductSource;
use priceradar::infrastructure::search::FetchOrchestrator;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn shared<S: ProductSource + 'static>(source: Arc<S>) -> Arc<dyn ProductSource> {
    source
}

fn orchestrator(sources: Vec<Arc<dyn ProductSource>>, deadline_secs: u64) -> FetchOrchestrator {
    FetchOrchestrator::new(sources, Duration::from_secs(deadline_secs), Duration::ZERO, Duration::ZERO).unwrap()
}

/// 截止时间到达时保留已完成来源的结果
#[tokio::test(start_paused = true)]
async fn test_deadline_keeps_completed_sources() {
    let fast = DelayedSource::new(
        "Fast",
        Some(Duration::from_secs(2)),
        vec![product("Fast", "Wireless Keyboard K380", 2_499)],
    );
    let stuck = DelayedSource::new("Stuck", None, Vec::new());
    let orchestrator = orchestrator(vec![shared(fast), shared(stuck)], 5);

    let start = Instant::now();
    let batches = orchestrator.fetch_all("keyboard").await;
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_secs(5));
    assert!(elapsed < Duration::from_secs(6));

    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].source, "Fast");
    assert!(batches[0].completed);
    assert_eq!(batches[0].products.len(), 1);
    assert_eq!(batches[1].source, "Stuck");
    assert!(!batches[1].completed);
    assert!(batches[1].products.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_source_never_writes() {
    let slow = DelayedSource::new(
        "Slow",
        Some(Duration::from_secs(30)),
        vec![product("Slow", "Wireless Keyboard K380", 2_499)],
    );
    let late_writes = slow.late_writes.clone();
    let orchestrator = orchestrator(vec![shared(slow)], 5);

    let products = orchestrator.search("keyboard").await;
    assert!(products.is_empty());

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(late_writes.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_returns_early_when_all_sources_finish() {
    let a = DelayedSource::new("A", Some(Duration::from_secs(1)), vec![product("A", "Mechanical Keyboard", 3_000)]);
    let b = DelayedSource::new("B", Some(Duration::from_secs(2)), vec![product("B", "Gaming Mouse Pro", 1_500)]);
    let orchestrator = orchestrator(vec![shared(a), shared(b)], 35);

    let start = Instant::now();
    let batches = orchestrator.fetch_all("gear").await;

    assert!(start.elapsed() < Duration::from_secs(3));
    assert!(batches.iter().all(|batch| batch.completed));
}

#[tokio::test(start_paused = true)]
async fn test_results_keep_source_order() {
    let slow = DelayedSource::new("Slow", Some(Duration::from_secs(3)), vec![product("Slow", "Standing Desk Frame", 12_000)]);
    let quick = DelayedSource::new("Quick", Some(Duration::from_secs(1)), vec![product("Quick", "Desk Lamp With Clamp", 900)]);
    let orchestrator = orchestrator(vec![shared(slow), shared(quick)], 35);

    let products = orchestrator.search("desk").await;

    let sources: Vec<&str> = products.iter().map(|p| p.source.as_str()).collect();
    assert_eq!(sources, vec!["Slow", "Quick"]);
}

#[tokio::test(start_paused = true)]
async fn test_start_offsets_are_staggered_by_index() {
    let sources: Vec<Arc<DelayedSource>> = (0..3)
        .map(|i| DelayedSource::new(&format!("S{}", i), Some(Duration::ZERO), Vec::new()))
        .collect();
    let orchestrator = FetchOrchestrator::new(
        sources.iter().cloned().map(shared).collect(),
        Duration::from_secs(35),
        Duration::from_millis(1_500),
        Duration::from_millis(1_500),
    )
    .unwrap();

    let start = Instant::now();
    orchestrator.fetch_all("anything").await;

    for (index, source) in sources.iter().enumerate() {
        let offset = source.started_at().unwrap() - start;
        let expected = Duration::from_millis(1_500) * index as u32;
        assert!(offset >= expected, "source {} started at {:?}", index, offset);
        assert!(offset < expected + Duration::from_millis(100), "source {} started at {:?}", index, offset);
    }
}

#[tokio::test(start_paused = true)]
async fn test_stagger_past_deadline_means_source_never_starts() {
    let first = DelayedSource::new("First", Some(Duration::ZERO), vec![product("First", "USB-C Charging Cable", 399)]);
    let second = DelayedSource::new("Second", Some(Duration::ZERO), Vec::new());
    let orchestrator = FetchOrchestrator::new(
        vec![shared(first), shared(second.clone())],
        Duration::from_secs(2),
        Duration::from_secs(10),
        Duration::from_secs(10),
    )
    .unwrap();

    let batches = orchestrator.fetch_all("cable").await;

    assert_eq!(batches[0].products.len(), 1);
    assert!(!batches[1].completed);
    assert!(second.started_at().is_none());
}

#[tokio::test]
async fn test_panicking_source_is_isolated() {
    let healthy = DelayedSource::new(
        "Healthy",
        Some(Duration::ZERO),
        vec![product("Healthy", "Bluetooth Speaker Mini", 1_999)],
    );
    let orchestrator = orchestrator(vec![shared(PanickingSource::new("Broken")), shared(healthy)], 35);

    let batches = orchestrator.fetch_all("speaker").await;

    assert!(!batches[0].completed);
    assert!(batches[0].products.is_empty());
    assert_eq!(batches[1].products.len(), 1);
}
