// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 商品搜索模块
///
/// 包含来源目录、抽取链、来源抓取器、带截止时间的调度器，
/// 以及将它们与聚合器连接起来的搜索引擎入口
pub mod catalog;
pub mod extraction;
pub mod orchestrator;
pub mod price_search;
pub mod source_fetcher;

pub use orchestrator::{FetchOrchestrator, SourceBatch};
pub use price_search::PriceSearchEngine;
pub use source_fetcher::MarketplaceSource;
