// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use priceradar::domain::models::product::{Product, ProductOrigin};
use priceradar::domain::search::engine::{ProductSource, SourceDescriptor};
use priceradar::engines::traits::{EngineError, FetchRequest, FetchResponse, PageFetcher};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// 按顺序返回预设响应的抓取器
pub struct ScriptedFetcher {
    responses: Mutex<VecDeque<Result<FetchResponse, EngineError>>>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl ScriptedFetcher {
    pub fn new(responses: Vec<Result<FetchResponse, EngineError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.url.to_string())
            .collect()
    }

    pub fn user_agents(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.profile.user_agent().to_string())
            .collect()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(EngineError::Timeout))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

pub fn page(status_code: u16, content: &str) -> Result<FetchResponse, EngineError> {
    Ok(FetchResponse {
        status_code,
        content: content.to_string(),
        response_time_ms: 12,
    })
}

pub const CAPTCHA_PAGE: &str =
    "<html><head><title>Robot Check</title></head><body>Enter the characters you see (captcha)</body></html>";

/// Amazon结果页，`count` 个完整商品
pub fn amazon_listing(count: usize) -> String {
    let cards: String = (0..count)
        .map(|i| {
            format!(
                r#"<div data-component-type="s-search-result" data-asin="B0TEST{i:04}">
                    <h2><a class="a-link-normal" href="/dp/B0TEST{i:04}">
                        <span>Noise Cancelling Headphones Model {i}</span>
                    </a></h2>
                    <span class="a-price"><span class="a-price-whole">{price}</span></span>
                </div>"#,
                i = i,
                price = 2_000 + i * 500,
            )
        })
        .collect();

    format!("<html><body><div class=\"s-main-slot\">{}</div></body></html>", cards)
}

pub fn descriptor(name: &str) -> SourceDescriptor {
    SourceDescriptor {
        name: name.to_string(),
        logo: "🏷️".to_string(),
        delivery: "Standard delivery".to_string(),
        home_url: format!("https://{}.example", name.to_lowercase()),
    }
}

pub fn product(source: &str, title: &str, price: u32) -> Product {
    Product::new(
        source,
        title,
        price,
        "Standard delivery",
        format!("https://{}.example/p/{}", source.to_lowercase(), price),
        ProductOrigin::Extracted,
    )
    .unwrap()
}

/// 延迟后返回固定商品的来源；`delay` 为 `None` 时永不完成
pub struct DelayedSource {
    descriptor: SourceDescriptor,
    delay: Option<Duration>,
    products: Vec<Product>,
    pub started_at: Mutex<Option<Instant>>,
    /// 仅在睡眠结束后写入，用于检测被放弃的任务
    pub late_writes: Arc<Mutex<Vec<String>>>,
}

impl DelayedSource {
    pub fn new(name: &str, delay: Option<Duration>, products: Vec<Product>) -> Arc<Self> {
        Arc::new(Self {
            descriptor: descriptor(name),
            delay,
            products,
            started_at: Mutex::new(None),
            late_writes: Arc::new(Mutex::new(Vec::new())),
        })
    }

    pub fn started_at(&self) -> Option<Instant> {
        *self.started_at.lock().unwrap()
    }
}

#[async_trait]
impl ProductSource for DelayedSource {
    async fn fetch(&self, _query: &str, cancel: CancellationToken) -> Vec<Product> {
        *self.started_at.lock().unwrap() = Some(Instant::now());

        let Some(delay) = self.delay else {
            cancel.cancelled().await;
            return Vec::new();
        };

        tokio::time::sleep(delay).await;
        self.late_writes.lock().unwrap().push(self.descriptor.name.clone());
        self.products.clone()
    }

    fn descriptor(&self) -> &SourceDescriptor {
        &self.descriptor
    }
}

/// 抓取时直接panic的来源
pub struct PanickingSource {
    descriptor: SourceDescriptor,
}

impl PanickingSource {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            descriptor: descriptor(name),
        })
    }
}

#[async_trait]
impl ProductSource for PanickingSource {
    async fn fetch(&self, _query: &str, _cancel: CancellationToken) -> Vec<Product> {
        panic!("source exploded");
    }

    fn descriptor(&self) -> &SourceDescriptor {
        &self.descriptor
    }
}
