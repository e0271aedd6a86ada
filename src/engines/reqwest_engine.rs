// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::engines::traits::{EngineError, FetchRequest, FetchResponse, PageFetcher};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::{Duration, Instant};

/// 抓取引擎
///
/// 基于reqwest实现的HTTP页面抓取器，每个实例独占自己的客户端与Cookie存储
pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    /// 创建抓取引擎
    ///
    /// # 参数
    ///
    /// * `timeout` - 单个请求超时时间，与搜索截止时间相互独立
    /// * `max_redirects` - 最多跟随的重定向次数
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 抓取引擎实例
    /// * `Err(EngineError)` - 客户端构建失败
    pub fn new(timeout: Duration, max_redirects: usize) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(max_redirects))
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for ReqwestEngine {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError> {
        let mut headers = HeaderMap::new();
        for (k, v) in request.profile.headers() {
            if let (Ok(k), Ok(v)) = (HeaderName::from_bytes(k.as_bytes()), HeaderValue::from_str(v)) {
                headers.insert(k, v);
            }
        }

        let start = Instant::now();
        let response = self
            .client
            .get(request.url.clone())
            .headers(headers)
            .send()
            .await
            .map_err(EngineError::from_reqwest)?;

        let status_code = response.status().as_u16();
        let content = response.text().await.map_err(EngineError::from_reqwest)?;

        Ok(FetchResponse {
            status_code,
            content,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
