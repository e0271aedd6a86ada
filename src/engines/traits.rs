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

use crate::engines::request_profile::RequestProfile;
use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// 传输层错误
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 超时
    #[error("Timeout")]
    Timeout,
}

impl EngineError {
    /// 将reqwest错误归类，超时单独成为 `Timeout`
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            EngineError::Timeout
        } else {
            EngineError::RequestFailed(error)
        }
    }

    /// 是否为网络侧故障
    ///
    /// 客户端构建或请求构造错误不属于网络故障
    pub fn is_transport(&self) -> bool {
        match self {
            EngineError::RequestFailed(e) => {
                e.is_timeout() || e.is_connect() || e.is_request() || e.is_body() || e.is_redirect()
            }
            EngineError::Timeout => true,
        }
    }
}

/// 抓取请求
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// 目标URL
    pub url: Url,
    /// 本次尝试使用的身份与请求头
    pub profile: RequestProfile,
}

/// 抓取响应
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 解码后的响应体
    pub content: String,
    /// 请求耗时（毫秒）
    pub response_time_ms: u64,
}

/// 页面抓取器特质
///
/// 来源抓取器与网络之间的传输层接口
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 执行GET请求
    ///
    /// 非成功状态码作为响应返回，只有传输失败才返回 `Err`
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchResponse)` - 抓取响应
    /// * `Err(EngineError)` - 传输过程中出现的错误
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError>;

    /// 获取抓取器名称
    fn name(&self) -> &'static str;
}
