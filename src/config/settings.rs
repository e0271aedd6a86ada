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

use crate::domain::services::deduplicator::DedupStrictness;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、搜索流程、请求节奏、指标导出以及各来源覆盖配置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 搜索流程限制
    #[serde(default)]
    pub search: SearchSettings,
    /// 请求节奏配置
    #[serde(default)]
    pub pacing: PacingSettings,
    /// Prometheus导出配置
    #[serde(default)]
    pub metrics: MetricsSettings,
    /// 按小写来源名索引的来源覆盖配置
    #[serde(default)]
    pub sources: HashMap<String, SourceOverride>,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 搜索流程配置设置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// 单次搜索的全局截止时间（毫秒）
    pub deadline_ms: u64,
    /// 来源启动错峰偏移下限（毫秒）
    pub stagger_min_ms: u64,
    /// 来源启动错峰偏移上限（毫秒）
    pub stagger_max_ms: u64,
    /// 单个请求超时时间（毫秒）
    pub request_timeout_ms: u64,
    /// 每个请求最多跟随的重定向次数
    pub max_redirects: usize,
    /// 每个策略检查的容器数上限
    pub scan_limit: usize,
    /// 每个来源保留的商品数上限
    pub max_items_per_source: usize,
    /// 标题字符数须大于该值
    pub min_title_chars: usize,
    /// 标题最大字符数
    pub max_title_chars: usize,
    /// 最终结果条数上限
    pub max_results: usize,
    /// 无任何真实结果时生成的占位条目数
    pub placeholder_count: usize,
    /// 真实结果稀疏时追加的占位条目数（0表示不补充）
    pub padding_count: usize,
    /// 真实结果少于该值时触发补充
    pub sparse_threshold: usize,
    /// 标题去重规则
    pub dedup_strictness: DedupStrictness,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            deadline_ms: 35_000,
            stagger_min_ms: 1_500,
            stagger_max_ms: 3_000,
            request_timeout_ms: 25_000,
            max_redirects: 5,
            scan_limit: 8,
            max_items_per_source: 6,
            min_title_chars: 10,
            max_title_chars: 150,
            max_results: 12,
            placeholder_count: 4,
            padding_count: 2,
            sparse_threshold: 4,
            dedup_strictness: DedupStrictness::Exact,
        }
    }
}

impl SearchSettings {
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// 请求节奏配置设置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PacingSettings {
    /// 首次请求前是否等待随机思考时间
    pub think_time_enabled: bool,
    pub think_min_ms: u64,
    pub think_max_ms: u64,
    /// 被拦截后改走备用路径前的退避时间（毫秒）
    pub retry_backoff_min_ms: u64,
    pub retry_backoff_max_ms: u64,
}

impl Default for PacingSettings {
    fn default() -> Self {
        Self {
            think_time_enabled: true,
            think_min_ms: 1_000,
            think_max_ms: 3_000,
            retry_backoff_min_ms: 2_000,
            retry_backoff_max_ms: 4_000,
        }
    }
}

impl PacingSettings {
    /// 不做任何等待，用于测试与本地工具
    pub fn immediate() -> Self {
        Self {
            think_time_enabled: false,
            think_min_ms: 0,
            think_max_ms: 0,
            retry_backoff_min_ms: 0,
            retry_backoff_max_ms: 0,
        }
    }
}

/// Prometheus导出配置设置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    pub enabled: bool,
    pub listen_addr: String,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            listen_addr: "0.0.0.0:9000".to_string(),
        }
    }
}

/// 单个来源的覆盖配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceOverride {
    pub enabled: Option<bool>,
    pub base_url: Option<String>,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载内置默认值、`config/default`、`config/{APP_ENVIRONMENT}`
    /// 以及 `PRICERADAR__*` 环境变量
    ///
    /// # 返回值
    ///
    /// * `Ok(Settings)` - 成功加载的配置实例
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?;

        for file in config_files(&env) {
            builder = builder.add_source(File::with_name(&file).required(false));
        }

        builder
            .add_source(Environment::with_prefix("PRICERADAR").separator("__"))
            .build()?
            .try_deserialize()
    }
}

/// 按加载顺序列出配置文件，`default` 环境只加载一次
fn config_files(env: &str) -> Vec<String> {
    let mut files = vec!["config/default".to_string()];
    if env != "default" {
        files.push(format!("config/{}", env));
    }
    files
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            search: SearchSettings::default(),
            pacing: PacingSettings::default(),
            metrics: MetricsSettings::default(),
            sources: HashMap::new(),
        }
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
