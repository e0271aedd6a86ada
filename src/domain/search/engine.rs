// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::product::Product;
use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// 来源级错误
///
/// 不会离开来源边界：记录日志、计入指标后转换为空商品列表
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Blocked by source protection")]
    Blocked,
    #[error("Network error: {0}")]
    Network(String),
    #[error("No extraction strategy matched the page")]
    ExtractionMiss,
    #[error("Cancelled")]
    Cancelled,
}

impl SourceError {
    /// 指标 `outcome` 维度的取值
    pub fn outcome(&self) -> &'static str {
        match self {
            SourceError::Blocked => "blocked",
            SourceError::Network(_) => "network_error",
            SourceError::ExtractionMiss => "extraction_miss",
            SourceError::Cancelled => "cancelled",
        }
    }
}

/// 搜索引擎构建错误，仅在初始化时出现
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No sources configured")]
    NoSourcesConfigured,
    #[error("Invalid source configuration: {0}")]
    InvalidSource(String),
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// 来源展示信息，用于平台标识与占位条目生成
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub name: String,
    pub logo: String,
    pub delivery: String,
    pub home_url: String,
}

/// 商品来源特质
///
/// 每个电商平台的抓取实现都需要实现该特质
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// 抓取并抽取 `query` 对应的商品
    ///
    /// 从不失败：所有失败路径都返回空列表。`cancel` 触发后，
    /// 实现须在下一个挂起点停止。
    ///
    /// # 参数
    ///
    /// * `query` - 查询词
    /// * `cancel` - 调度器的取消令牌
    ///
    /// # 返回值
    ///
    /// 返回抽取到的商品列表，可能为空
    async fn fetch(&self, query: &str, cancel: CancellationToken) -> Vec<Product>;

    /// 获取来源展示信息
    fn descriptor(&self) -> &SourceDescriptor;

    fn name(&self) -> &str {
        &self.descriptor().name
    }
}
