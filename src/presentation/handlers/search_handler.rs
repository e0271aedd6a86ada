// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json, Query};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::domain::models::product::RankedResult;
use crate::infrastructure::search::PriceSearchEngine;
use crate::presentation::errors::ApiError;

/// 查询最少字符数
pub const MIN_QUERY_CHARS: usize = 2;

/// 搜索请求参数
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// 商品查询词
    pub query: Option<String>,
}

/// 校验查询参数
///
/// # 参数
///
/// * `query` - 原始查询参数
///
/// # 返回值
///
/// * `Ok(String)` - 去除首尾空白后的查询
/// * `Err(ApiError)` - 缺失、空白或过短
pub fn validate_query(query: Option<&str>) -> Result<String, ApiError> {
    let query = query.map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(ApiError::QueryRequired);
    }
    if query.chars().count() < MIN_QUERY_CHARS {
        return Err(ApiError::QueryTooShort(MIN_QUERY_CHARS));
    }

    Ok(query.to_string())
}

/// 处理商品比价搜索请求
///
/// # 参数
///
/// * `engine` - 搜索引擎实例
/// * `params` - 查询参数
///
/// # 返回值
///
/// * `Ok(Json<Vec<RankedResult>>)` - 按价格升序排列的结果，至少一条
/// * `Err(ApiError)` - 查询参数校验失败
pub async fn search(
    Extension(engine): Extension<Arc<PriceSearchEngine>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<RankedResult>>, ApiError> {
    let query = validate_query(params.query.as_deref())?;
    info!("Search request for '{}'", query);

    Ok(Json(engine.search(&query).await))
}
