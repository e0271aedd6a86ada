// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::infrastructure::search::PriceSearchEngine;
use crate::presentation::errors::ApiError;
use crate::presentation::handlers::search_handler;
use axum::{routing::get, Extension, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 参数
///
/// * `engine` - 搜索引擎实例
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(engine: Arc<PriceSearchEngine>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/search", get(search_handler::search))
        .fallback(not_found)
        .layer(Extension(engine))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回服务状态、时间戳与版本号
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "message": "PriceRadar API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// 服务描述端点
pub async fn index() -> Json<Value> {
    Json(json!({
        "name": "PriceRadar API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Price comparison across online marketplaces",
        "endpoints": {
            "search": "/api/search?query=product+name",
            "health": "/health",
        },
        "status": "Running",
    }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
