// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 查询示例，随缺少参数的错误一起返回
pub const SEARCH_EXAMPLE: &str = "/api/search?query=iPhone+15";

/// 对外公开的端点列表
pub const AVAILABLE_ENDPOINTS: &[&str] = &["/", "/health", "/api/search"];

/// 应用错误类型
///
/// 每个变体对应一种HTTP错误响应
#[derive(Debug, Error)]
pub enum ApiError {
    /// 缺少查询参数或为空
    #[error("Query parameter is required")]
    QueryRequired,
    /// 查询过短
    #[error("Query must be at least {0} characters long")]
    QueryTooShort(usize),
    /// 未知路由
    #[error("Endpoint not found")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.to_string();

        let (status, body) = match self {
            ApiError::QueryRequired => (
                StatusCode::BAD_REQUEST,
                json!({ "error": error, "example": SEARCH_EXAMPLE }),
            ),
            ApiError::QueryTooShort(_) => (StatusCode::BAD_REQUEST, json!({ "error": error })),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": error, "availableEndpoints": AVAILABLE_ENDPOINTS }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
