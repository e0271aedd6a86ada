// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含商品模型、来源抽象以及归一化、拦截检测、去重与聚合服务
pub mod domain;

/// 引擎模块
///
/// 请求画像生成与HTTP抓取传输层
pub mod engines;

/// 基础设施模块
///
/// 提供指标导出与各商品来源的抓取实现
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由与处理器
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

pub use domain::models::product::{Product, ProductOrigin, RankedResult};
pub use infrastructure::search::PriceSearchEngine;
