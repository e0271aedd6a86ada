// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 包含与外部系统交互的技术实现：
/// - 指标（metrics）：Prometheus指标导出
/// - 搜索（search）：商品来源目录、抽取链、来源抓取器与调度器
pub mod metrics;
pub mod search;
