// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 加载服务器、搜索、请求节奏、指标与来源覆盖配置
pub mod settings;
