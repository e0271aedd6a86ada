// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 搜索流程中不涉及I/O的部分：拦截检测、字段归一化、去重与结果聚合
pub mod block_detector;
pub mod deduplicator;
pub mod normalizer;
pub mod result_aggregator;
