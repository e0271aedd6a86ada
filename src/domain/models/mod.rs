// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - product：原始条目、规范化商品与排序结果
/// - strategy：描述来源页面结构的静态选择器策略
pub mod product;
pub mod strategy;
