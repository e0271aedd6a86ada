// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 搜索领域模块
///
/// 定义商品来源接口以及所有来源共用的错误类型
pub mod engine;
