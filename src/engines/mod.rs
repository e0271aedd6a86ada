// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 引擎模块
///
/// 包含反检测请求画像生成与各来源使用的HTTP传输层
pub mod request_profile;
pub mod reqwest_engine;
pub mod traits;
