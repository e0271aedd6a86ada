// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 默认日志过滤规则，可通过 `RUST_LOG` 覆盖
pub const DEFAULT_FILTER: &str = "info,priceradar=debug";

/// 初始化日志订阅器
///
/// 仅由二进制入口调用，库代码从不安装订阅器。
pub fn init_telemetry() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
