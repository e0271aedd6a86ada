// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use priceradar::config::settings::Settings;
use priceradar::infrastructure::metrics::init_metrics;
use priceradar::infrastructure::search::PriceSearchEngine;
use priceradar::presentation::routes;
use priceradar::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting priceradar...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Initialize Prometheus Metrics
    init_metrics(&settings.metrics);

    // 4. Build search engine
    let engine = Arc::new(PriceSearchEngine::from_settings(&settings)?);
    info!("Search engine initialized");

    // 5. Start HTTP server
    let app = routes::routes(engine);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
