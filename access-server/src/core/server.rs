//! Server Implementation
//!
//! HTTP 服务器启动和管理

use tokio::net::TcpListener;

use crate::core::{AppResult, Config, ServerState};
use crate::routes;

/// HTTP Server
pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 初始化状态 (用户目录 + 访问控制)，构建应用并服务直到 Ctrl-C
    pub async fn run(&self) -> AppResult<()> {
        let state = ServerState::initialize(&self.config)?;

        let app = routes::build_app(&state)?;

        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!(
            addr = %addr,
            environment = %self.config.environment,
            users = state.users.len(),
            "Access server listening"
        );

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
