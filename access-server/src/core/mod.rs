//! 核心模块：配置、状态、错误和服务器

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{ApiResponse, AppError, AppResult};
pub use server::Server;
pub use state::ServerState;
