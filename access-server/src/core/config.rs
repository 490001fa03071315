/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_HOST | 127.0.0.1 | 监听地址 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | LOG_LEVEL | info | 日志级别 (tracing EnvFilter 语法) |
/// | LOG_DIR | (无) | 日志目录，设置后按天滚动写文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | USERS_FILE | (无) | 用户目录 JSON 文件，未设置时使用内置演示用户 |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 USERS_FILE=./users.json cargo run -p access-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 监听地址
    pub http_host: String,
    /// HTTP 服务端口
    pub http_port: u16,
    /// 日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 用户目录文件
    pub users_file: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_host: std::env::var("HTTP_HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            users_file: std::env::var("USERS_FILE").ok().filter(|f| !f.is_empty()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(http_port: u16, users_file: Option<String>) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.users_file = users_file;
        config
    }

    /// `host:port` 监听地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr() {
        let mut config = Config::with_overrides(8080, None);
        config.http_host = "0.0.0.0".to_string();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert!(config.users_file.is_none());
    }

    #[test]
    fn test_environment_flags() {
        let mut config = Config::default();
        config.environment = "production".to_string();
        assert!(config.is_production());
        assert!(!config.is_development());
    }
}
