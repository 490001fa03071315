use access_server::{Config, Server, init_logger_with_file, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境变量 (.env)
    setup_environment();

    // 2. 配置
    let config = Config::from_env();

    // 3. 日志
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    print_banner();
    tracing::info!(
        environment = %config.environment,
        production = config.is_production(),
        "Starting access server"
    );

    // 4. 用户目录 + 访问控制 + 服务
    Server::new(config).run().await?;

    Ok(())
}
