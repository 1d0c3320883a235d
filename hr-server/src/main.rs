use hr_server::{Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 设置环境 (dotenv, 日志) 并加载配置
    let config = setup_environment();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        database = %config.database_path,
        "HR server starting..."
    );
    if config.is_development() {
        tracing::debug!(?config, "Loaded configuration");
    }

    // 2. 打开数据库并初始化服务
    let state = ServerState::initialize(&config).await?;

    // 3. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
