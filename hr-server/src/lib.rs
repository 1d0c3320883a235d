//! HR Server - 人事档案管理服务
//!
//! # 架构概述
//!
//! 三层结构：处理器 (api) → 服务 (services，校验与完整性规则，持有事务)
//! → 仓储 (db/repository，单条 SQL)。
//!
//! # 模块结构
//!
//! ```text
//! hr-server/src/
//! ├── core/          # 配置、状态、服务器、错误
//! ├── api/           # HTTP 路由和处理器
//! ├── services/      # 部门 / 职位 / 员工业务规则
//! ├── db/            # SQLite 连接池与仓储
//! ├── server/        # 中间件与请求提取器
//! └── utils/         # 日志、输入校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod server;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerError, ServerState, build_app};
pub use db::DbService;
pub use utils::logger::init_logger_with_file;
pub use utils::{AppError, AppResult};

/// 加载 .env 并初始化日志
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref());
    config
}
