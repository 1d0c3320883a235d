use crate::core::Config;
use crate::db::DbService;
use crate::services::{DepartmentService, EmployeeService, JobService};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是廉价克隆 (内部为连接池句柄)。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | SQLite 连接池 |
/// | departments | 部门服务 |
/// | jobs | 职位服务 |
/// | employees | 员工服务 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub departments: DepartmentService,
    pub jobs: JobService,
    pub employees: EmployeeService,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        Self {
            departments: DepartmentService::new(db.pool.clone()),
            jobs: JobService::new(db.pool.clone()),
            employees: EmployeeService::new(db.pool.clone()),
            config,
            db,
        }
    }

    /// Open the configured database and wire up the services
    pub async fn initialize(config: &Config) -> crate::core::error::Result<Self> {
        let db = DbService::new(&config.database_path, config.db_max_connections).await?;
        Ok(Self::new(config.clone(), db))
    }
}
