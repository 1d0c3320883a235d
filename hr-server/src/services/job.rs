//! Job Service
//!
//! Job titles are unique after trimming and cannot be deleted while an
//! employee holds them.

use shared::error::{AppError, ErrorCode};
use shared::models::{Job, JobCreate};
use shared::util::non_blank;
use sqlx::SqlitePool;
use tracing::{info, instrument, warn};

use super::ServiceResult;
use crate::db::repository::{employee, job};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_REMARK_LEN, validate_optional_text, validate_required_text,
};

fn not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::JobNotFound,
        format!("Job {id} does not exist"),
    )
    .with_detail("id", id)
}

fn name_exists(name: &str) -> AppError {
    AppError::with_message(
        ErrorCode::JobNameExists,
        format!("Job '{name}' already exists"),
    )
    .with_detail("name", name)
}

#[derive(Clone)]
pub struct JobService {
    pool: SqlitePool,
}

impl JobService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> ServiceResult<Vec<Job>> {
        Ok(job::find_all(&self.pool).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Option<Job>> {
        Ok(job::find_by_id(&self.pool, id).await?)
    }

    /// Blank names never reach the store
    #[instrument(skip(self))]
    pub async fn get_by_name(&self, name: &str) -> ServiceResult<Option<Job>> {
        let Some(name) = non_blank(Some(name)) else {
            return Ok(None);
        };
        Ok(job::find_by_name(&self.pool, &name).await?)
    }

    #[instrument(skip(self, data), fields(name = %data.name))]
    pub async fn add(&self, data: JobCreate) -> ServiceResult<Job> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&data.remark, "remark", MAX_REMARK_LEN)?;
        let name = data.name.trim().to_string();

        let mut tx = self.pool.begin().await?;
        if job::find_by_name(&mut *tx, &name).await?.is_some() {
            warn!("Job name already taken");
            return Err(name_exists(&name).into());
        }

        let mut created = Job {
            id: None,
            name,
            remark: data.remark,
        };
        job::insert(&mut *tx, &mut created).await?;
        tx.commit().await?;

        info!(id = ?created.id, "Job created");
        Ok(created)
    }

    /// Renaming to the job's own current name is allowed
    #[instrument(skip(self, data), fields(id = ?data.id, name = %data.name))]
    pub async fn update(&self, data: Job) -> ServiceResult<Job> {
        let id = data.id.ok_or_else(|| AppError::required("id"))?;
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&data.remark, "remark", MAX_REMARK_LEN)?;
        let name = data.name.trim().to_string();

        let mut tx = self.pool.begin().await?;
        if job::find_by_id(&mut *tx, id).await?.is_none() {
            warn!("Job to update does not exist");
            return Err(not_found(id).into());
        }
        if let Some(holder) = job::find_by_name(&mut *tx, &name).await?
            && holder.id != Some(id)
        {
            warn!(holder = ?holder.id, "Job name held by another job");
            return Err(name_exists(&name).into());
        }

        job::update(&mut *tx, id, Some(&name), data.remark.as_deref()).await?;
        let updated = job::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        tx.commit().await?;

        info!("Job updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await?;
        if job::find_by_id(&mut *tx, id).await?.is_none() {
            warn!("Job to delete does not exist");
            return Err(not_found(id).into());
        }

        let employees = employee::count_by_job_id(&mut *tx, id).await?;
        if employees > 0 {
            warn!(employees, "Job still has employees");
            return Err(AppError::with_message(
                ErrorCode::JobHasEmployees,
                format!("Job {id} still has {employees} employee(s)"),
            )
            .with_detail("id", id)
            .with_detail("employees", employees)
            .into());
        }

        job::delete_by_id(&mut *tx, id).await?;
        tx.commit().await?;

        info!("Job deleted");
        Ok(())
    }
}
