//! Department Service
//!
//! Names are unique after trimming. A department can only be deleted once no
//! employee refers to it.

use shared::error::{AppError, ErrorCode};
use shared::models::{Department, DepartmentCreate};
use shared::util::non_blank;
use sqlx::SqlitePool;
use tracing::{info, instrument, warn};

use super::ServiceResult;
use crate::db::repository::{department, employee};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_REMARK_LEN, validate_optional_text, validate_required_text,
};

fn not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::DepartmentNotFound,
        format!("Department {id} does not exist"),
    )
    .with_detail("id", id)
}

fn name_exists(name: &str) -> AppError {
    AppError::with_message(
        ErrorCode::DepartmentNameExists,
        format!("Department '{name}' already exists"),
    )
    .with_detail("name", name)
}

#[derive(Clone)]
pub struct DepartmentService {
    pool: SqlitePool,
}

impl DepartmentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> ServiceResult<Vec<Department>> {
        Ok(department::find_all(&self.pool).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Option<Department>> {
        Ok(department::find_by_id(&self.pool, id).await?)
    }

    /// Blank names never reach the store
    #[instrument(skip(self))]
    pub async fn get_by_name(&self, name: &str) -> ServiceResult<Option<Department>> {
        let Some(name) = non_blank(Some(name)) else {
            return Ok(None);
        };
        Ok(department::find_by_name(&self.pool, &name).await?)
    }

    #[instrument(skip(self, data), fields(name = %data.name))]
    pub async fn add(&self, data: DepartmentCreate) -> ServiceResult<Department> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&data.remark, "remark", MAX_REMARK_LEN)?;
        let name = data.name.trim().to_string();

        let mut tx = self.pool.begin().await?;
        if department::find_by_name(&mut *tx, &name).await?.is_some() {
            warn!("Department name already taken");
            return Err(name_exists(&name).into());
        }

        let mut created = Department {
            id: None,
            name,
            remark: data.remark,
        };
        department::insert(&mut *tx, &mut created).await?;
        tx.commit().await?;

        info!(id = ?created.id, "Department created");
        Ok(created)
    }

    /// Renaming to the department's own current name is allowed
    #[instrument(skip(self, data), fields(id = ?data.id, name = %data.name))]
    pub async fn update(&self, data: Department) -> ServiceResult<Department> {
        let id = data.id.ok_or_else(|| AppError::required("id"))?;
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&data.remark, "remark", MAX_REMARK_LEN)?;
        let name = data.name.trim().to_string();

        let mut tx = self.pool.begin().await?;
        if department::find_by_id(&mut *tx, id).await?.is_none() {
            warn!("Department to update does not exist");
            return Err(not_found(id).into());
        }
        if let Some(holder) = department::find_by_name(&mut *tx, &name).await?
            && holder.id != Some(id)
        {
            warn!(holder = ?holder.id, "Department name held by another department");
            return Err(name_exists(&name).into());
        }

        department::update(&mut *tx, id, Some(&name), data.remark.as_deref()).await?;
        let updated = department::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        tx.commit().await?;

        info!("Department updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await?;
        if department::find_by_id(&mut *tx, id).await?.is_none() {
            warn!("Department to delete does not exist");
            return Err(not_found(id).into());
        }

        let employees = employee::count_by_dept_id(&mut *tx, id).await?;
        if employees > 0 {
            warn!(employees, "Department still has employees");
            return Err(AppError::with_message(
                ErrorCode::DepartmentHasEmployees,
                format!("Department {id} still has {employees} employee(s)"),
            )
            .with_detail("id", id)
            .with_detail("employees", employees)
            .into());
        }

        department::delete_by_id(&mut *tx, id).await?;
        tx.commit().await?;

        info!("Department deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::services::ServiceError;

    async fn service() -> DepartmentService {
        let db = DbService::in_memory().await.unwrap();
        DepartmentService::new(db.pool)
    }

    fn create(name: &str) -> DepartmentCreate {
        DepartmentCreate {
            name: name.to_string(),
            remark: None,
        }
    }

    fn code(err: ServiceError) -> ErrorCode {
        match err {
            ServiceError::App(e) => e.code,
            ServiceError::Repo(e) => panic!("unexpected repo error: {e}"),
        }
    }

    #[tokio::test]
    async fn test_add_trims_and_assigns_id() {
        let svc = service().await;
        let dept = svc.add(create("  研发部  ")).await.unwrap();

        assert!(dept.id.is_some());
        assert_eq!(dept.name, "研发部");
        assert_eq!(svc.get_by_id(dept.id.unwrap()).await.unwrap(), Some(dept));
    }

    #[tokio::test]
    async fn test_add_duplicate_trimmed_name_fails() {
        let svc = service().await;
        svc.add(create("研发部")).await.unwrap();

        let err = svc.add(create(" 研发部 ")).await.unwrap_err();
        assert_eq!(code(err), ErrorCode::DepartmentNameExists);
        assert_eq!(svc.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_blank_name_fails_without_store() {
        let svc = service().await;
        // A closed pool would turn any store access into a repo error
        svc.pool.close().await;

        let err = svc.add(create("   ")).await.unwrap_err();
        assert_eq!(code(err), ErrorCode::RequiredField);
    }

    #[tokio::test]
    async fn test_get_by_name() {
        let svc = service().await;
        let dept = svc.add(create("财务部")).await.unwrap();

        assert_eq!(svc.get_by_name(" 财务部 ").await.unwrap(), Some(dept));
        assert_eq!(svc.get_by_name("财务").await.unwrap(), None);

        svc.pool.close().await;
        assert_eq!(svc.get_by_name("  ").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_to_other_name_fails() {
        let svc = service().await;
        svc.add(create("研发部")).await.unwrap();
        let mut sales = svc.add(create("销售部")).await.unwrap();

        sales.name = "研发部".to_string();
        let err = svc.update(sales).await.unwrap_err();
        assert_eq!(code(err), ErrorCode::DepartmentNameExists);
    }

    #[tokio::test]
    async fn test_update_to_own_name_succeeds() {
        let svc = service().await;
        let mut dept = svc.add(create("研发部")).await.unwrap();

        dept.remark = Some("核心部门".to_string());
        let updated = svc.update(dept.clone()).await.unwrap();
        assert_eq!(updated, dept);
    }

    #[tokio::test]
    async fn test_update_requires_existing_id() {
        let svc = service().await;
        let missing_id = Department {
            id: None,
            name: "研发部".to_string(),
            remark: None,
        };
        assert_eq!(
            code(svc.update(missing_id).await.unwrap_err()),
            ErrorCode::RequiredField
        );

        let unknown = Department {
            id: Some(404),
            name: "研发部".to_string(),
            remark: None,
        };
        assert_eq!(
            code(svc.update(unknown).await.unwrap_err()),
            ErrorCode::DepartmentNotFound
        );
    }

    #[tokio::test]
    async fn test_update_blank_name_fails() {
        let svc = service().await;
        let mut dept = svc.add(create("研发部")).await.unwrap();
        dept.name = " ".to_string();
        assert_eq!(
            code(svc.update(dept).await.unwrap_err()),
            ErrorCode::RequiredField
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let svc = service().await;
        let dept = svc.add(create("后勤部")).await.unwrap();
        let id = dept.id.unwrap();

        svc.delete(id).await.unwrap();
        assert!(svc.get_by_id(id).await.unwrap().is_none());

        let err = svc.delete(id).await.unwrap_err();
        assert_eq!(code(err), ErrorCode::DepartmentNotFound);
    }
}
