//! Employee Service
//!
//! Resolves department and job references before every write. Creation is
//! strict (both associations must resolve); update is lenient (anything that
//! does not name a record by id clears the association). See
//! [`shared::models::reference`] for the exact table.

use shared::error::{AppError, ErrorCode};
use shared::models::{
    Department, Employee, EmployeeCreate, EmployeeCriteria, EmployeeUpdate, Job, Reference,
    ReferenceError,
};
use shared::util::{non_blank, now_millis};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, instrument, warn};

use super::ServiceResult;
use crate::db::repository::{RepoResult, department, employee, job};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_REMARK_LEN, MAX_SHORT_TEXT_LEN,
    validate_optional_text, validate_required_text,
};

fn not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::EmployeeNotFound,
        format!("Employee {id} does not exist"),
    )
    .with_detail("id", id)
}

fn department_error(err: ReferenceError) -> AppError {
    match err {
        ReferenceError::Unresolved(id) => AppError::with_message(
            ErrorCode::DepartmentNotFound,
            format!("Department {id} does not exist"),
        )
        .with_detail("dept_id", id),
        ReferenceError::Missing => AppError::new(ErrorCode::DepartmentRequired),
    }
}

fn job_error(err: ReferenceError) -> AppError {
    match err {
        ReferenceError::Unresolved(id) => {
            AppError::with_message(ErrorCode::JobNotFound, format!("Job {id} does not exist"))
                .with_detail("job_id", id)
        }
        ReferenceError::Missing => AppError::new(ErrorCode::JobRequired),
    }
}

async fn fetch_department(
    conn: &mut SqliteConnection,
    reference: &Reference<Department>,
) -> RepoResult<Option<Department>> {
    match reference.id_to_fetch() {
        Some(id) => department::find_by_id(conn, id).await,
        None => Ok(None),
    }
}

async fn fetch_job(conn: &mut SqliteConnection, reference: &Reference<Job>) -> RepoResult<Option<Job>> {
    match reference.id_to_fetch() {
        Some(id) => job::find_by_id(conn, id).await,
        None => Ok(None),
    }
}

fn validate_lengths(fields: &[(&Option<String>, &str, usize)]) -> Result<(), AppError> {
    fields
        .iter()
        .try_for_each(|(value, field, max_len)| validate_optional_text(value, field, *max_len))
}

fn validate_create(data: &EmployeeCreate) -> Result<(), AppError> {
    if data.name.trim().is_empty() {
        return Err(AppError::new(ErrorCode::EmployeeNameRequired));
    }
    if data.card_id.trim().is_empty() {
        return Err(AppError::new(ErrorCode::EmployeeCardIdRequired));
    }
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&data.card_id, "card_id", MAX_SHORT_TEXT_LEN)?;
    validate_lengths(&[
        (&data.address, "address", MAX_ADDRESS_LEN),
        (&data.post_code, "post_code", MAX_SHORT_TEXT_LEN),
        (&data.tel, "tel", MAX_SHORT_TEXT_LEN),
        (&data.phone, "phone", MAX_SHORT_TEXT_LEN),
        (&data.qq, "qq", MAX_SHORT_TEXT_LEN),
        (&data.email, "email", MAX_EMAIL_LEN),
        (&data.party, "party", MAX_SHORT_TEXT_LEN),
        (&data.race, "race", MAX_SHORT_TEXT_LEN),
        (&data.education, "education", MAX_SHORT_TEXT_LEN),
        (&data.speciality, "speciality", MAX_REMARK_LEN),
        (&data.hobby, "hobby", MAX_REMARK_LEN),
        (&data.remark, "remark", MAX_REMARK_LEN),
    ])
}

/// Name and card id may be omitted on update, but not blanked
fn validate_update(data: &EmployeeUpdate) -> Result<(), AppError> {
    if let Some(name) = &data.name {
        if name.trim().is_empty() {
            return Err(AppError::new(ErrorCode::EmployeeNameRequired));
        }
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(card_id) = &data.card_id {
        if card_id.trim().is_empty() {
            return Err(AppError::new(ErrorCode::EmployeeCardIdRequired));
        }
        validate_required_text(card_id, "card_id", MAX_SHORT_TEXT_LEN)?;
    }
    validate_lengths(&[
        (&data.address, "address", MAX_ADDRESS_LEN),
        (&data.post_code, "post_code", MAX_SHORT_TEXT_LEN),
        (&data.tel, "tel", MAX_SHORT_TEXT_LEN),
        (&data.phone, "phone", MAX_SHORT_TEXT_LEN),
        (&data.qq, "qq", MAX_SHORT_TEXT_LEN),
        (&data.email, "email", MAX_EMAIL_LEN),
        (&data.party, "party", MAX_SHORT_TEXT_LEN),
        (&data.race, "race", MAX_SHORT_TEXT_LEN),
        (&data.education, "education", MAX_SHORT_TEXT_LEN),
        (&data.speciality, "speciality", MAX_REMARK_LEN),
        (&data.hobby, "hobby", MAX_REMARK_LEN),
        (&data.remark, "remark", MAX_REMARK_LEN),
    ])
}

#[derive(Clone)]
pub struct EmployeeService {
    pool: SqlitePool,
}

impl EmployeeService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self))]
    pub async fn list_all_with_details(&self) -> ServiceResult<Vec<Employee>> {
        Ok(employee::find_all_with_details(&self.pool).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id_with_details(&self, id: i64) -> ServiceResult<Option<Employee>> {
        Ok(employee::find_by_id_with_details(&self.pool, id).await?)
    }

    #[instrument(skip(self, data), fields(name = %data.name))]
    pub async fn add(&self, mut data: EmployeeCreate) -> ServiceResult<Employee> {
        validate_create(&data)?;

        let mut tx = self.pool.begin().await?;

        let dept_ref = std::mem::take(&mut data.department);
        let fetched = fetch_department(&mut tx, &dept_ref).await?;
        let dept = dept_ref.resolve_for_create(fetched).map_err(|e| {
            warn!(error = %e, "Department reference rejected");
            department_error(e)
        })?;

        let job_ref = std::mem::take(&mut data.job);
        let fetched = fetch_job(&mut tx, &job_ref).await?;
        let assigned_job = job_ref.resolve_for_create(fetched).map_err(|e| {
            warn!(error = %e, "Job reference rejected");
            job_error(e)
        })?;

        let mut created = data.into_employee(dept, assigned_job, now_millis());
        employee::insert(&mut *tx, &mut created).await?;
        let id = created
            .id
            .ok_or_else(|| AppError::internal("Employee id was not assigned"))?;
        let stored = employee::find_by_id_with_details(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        tx.commit().await?;

        info!(id, "Employee created");
        Ok(stored)
    }

    #[instrument(skip(self, data), fields(id = ?data.id))]
    pub async fn update(&self, mut data: EmployeeUpdate) -> ServiceResult<Employee> {
        let id = data.id.ok_or_else(|| AppError::required("id"))?;
        validate_update(&data)?;
        data.name = non_blank(data.name.as_deref());
        data.card_id = non_blank(data.card_id.as_deref());

        let mut tx = self.pool.begin().await?;
        if employee::find_by_id_with_details(&mut *tx, id).await?.is_none() {
            warn!("Employee to update does not exist");
            return Err(not_found(id).into());
        }

        let dept_ref = std::mem::take(&mut data.department);
        let fetched = fetch_department(&mut tx, &dept_ref).await?;
        let dept_change = dept_ref.resolve_for_update(fetched).map_err(|e| {
            warn!(error = %e, "Department reference rejected");
            department_error(e)
        })?;

        let job_ref = std::mem::take(&mut data.job);
        let fetched = fetch_job(&mut tx, &job_ref).await?;
        let job_change = job_ref.resolve_for_update(fetched).map_err(|e| {
            warn!(error = %e, "Job reference rejected");
            job_error(e)
        })?;
        debug!(?dept_change, ?job_change, "References resolved");

        employee::update(&mut *tx, id, &data, dept_change, job_change).await?;
        let stored = employee::find_by_id_with_details(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        tx.commit().await?;

        info!("Employee updated");
        Ok(stored)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await?;
        if employee::find_by_id_with_details(&mut *tx, id).await?.is_none() {
            warn!("Employee to delete does not exist");
            return Err(not_found(id).into());
        }
        employee::delete_by_id(&mut *tx, id).await?;
        tx.commit().await?;

        info!("Employee deleted");
        Ok(())
    }

    /// Empty criteria (after trimming) list everyone
    #[instrument(skip(self))]
    pub async fn find_by_criteria(&self, criteria: EmployeeCriteria) -> ServiceResult<Vec<Employee>> {
        let criteria = criteria.normalized();
        if criteria.is_empty() {
            return self.list_all_with_details().await;
        }
        Ok(employee::find_by_criteria(&self.pool, &criteria).await?)
    }

    #[instrument(skip(self))]
    pub async fn has_employees_in_department(&self, dept_id: i64) -> ServiceResult<bool> {
        Ok(employee::count_by_dept_id(&self.pool, dept_id).await? > 0)
    }

    #[instrument(skip(self))]
    pub async fn has_employees_in_job(&self, job_id: i64) -> ServiceResult<bool> {
        Ok(employee::count_by_job_id(&self.pool, job_id).await? > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::services::{DepartmentService, JobService, ServiceError};
    use shared::models::{DepartmentCreate, JobCreate, Sex};

    struct Fixture {
        departments: DepartmentService,
        jobs: JobService,
        employees: EmployeeService,
        dept: Department,
        job: Job,
    }

    async fn fixture() -> Fixture {
        let pool = DbService::in_memory().await.unwrap().pool;
        let departments = DepartmentService::new(pool.clone());
        let jobs = JobService::new(pool.clone());
        let employees = EmployeeService::new(pool);

        let dept = departments
            .add(DepartmentCreate {
                name: "研发部".to_string(),
                remark: None,
            })
            .await
            .unwrap();
        let job = jobs
            .add(JobCreate {
                name: "工程师".to_string(),
                remark: None,
            })
            .await
            .unwrap();

        Fixture {
            departments,
            jobs,
            employees,
            dept,
            job,
        }
    }

    fn create(name: &str, fx: &Fixture) -> EmployeeCreate {
        EmployeeCreate {
            name: name.to_string(),
            card_id: "110101199001011234".to_string(),
            phone: Some("13800138000".to_string()),
            sex: Some(Sex::Male),
            department: Reference::ById(fx.dept.id.unwrap()),
            job: Reference::ById(fx.job.id.unwrap()),
            ..Default::default()
        }
    }

    fn code(err: ServiceError) -> ErrorCode {
        match err {
            ServiceError::App(e) => e.code,
            ServiceError::Repo(e) => panic!("unexpected repo error: {e}"),
        }
    }

    #[tokio::test]
    async fn test_add_resolves_references_and_stamps() {
        let fx = fixture().await;
        let emp = fx.employees.add(create("张三", &fx)).await.unwrap();

        assert!(emp.id.is_some());
        assert!(emp.created_at.is_some());
        assert_eq!(emp.department, Some(fx.dept.clone()));
        assert_eq!(emp.job, Some(fx.job.clone()));

        let fetched = fx
            .employees
            .get_by_id_with_details(emp.id.unwrap())
            .await
            .unwrap();
        assert_eq!(fetched, Some(emp));
    }

    #[tokio::test]
    async fn test_add_requires_name_and_card_id() {
        let fx = fixture().await;

        let mut data = create("  ", &fx);
        assert_eq!(
            code(fx.employees.add(data.clone()).await.unwrap_err()),
            ErrorCode::EmployeeNameRequired
        );

        data.name = "张三".to_string();
        data.card_id = String::new();
        assert_eq!(
            code(fx.employees.add(data).await.unwrap_err()),
            ErrorCode::EmployeeCardIdRequired
        );
    }

    #[tokio::test]
    async fn test_add_with_unknown_department_persists_nothing() {
        let fx = fixture().await;
        let mut data = create("张三", &fx);
        data.department = Reference::ById(999);

        let err = fx.employees.add(data).await.unwrap_err();
        assert_eq!(code(err), ErrorCode::DepartmentNotFound);
        assert!(fx.employees.list_all_with_details().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_without_job_fails() {
        let fx = fixture().await;
        let mut data = create("张三", &fx);
        data.job = Reference::Absent;
        assert_eq!(
            code(fx.employees.add(data).await.unwrap_err()),
            ErrorCode::JobRequired
        );

        let mut data = create("张三", &fx);
        data.department = Reference::Embedded(Department {
            id: None,
            name: "临时部门".to_string(),
            remark: None,
        });
        assert_eq!(
            code(fx.employees.add(data).await.unwrap_err()),
            ErrorCode::DepartmentRequired
        );
    }

    #[tokio::test]
    async fn test_add_accepts_embedded_department_with_id() {
        let fx = fixture().await;
        let mut data = create("张三", &fx);
        data.department = Reference::Embedded(fx.dept.clone());

        let emp = fx.employees.add(data).await.unwrap();
        assert_eq!(emp.department, Some(fx.dept.clone()));
    }

    #[tokio::test]
    async fn test_update_without_department_clears_it() {
        let fx = fixture().await;
        let emp = fx.employees.add(create("王五", &fx)).await.unwrap();

        let updated = fx
            .employees
            .update(EmployeeUpdate {
                id: emp.id,
                phone: Some("13900139000".to_string()),
                job: Reference::ById(fx.job.id.unwrap()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.phone.as_deref(), Some("13900139000"));
        assert_eq!(updated.name, "王五");
        assert!(updated.department.is_none());
        assert_eq!(updated.job, Some(fx.job.clone()));
    }

    #[tokio::test]
    async fn test_update_with_unknown_job_fails() {
        let fx = fixture().await;
        let emp = fx.employees.add(create("王五", &fx)).await.unwrap();

        let err = fx
            .employees
            .update(EmployeeUpdate {
                id: emp.id,
                name: Some("王五五".to_string()),
                job: Reference::ById(404),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::JobNotFound);

        // nothing was written
        let stored = fx
            .employees
            .get_by_id_with_details(emp.id.unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, emp);
    }

    #[tokio::test]
    async fn test_update_requires_existing_employee() {
        let fx = fixture().await;
        assert_eq!(
            code(fx.employees.update(EmployeeUpdate::default()).await.unwrap_err()),
            ErrorCode::RequiredField
        );

        let err = fx
            .employees
            .update(EmployeeUpdate {
                id: Some(404),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::EmployeeNotFound);
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name() {
        let fx = fixture().await;
        let emp = fx.employees.add(create("王五", &fx)).await.unwrap();

        let err = fx
            .employees
            .update(EmployeeUpdate {
                id: emp.id,
                name: Some("  ".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::EmployeeNameRequired);
    }

    #[tokio::test]
    async fn test_delete() {
        let fx = fixture().await;
        let emp = fx.employees.add(create("赵六", &fx)).await.unwrap();
        let id = emp.id.unwrap();

        fx.employees.delete(id).await.unwrap();
        assert!(fx.employees.get_by_id_with_details(id).await.unwrap().is_none());
        assert_eq!(
            code(fx.employees.delete(id).await.unwrap_err()),
            ErrorCode::EmployeeNotFound
        );
    }

    #[tokio::test]
    async fn test_find_by_criteria() {
        let fx = fixture().await;
        let first = fx.employees.add(create("测试员工甲", &fx)).await.unwrap();
        fx.employees.add(create("李四", &fx)).await.unwrap();

        let found = fx
            .employees
            .find_by_criteria(EmployeeCriteria {
                name: Some("测试员工".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found, vec![first]);
    }

    #[tokio::test]
    async fn test_empty_criteria_lists_all() {
        let fx = fixture().await;
        fx.employees.add(create("测试员工甲", &fx)).await.unwrap();
        fx.employees.add(create("李四", &fx)).await.unwrap();

        let all = fx.employees.list_all_with_details().await.unwrap();
        let blank = EmployeeCriteria {
            name: Some("   ".to_string()),
            phone: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(fx.employees.find_by_criteria(blank).await.unwrap(), all);
        assert_eq!(
            fx.employees
                .find_by_criteria(EmployeeCriteria::default())
                .await
                .unwrap(),
            all
        );
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_dependents_block_delete() {
        let fx = fixture().await;
        let dept_id = fx.dept.id.unwrap();
        let job_id = fx.job.id.unwrap();
        assert!(!fx.employees.has_employees_in_department(dept_id).await.unwrap());

        let emp = fx.employees.add(create("孙七", &fx)).await.unwrap();
        assert!(fx.employees.has_employees_in_department(dept_id).await.unwrap());
        assert!(fx.employees.has_employees_in_job(job_id).await.unwrap());

        assert_eq!(
            code(fx.departments.delete(dept_id).await.unwrap_err()),
            ErrorCode::DepartmentHasEmployees
        );
        assert_eq!(
            code(fx.jobs.delete(job_id).await.unwrap_err()),
            ErrorCode::JobHasEmployees
        );

        fx.employees.delete(emp.id.unwrap()).await.unwrap();
        fx.departments.delete(dept_id).await.unwrap();
        fx.jobs.delete(job_id).await.unwrap();
    }
}
