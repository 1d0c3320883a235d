//! Employee Repository
//!
//! Detail reads join department and job so every returned [`Employee`]
//! carries its associations.

use super::RepoResult;
use chrono::NaiveDate;
use shared::models::{
    Department, Employee, EmployeeCriteria, EmployeeUpdate, Job, ReferenceChange, Sex,
};
use sqlx::{Executor, QueryBuilder, Sqlite};

const SELECT_WITH_DETAILS: &str = "SELECT e.id, e.name, e.card_id, e.address, e.post_code, e.tel, e.phone, e.qq, e.email, e.sex, e.party, e.birth_date, e.race, e.education, e.speciality, e.hobby, e.remark, e.created_at, e.dept_id, d.name AS dept_name, d.remark AS dept_remark, e.job_id, j.name AS job_name, j.remark AS job_remark FROM employee e LEFT JOIN department d ON d.id = e.dept_id LEFT JOIN job j ON j.id = e.job_id";

/// Flat row of the detail join
#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    name: String,
    card_id: String,
    address: Option<String>,
    post_code: Option<String>,
    tel: Option<String>,
    phone: Option<String>,
    qq: Option<String>,
    email: Option<String>,
    sex: Option<i32>,
    party: Option<String>,
    birth_date: Option<NaiveDate>,
    race: Option<String>,
    education: Option<String>,
    speciality: Option<String>,
    hobby: Option<String>,
    remark: Option<String>,
    created_at: i64,
    dept_id: Option<i64>,
    dept_name: Option<String>,
    dept_remark: Option<String>,
    job_id: Option<i64>,
    job_name: Option<String>,
    job_remark: Option<String>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        let department = match (row.dept_id, row.dept_name) {
            (Some(id), Some(name)) => Some(Department {
                id: Some(id),
                name,
                remark: row.dept_remark,
            }),
            _ => None,
        };
        let job = match (row.job_id, row.job_name) {
            (Some(id), Some(name)) => Some(Job {
                id: Some(id),
                name,
                remark: row.job_remark,
            }),
            _ => None,
        };
        Employee {
            id: Some(row.id),
            name: row.name,
            card_id: row.card_id,
            address: row.address,
            post_code: row.post_code,
            tel: row.tel,
            phone: row.phone,
            qq: row.qq,
            email: row.email,
            // CHECK constraint keeps this in 1..=2
            sex: row.sex.and_then(|code| Sex::try_from(code).ok()),
            party: row.party,
            birth_date: row.birth_date,
            race: row.race,
            education: row.education,
            speciality: row.speciality,
            hobby: row.hobby,
            remark: row.remark,
            created_at: Some(row.created_at),
            department,
            job,
        }
    }
}

/// Escape LIKE wildcards so user input matches literally
fn contains_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// `(apply, value)` binding for a `CASE WHEN ? THEN ? ELSE col END` column
fn change_binding(change: ReferenceChange) -> (bool, Option<i64>) {
    match change {
        ReferenceChange::Keep => (false, None),
        ReferenceChange::Set(id) => (true, Some(id)),
        ReferenceChange::Clear => (true, None),
    }
}

pub async fn find_all_with_details<'e, E>(db: E) -> RepoResult<Vec<Employee>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, EmployeeRow>(&format!("{SELECT_WITH_DETAILS} ORDER BY e.id"))
        .fetch_all(db)
        .await?;
    Ok(rows.into_iter().map(Employee::from).collect())
}

pub async fn find_by_id_with_details<'e, E>(db: E, id: i64) -> RepoResult<Option<Employee>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, EmployeeRow>(&format!("{SELECT_WITH_DETAILS} WHERE e.id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row.map(Employee::from))
}

/// Criteria are combined with AND; absent criteria do not filter
pub async fn find_by_criteria<'e, E>(db: E, criteria: &EmployeeCriteria) -> RepoResult<Vec<Employee>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let mut qb = QueryBuilder::<Sqlite>::new(SELECT_WITH_DETAILS);
    qb.push(" WHERE 1 = 1");
    if let Some(name) = &criteria.name {
        qb.push(" AND e.name LIKE ")
            .push_bind(contains_pattern(name))
            .push(" ESCAPE '\\'");
    }
    if let Some(phone) = &criteria.phone {
        qb.push(" AND e.phone LIKE ")
            .push_bind(contains_pattern(phone))
            .push(" ESCAPE '\\'");
    }
    if let Some(card_id) = &criteria.card_id {
        qb.push(" AND e.card_id = ").push_bind(card_id.clone());
    }
    if let Some(sex) = criteria.sex {
        qb.push(" AND e.sex = ").push_bind(sex.code());
    }
    if let Some(dept_id) = criteria.dept_id {
        qb.push(" AND e.dept_id = ").push_bind(dept_id);
    }
    if let Some(job_id) = criteria.job_id {
        qb.push(" AND e.job_id = ").push_bind(job_id);
    }
    qb.push(" ORDER BY e.id");

    let rows = qb.build_query_as::<EmployeeRow>().fetch_all(db).await?;
    Ok(rows.into_iter().map(Employee::from).collect())
}

/// Insert and write the assigned id back into `employee`.
///
/// Foreign keys are taken from the attached department and job.
pub async fn insert<'e, E>(db: E, employee: &mut Employee) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let created_at = *employee
        .created_at
        .get_or_insert_with(shared::util::now_millis);
    let dept_id = employee.department.as_ref().and_then(|d| d.id);
    let job_id = employee.job.as_ref().and_then(|j| j.id);

    let result = sqlx::query(
        "INSERT INTO employee (name, card_id, address, post_code, tel, phone, qq, email, sex, party, birth_date, race, education, speciality, hobby, remark, created_at, dept_id, job_id) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&employee.name)
    .bind(&employee.card_id)
    .bind(&employee.address)
    .bind(&employee.post_code)
    .bind(&employee.tel)
    .bind(&employee.phone)
    .bind(&employee.qq)
    .bind(&employee.email)
    .bind(employee.sex.map(Sex::code))
    .bind(&employee.party)
    .bind(employee.birth_date)
    .bind(&employee.race)
    .bind(&employee.education)
    .bind(&employee.speciality)
    .bind(&employee.hobby)
    .bind(&employee.remark)
    .bind(created_at)
    .bind(dept_id)
    .bind(job_id)
    .execute(db)
    .await?;

    employee.id = Some(result.last_insert_rowid());
    Ok(result.rows_affected())
}

/// Partial update.
///
/// Plain fields left as `None` keep their stored value. The foreign keys
/// follow `dept` and `job`; [`ReferenceChange::Keep`] leaves them untouched.
pub async fn update<'e, E>(
    db: E,
    id: i64,
    data: &EmployeeUpdate,
    dept: ReferenceChange,
    job: ReferenceChange,
) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let (set_dept, dept_id) = change_binding(dept);
    let (set_job, job_id) = change_binding(job);

    let result = sqlx::query(
        "UPDATE employee SET \
         name = COALESCE(?, name), \
         card_id = COALESCE(?, card_id), \
         address = COALESCE(?, address), \
         post_code = COALESCE(?, post_code), \
         tel = COALESCE(?, tel), \
         phone = COALESCE(?, phone), \
         qq = COALESCE(?, qq), \
         email = COALESCE(?, email), \
         sex = COALESCE(?, sex), \
         party = COALESCE(?, party), \
         birth_date = COALESCE(?, birth_date), \
         race = COALESCE(?, race), \
         education = COALESCE(?, education), \
         speciality = COALESCE(?, speciality), \
         hobby = COALESCE(?, hobby), \
         remark = COALESCE(?, remark), \
         dept_id = CASE WHEN ? THEN ? ELSE dept_id END, \
         job_id = CASE WHEN ? THEN ? ELSE job_id END \
         WHERE id = ?",
    )
    .bind(&data.name)
    .bind(&data.card_id)
    .bind(&data.address)
    .bind(&data.post_code)
    .bind(&data.tel)
    .bind(&data.phone)
    .bind(&data.qq)
    .bind(&data.email)
    .bind(data.sex.map(Sex::code))
    .bind(&data.party)
    .bind(data.birth_date)
    .bind(&data.race)
    .bind(&data.education)
    .bind(&data.speciality)
    .bind(&data.hobby)
    .bind(&data.remark)
    .bind(set_dept)
    .bind(dept_id)
    .bind(set_job)
    .bind(job_id)
    .bind(id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete_by_id<'e, E>(db: E, id: i64) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count_by_dept_id<'e, E>(db: E, dept_id: i64) -> RepoResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employee WHERE dept_id = ?")
        .bind(dept_id)
        .fetch_one(db)
        .await?;
    Ok(count)
}

pub async fn count_by_job_id<'e, E>(db: E, job_id: i64) -> RepoResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employee WHERE job_id = ?")
        .bind(job_id)
        .fetch_one(db)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use crate::db::repository::{RepoError, department, job};
    use sqlx::SqlitePool;

    async fn seed(pool: &SqlitePool) -> (Department, Job) {
        let mut dept = Department {
            id: None,
            name: "研发部".to_string(),
            remark: None,
        };
        department::insert(pool, &mut dept).await.unwrap();
        let mut engineer = Job {
            id: None,
            name: "工程师".to_string(),
            remark: Some("后端".to_string()),
        };
        job::insert(pool, &mut engineer).await.unwrap();
        (dept, engineer)
    }

    fn employee(name: &str, dept: &Department, job: &Job) -> Employee {
        Employee {
            id: None,
            name: name.to_string(),
            card_id: format!("11010119900101{:04}", name.chars().count()),
            address: Some("北京市海淀区".to_string()),
            post_code: Some("100080".to_string()),
            tel: None,
            phone: Some("13800138000".to_string()),
            qq: None,
            email: Some("staff@example.com".to_string()),
            sex: Some(Sex::Female),
            party: None,
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1),
            race: Some("汉".to_string()),
            education: Some("本科".to_string()),
            speciality: None,
            hobby: None,
            remark: None,
            created_at: Some(1_700_000_000_000),
            department: Some(dept.clone()),
            job: Some(job.clone()),
        }
    }

    #[tokio::test]
    async fn test_insert_then_fetch_with_details() {
        let pool = test_pool().await;
        let (dept, engineer) = seed(&pool).await;
        let mut emp = employee("测试员工甲", &dept, &engineer);

        insert(&pool, &mut emp).await.unwrap();
        let id = emp.id.expect("id assigned");

        let found = find_by_id_with_details(&pool, id).await.unwrap().unwrap();
        assert_eq!(found, emp);
    }

    #[tokio::test]
    async fn test_insert_stamps_created_at() {
        let pool = test_pool().await;
        let (dept, engineer) = seed(&pool).await;
        let mut emp = employee("张三", &dept, &engineer);
        emp.created_at = None;

        insert(&pool, &mut emp).await.unwrap();
        assert!(emp.created_at.is_some());
    }

    #[tokio::test]
    async fn test_unknown_department_violates_foreign_key() {
        let pool = test_pool().await;
        let (mut dept, engineer) = seed(&pool).await;
        dept.id = Some(999);
        let mut emp = employee("张三", &dept, &engineer);

        let err = insert(&pool, &mut emp).await.unwrap_err();
        assert!(matches!(err, RepoError::ForeignKey(_)));
        assert!(find_all_with_details(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_department_in_use_is_restricted() {
        let pool = test_pool().await;
        let (dept, engineer) = seed(&pool).await;
        insert(&pool, &mut employee("张三", &dept, &engineer))
            .await
            .unwrap();

        let err = department::delete_by_id(&pool, dept.id.unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::ForeignKey(_)), "{err:?}");

        let err = job::delete_by_id(&pool, engineer.id.unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::ForeignKey(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_partial_update_phone_only() {
        let pool = test_pool().await;
        let (dept, engineer) = seed(&pool).await;
        let mut emp = employee("王五", &dept, &engineer);
        insert(&pool, &mut emp).await.unwrap();
        let id = emp.id.unwrap();

        let data = EmployeeUpdate {
            phone: Some("13900139000".to_string()),
            ..Default::default()
        };
        let rows = update(&pool, id, &data, ReferenceChange::Keep, ReferenceChange::Keep)
            .await
            .unwrap();
        assert_eq!(rows, 1);

        let found = find_by_id_with_details(&pool, id).await.unwrap().unwrap();
        assert_eq!(found.phone.as_deref(), Some("13900139000"));
        assert_eq!(found.name, "王五");
        assert_eq!(found.department, Some(dept));
        assert_eq!(found.job, Some(engineer));
        assert_eq!(found.email, emp.email);
    }

    #[tokio::test]
    async fn test_update_clears_and_sets_references() {
        let pool = test_pool().await;
        let (dept, engineer) = seed(&pool).await;
        let mut emp = employee("赵六", &dept, &engineer);
        insert(&pool, &mut emp).await.unwrap();
        let id = emp.id.unwrap();

        update(
            &pool,
            id,
            &EmployeeUpdate::default(),
            ReferenceChange::Clear,
            ReferenceChange::Keep,
        )
        .await
        .unwrap();
        let found = find_by_id_with_details(&pool, id).await.unwrap().unwrap();
        assert!(found.department.is_none());
        assert_eq!(found.job, Some(engineer.clone()));

        update(
            &pool,
            id,
            &EmployeeUpdate::default(),
            ReferenceChange::Set(dept.id.unwrap()),
            ReferenceChange::Clear,
        )
        .await
        .unwrap();
        let found = find_by_id_with_details(&pool, id).await.unwrap().unwrap();
        assert_eq!(found.department, Some(dept));
        assert!(found.job.is_none());
    }

    #[tokio::test]
    async fn test_find_by_criteria() {
        let pool = test_pool().await;
        let (dept, engineer) = seed(&pool).await;
        let mut first = employee("测试员工甲", &dept, &engineer);
        insert(&pool, &mut first).await.unwrap();
        let mut other = employee("李四", &dept, &engineer);
        other.sex = Some(Sex::Male);
        other.phone = Some("13700137000".to_string());
        insert(&pool, &mut other).await.unwrap();

        let by_name = EmployeeCriteria {
            name: Some("测试员工".to_string()),
            ..Default::default()
        };
        let found = find_by_criteria(&pool, &by_name).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, first.id);

        let by_sex_and_dept = EmployeeCriteria {
            sex: Some(Sex::Male),
            dept_id: dept.id,
            ..Default::default()
        };
        let found = find_by_criteria(&pool, &by_sex_and_dept).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "李四");

        let by_phone = EmployeeCriteria {
            phone: Some("0013".to_string()),
            ..Default::default()
        };
        assert_eq!(find_by_criteria(&pool, &by_phone).await.unwrap().len(), 2);

        let by_card = EmployeeCriteria {
            card_id: Some(first.card_id[..10].to_string()),
            ..Default::default()
        };
        assert!(find_by_criteria(&pool, &by_card).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_like_wildcards_match_literally() {
        let pool = test_pool().await;
        let (dept, engineer) = seed(&pool).await;
        insert(&pool, &mut employee("张三", &dept, &engineer))
            .await
            .unwrap();

        let criteria = EmployeeCriteria {
            name: Some("%".to_string()),
            ..Default::default()
        };
        assert!(find_by_criteria(&pool, &criteria).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_counts_and_delete() {
        let pool = test_pool().await;
        let (dept, engineer) = seed(&pool).await;
        let mut emp = employee("孙七", &dept, &engineer);
        insert(&pool, &mut emp).await.unwrap();

        assert_eq!(count_by_dept_id(&pool, dept.id.unwrap()).await.unwrap(), 1);
        assert_eq!(count_by_job_id(&pool, engineer.id.unwrap()).await.unwrap(), 1);
        assert_eq!(count_by_job_id(&pool, 999).await.unwrap(), 0);

        assert_eq!(delete_by_id(&pool, emp.id.unwrap()).await.unwrap(), 1);
        assert_eq!(count_by_dept_id(&pool, dept.id.unwrap()).await.unwrap(), 0);
    }
}
