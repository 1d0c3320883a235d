//! Department Repository

use super::RepoResult;
use shared::models::Department;
use sqlx::{Executor, Sqlite};

pub async fn find_all<'e, E>(db: E) -> RepoResult<Vec<Department>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let departments =
        sqlx::query_as::<_, Department>("SELECT id, name, remark FROM department ORDER BY id")
            .fetch_all(db)
            .await?;
    Ok(departments)
}

pub async fn find_by_id<'e, E>(db: E, id: i64) -> RepoResult<Option<Department>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let department =
        sqlx::query_as::<_, Department>("SELECT id, name, remark FROM department WHERE id = ?")
            .bind(id)
            .fetch_optional(db)
            .await?;
    Ok(department)
}

/// Exact match on the stored (trimmed) name
pub async fn find_by_name<'e, E>(db: E, name: &str) -> RepoResult<Option<Department>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let department = sqlx::query_as::<_, Department>(
        "SELECT id, name, remark FROM department WHERE name = ? LIMIT 1",
    )
    .bind(name)
    .fetch_optional(db)
    .await?;
    Ok(department)
}

/// Insert and write the assigned id back into `department`
pub async fn insert<'e, E>(db: E, department: &mut Department) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO department (name, remark) VALUES (?, ?)")
        .bind(&department.name)
        .bind(&department.remark)
        .execute(db)
        .await?;
    department.id = Some(result.last_insert_rowid());
    Ok(result.rows_affected())
}

/// Partial update: `None` keeps the stored value
pub async fn update<'e, E>(
    db: E,
    id: i64,
    name: Option<&str>,
    remark: Option<&str>,
) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "UPDATE department SET name = COALESCE(?1, name), remark = COALESCE(?2, remark) WHERE id = ?3",
    )
    .bind(name)
    .bind(remark)
    .bind(id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete_by_id<'e, E>(db: E, id: i64) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM department WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
