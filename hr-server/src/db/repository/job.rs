//! Job Repository

use super::RepoResult;
use shared::models::Job;
use sqlx::{Executor, Sqlite};

pub async fn find_all<'e, E>(db: E) -> RepoResult<Vec<Job>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let jobs =
        sqlx::query_as::<_, Job>("SELECT id, name, remark FROM job ORDER BY id")
            .fetch_all(db)
            .await?;
    Ok(jobs)
}

pub async fn find_by_id<'e, E>(db: E, id: i64) -> RepoResult<Option<Job>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let job =
        sqlx::query_as::<_, Job>("SELECT id, name, remark FROM job WHERE id = ?")
            .bind(id)
            .fetch_optional(db)
            .await?;
    Ok(job)
}

/// Exact match on the stored (trimmed) name
pub async fn find_by_name<'e, E>(db: E, name: &str) -> RepoResult<Option<Job>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let job = sqlx::query_as::<_, Job>(
        "SELECT id, name, remark FROM job WHERE name = ? LIMIT 1",
    )
    .bind(name)
    .fetch_optional(db)
    .await?;
    Ok(job)
}

/// Insert and write the assigned id back into `job`
pub async fn insert<'e, E>(db: E, job: &mut Job) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO job (name, remark) VALUES (?, ?)")
        .bind(&job.name)
        .bind(&job.remark)
        .execute(db)
        .await?;
    job.id = Some(result.last_insert_rowid());
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
        "UPDATE job SET name = COALESCE(?1, name), remark = COALESCE(?2, remark) WHERE id = ?3",
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
    let result = sqlx::query("DELETE FROM job WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
