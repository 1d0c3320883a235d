//! Employee API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Employee, EmployeeCreate, EmployeeCriteria, EmployeeUpdate, Sex};
use shared::util::non_blank;

use crate::core::ServerState;
use crate::server::extractor::{ApiJson, ApiPath, ApiQuery};

/// Raw search form. Every field arrives as text; blank means "not filtered".
#[derive(Debug, Default, Deserialize)]
pub struct EmployeeQuery {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub card_id: Option<String>,
    pub sex: Option<String>,
    pub dept_id: Option<String>,
    pub job_id: Option<String>,
}

fn parse_number<T: std::str::FromStr>(value: Option<String>, field: &str) -> AppResult<Option<T>> {
    non_blank(value.as_deref())
        .map(|v| {
            v.parse::<T>().map_err(|_| {
                AppError::with_message(ErrorCode::InvalidFormat, format!("{field} must be a number"))
                    .with_detail("field", field)
            })
        })
        .transpose()
}

impl EmployeeQuery {
    pub fn into_criteria(self) -> AppResult<EmployeeCriteria> {
        let sex = parse_number::<i32>(self.sex, "sex")?
            .map(|code| {
                Sex::try_from(code).map_err(|e| {
                    AppError::with_message(ErrorCode::ValueOutOfRange, e.to_string())
                        .with_detail("field", "sex")
                })
            })
            .transpose()?;

        Ok(EmployeeCriteria {
            name: self.name,
            phone: self.phone,
            card_id: self.card_id,
            sex,
            dept_id: parse_number(self.dept_id, "dept_id")?,
            job_id: parse_number(self.job_id, "job_id")?,
        }
        .normalized())
    }
}

/// GET /api/employees?name=&phone=&card_id=&sex=&dept_id=&job_id= - 查询员工
pub async fn search(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<EmployeeQuery>,
) -> AppResult<Json<Vec<Employee>>> {
    let criteria = query.into_criteria()?;
    let employees = state.employees.find_by_criteria(criteria).await?;
    Ok(Json(employees))
}

/// GET /api/employees/:id - 获取员工详情
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Employee>> {
    let employee = state
        .employees
        .get_by_id_with_details(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id))?;
    Ok(Json(employee))
}

/// POST /api/employees - 新增员工
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<EmployeeCreate>,
) -> AppResult<Json<Employee>> {
    let employee = state.employees.add(payload).await?;
    Ok(Json(employee))
}

/// PUT /api/employees/:id - 更新员工
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(mut payload): ApiJson<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    payload.id = Some(id);
    let employee = state.employees.update(payload).await?;
    Ok(Json(employee))
}

/// DELETE /api/employees/:id - 删除员工
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<bool>> {
    state.employees.delete(id).await?;
    Ok(Json(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query_is_empty_criteria() {
        let query = EmployeeQuery {
            name: Some(" ".into()),
            sex: Some(String::new()),
            dept_id: Some("  ".into()),
            ..Default::default()
        };
        assert!(query.into_criteria().unwrap().is_empty());
    }

    #[test]
    fn test_query_parsing() {
        let query = EmployeeQuery {
            name: Some(" 测试员工 ".into()),
            sex: Some("2".into()),
            dept_id: Some(" 3 ".into()),
            ..Default::default()
        };
        let criteria = query.into_criteria().unwrap();
        assert_eq!(criteria.name.as_deref(), Some("测试员工"));
        assert_eq!(criteria.sex, Some(Sex::Female));
        assert_eq!(criteria.dept_id, Some(3));
        assert_eq!(criteria.job_id, None);
    }

    #[test]
    fn test_invalid_query_values() {
        let query = EmployeeQuery {
            sex: Some("5".into()),
            ..Default::default()
        };
        assert_eq!(
            query.into_criteria().unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );

        let query = EmployeeQuery {
            job_id: Some("abc".into()),
            ..Default::default()
        };
        assert_eq!(query.into_criteria().unwrap_err().code, ErrorCode::InvalidFormat);
    }
}
