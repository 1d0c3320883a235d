//! Employee Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::reference::{Reference, null_as_absent};
use super::{Department, Job};
use crate::util::non_blank;

/// 性别 (stored and serialized as 1 = male, 2 = female)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Sex {
    Male = 1,
    Female = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid sex code: {0}")]
pub struct InvalidSex(pub i32);

impl Sex {
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for Sex {
    type Error = InvalidSex;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Male),
            2 => Ok(Self::Female),
            other => Err(InvalidSex(other)),
        }
    }
}

impl From<Sex> for i32 {
    fn from(sex: Sex) -> Self {
        sex.code()
    }
}

/// Employee entity with its department and job resolved (员工)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Option<i64>,
    pub name: String,
    /// 身份证号
    pub card_id: String,
    pub address: Option<String>,
    pub post_code: Option<String>,
    /// Landline
    pub tel: Option<String>,
    /// Mobile
    pub phone: Option<String>,
    pub qq: Option<String>,
    pub email: Option<String>,
    pub sex: Option<Sex>,
    /// 政治面貌
    pub party: Option<String>,
    pub birth_date: Option<NaiveDate>,
    /// 民族
    pub race: Option<String>,
    pub education: Option<String>,
    pub speciality: Option<String>,
    pub hobby: Option<String>,
    pub remark: Option<String>,
    /// Creation timestamp (Unix millis)
    pub created_at: Option<i64>,
    pub department: Option<Department>,
    pub job: Option<Job>,
}

/// Create employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub name: String,
    pub card_id: String,
    pub address: Option<String>,
    pub post_code: Option<String>,
    pub tel: Option<String>,
    pub phone: Option<String>,
    pub qq: Option<String>,
    pub email: Option<String>,
    pub sex: Option<Sex>,
    pub party: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub race: Option<String>,
    pub education: Option<String>,
    pub speciality: Option<String>,
    pub hobby: Option<String>,
    pub remark: Option<String>,
    /// Stamped by the service when absent
    pub created_at: Option<i64>,
    #[serde(default, deserialize_with = "null_as_absent")]
    pub department: Reference<Department>,
    #[serde(default, deserialize_with = "null_as_absent")]
    pub job: Reference<Job>,
}

impl EmployeeCreate {
    /// Build the record to insert once department and job are resolved.
    pub fn into_employee(self, department: Department, job: Job, created_at: i64) -> Employee {
        Employee {
            id: None,
            name: self.name.trim().to_string(),
            card_id: self.card_id.trim().to_string(),
            address: self.address,
            post_code: self.post_code,
            tel: self.tel,
            phone: self.phone,
            qq: self.qq,
            email: self.email,
            sex: self.sex,
            party: self.party,
            birth_date: self.birth_date,
            race: self.race,
            education: self.education,
            speciality: self.speciality,
            hobby: self.hobby,
            remark: self.remark,
            created_at: Some(self.created_at.unwrap_or(created_at)),
            department: Some(department),
            job: Some(job),
        }
    }
}

/// Update employee payload
///
/// Plain fields are partial: `None` keeps the stored value. `department` and
/// `job` follow the update rules of [`Reference::resolve_for_update`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: Option<String>,
    pub card_id: Option<String>,
    pub address: Option<String>,
    pub post_code: Option<String>,
    pub tel: Option<String>,
    pub phone: Option<String>,
    pub qq: Option<String>,
    pub email: Option<String>,
    pub sex: Option<Sex>,
    pub party: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub race: Option<String>,
    pub education: Option<String>,
    pub speciality: Option<String>,
    pub hobby: Option<String>,
    pub remark: Option<String>,
    #[serde(default, deserialize_with = "null_as_absent")]
    pub department: Reference<Department>,
    #[serde(default, deserialize_with = "null_as_absent")]
    pub job: Reference<Job>,
}

/// Search criteria (all optional, combined with AND)
///
/// - `name`, `phone`: substring match
/// - `card_id`: exact match
/// - `sex`, `dept_id`, `job_id`: equality
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCriteria {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub card_id: Option<String>,
    pub sex: Option<Sex>,
    pub dept_id: Option<i64>,
    pub job_id: Option<i64>,
}

impl EmployeeCriteria {
    /// Trim text filters and drop the blank ones
    pub fn normalized(self) -> Self {
        Self {
            name: non_blank(self.name.as_deref()),
            phone: non_blank(self.phone.as_deref()),
            card_id: non_blank(self.card_id.as_deref()),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.card_id.is_none()
            && self.sex.is_none()
            && self.dept_id.is_none()
            && self.job_id.is_none()
    }
}
