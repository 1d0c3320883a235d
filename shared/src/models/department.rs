//! Department Model

use serde::{Deserialize, Serialize};

use super::reference::Identified;

/// Department entity (部门)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Department {
    /// Assigned by the store on insert
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub remark: Option<String>,
}

/// Create department payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentCreate {
    pub name: String,
    pub remark: Option<String>,
}

/// Update department payload (the id comes from the path)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentUpdate {
    pub name: String,
    pub remark: Option<String>,
}

impl DepartmentUpdate {
    pub fn into_department(self, id: i64) -> Department {
        Department {
            id: Some(id),
            name: self.name,
            remark: self.remark,
        }
    }
}

impl Identified for Department {
    fn record_id(&self) -> Option<i64> {
        self.id
    }
}
