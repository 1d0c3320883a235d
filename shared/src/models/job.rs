//! Job Model

use serde::{Deserialize, Serialize};

use super::reference::Identified;

/// Job entity (职位)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Job {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub remark: Option<String>,
}

/// Create job payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreate {
    pub name: String,
    pub remark: Option<String>,
}

/// Update job payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobUpdate {
    pub name: String,
    pub remark: Option<String>,
}

impl JobUpdate {
    pub fn into_job(self, id: i64) -> Job {
        Job {
            id: Some(id),
            name: self.name,
            remark: self.remark,
        }
    }
}

impl Identified for Job {
    fn record_id(&self) -> Option<i64> {
        self.id
    }
}
