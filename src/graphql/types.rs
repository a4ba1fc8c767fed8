use crate::model::{CompanyDepartment as ModelDepartment, Employee as ModelEmployee};
use async_graphql::{ID, SimpleObject};

#[derive(SimpleObject, Clone)]
pub struct Employee {
    pub id: ID,
    pub name: String,
    pub position: String,
    pub department: String,
    pub salary: i32,
}

impl From<ModelEmployee> for Employee {
    fn from(e: ModelEmployee) -> Self {
        Self {
            id: ID(e.id),
            name: e.name,
            position: e.position,
            department: e.department,
            salary: e.salary,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct CompanyDepartment {
    pub id: ID,
    pub name: String,
    pub floor: i32,
}

impl From<ModelDepartment> for CompanyDepartment {
    fn from(d: ModelDepartment) -> Self {
        Self {
            id: ID(d.id),
            name: d.name,
            floor: d.floor,
        }
    }
}

/// Placeholder statistics. No query cache exists, so these are constants.
#[derive(SimpleObject)]
pub struct CacheStats {
    pub size: i32,
    pub max_size: i32,
    pub keys: Vec<String>,
}

impl Default for CacheStats {
    fn default() -> Self {
        Self {
            size: 0,
            max_size: 100,
            keys: Vec::new(),
        }
    }
}

/// Outcome of a delete mutation. Deletes report failure here instead of
/// raising a GraphQL error.
#[derive(SimpleObject, Debug, PartialEq, Eq)]
pub struct DeleteResult {
    pub success: bool,
    pub message: String,
}

impl DeleteResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
