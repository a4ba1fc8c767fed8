use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDepartment {
    pub id: String,

    /// Unique across departments.
    pub name: String,

    pub floor: i32,
}

impl CompanyDepartment {
    pub fn new(id: String, name: String, floor: i32) -> Self {
        Self { id, name, floor }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentPatch {
    pub name: Option<String>,
    pub floor: Option<i32>,
}

impl DepartmentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.floor.is_none()
    }

    pub fn apply(&self, department: &mut CompanyDepartment) {
        if let Some(name) = &self.name {
            department.name = name.clone();
        }
        if let Some(floor) = self.floor {
            department.floor = floor;
        }
    }
}
