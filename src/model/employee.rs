use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub position: String,

    /// Department name. Not checked against the departments collection.
    pub department: String,

    pub salary: i32,
}

impl Employee {
    pub fn new(
        id: String,
        name: String,
        position: String,
        department: String,
        salary: i32,
    ) -> Self {
        Self {
            id,
            name,
            position,
            department,
            salary,
        }
    }
}

/// Fields to overwrite on an existing employee. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub salary: Option<i32>,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.position.is_none()
            && self.department.is_none()
            && self.salary.is_none()
    }

    pub fn apply(&self, employee: &mut Employee) {
        if let Some(name) = &self.name {
            employee.name = name.clone();
        }
        if let Some(position) = &self.position {
            employee.position = position.clone();
        }
        if let Some(department) = &self.department {
            employee.department = department.clone();
        }
        if let Some(salary) = self.salary {
            employee.salary = salary;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Employee {
        Employee::new(
            "1".to_string(),
            "John Doe".to_string(),
            "Senior Software Engineer".to_string(),
            "Engineering".to_string(),
            95000,
        )
    }

    #[test]
    fn test_empty_patch() {
        let patch = EmployeePatch::default();
        assert!(patch.is_empty());

        let mut employee = sample();
        patch.apply(&mut employee);
        assert_eq!(employee, sample());
    }

    #[test]
    fn test_partial_patch_keeps_other_fields() {
        let patch = EmployeePatch {
            salary: Some(99000),
            ..Default::default()
        };
        assert!(!patch.is_empty());

        let mut employee = sample();
        patch.apply(&mut employee);
        assert_eq!(employee.salary, 99000);
        assert_eq!(employee.name, "John Doe");
        assert_eq!(employee.position, "Senior Software Engineer");
        assert_eq!(employee.department, "Engineering");
    }
}
