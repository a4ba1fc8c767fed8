use async_trait::async_trait;
use tokio::sync::RwLock;

use super::DirectoryStore;
use super::seed::{self, SeedReport, SeedTarget};
use crate::error::{DirectoryError, Result};
use crate::model::{CompanyDepartment, DepartmentPatch, Employee, EmployeePatch};

#[derive(Default)]
struct Tables {
    employees: Vec<Employee>,
    departments: Vec<CompanyDepartment>,
}

/// In-process store with the same uniqueness rules as the MongoDB indexes:
/// unique employee `id`, unique department `id` and `name`.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store filled with the starter dataset.
    pub async fn seeded() -> Result<Self> {
        let store = Self::new();
        store.seed().await?;
        Ok(store)
    }

    pub async fn seed(&self) -> Result<SeedReport> {
        seed::seed_if_empty(self).await
    }
}

fn check_department_name(
    departments: &[CompanyDepartment],
    name: &str,
    except_id: Option<&str>,
) -> Result<()> {
    let taken = departments
        .iter()
        .any(|d| d.name == name && Some(d.id.as_str()) != except_id);
    if taken {
        return Err(DirectoryError::Duplicate(format!(
            "department name '{}'",
            name
        )));
    }
    Ok(())
}

#[async_trait]
impl DirectoryStore for MemoryStore {
    async fn ensure_connected(&self) -> Result<()> {
        Ok(())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>> {
        Ok(self.data.read().await.employees.clone())
    }

    async fn get_employee(&self, id: &str) -> Result<Option<Employee>> {
        let data = self.data.read().await;
        Ok(data.employees.iter().find(|e| e.id == id).cloned())
    }

    async fn employees_by_department(&self, department: &str) -> Result<Vec<Employee>> {
        let data = self.data.read().await;
        Ok(data
            .employees
            .iter()
            .filter(|e| e.department == department)
            .cloned()
            .collect())
    }

    async fn insert_employee(&self, employee: &Employee) -> Result<()> {
        let mut data = self.data.write().await;
        if data.employees.iter().any(|e| e.id == employee.id) {
            return Err(DirectoryError::Duplicate(format!("employee id '{}'", employee.id)));
        }
        data.employees.push(employee.clone());
        Ok(())
    }

    async fn update_employee(&self, id: &str, patch: &EmployeePatch) -> Result<Option<Employee>> {
        let mut data = self.data.write().await;
        Ok(data.employees.iter_mut().find(|e| e.id == id).map(|e| {
            patch.apply(e);
            e.clone()
        }))
    }

    async fn delete_employee(&self, id: &str) -> Result<bool> {
        let mut data = self.data.write().await;
        match data.employees.iter().position(|e| e.id == id) {
            Some(pos) => {
                data.employees.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_departments(&self) -> Result<Vec<CompanyDepartment>> {
        Ok(self.data.read().await.departments.clone())
    }

    async fn get_department(&self, id: &str) -> Result<Option<CompanyDepartment>> {
        let data = self.data.read().await;
        Ok(data.departments.iter().find(|d| d.id == id).cloned())
    }

    async fn insert_department(&self, department: &CompanyDepartment) -> Result<()> {
        let mut data = self.data.write().await;
        if data.departments.iter().any(|d| d.id == department.id) {
            return Err(DirectoryError::Duplicate(format!(
                "department id '{}'",
                department.id
            )));
        }
        check_department_name(&data.departments, &department.name, None)?;
        data.departments.push(department.clone());
        Ok(())
    }

    async fn update_department(
        &self,
        id: &str,
        patch: &DepartmentPatch,
    ) -> Result<Option<CompanyDepartment>> {
        let mut data = self.data.write().await;
        if let Some(name) = &patch.name {
            check_department_name(&data.departments, name, Some(id))?;
        }
        Ok(data.departments.iter_mut().find(|d| d.id == id).map(|d| {
            patch.apply(d);
            d.clone()
        }))
    }

    async fn delete_department(&self, id: &str) -> Result<bool> {
        let mut data = self.data.write().await;
        let before = data.departments.len();
        data.departments.retain(|d| d.id != id);
        Ok(data.departments.len() < before)
    }

    async fn health_check(&self) -> bool {
        true
    }

    async fn close(&self) {}
}

#[async_trait]
impl SeedTarget for MemoryStore {
    async fn employee_count(&self) -> Result<u64> {
        Ok(self.data.read().await.employees.len() as u64)
    }

    async fn department_count(&self) -> Result<u64> {
        Ok(self.data.read().await.departments.len() as u64)
    }

    async fn insert_employees(&self, employees: Vec<Employee>) -> Result<()> {
        for employee in &employees {
            self.insert_employee(employee).await?;
        }
        Ok(())
    }

    async fn insert_departments(&self, departments: Vec<CompanyDepartment>) -> Result<()> {
        for department in &departments {
            self.insert_department(department).await?;
        }
        Ok(())
    }
}
