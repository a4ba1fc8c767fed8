//! Starter dataset inserted into empty collections.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{CompanyDepartment, Employee};

/// Counts and bulk inserts needed to seed a store.
#[async_trait]
pub trait SeedTarget: Send + Sync {
    async fn employee_count(&self) -> Result<u64>;

    async fn department_count(&self) -> Result<u64>;

    async fn insert_employees(&self, employees: Vec<Employee>) -> Result<()>;

    async fn insert_departments(&self, departments: Vec<CompanyDepartment>) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub employees_inserted: usize,
    pub departments_inserted: usize,
}

/// Seed each collection that has no documents yet.
///
/// The two collections are checked and filled independently, so a failure
/// on departments does not undo the employees insert.
pub async fn seed_if_empty(target: &dyn SeedTarget) -> Result<SeedReport> {
    let employee_count = target.employee_count().await?;
    let department_count = target.department_count().await?;
    tracing::info!(
        employees = employee_count,
        departments = department_count,
        "Database status"
    );

    let mut report = SeedReport::default();

    if employee_count == 0 {
        let employees = starter_employees();
        report.employees_inserted = employees.len();
        target.insert_employees(employees).await?;
        tracing::info!(count = report.employees_inserted, "Seeded employees");
    } else {
        tracing::info!("Employee data already exists, skipping seed");
    }

    if department_count == 0 {
        let departments = starter_departments();
        report.departments_inserted = departments.len();
        target.insert_departments(departments).await?;
        tracing::info!(count = report.departments_inserted, "Seeded departments");
    } else {
        tracing::info!("Department data already exists, skipping seed");
    }

    Ok(report)
}

fn employee(id: &str, name: &str, position: &str, department: &str, salary: i32) -> Employee {
    Employee::new(
        id.to_string(),
        name.to_string(),
        position.to_string(),
        department.to_string(),
        salary,
    )
}

pub fn starter_employees() -> Vec<Employee> {
    vec![
        employee("1", "John Doe", "Senior Software Engineer", "Engineering", 95000),
        employee("2", "Jane Smith", "Marketing Manager", "Marketing", 75000),
        employee("3", "Mike Johnson", "Sales Representative", "Sales", 55000),
        employee("4", "Sarah Wilson", "HR Specialist", "HR", 60000),
        employee("5", "David Brown", "DevOps Engineer", "Engineering", 85000),
        employee("e1", "Alice", "Developer", "Engineering", 75000),
        employee("e2", "Bob", "Manager", "Marketing", 85000),
        employee("e3", "Charlie", "Recruiter", "HR", 60000),
        employee("e4", "Diana", "UI Designer", "Engineering", 70000),
        employee("e5", "Ethan", "Copywriter", "Marketing", 62000),
        employee("e6", "Grace", "Financial Analyst", "Finance", 68000),
    ]
}

pub fn starter_departments() -> Vec<CompanyDepartment> {
    [
        ("1", "Engineering", 3),
        ("2", "Marketing", 2),
        ("3", "Sales", 1),
        ("4", "HR", 2),
        ("5", "Finance", 1),
    ]
    .into_iter()
    .map(|(id, name, floor)| CompanyDepartment::new(id.to_string(), name.to_string(), floor))
    .collect()
}
