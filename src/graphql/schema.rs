use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ID, Object, Schema};

use crate::model::{self, DepartmentPatch, EmployeePatch};
use crate::storage::DirectoryStore;

use super::types::*;

pub type DirectorySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema over `store`. Production disables introspection.
pub fn build_schema(store: Arc<dyn DirectoryStore>, production: bool) -> DirectorySchema {
    let builder = Schema::build(QueryRoot, MutationRoot, EmptySubscription).data(store);
    if production {
        builder.disable_introspection().finish()
    } else {
        builder.finish()
    }
}

fn get_store<'a>(ctx: &Context<'a>) -> &'a Arc<dyn DirectoryStore> {
    ctx.data_unchecked::<Arc<dyn DirectoryStore>>()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All employees
    async fn get_all_employees(&self, ctx: &Context<'_>) -> Vec<Employee> {
        match get_store(ctx).list_employees().await {
            Ok(employees) => employees.into_iter().map(Employee::from).collect(),
            Err(e) => {
                tracing::error!(error = %e, "Error fetching employees");
                Vec::new()
            }
        }
    }

    /// A single employee, or null if the id is unknown
    async fn get_employee_details(&self, ctx: &Context<'_>, id: ID) -> Option<Employee> {
        match get_store(ctx).get_employee(&id).await {
            Ok(employee) => employee.map(Employee::from),
            Err(e) => {
                tracing::error!(id = %id.as_str(), error = %e, "Error fetching employee details");
                None
            }
        }
    }

    /// Employees whose department name matches exactly
    async fn get_employees_by_department(
        &self,
        ctx: &Context<'_>,
        department: String,
    ) -> Vec<Employee> {
        match get_store(ctx).employees_by_department(&department).await {
            Ok(employees) => employees.into_iter().map(Employee::from).collect(),
            Err(e) => {
                tracing::error!(department = %department, error = %e, "Error fetching employees by department");
                Vec::new()
            }
        }
    }

    /// Department names, for filter dropdowns
    async fn get_departments(&self, ctx: &Context<'_>) -> Vec<String> {
        match get_store(ctx).list_departments().await {
            Ok(departments) => departments.into_iter().map(|d| d.name).collect(),
            Err(e) => {
                tracing::error!(error = %e, "Error fetching departments");
                Vec::new()
            }
        }
    }

    async fn get_all_company_departments(&self, ctx: &Context<'_>) -> Vec<CompanyDepartment> {
        match get_store(ctx).list_departments().await {
            Ok(departments) => departments
                .into_iter()
                .map(CompanyDepartment::from)
                .collect(),
            Err(e) => {
                tracing::error!(error = %e, "Error fetching company departments");
                Vec::new()
            }
        }
    }

    async fn get_company_department(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> Option<CompanyDepartment> {
        match get_store(ctx).get_department(&id).await {
            Ok(department) => department.map(CompanyDepartment::from),
            Err(e) => {
                tracing::error!(id = %id.as_str(), error = %e, "Error fetching company department");
                None
            }
        }
    }

    async fn get_cache_stats(&self) -> CacheStats {
        CacheStats::default()
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create an employee with a timestamp id
    async fn add_employee(
        &self,
        ctx: &Context<'_>,
        name: String,
        position: String,
        department: String,
        salary: i32,
    ) -> async_graphql::Result<Employee> {
        let employee =
            model::Employee::new(model::generate_id(), name, position, department, salary);

        get_store(ctx)
            .insert_employee(&employee)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Error adding employee");
                async_graphql::Error::new("Failed to add employee")
            })?;
        Ok(employee.into())
    }

    /// Overwrite only the fields that are provided
    async fn update_employee(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        position: Option<String>,
        department: Option<String>,
        salary: Option<i32>,
    ) -> async_graphql::Result<Employee> {
        let patch = EmployeePatch {
            name,
            position,
            department,
            salary,
        };

        match get_store(ctx).update_employee(&id, &patch).await {
            Ok(Some(employee)) => Ok(employee.into()),
            Ok(None) => Err(async_graphql::Error::new("Employee not found")),
            Err(e) => {
                tracing::error!(id = %id.as_str(), error = %e, "Error updating employee");
                Err(async_graphql::Error::new("Failed to update employee"))
            }
        }
    }

    async fn delete_employee(&self, ctx: &Context<'_>, id: ID) -> DeleteResult {
        match get_store(ctx).delete_employee(&id).await {
            Ok(true) => DeleteResult::ok("Employee deleted successfully"),
            Ok(false) => DeleteResult::failed("Employee not found"),
            Err(e) => {
                tracing::error!(id = %id.as_str(), error = %e, "Error deleting employee");
                DeleteResult::failed("Failed to delete employee")
            }
        }
    }

    async fn add_company_department(
        &self,
        ctx: &Context<'_>,
        name: String,
        floor: i32,
    ) -> async_graphql::Result<CompanyDepartment> {
        let department = model::CompanyDepartment::new(model::generate_id(), name, floor);

        get_store(ctx)
            .insert_department(&department)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Error adding company department");
                async_graphql::Error::new("Failed to add company department")
            })?;
        Ok(department.into())
    }

    async fn update_company_department(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        floor: Option<i32>,
    ) -> async_graphql::Result<CompanyDepartment> {
        let patch = DepartmentPatch { name, floor };

        match get_store(ctx).update_department(&id, &patch).await {
            Ok(Some(department)) => Ok(department.into()),
            Ok(None) => Err(async_graphql::Error::new("Company department not found")),
            Err(e) => {
                tracing::error!(id = %id.as_str(), error = %e, "Error updating company department");
                Err(async_graphql::Error::new(
                    "Failed to update company department",
                ))
            }
        }
    }

    async fn delete_company_department(&self, ctx: &Context<'_>, id: ID) -> DeleteResult {
        match get_store(ctx).delete_department(&id).await {
            Ok(true) => DeleteResult::ok("Company department deleted successfully"),
            Ok(false) => DeleteResult::failed("Company department not found"),
            Err(e) => {
                tracing::error!(id = %id.as_str(), error = %e, "Error deleting company department");
                DeleteResult::failed("Failed to delete company department")
            }
        }
    }
}
