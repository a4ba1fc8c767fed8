//! Data-access layer for the directory.
//!
//! Records live in two collections, `employees` and `departments`. Access
//! goes through the [`DirectoryStore`] trait so the GraphQL layer does not
//! care whether it talks to MongoDB or to memory.
//!
//! ## Components
//!
//! - [`MongoStore`]: MongoDB-backed store, one collection operation per call
//! - [`ConnectionPool`]: client lifecycle (connect with retry, reuse, ping,
//!   bootstrap, close)
//! - [`RetryPolicy`]: exponential backoff for connection attempts
//! - [`MemoryStore`]: in-process store used by tests and `--in-memory`
//! - [`seed`]: starter dataset and the seed-if-empty routine

mod backoff;
mod connection;
mod memory;
mod mongo;
pub mod seed;

pub use backoff::RetryPolicy;
pub use connection::ConnectionPool;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use seed::SeedReport;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{CompanyDepartment, DepartmentPatch, Employee, EmployeePatch};

pub const EMPLOYEES_COLLECTION: &str = "employees";
pub const DEPARTMENTS_COLLECTION: &str = "departments";

#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Make sure a live connection exists, connecting if needed.
    async fn ensure_connected(&self) -> Result<()>;

    async fn list_employees(&self) -> Result<Vec<Employee>>;

    async fn get_employee(&self, id: &str) -> Result<Option<Employee>>;

    async fn employees_by_department(&self, department: &str) -> Result<Vec<Employee>>;

    async fn insert_employee(&self, employee: &Employee) -> Result<()>;

    /// Apply `patch` and return the updated record, or `None` if no employee
    /// has this id.
    async fn update_employee(&self, id: &str, patch: &EmployeePatch) -> Result<Option<Employee>>;

    /// Returns `false` when nothing was deleted.
    async fn delete_employee(&self, id: &str) -> Result<bool>;

    async fn list_departments(&self) -> Result<Vec<CompanyDepartment>>;

    async fn get_department(&self, id: &str) -> Result<Option<CompanyDepartment>>;

    async fn insert_department(&self, department: &CompanyDepartment) -> Result<()>;

    async fn update_department(
        &self,
        id: &str,
        patch: &DepartmentPatch,
    ) -> Result<Option<CompanyDepartment>>;

    async fn delete_department(&self, id: &str) -> Result<bool>;

    async fn health_check(&self) -> bool;

    async fn close(&self);
}
