use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};

use super::connection::ConnectionPool;
use super::seed::SeedTarget;
use super::{DEPARTMENTS_COLLECTION, DirectoryStore, EMPLOYEES_COLLECTION};
use crate::error::Result;
use crate::model::{CompanyDepartment, DepartmentPatch, Employee, EmployeePatch};

/// Employee as stored. Documents written by other tools may lack `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EmployeeDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    object_id: Option<ObjectId>,
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    position: String,
    #[serde(default)]
    department: String,
    #[serde(default)]
    salary: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DepartmentDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    object_id: Option<ObjectId>,
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    floor: i32,
}

/// Public id of a document: its `id` field, or the ObjectId hex if unset.
fn public_id(id: String, object_id: Option<ObjectId>) -> String {
    if id.is_empty() {
        object_id.map(|oid| oid.to_hex()).unwrap_or_default()
    } else {
        id
    }
}

impl From<EmployeeDocument> for Employee {
    fn from(d: EmployeeDocument) -> Self {
        Employee::new(
            public_id(d.id, d.object_id),
            d.name,
            d.position,
            d.department,
            d.salary,
        )
    }
}

impl From<&Employee> for EmployeeDocument {
    fn from(e: &Employee) -> Self {
        Self {
            object_id: None,
            id: e.id.clone(),
            name: e.name.clone(),
            position: e.position.clone(),
            department: e.department.clone(),
            salary: e.salary,
        }
    }
}

impl From<DepartmentDocument> for CompanyDepartment {
    fn from(d: DepartmentDocument) -> Self {
        CompanyDepartment::new(public_id(d.id, d.object_id), d.name, d.floor)
    }
}

impl From<&CompanyDepartment> for DepartmentDocument {
    fn from(d: &CompanyDepartment) -> Self {
        Self {
            object_id: None,
            id: d.id.clone(),
            name: d.name.clone(),
            floor: d.floor,
        }
    }
}

fn employee_set(patch: &EmployeePatch) -> Document {
    let mut set = Document::new();
    if let Some(name) = &patch.name {
        set.insert("name", name.as_str());
    }
    if let Some(position) = &patch.position {
        set.insert("position", position.as_str());
    }
    if let Some(department) = &patch.department {
        set.insert("department", department.as_str());
    }
    if let Some(salary) = patch.salary {
        set.insert("salary", salary);
    }
    set
}

fn department_set(patch: &DepartmentPatch) -> Document {
    let mut set = Document::new();
    if let Some(name) = &patch.name {
        set.insert("name", name.as_str());
    }
    if let Some(floor) = patch.floor {
        set.insert("floor", floor);
    }
    set
}

fn index(keys: Document, unique: bool) -> IndexModel {
    let options = IndexOptions::builder().unique(unique).build();
    IndexModel::builder().keys(keys).options(options).build()
}

/// Typed handles to both collections of one database.
#[derive(Clone)]
pub struct Collections {
    employees: Collection<EmployeeDocument>,
    departments: Collection<DepartmentDocument>,
}

impl Collections {
    pub fn new(database: &Database) -> Self {
        Self {
            employees: database.collection(EMPLOYEES_COLLECTION),
            departments: database.collection(DEPARTMENTS_COLLECTION),
        }
    }

    /// Unique `id` on both collections, unique department `name`, and plain
    /// indexes on the employee fields the UI filters and sorts by.
    pub async fn ensure_indexes(&self) -> Result<()> {
        self.employees
            .create_indexes([
                index(doc! { "id": 1 }, true),
                index(doc! { "department": 1 }, false),
                index(doc! { "name": 1 }, false),
                index(doc! { "position": 1 }, false),
                index(doc! { "salary": 1 }, false),
            ])
            .await?;
        self.departments
            .create_indexes([
                index(doc! { "id": 1 }, true),
                index(doc! { "name": 1 }, true),
            ])
            .await?;
        Ok(())
    }

    async fn find_employees(&self, filter: Document) -> Result<Vec<Employee>> {
        let docs: Vec<EmployeeDocument> = self.employees.find(filter).await?.try_collect().await?;
        Ok(docs.into_iter().map(Employee::from).collect())
    }

    async fn find_departments(&self, filter: Document) -> Result<Vec<CompanyDepartment>> {
        let docs: Vec<DepartmentDocument> =
            self.departments.find(filter).await?.try_collect().await?;
        Ok(docs.into_iter().map(CompanyDepartment::from).collect())
    }
}

#[async_trait]
impl SeedTarget for Collections {
    async fn employee_count(&self) -> Result<u64> {
        Ok(self.employees.count_documents(doc! {}).await?)
    }

    async fn department_count(&self) -> Result<u64> {
        Ok(self.departments.count_documents(doc! {}).await?)
    }

    async fn insert_employees(&self, employees: Vec<Employee>) -> Result<()> {
        let docs: Vec<EmployeeDocument> = employees.iter().map(EmployeeDocument::from).collect();
        self.employees.insert_many(docs).await?;
        Ok(())
    }

    async fn insert_departments(&self, departments: Vec<CompanyDepartment>) -> Result<()> {
        let docs: Vec<DepartmentDocument> =
            departments.iter().map(DepartmentDocument::from).collect();
        self.departments.insert_many(docs).await?;
        Ok(())
    }
}

/// MongoDB-backed store. Each operation acquires the pooled connection and
/// runs exactly one collection command.
pub struct MongoStore {
    pool: ConnectionPool,
}

impl MongoStore {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    async fn collections(&self) -> Result<Collections> {
        let database = self.pool.acquire().await?;
        Ok(Collections::new(&database))
    }
}

#[async_trait]
impl DirectoryStore for MongoStore {
    async fn ensure_connected(&self) -> Result<()> {
        self.pool.acquire().await.map(|_| ())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>> {
        self.collections().await?.find_employees(doc! {}).await
    }

    async fn get_employee(&self, id: &str) -> Result<Option<Employee>> {
        let found = self
            .collections()
            .await?
            .employees
            .find_one(doc! { "id": id })
            .await?;
        Ok(found.map(Employee::from))
    }

    async fn employees_by_department(&self, department: &str) -> Result<Vec<Employee>> {
        self.collections()
            .await?
            .find_employees(doc! { "department": department })
            .await
    }

    async fn insert_employee(&self, employee: &Employee) -> Result<()> {
        tracing::info!(id = %employee.id, name = %employee.name, "Adding employee");
        self.collections()
            .await?
            .employees
            .insert_one(EmployeeDocument::from(employee))
            .await?;
        Ok(())
    }

    async fn update_employee(&self, id: &str, patch: &EmployeePatch) -> Result<Option<Employee>> {
        tracing::info!(id = %id, "Updating employee");
        let collections = self.collections().await?;
        let set = employee_set(patch);
        // `$set` with no fields is rejected by the server
        let found = if set.is_empty() {
            collections.employees.find_one(doc! { "id": id }).await?
        } else {
            collections
                .employees
                .find_one_and_update(doc! { "id": id }, doc! { "$set": set })
                .return_document(ReturnDocument::After)
                .await?
        };
        Ok(found.map(Employee::from))
    }

    async fn delete_employee(&self, id: &str) -> Result<bool> {
        tracing::info!(id = %id, "Deleting employee");
        let result = self
            .collections()
            .await?
            .employees
            .delete_one(doc! { "id": id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn list_departments(&self) -> Result<Vec<CompanyDepartment>> {
        self.collections().await?.find_departments(doc! {}).await
    }

    async fn get_department(&self, id: &str) -> Result<Option<CompanyDepartment>> {
        let found = self
            .collections()
            .await?
            .departments
            .find_one(doc! { "id": id })
            .await?;
        Ok(found.map(CompanyDepartment::from))
    }

    async fn insert_department(&self, department: &CompanyDepartment) -> Result<()> {
        tracing::info!(id = %department.id, name = %department.name, "Adding department");
        self.collections()
            .await?
            .departments
            .insert_one(DepartmentDocument::from(department))
            .await?;
        Ok(())
    }

    async fn update_department(
        &self,
        id: &str,
        patch: &DepartmentPatch,
    ) -> Result<Option<CompanyDepartment>> {
        tracing::info!(id = %id, "Updating department");
        let collections = self.collections().await?;
        let set = department_set(patch);
        let found = if set.is_empty() {
            collections.departments.find_one(doc! { "id": id }).await?
        } else {
            collections
                .departments
                .find_one_and_update(doc! { "id": id }, doc! { "$set": set })
                .return_document(ReturnDocument::After)
                .await?
        };
        Ok(found.map(CompanyDepartment::from))
    }

    async fn delete_department(&self, id: &str) -> Result<bool> {
        tracing::info!(id = %id, "Deleting department");
        let result = self
            .collections()
            .await?
            .departments
            .delete_one(doc! { "id": id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn health_check(&self) -> bool {
        self.pool.health_check().await
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
