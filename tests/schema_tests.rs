use std::sync::Arc;

use async_graphql::{Request, Response, ServerError, Variables};
use roster::graphql::{DirectorySchema, GENERIC_ERROR, build_schema, mask_errors};
use roster::storage::{DirectoryStore, MemoryStore};
use serde_json::{Value, json};

async fn seeded_schema() -> DirectorySchema {
    let store: Arc<dyn DirectoryStore> = Arc::new(MemoryStore::seeded().await.unwrap());
    build_schema(store, false)
}

async fn run(schema: &DirectorySchema, query: &str, variables: Value) -> Response {
    schema
        .execute(Request::new(query).variables(Variables::from_json(variables)))
        .await
}

fn data(response: Response) -> Value {
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    response.data.into_json().unwrap()
}

// =============================================================================
// Employees
// =============================================================================

#[tokio::test]
async fn test_add_employee_then_list() {
    let schema = seeded_schema().await;

    let added = data(
        run(
            &schema,
            "mutation { addEmployee(name: \"Ann\", position: \"Eng\", department: \"Engineering\", salary: 90000) { id } }",
            json!({}),
        )
        .await,
    );
    let id = added["addEmployee"]["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let all = data(
        run(
            &schema,
            "{ getAllEmployees { id name position department salary } }",
            json!({}),
        )
        .await,
    );
    let employees = all["getAllEmployees"].as_array().unwrap();
    assert_eq!(employees.len(), 12);
    assert!(employees.contains(&json!({
        "id": id,
        "name": "Ann",
        "position": "Eng",
        "department": "Engineering",
        "salary": 90000
    })));
}

#[tokio::test]
async fn test_added_employee_found_by_department() {
    let schema = seeded_schema().await;

    data(
        run(
            &schema,
            "mutation { addEmployee(name: \"Ann\", position: \"Auditor\", department: \"Legal\", salary: 1) { id } }",
            json!({}),
        )
        .await,
    );

    let result = data(
        run(
            &schema,
            "query($d: String!) { getEmployeesByDepartment(department: $d) { name } }",
            json!({ "d": "Legal" }),
        )
        .await,
    );
    assert_eq!(result["getEmployeesByDepartment"], json!([{ "name": "Ann" }]));
}

#[tokio::test]
async fn test_department_filter_is_exact() {
    let schema = seeded_schema().await;

    let result = data(
        run(
            &schema,
            "{ getEmployeesByDepartment(department: \"engineering\") { name } }",
            json!({}),
        )
        .await,
    );
    assert_eq!(result["getEmployeesByDepartment"], json!([]));
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let schema = seeded_schema().await;

    let result = data(
        run(
            &schema,
            "mutation { updateEmployee(id: \"1\", salary: 100000) { name position department salary } }",
            json!({}),
        )
        .await,
    );
    assert_eq!(
        result["updateEmployee"],
        json!({
            "name": "John Doe",
            "position": "Senior Software Engineer",
            "department": "Engineering",
            "salary": 100000
        })
    );

    let details = data(
        run(&schema, "{ getEmployeeDetails(id: \"1\") { salary } }", json!({})).await,
    );
    assert_eq!(details["getEmployeeDetails"]["salary"], 100000);
}

#[tokio::test]
async fn test_update_missing_employee_errors() {
    let schema = seeded_schema().await;

    let response = run(
        &schema,
        "mutation { updateEmployee(id: \"missing\", name: \"X\") { id } }",
        json!({}),
    )
    .await;
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "Employee not found");
}

#[tokio::test]
async fn test_delete_employee() {
    let schema = seeded_schema().await;

    let deleted = data(
        run(
            &schema,
            "mutation { deleteEmployee(id: \"e2\") { success message } }",
            json!({}),
        )
        .await,
    );
    assert_eq!(
        deleted["deleteEmployee"],
        json!({ "success": true, "message": "Employee deleted successfully" })
    );

    let again = data(
        run(
            &schema,
            "mutation { deleteEmployee(id: \"e2\") { success message } }",
            json!({}),
        )
        .await,
    );
    assert_eq!(
        again["deleteEmployee"],
        json!({ "success": false, "message": "Employee not found" })
    );

    let details = data(
        run(&schema, "{ getEmployeeDetails(id: \"e2\") { id } }", json!({})).await,
    );
    assert_eq!(details["getEmployeeDetails"], Value::Null);
}

// =============================================================================
// Departments
// =============================================================================

#[tokio::test]
async fn test_get_departments_returns_names() {
    let schema = seeded_schema().await;

    let result = data(run(&schema, "{ getDepartments }", json!({})).await);
    let names: Vec<&str> = result["getDepartments"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(names.len(), 5);
    for expected in ["Engineering", "Marketing", "Sales", "HR", "Finance"] {
        assert!(names.contains(&expected), "missing {expected}");
    }
}

#[tokio::test]
async fn test_company_department_lifecycle() {
    let schema = seeded_schema().await;

    let added = data(
        run(
            &schema,
            "mutation { addCompanyDepartment(name: \"Legal\", floor: 4) { id } }",
            json!({}),
        )
        .await,
    );
    let id = added["addCompanyDepartment"]["id"].as_str().unwrap().to_string();

    let updated = data(
        run(
            &schema,
            "mutation($id: ID!) { updateCompanyDepartment(id: $id, floor: 6) { name floor } }",
            json!({ "id": id }),
        )
        .await,
    );
    assert_eq!(
        updated["updateCompanyDepartment"],
        json!({ "name": "Legal", "floor": 6 })
    );

    let deleted = data(
        run(
            &schema,
            "mutation($id: ID!) { deleteCompanyDepartment(id: $id) { success message } }",
            json!({ "id": id }),
        )
        .await,
    );
    assert_eq!(
        deleted["deleteCompanyDepartment"],
        json!({ "success": true, "message": "Company department deleted successfully" })
    );

    let fetched = data(
        run(
            &schema,
            "query($id: ID!) { getCompanyDepartment(id: $id) { id } }",
            json!({ "id": id }),
        )
        .await,
    );
    assert_eq!(fetched["getCompanyDepartment"], Value::Null);
}

#[tokio::test]
async fn test_rename_department_to_existing_name_fails() {
    let schema = seeded_schema().await;

    let response = run(
        &schema,
        "mutation { updateCompanyDepartment(id: \"2\", name: \"Engineering\") { id } }",
        json!({}),
    )
    .await;
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "Failed to update company department");
}

#[tokio::test]
async fn test_update_missing_department_errors() {
    let schema = seeded_schema().await;

    let response = run(
        &schema,
        "mutation { updateCompanyDepartment(id: \"missing\", floor: 1) { id } }",
        json!({}),
    )
    .await;
    assert_eq!(response.errors[0].message, "Company department not found");
}

#[tokio::test]
async fn test_delete_missing_department() {
    let schema = seeded_schema().await;

    let result = data(
        run(
            &schema,
            "mutation { deleteCompanyDepartment(id: \"missing\") { success message } }",
            json!({}),
        )
        .await,
    );
    assert_eq!(
        result["deleteCompanyDepartment"],
        json!({ "success": false, "message": "Company department not found" })
    );
}

// =============================================================================
// Production mode
// =============================================================================

#[tokio::test]
async fn test_production_disables_introspection() {
    let store: Arc<dyn DirectoryStore> = Arc::new(MemoryStore::seeded().await.unwrap());
    let query = "{ __schema { queryType { name } } }";

    let dev = build_schema(store.clone(), false).execute(query).await;
    assert!(dev.errors.is_empty());

    let prod = build_schema(store, true).execute(query).await;
    let data = prod.data.into_json().unwrap();
    assert!(!prod.errors.is_empty() || data["__schema"].is_null());
}

#[test]
fn test_mask_errors_hides_details() {
    let mut response = Response::from_errors(vec![
        ServerError::new("Employee not found", None),
        ServerError::new("Failed to add employee", None),
    ]);
    mask_errors(&mut response);

    assert_eq!(response.errors.len(), 2);
    assert!(response.errors.iter().all(|e| e.message == GENERIC_ERROR));
}
