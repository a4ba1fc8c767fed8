//! GraphQL schema, resolvers, and HTTP server for the directory.
//!
//! ## Usage
//!
//! ```bash
//! # Start the server (GraphiQL at http://localhost:4000/api/graphql)
//! roster serve --port 4000
//!
//! # Execute a query from CLI
//! roster query '{ getAllEmployees { id name department } }'
//!
//! # Execute a mutation from CLI
//! roster mutate 'deleteEmployee(id: "e1") { success message }'
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `getAllEmployees`, `getEmployeeDetails`,
//!   `getEmployeesByDepartment`, `getDepartments`, `getAllCompanyDepartments`,
//!   `getCompanyDepartment`, `getCacheStats`
//! - **Mutations**: `addEmployee`, `updateEmployee`, `deleteEmployee`,
//!   `addCompanyDepartment`, `updateCompanyDepartment`,
//!   `deleteCompanyDepartment`

mod schema;
mod server;
mod telemetry;
mod types;

pub use schema::{DirectorySchema, MutationRoot, QueryRoot, build_schema};
pub use server::{GENERIC_ERROR, GRAPHQL_PATH, ServerState, mask_errors, router, run_server};
pub use telemetry::{OperationStats, RequestStats, execute_timed};
pub use types::*;
