//! Data models for the directory.
//!
//! - [`Employee`]: a person, linked to a department by name
//! - [`CompanyDepartment`]: a department and the floor it sits on
//! - [`EmployeePatch`] / [`DepartmentPatch`]: partial updates
//!
//! Identifiers come from [`generate_id`], which uses the wall clock. Two
//! records created in the same millisecond get the same id; the unique index
//! on `id` rejects the second insert.

mod department;
mod employee;

pub use department::{CompanyDepartment, DepartmentPatch};
pub use employee::{Employee, EmployeePatch};

use chrono::Utc;

/// Generate a record identifier from the current time in milliseconds.
pub fn generate_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_numeric_timestamp() {
        let before = Utc::now().timestamp_millis();
        let id = generate_id();
        let after = Utc::now().timestamp_millis();

        let millis: i64 = id.parse().unwrap();
        assert!(millis >= before && millis <= after);
    }
}
