use crate::model::{CompanyDepartment, Employee};
use anyhow::{Context, Result};
use colored::Colorize;

/// Parse `--variables` JSON, defaulting to no variables.
pub fn parse_variables(variables: Option<String>) -> Result<async_graphql::Variables> {
    match variables {
        Some(v) => serde_json::from_str(&v).context("Invalid --variables JSON"),
        None => Ok(async_graphql::Variables::default()),
    }
}

/// Execute a request against a freshly opened store and close it afterwards.
pub fn execute(
    ctx: &super::CommandContext,
    request: async_graphql::Request,
) -> Result<async_graphql::Response> {
    tokio::runtime::Runtime::new()?.block_on(async {
        let store = ctx.open_store().await?;
        let schema = ctx.schema(store.clone());
        let response = schema.execute(request).await;
        store.close().await;
        Ok::<_, anyhow::Error>(response)
    })
}

pub fn print_employee_list(employees: &[Employee]) {
    if employees.is_empty() {
        println!("No employees found.");
        return;
    }

    for employee in employees {
        println!(
            "{} {} {} [{}] {}",
            employee.id.cyan(),
            employee.name.bold(),
            employee.position,
            employee.department.blue(),
            employee.salary.to_string().green()
        );
    }
}

pub fn print_department_list(departments: &[CompanyDepartment]) {
    if departments.is_empty() {
        println!("No departments found.");
        return;
    }

    for department in departments {
        println!(
            "{} {} floor {}",
            department.id.cyan(),
            department.name.bold(),
            department.floor.to_string().yellow()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variables_default() {
        let vars = parse_variables(None).unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn test_parse_variables_object() {
        let vars = parse_variables(Some(r#"{"department": "Sales"}"#.to_string())).unwrap();
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn test_parse_variables_invalid() {
        assert!(parse_variables(Some("not json".to_string())).is_err());
    }
}
