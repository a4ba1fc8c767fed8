use anyhow::Result;

use super::CommandContext;
use super::utils::{print_department_list, print_employee_list};

pub fn handle_employees(ctx: CommandContext, department: Option<String>, json: bool) -> Result<()> {
    let employees = tokio::runtime::Runtime::new()?.block_on(async {
        let store = ctx.open_store().await?;
        let employees = match department {
            Some(ref d) => store.employees_by_department(d).await,
            None => store.list_employees().await,
        };
        store.close().await;
        employees
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&employees)?);
    } else {
        print_employee_list(&employees);
    }
    Ok(())
}

pub fn handle_departments(ctx: CommandContext, json: bool) -> Result<()> {
    let departments = tokio::runtime::Runtime::new()?.block_on(async {
        let store = ctx.open_store().await?;
        let departments = store.list_departments().await;
        store.close().await;
        departments
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&departments)?);
    } else {
        print_department_list(&departments);
    }
    Ok(())
}
