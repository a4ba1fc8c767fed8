use anyhow::Result;

use super::CommandContext;
use super::utils::{execute, parse_variables};

pub fn handle_mutate(
    ctx: CommandContext,
    mutation: String,
    variables: Option<String>,
) -> Result<()> {
    let vars = parse_variables(variables)?;

    // Auto-wrap in mutation { }
    let query = format!("mutation {{ {} }}", mutation);
    let request = async_graphql::Request::new(&query).variables(vars);
    let response = execute(&ctx, request)?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
