use anyhow::Result;

use super::CommandContext;
use super::utils::{execute, parse_variables};

pub fn handle_query(ctx: CommandContext, query: String, variables: Option<String>) -> Result<()> {
    let vars = parse_variables(variables)?;
    let request = async_graphql::Request::new(query).variables(vars);
    let response = execute(&ctx, request)?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
