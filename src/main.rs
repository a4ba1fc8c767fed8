use anyhow::{Context, Result};
use clap::Parser;

use roster::cli::handlers::{self, CommandContext};
use roster::cli::{Cli, Commands};
use roster::config::RosterConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    roster::logging::init(cli.verbose, cli.log_file.clone());

    let config = load_config(&cli)?;
    let ctx = CommandContext::new(config, cli.in_memory);

    match cli.command {
        Commands::Init => handlers::handle_init(ctx.config),
        Commands::Serve {
            host,
            port,
            production,
        } => handlers::handle_serve(ctx, host, port, production),
        Commands::Query { query, variables } => handlers::handle_query(ctx, query, variables),
        Commands::Mutate {
            mutation,
            variables,
        } => handlers::handle_mutate(ctx, mutation, variables),
        Commands::Employees { department, json } => {
            handlers::handle_employees(ctx, department, json)
        }
        Commands::Departments { json } => handlers::handle_departments(ctx, json),
        Commands::Health => handlers::handle_health(ctx),
        Commands::Schema => handlers::handle_schema(ctx),
    }
}

fn load_config(cli: &Cli) -> Result<RosterConfig> {
    let config = match &cli.config {
        Some(path) => RosterConfig::load(path),
        None => RosterConfig::discover(&std::env::current_dir()?),
    }
    .context("Failed to load roster configuration")?;

    Ok(config.with_overrides(cli.mongodb_uri.clone(), cli.mongodb_db.clone()))
}
