use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roster")]
#[command(
    author,
    version,
    about = "An employee directory served over GraphQL, backed by MongoDB"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for roster.yml by default)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// MongoDB connection string
    #[arg(long, global = true, env = "MONGODB_URI")]
    pub mongodb_uri: Option<String>,

    /// MongoDB database name
    #[arg(long, global = true, env = "MONGODB_DB")]
    pub mongodb_db: Option<String>,

    /// Use a seeded in-memory store instead of MongoDB
    #[arg(long, global = true)]
    pub in_memory: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a roster.yml in the current directory
    Init,

    /// Start the GraphQL HTTP server
    Serve {
        /// Address to bind [default: 127.0.0.1]
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on [default: 4000]
        #[arg(short, long)]
        port: Option<u16>,

        /// Hide error details and disable introspection
        #[arg(long, env = "ROSTER_PRODUCTION")]
        production: bool,
    },

    /// Execute a GraphQL query
    Query {
        /// GraphQL query string
        query: String,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,
    },

    /// Execute a GraphQL mutation (automatically wraps in 'mutation { }')
    Mutate {
        /// Mutation body (without 'mutation' keyword)
        mutation: String,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,
    },

    /// List employees
    #[command(visible_alias = "ls")]
    Employees {
        /// Only employees in this department
        #[arg(short, long)]
        department: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List departments
    Departments {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the database is reachable
    Health,

    /// Print the GraphQL schema (SDL)
    Schema,
}
