//! # Roster - an employee directory over GraphQL
//!
//! Roster keeps employees and company departments in MongoDB and exposes
//! them through a GraphQL API, served over HTTP or run directly from the CLI.
//!
//! ## Features
//!
//! - **GraphQL API**: Query and mutate employees and departments
//! - **Resilient connections**: Lazy connect with bounded retry and backoff
//! - **Starter data**: Empty collections are seeded on first connect
//! - **In-memory mode**: Run without a database for demos and tests
//!
//! ## Quick Start
//!
//! ```bash
//! # Serve against a local MongoDB
//! roster serve
//!
//! # Try it without a database
//! roster --in-memory query '{ getAllEmployees { name department } }'
//!
//! # List everyone in Engineering
//! roster employees -d Engineering
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema, resolvers, and HTTP server
//! - [`model`]: Employee and department records
//! - [`storage`]: Store trait, MongoDB and in-memory backends

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `roster.yml` files and discovery from the working directory.
pub mod config;

/// Error types and result aliases.
///
/// Defines `DirectoryError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema, resolvers, and HTTP server.
pub mod graphql;

/// Data models for the directory.
///
/// Includes `Employee`, `CompanyDepartment`, and their patch types.
pub mod model;

/// Storage layer.
///
/// MongoDB connection management, indexes, seeding, and an in-memory store.
pub mod storage;

pub mod logging;
