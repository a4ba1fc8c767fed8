mod health;
mod init;
mod list;
mod mutate;
mod query;
mod schema;
mod serve;
mod utils;

pub use health::handle_health;
pub use init::handle_init;
pub use list::{handle_departments, handle_employees};
pub use mutate::handle_mutate;
pub use query::handle_query;
pub use schema::handle_schema;
pub use serve::handle_serve;

use crate::config::{DatabaseSettings, RosterConfig};
use crate::error::Result;
use crate::graphql::{DirectorySchema, build_schema};
use crate::storage::{ConnectionPool, DirectoryStore, MemoryStore, MongoStore};
use std::sync::Arc;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: RosterConfig,
    pub in_memory: bool,
}

impl CommandContext {
    pub fn new(config: RosterConfig, in_memory: bool) -> Self {
        Self { config, in_memory }
    }

    /// Open the configured store. Must be called inside a tokio runtime.
    pub async fn open_store(&self) -> Result<Arc<dyn DirectoryStore>> {
        if self.in_memory {
            tracing::info!("Using in-memory store");
            return Ok(Arc::new(MemoryStore::seeded().await?));
        }
        let pool = ConnectionPool::new(self.database().clone());
        Ok(Arc::new(MongoStore::new(pool)))
    }

    pub fn database(&self) -> &DatabaseSettings {
        &self.config.database
    }

    pub fn schema(&self, store: Arc<dyn DirectoryStore>) -> DirectorySchema {
        build_schema(store, self.config.server.production)
    }
}
