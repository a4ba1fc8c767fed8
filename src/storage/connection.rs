use std::sync::atomic::{AtomicBool, Ordering};

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tokio::sync::{Mutex, RwLock};

use super::backoff::RetryPolicy;
use super::mongo::Collections;
use super::seed;
use crate::config::DatabaseSettings;
use crate::error::{DirectoryError, Result};

/// Owns the MongoDB client for the lifetime of the service.
///
/// The client is created lazily by the first [`acquire`](Self::acquire) and
/// reused afterwards. Every reuse is preceded by a ping; a dead client is
/// dropped and replaced. The first successful connection creates indexes and
/// seeds empty collections.
///
/// Connecting happens under `connecting`, never under the `client` lock, so
/// health checks keep answering during a reconnect.
pub struct ConnectionPool {
    settings: DatabaseSettings,
    policy: RetryPolicy,
    client: RwLock<Option<Client>>,
    connecting: Mutex<()>,
    bootstrapped: AtomicBool,
}

async fn ping(client: &Client) -> mongodb::error::Result<()> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
}

impl ConnectionPool {
    pub fn new(settings: DatabaseSettings) -> Self {
        let policy = RetryPolicy::default().with_max_attempts(settings.connect_attempts);
        tracing::info!(
            kind = if settings.is_atlas() { "Atlas Cloud" } else { "Local" },
            uri = %settings.redacted_uri(),
            database = %settings.name,
            "MongoDB configuration"
        );
        Self {
            settings,
            policy,
            client: RwLock::new(None),
            connecting: Mutex::new(()),
            bootstrapped: AtomicBool::new(false),
        }
    }

    /// Return a live database handle, connecting if needed.
    pub async fn acquire(&self) -> Result<Database> {
        if let Some(client) = self.live_client().await {
            return Ok(client.database(&self.settings.name));
        }

        // Only the holder of `connecting` replaces the slot. Waiters reuse
        // whatever it stored.
        let _connecting = self.connecting.lock().await;
        if let Some(client) = self.live_client().await {
            return Ok(client.database(&self.settings.name));
        }
        self.client.write().await.take();

        let client = self.connect().await?;
        *self.client.write().await = Some(client.clone());

        let database = client.database(&self.settings.name);
        self.bootstrap_once(&database).await;
        Ok(database)
    }

    /// The cached client, if it answers a ping.
    async fn live_client(&self) -> Option<Client> {
        let cached = self.client.read().await.clone()?;
        match ping(&cached).await {
            Ok(()) => Some(cached),
            Err(e) => {
                tracing::warn!(error = %e, "Existing connection lost, reconnecting");
                None
            }
        }
    }

    async fn connect(&self) -> Result<Client> {
        self.policy
            .retry(|_| self.try_connect())
            .await
            .map_err(|(attempts, source)| DirectoryError::Connection { attempts, source })
    }

    async fn try_connect(&self) -> mongodb::error::Result<Client> {
        let mut options = ClientOptions::parse(&self.settings.uri).await?;
        options.app_name = Some("roster".to_string());
        options.max_pool_size = Some(self.settings.max_pool_size);
        options.server_selection_timeout = Some(self.settings.server_selection_timeout());
        options.max_idle_time = Some(self.settings.max_idle_time());
        options.retry_writes = Some(true);

        let client = Client::with_options(options)?;
        ping(&client).await?;
        tracing::info!(
            kind = if self.settings.is_atlas() { "Atlas" } else { "Local" },
            pool_size = self.settings.max_pool_size,
            "Connected to MongoDB"
        );
        Ok(client)
    }

    /// Create indexes and seed, once per pool lifetime. Failures are logged only.
    async fn bootstrap_once(&self, database: &Database) {
        if self.bootstrapped.swap(true, Ordering::SeqCst) {
            return;
        }

        let collections = Collections::new(database);
        match collections.ensure_indexes().await {
            Ok(()) => tracing::info!("Database indexes ready"),
            Err(e) => tracing::warn!(error = %e, "Index creation failed"),
        }
        if let Err(e) = seed::seed_if_empty(&collections).await {
            tracing::error!(error = %e, "Error seeding data");
        }
    }

    /// Ping the cached client. `false` when not connected.
    pub async fn health_check(&self) -> bool {
        let cached = self.client.read().await.clone();
        match cached {
            Some(client) => match ping(&client).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::error!(error = %e, "MongoDB health check failed");
                    false
                }
            },
            None => false,
        }
    }

    /// Close the client and forget it. A later `acquire` starts over,
    /// including bootstrap.
    pub async fn close(&self) {
        let client = self.client.write().await.take();
        if let Some(client) = client {
            client.shutdown().await;
            tracing::info!("MongoDB connection closed gracefully");
        }
        self.bootstrapped.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    async fn no_cached_client(pool: &ConnectionPool) -> bool {
        pool.client.read().await.is_none()
    }

    fn unreachable_settings() -> DatabaseSettings {
        DatabaseSettings {
            uri: "not-a-mongodb-uri".to_string(),
            ..DatabaseSettings::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquire_fails_after_three_attempts() {
        let pool = ConnectionPool::new(unreachable_settings());
        let started = tokio::time::Instant::now();

        let result = pool.acquire().await;

        match result {
            Err(DirectoryError::Connection { attempts, .. }) => assert_eq!(attempts, 3),
            other => panic!("expected connection error, got {:?}", other.map(|_| ())),
        }
        assert!(started.elapsed() >= Duration::from_secs(3));
        assert!(no_cached_client(&pool).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_attempts_are_respected() {
        let settings = DatabaseSettings {
            connect_attempts: 1,
            ..unreachable_settings()
        };
        let pool = ConnectionPool::new(settings);
        let started = tokio::time::Instant::now();

        let result = pool.acquire().await;

        assert!(matches!(
            result,
            Err(DirectoryError::Connection { attempts: 1, .. })
        ));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_health_check_answers_during_reconnect() {
        let pool = Arc::new(ConnectionPool::new(unreachable_settings()));
        let connecting = {
            let pool = pool.clone();
            tokio::spawn(async move { pool.acquire().await.map(|_| ()) })
        };
        // let the spawned acquire reach its first backoff sleep
        tokio::time::sleep(Duration::from_millis(10)).await;

        let health = tokio::time::timeout(Duration::from_millis(500), pool.health_check()).await;
        assert_eq!(health.ok(), Some(false));

        assert!(connecting.await.unwrap().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_acquires_connect_one_at_a_time() {
        let pool = Arc::new(ConnectionPool::new(unreachable_settings()));
        let started = tokio::time::Instant::now();

        let tasks: Vec<_> = (0..3)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move { pool.acquire().await.map(|_| ()) })
            })
            .collect();
        for task in tasks {
            assert!(task.await.unwrap().is_err());
        }

        // serialized cycles of 1s + 2s each, never overlapping
        assert!(started.elapsed() >= Duration::from_secs(9));
    }

    #[tokio::test]
    async fn test_dead_client_is_discarded() {
        let settings = DatabaseSettings {
            connect_attempts: 1,
            ..unreachable_settings()
        };
        let pool = ConnectionPool::new(settings);

        let dead = Client::with_uri_str("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=50")
            .await
            .unwrap();
        *pool.client.write().await = Some(dead);

        assert!(!pool.health_check().await);
        let result = pool.acquire().await;

        assert!(matches!(
            result,
            Err(DirectoryError::Connection { attempts: 1, .. })
        ));
        assert!(no_cached_client(&pool).await);
    }

    #[tokio::test]
    async fn test_health_check_without_connection() {
        let pool = ConnectionPool::new(DatabaseSettings::default());
        assert!(!pool.health_check().await);
        // closing an unopened pool is a no-op
        pool.close().await;
        assert!(no_cached_client(&pool).await);
    }
}
