//! Round trips against a live MongoDB. Run with:
//!
//! ```bash
//! MONGODB_URI=mongodb://localhost:27017 cargo test --test mongo_tests -- --ignored
//! ```

use roster::config::DatabaseSettings;
use roster::model::{EmployeePatch, generate_id};
use roster::storage::{ConnectionPool, DirectoryStore, MongoStore};

fn settings() -> DatabaseSettings {
    let mut settings = DatabaseSettings::default();
    if let Ok(uri) = std::env::var("MONGODB_URI") {
        settings.uri = uri;
    }
    settings.name = format!("roster_test_{}", generate_id());
    settings
}

async fn drop_database(settings: &DatabaseSettings) {
    let client = mongodb::Client::with_uri_str(&settings.uri).await.unwrap();
    client.database(&settings.name).drop().await.unwrap();
}

#[tokio::test]
#[ignore = "needs a running MongoDB"]
async fn test_seed_and_crud_round_trip() {
    let settings = settings();
    let store = MongoStore::new(ConnectionPool::new(settings.clone()));

    store.ensure_connected().await.unwrap();
    assert!(store.health_check().await);
    assert_eq!(store.list_employees().await.unwrap().len(), 11);
    assert_eq!(store.list_departments().await.unwrap().len(), 5);

    let patch = EmployeePatch {
        salary: Some(123_456),
        ..Default::default()
    };
    let updated = store.update_employee("1", &patch).await.unwrap().unwrap();
    assert_eq!(updated.salary, 123_456);
    assert_eq!(updated.name, "John Doe");

    let finance = store.employees_by_department("Finance").await.unwrap();
    assert_eq!(finance.len(), 1);

    assert!(store.delete_employee("e6").await.unwrap());
    assert!(!store.delete_employee("e6").await.unwrap());
    assert!(store.get_employee("e6").await.unwrap().is_none());

    store.close().await;
    assert!(!store.health_check().await);

    drop_database(&settings).await;
}

#[tokio::test]
#[ignore = "needs a running MongoDB"]
async fn test_reconnect_does_not_reseed() {
    let settings = settings();
    let store = MongoStore::new(ConnectionPool::new(settings.clone()));

    store.ensure_connected().await.unwrap();
    assert!(store.delete_employee("e1").await.unwrap());
    store.close().await;

    // a fresh connect finds data and leaves it alone
    store.ensure_connected().await.unwrap();
    assert_eq!(store.list_employees().await.unwrap().len(), 10);

    store.close().await;
    drop_database(&settings).await;
}
