use std::path::PathBuf;
use std::sync::Arc;

use fleet_driver::models::{Driver, Professional, Session, User};
use fleet_driver::state::{FileSessionStorage, SessionStorage, SessionStore, DRIVER_KEY, USER_KEY};

fn session_path() -> PathBuf {
    std::env::temp_dir().join(format!("fleet-session-{}.json", uuid::Uuid::new_v4()))
}

fn session() -> Session {
    Session {
        user: User {
            id: 10,
            username: "joao".to_string(),
            email: None,
        },
        token: "file-token".to_string(),
        professional: Professional {
            id: 20,
            user_id: 10,
            name: "João Lima".to_string(),
            registration: None,
        },
        driver: Driver {
            id: 30,
            professional_id: 20,
            license_number: Some("123456".to_string()),
            license_category: Some("C".to_string()),
        },
    }
}

#[tokio::test]
async fn test_session_survives_restart() {
    let path = session_path();

    let store = SessionStore::new(Arc::new(FileSessionStorage::new(&path)));
    store.establish(session()).await.unwrap();
    assert!(path.exists());

    // Nuevo proceso: nuevo store sobre el mismo archivo
    let restarted = SessionStore::new(Arc::new(FileSessionStorage::new(&path)));
    assert_eq!(restarted.restore().await.unwrap(), Some(session()));
    assert_eq!(restarted.token().await.as_deref(), Some("file-token"));

    restarted.clear().await.unwrap();
    assert!(!path.exists());
}

#[tokio::test]
async fn test_missing_file_means_no_session() {
    let store = SessionStore::new(Arc::new(FileSessionStorage::new(session_path())));
    assert_eq!(store.restore().await.unwrap(), None);
    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn test_partial_file_is_cleared() {
    let path = session_path();
    let storage = FileSessionStorage::new(&path);
    SessionStore::new(Arc::new(FileSessionStorage::new(&path)))
        .establish(session())
        .await
        .unwrap();

    let mut entries = storage.load().await.unwrap();
    entries.remove(DRIVER_KEY);
    assert!(entries.contains_key(USER_KEY));
    storage.save_all(entries).await.unwrap();

    let store = SessionStore::new(Arc::new(FileSessionStorage::new(&path)));
    assert_eq!(store.restore().await.unwrap(), None);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_corrupt_file_is_cleared() {
    let path = session_path();
    tokio::fs::write(&path, "{ not json").await.unwrap();

    let store = SessionStore::new(Arc::new(FileSessionStorage::new(&path)));
    assert_eq!(store.restore().await.unwrap(), None);
    assert!(!path.exists());
}
