//! Implements UserStorePort using a JSON file.
//!
//! Holds registered users and the current-session pointer. Passwords are
//! kept as salted SHA-256 digests.

use crate::domain::{DomainError, User};
use crate::ports::UserStorePort;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredUser {
    #[serde(flatten)]
    user: User,
    salt: String,
    password_sha256: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    users: Vec<StoredUser>,
    current_user_id: Option<String>,
}

fn password_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// JSON file-based user store.
pub struct JsonUserStore {
    path: PathBuf,
    cache: tokio::sync::RwLock<StoreData>,
}

impl JsonUserStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: tokio::sync::RwLock::new(StoreData::default()),
        }
    }

    /// Load from disk. A missing file is an empty store; a corrupt one is an error.
    pub async fn load(&self) -> Result<(), DomainError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s)
                .map_err(|e| DomainError::Store(format!("{}: {}", self.path.display(), e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
            Err(e) => return Err(DomainError::Store(e.to_string())),
        };
        info!(path = %self.path.display(), users = data.users.len(), "user store loaded");
        *self.cache.write().await = data;
        Ok(())
    }

    /// Write to a temp file, fsync, then rename over the target.
    async fn save(&self, data: &StoreData) -> Result<(), DomainError> {
        let json =
            serde_json::to_string_pretty(data).map_err(|e| DomainError::Store(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Store(format!("create data dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Store(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Store(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Store(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Store(format!("atomic rename failed: {}", e)))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl UserStorePort for JsonUserStore {
    async fn find_user_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let cache = self.cache.read().await;
        Ok(cache
            .users
            .iter()
            .find(|u| {
                u.user.email.eq_ignore_ascii_case(email)
                    && u.password_sha256 == password_digest(&u.salt, password)
            })
            .map(|u| u.user.clone()))
    }

    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        let mut cache = self.cache.write().await;
        if cache
            .users
            .iter()
            .any(|u| u.user.email.eq_ignore_ascii_case(email))
        {
            return Err(DomainError::Auth(
                "User with this email already exists".to_string(),
            ));
        }

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        let salt = uuid::Uuid::new_v4().simple().to_string();
        let password_sha256 = password_digest(&salt, password);
        let mut next = cache.clone();
        next.users.push(StoredUser {
            user: user.clone(),
            salt,
            password_sha256,
        });
        self.save(&next).await?;
        *cache = next;

        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    async fn set_current_user(&self, user: Option<&User>) -> Result<(), DomainError> {
        let mut cache = self.cache.write().await;
        let mut next = cache.clone();
        next.current_user_id = user.map(|u| u.id.clone());
        self.save(&next).await?;
        *cache = next;
        Ok(())
    }

    async fn get_current_user(&self) -> Result<Option<User>, DomainError> {
        let cache = self.cache.read().await;
        let Some(id) = cache.current_user_id.as_deref() else {
            return Ok(None);
        };
        Ok(cache
            .users
            .iter()
            .find(|u| u.user.id == id)
            .map(|u| u.user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_create_and_find() {
        let dir = tempdir().unwrap();
        let store = JsonUserStore::new(dir.path().join("users.json"));

        let user = store
            .create_user("Test User", "Test@Example.com", "password")
            .await
            .unwrap();

        let found = store
            .find_user_by_credentials("test@example.com", "password")
            .await
            .unwrap();
        assert_eq!(found, Some(user));

        let wrong = store
            .find_user_by_credentials("test@example.com", "Password")
            .await
            .unwrap();
        assert!(wrong.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let dir = tempdir().unwrap();
        let store = JsonUserStore::new(dir.path().join("users.json"));
        store.create_user("A", "a@b.c", "secret1").await.unwrap();

        let err = store.create_user("B", "A@B.C", "secret2").await.unwrap_err();
        assert_eq!(err.to_string(), "User with this email already exists");
    }

    #[tokio::test]
    async fn test_persists_across_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("users.json");

        let store = JsonUserStore::new(&path);
        let user = store.create_user("A", "a@b.c", "secret1").await.unwrap();
        store.set_current_user(Some(&user)).await.unwrap();

        let reloaded = JsonUserStore::new(&path);
        reloaded.load().await.unwrap();
        assert_eq!(reloaded.get_current_user().await.unwrap(), Some(user));

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("secret1"));

        reloaded.set_current_user(None).await.unwrap();
        assert!(reloaded.get_current_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_save_leaves_store_unchanged() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a dir").unwrap();
        let store = JsonUserStore::new(blocker.join("users.json"));

        assert!(store.create_user("A", "a@b.c", "secret1").await.is_err());
        let found = store
            .find_user_by_credentials("a@b.c", "secret1")
            .await
            .unwrap();
        assert!(found.is_none());

        // A retry must fail for the same I/O reason, not as a duplicate.
        let err = store
            .create_user("A", "a@b.c", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Store(_)));
    }

    #[tokio::test]
    async fn test_failed_logout_keeps_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("users.json");
        let store = JsonUserStore::new(&path);
        let user = store.create_user("A", "a@b.c", "secret1").await.unwrap();
        store.set_current_user(Some(&user)).await.unwrap();

        // Replace the data dir with a regular file so the next save fails.
        std::fs::remove_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data"), b"not a dir").unwrap();

        assert!(store.set_current_user(None).await.is_err());
        assert_eq!(store.get_current_user().await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let store = JsonUserStore::new(dir.path().join("users.json"));
        store.load().await.unwrap();
        assert!(store.get_current_user().await.unwrap().is_none());
    }
}
