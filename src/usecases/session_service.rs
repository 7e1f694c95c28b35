//! Handle sign in / sign up / sign out. Delegates storage to UserStorePort.

use crate::domain::{DomainError, User};
use crate::ports::UserStorePort;
use std::sync::Arc;
use tracing::info;

pub const MIN_PASSWORD_LEN: usize = 6;

pub struct SessionService {
    store: Arc<dyn UserStorePort>,
}

impl SessionService {
    pub fn new(store: Arc<dyn UserStorePort>) -> Self {
        Self { store }
    }

    /// User of the persisted session, if any.
    pub async fn current_user(&self) -> Result<Option<User>, DomainError> {
        self.store.get_current_user().await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::Auth(
                "Please enter both email and password".to_string(),
            ));
        }

        let user = self
            .store
            .find_user_by_credentials(email, password)
            .await?
            .ok_or_else(|| DomainError::Auth("Invalid email or password".to_string()))?;

        self.store.set_current_user(Some(&user)).await?;
        info!(user_id = %user.id, "signed in");
        Ok(user)
    }

    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User, DomainError> {
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() || password.is_empty() || confirm_password.is_empty()
        {
            return Err(DomainError::Auth("Please fill in all fields".to_string()));
        }
        if password != confirm_password {
            return Err(DomainError::Auth("Passwords do not match".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::Auth(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }

        let user = self.store.create_user(name, email, password).await?;
        self.store.set_current_user(Some(&user)).await?;
        info!(user_id = %user.id, "signed up");
        Ok(user)
    }

    pub async fn logout(&self) -> Result<(), DomainError> {
        self.store.set_current_user(None).await?;
        info!("signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::JsonUserStore;
    use tempfile::{TempDir, tempdir};

    fn service() -> (TempDir, SessionService) {
        let dir = tempdir().unwrap();
        let store = Arc::new(JsonUserStore::new(dir.path().join("users.json")));
        (dir, SessionService::new(store))
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let (_dir, svc) = service();
        let user = svc
            .signup("Ada", "ada@example.com", "secret1", "secret1")
            .await
            .unwrap();
        assert_eq!(svc.current_user().await.unwrap(), Some(user.clone()));

        svc.logout().await.unwrap();
        assert!(svc.current_user().await.unwrap().is_none());

        let again = svc.login("ADA@example.com", "secret1").await.unwrap();
        assert_eq!(again, user);
        assert_eq!(svc.current_user().await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_login_validation() {
        let (_dir, svc) = service();
        let err = svc.login("", "x").await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter both email and password");

        let err = svc.login("nobody@example.com", "secret1").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let (_dir, svc) = service();
        let err = svc.signup("", "a@b.c", "secret1", "secret1").await.unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all fields");

        let err = svc
            .signup("A", "a@b.c", "secret1", "secret2")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");

        let err = svc.signup("A", "a@b.c", "abc", "abc").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Password must be at least 6 characters long"
        );
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let (_dir, svc) = service();
        svc.signup("A", "a@b.c", "secret1", "secret1").await.unwrap();
        let err = svc
            .signup("B", "A@b.C", "secret1", "secret1")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User with this email already exists");
    }
}
