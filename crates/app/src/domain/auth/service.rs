//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jam3a::{users::User, wizard::seller::SellerApplication};
use mockall::automock;
use tracing::{info, warn};

use crate::{
    api::{ApiClient, ApiError, envelope},
    domain::auth::{
        errors::AuthServiceError,
        records::{ApplicationReceipt, Credentials, Registration, SessionRecord},
    },
    session::{SessionStore, SessionToken},
};

/// Accounts backed by the REST API. Sessions are persisted through [`SessionStore`].
#[derive(Debug, Clone)]
pub struct HttpAuthService {
    api: Arc<ApiClient>,
    session: SessionStore,
}

impl HttpAuthService {
    /// Service calling `api` and storing sessions in `session`.
    #[must_use]
    pub fn new(api: Arc<ApiClient>, session: SessionStore) -> Self {
        Self { api, session }
    }

    fn store(&self, record: SessionRecord) -> Result<User, AuthServiceError> {
        let token = SessionToken::new(record.token)?;

        self.session.save(&token, &record.user)?;

        Ok(record.user)
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, credentials: Credentials) -> Result<User, AuthServiceError> {
        credentials.validate().map_err(AuthServiceError::Invalid)?;

        let body = match self.api.post("auth/login", &credentials).await {
            Ok(body) => body,
            Err(ApiError::Unauthorized { .. }) => return Err(AuthServiceError::InvalidCredentials),
            Err(error) => return Err(error.into()),
        };

        let user = self.store(envelope::single(body)?)?;

        info!(user = %user.id, "signed in");

        Ok(user)
    }

    async fn register(&self, registration: Registration) -> Result<User, AuthServiceError> {
        registration.validate().map_err(AuthServiceError::Invalid)?;

        let body = self.api.post("auth/register", &registration).await?;
        let user = self.store(envelope::single(body)?)?;

        info!(user = %user.id, "registered");

        Ok(user)
    }

    async fn current_user(&self) -> Result<User, AuthServiceError> {
        let body = self.api.get("auth/me", &[]).await?;
        let user: User = envelope::single(body)?;

        self.session.update_user(&user)?;

        Ok(user)
    }

    async fn logout(&self) -> Result<(), AuthServiceError> {
        let result = self.api.post_empty("auth/logout").await;

        self.session.purge()?;

        match result {
            Ok(_) | Err(ApiError::Unauthorized { .. }) => Ok(()),
            Err(error) => {
                warn!(%error, "backend logout failed, local session cleared anyway");
                Ok(())
            }
        }
    }

    async fn submit_seller_application(
        &self,
        application: SellerApplication,
    ) -> Result<ApplicationReceipt, AuthServiceError> {
        let body = self
            .api
            .post("auth/seller-application", &application)
            .await?;

        let receipt: ApplicationReceipt = envelope::single(body)?;

        info!(reference = %receipt.reference, "seller application submitted");

        Ok(receipt)
    }
}

/// Accounts, sessions and seller applications.
#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Signs in and stores the session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::InvalidCredentials`] when the backend rejects them.
    async fn login(&self, credentials: Credentials) -> Result<User, AuthServiceError>;

    /// Creates an account and stores the session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::Invalid`] for a malformed form.
    async fn register(&self, registration: Registration) -> Result<User, AuthServiceError>;

    /// Fetches the signed-in user and refreshes the cached profile.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::Unauthorized`] when no valid session exists.
    async fn current_user(&self) -> Result<User, AuthServiceError>;

    /// Ends the session, locally even when the backend cannot be reached.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::Session`] when the local session cannot be cleared.
    async fn logout(&self) -> Result<(), AuthServiceError>;

    /// Submits a seller onboarding application.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::Rejected`] when the backend refuses the application.
    async fn submit_seller_application(
        &self,
        application: SellerApplication,
    ) -> Result<ApplicationReceipt, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        config::client::ClientConfig,
        storage::{MemoryStorage, Storage, StorageKey},
    };

    use super::*;

    fn service() -> Result<(HttpAuthService, Arc<MemoryStorage>), ApiError> {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::new(storage.clone());
        let config = ClientConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            ..ClientConfig::default()
        };
        let api = ApiClient::new(&config, session.clone())?;

        Ok((HttpAuthService::new(Arc::new(api), session), storage))
    }

    #[test]
    fn storing_a_session_writes_token_and_user() -> TestResult {
        let (service, storage) = service()?;

        let record: SessionRecord = serde_json::from_value(json!({
            "accessToken": "tok-1",
            "user": { "_id": "u-1", "name": "Salem", "email": "salem@example.com" }
        }))?;

        let user = service.store(record)?;

        assert_eq!(user.id, "u-1");
        assert_eq!(storage.read(StorageKey::Token)?.as_deref(), Some("\"tok-1\""));
        assert!(storage.read(StorageKey::User)?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn invalid_forms_are_rejected_before_any_request() -> TestResult {
        let (service, _storage) = service()?;

        let result = service
            .login(Credentials {
                email: "not-an-email".to_string(),
                password: String::new(),
            })
            .await;

        let errors = match result {
            Err(AuthServiceError::Invalid(errors)) => Ok(errors),
            _ => Err("expected a validation error"),
        }?;

        assert_eq!(errors.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn logout_clears_the_session_even_offline() -> TestResult {
        let (service, storage) = service()?;

        service.store(serde_json::from_value(json!({
            "token": "tok-2",
            "user": { "id": "u-2" }
        }))?)?;

        service.logout().await?;

        assert_eq!(storage.read(StorageKey::Token)?, None);
        assert_eq!(storage.read(StorageKey::User)?, None);

        Ok(())
    }
}
