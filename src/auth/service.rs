use std::sync::Arc;

use validator::Validate;

use super::{AccessToken, PasswordHasher, SignupRequest, TokenService, UserSummary};
use crate::error::AppError;
use crate::store::Store;

/// Signup and login.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Registers a new user. No token is issued; the client logs in afterwards.
    ///
    /// Fails with `ValidationError` for out-of-range fields and `UsernameTaken` if the
    /// username exists. The lookup gives the common case a cheap early exit; the store's
    /// own uniqueness guarantee covers concurrent signups.
    pub async fn signup(&self, request: SignupRequest) -> Result<UserSummary, AppError> {
        request.validate()?;

        if self
            .store
            .find_user_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::UsernameTaken);
        }

        let password_hash = self.hasher.hash_blocking(request.password).await?;
        let user = self
            .store
            .insert_user(&request.username, &password_hash)
            .await?;

        log::info!("Registered user {} (id {})", user.username, user.id);
        Ok(UserSummary {
            id: user.id,
            username: user.username,
        })
    }

    /// Exchanges a username and password for a bearer token.
    ///
    /// An unknown username and a wrong password both fail with `InvalidCredentials`,
    /// and both pay for one bcrypt operation at the configured cost.
    pub async fn login(&self, username: &str, password: &str) -> Result<AccessToken, AppError> {
        let user = match self.store.find_user_by_username(username).await? {
            Some(user) => user,
            None => {
                self.hasher.reject_blocking(password.to_string()).await?;
                log::warn!("Login failed for {}: no such user", username);
                return Err(AppError::InvalidCredentials);
            }
        };

        let verified = self
            .hasher
            .verify_blocking(password.to_string(), user.password_hash.clone())
            .await?;
        if !verified {
            log::warn!("Login failed for {}: wrong password", username);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.username)?;
        log::info!("User {} logged in", user.username);
        Ok(AccessToken::bearer(token))
    }
}
