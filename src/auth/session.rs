use std::sync::Arc;

use actix_web::http::header::{HeaderMap, AUTHORIZATION};

use super::TokenService;
use crate::error::AppError;
use crate::models::User;
use crate::store::Store;

/// Turns a bearer token into the user it was issued to.
#[derive(Clone)]
pub struct SessionResolver {
    store: Arc<dyn Store>,
    tokens: TokenService,
}

impl SessionResolver {
    pub fn new(store: Arc<dyn Store>, tokens: TokenService) -> Self {
        Self { store, tokens }
    }

    /// Verifies `token` and loads its subject.
    ///
    /// A bad token and a token naming a user who no longer exists both fail with the
    /// same `Unauthorized`.
    pub async fn resolve(&self, token: &str) -> Result<User, AppError> {
        let username = self.tokens.verify(token)?;

        match self.store.find_user_by_username(&username).await? {
            Some(user) => Ok(user),
            None => {
                log::debug!("Token subject {} does not match any user", username);
                Err(AppError::Unauthorized)
            }
        }
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
/// The scheme is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
