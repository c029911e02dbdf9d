use std::sync::Arc;

use chrono::Duration;
use secrecy::ExposeSecret;

use crate::auth::{AuthService, PasswordHasher, SessionResolver, TokenService};
use crate::config::Config;
use crate::store::Store;
use crate::todos::TodoService;

/// Shared application state, registered once as `web::Data<AppState>`.
///
/// All three services hold the same store handle.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub sessions: SessionResolver,
    pub todos: TodoService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self {
            auth: AuthService::new(store.clone(), hasher, tokens.clone()),
            sessions: SessionResolver::new(store.clone(), tokens),
            todos: TodoService::new(store),
        }
    }

    pub fn from_config(store: Arc<dyn Store>, config: &Config) -> Self {
        let tokens = TokenService::new(
            config.jwt_secret.expose_secret().as_bytes(),
            config.jwt_algorithm,
            Duration::minutes(config.token_ttl_minutes),
        );
        Self::new(store, PasswordHasher::new(config.bcrypt_cost), tokens)
    }
}
