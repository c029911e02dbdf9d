#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{body::MessageBody, dev::ServiceResponse, test, web};
use chrono::Duration;
use jsonwebtoken::Algorithm;
use serde_json::{json, Value};
use todokeep::auth::{AccessToken, PasswordHasher, TokenService};
use todokeep::store::MemoryStore;
use todokeep::AppState;

pub const JWT_SECRET: &[u8] = b"integration-test-secret";

pub fn token_service() -> TokenService {
    TokenService::new(JWT_SECRET, Algorithm::HS256, Duration::minutes(30))
}

/// Fresh state over an empty in-memory store. bcrypt runs at its minimum cost.
pub fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState::new(
        Arc::new(MemoryStore::new()),
        PasswordHasher::new(4),
        token_service(),
    ))
}

pub async fn signup<S, B>(app: &S, username: &str, password: &str) -> ServiceResponse<B>
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/signup")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    test::call_service(app, req).await
}

pub async fn login<S, B>(app: &S, username: &str, password: &str) -> ServiceResponse<B>
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/login")
        .set_form([("username", username), ("password", password)])
        .to_request();
    test::call_service(app, req).await
}

/// Signs up and logs in, returning the bearer token.
pub async fn register_and_login<S, B>(app: &S, username: &str, password: &str) -> String
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: MessageBody,
{
    let resp = signup(app, username, password).await;
    assert!(
        resp.status().is_success(),
        "signup of {} failed with {}",
        username,
        resp.status()
    );

    let resp = login(app, username, password).await;
    assert!(resp.status().is_success(), "login of {} failed", username);
    let token: AccessToken = test::read_body_json(resp).await;
    token.access_token
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

pub async fn body_json<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    let bytes = test::read_body(resp).await;
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}
