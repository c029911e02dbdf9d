use crate::{
    auth::{LoginForm, SignupRequest},
    error::AppError,
    state::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;

/// Register a new user
///
/// Creates a new user account. No token is returned; the client logs in next.
///
/// ## Responses:
/// - `201 Created`: `{"message": "User created successfully"}`.
/// - `400 Bad Request`: Malformed JSON, or the username is already taken.
/// - `422 Unprocessable Entity`: Username not 3..=50 chars, or password under 6 chars.
#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    payload: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    state.auth.signup(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "User created successfully"
    })))
}

/// Login user
///
/// Accepts a form-encoded `username` and `password` and returns
/// `{"access_token": "...", "token_type": "bearer"}`.
///
/// ## Responses:
/// - `200 OK`: Credentials accepted.
/// - `400 Bad Request`: The form is missing a field.
/// - `401 Unauthorized`: Unknown user or wrong password (same body for both).
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> Result<impl Responder, AppError> {
    let token = state.auth.login(&form.username, &form.password).await?;
    Ok(HttpResponse::Ok().json(token))
}
