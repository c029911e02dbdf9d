pub mod auth;
pub mod health;
pub mod todos;
pub mod users;

use actix_web::web;

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Registers every route. `/me` and `/todos` sit behind `AuthMiddleware`; the rest is public.
///
/// Body and path extraction failures are turned into `AppError::BadRequest` so that every
/// error response has the same JSON shape.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|_err, _req| AppError::BadRequest("Invalid id".into()).into()),
    )
    .service(health::root)
    .service(health::health)
    .service(auth::signup)
    .service(auth::login)
    .service(
        web::scope("/me")
            .wrap(AuthMiddleware)
            .service(users::me),
    )
    .service(
        web::scope("/todos")
            .wrap(AuthMiddleware)
            .service(todos::list_todos)
            .service(todos::create_todo)
            .service(todos::update_todo)
            .service(todos::delete_todo),
    );
}
