use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{TodoInput, TodoUpdate},
    state::AppState,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;

/// Lists the caller's todos.
///
/// ## Responses:
/// - `200 OK`: A JSON array of `Todo` objects, possibly empty.
/// - `401 Unauthorized`: Missing or invalid bearer token.
#[get("")]
pub async fn list_todos(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl Responder, AppError> {
    let todos = state.todos.list(&user).await?;
    Ok(HttpResponse::Ok().json(todos))
}

/// Creates a new todo owned by the caller.
///
/// ## Request Body:
/// - `title`: Required; trimmed, then 1 to 200 characters.
/// - `description` (optional): Up to 1000 characters.
///
/// ## Responses:
/// - `200 OK`: The stored `Todo`, with `completed: false`.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `422 Unprocessable Entity`: Title blank or too long, description too long.
#[post("")]
pub async fn create_todo(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    payload: web::Json<TodoInput>,
) -> Result<impl Responder, AppError> {
    let todo = state.todos.create(&user, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(todo))
}

/// Applies a partial update to one of the caller's todos.
///
/// ## Responses:
/// - `200 OK`: The updated `Todo`.
/// - `403 Forbidden`: The todo belongs to another user.
/// - `404 Not Found`: No todo has this id.
/// - `422 Unprocessable Entity`: A supplied field is out of range.
#[put("/{id}")]
pub async fn update_todo(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    todo_id: web::Path<i32>,
    payload: web::Json<TodoUpdate>,
) -> Result<impl Responder, AppError> {
    let todo = state
        .todos
        .update(&user, todo_id.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(todo))
}

/// Deletes one of the caller's todos.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Todo deleted"}`.
/// - `403 Forbidden`: The todo belongs to another user.
/// - `404 Not Found`: No todo has this id.
#[delete("/{id}")]
pub async fn delete_todo(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    todo_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    state.todos.delete(&user, todo_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Todo deleted" })))
}
