use actix_web::{get, HttpResponse, Responder};

use crate::auth::CurrentUser;
use crate::models::UserRead;

/// Returns the id and username of the caller.
#[get("")]
pub async fn me(CurrentUser(user): CurrentUser) -> impl Responder {
    HttpResponse::Ok().json(UserRead::from(&user))
}
