use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account as stored in the `users` table.
///
/// Deliberately not `Serialize`: the password hash must never reach a response body.
/// Use [`UserRead`] for anything sent to a client.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

/// Public view of a user, returned by `GET /me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRead {
    pub id: i32,
    pub username: String,
}

impl From<&User> for UserRead {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_read_omits_password_hash() {
        let user = User {
            id: 7,
            username: "alice".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
        };

        let json = serde_json::to_value(UserRead::from(&user)).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 7, "username": "alice" }));
    }
}
