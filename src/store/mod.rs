//! Persistence layer.
//!
//! Every component receives an `Arc<dyn Store>` at construction; nothing reaches for a
//! global connection. [`PgStore`] backs the running service, [`MemoryStore`] backs the
//! test-suite.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Todo, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage operations over the `users` and `todos` tables.
///
/// Each method is a single unit of work: it either commits completely or fails.
#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts a user. Fails with `UsernameTaken` if the username already exists; this
    /// check is authoritative even when two signups race.
    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<User, AppError>;

    /// Case-sensitive lookup.
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Inserts a todo with `completed = false` and returns it with its assigned id.
    async fn insert_todo(
        &self,
        owner_id: i32,
        title: &str,
        description: Option<&str>,
    ) -> Result<Todo, AppError>;

    /// All todos owned by `owner_id`, in ascending id order.
    async fn list_todos(&self, owner_id: i32) -> Result<Vec<Todo>, AppError>;

    /// Looks a todo up by id alone, whoever owns it.
    async fn find_todo(&self, id: i32) -> Result<Option<Todo>, AppError>;

    /// Overwrites the mutable fields of the stored todo with `todo.id`. Fails with
    /// `NotFound` if it has been deleted in the meantime.
    async fn save_todo(&self, todo: &Todo) -> Result<Todo, AppError>;

    /// Returns whether a row was removed.
    async fn delete_todo(&self, id: i32) -> Result<bool, AppError>;
}
