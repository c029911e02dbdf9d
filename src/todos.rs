//! Todo lifecycle, scoped to the owning user.
//!
//! Single-item operations check existence before ownership: an unknown id is always
//! `NotFound`, and `Forbidden` is only returned for an item that exists but belongs to
//! someone else.

use std::sync::Arc;

use validator::Validate;

use crate::error::AppError;
use crate::models::{Todo, TodoInput, TodoUpdate, User};
use crate::store::Store;

#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn Store>,
}

impl TodoService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Creates a todo owned by `owner`. The title is trimmed before validation.
    pub async fn create(&self, owner: &User, input: TodoInput) -> Result<Todo, AppError> {
        let input = input.trimmed();
        input.validate()?;

        let todo = self
            .store
            .insert_todo(owner.id, &input.title, input.description.as_deref())
            .await?;
        log::debug!("User {} created todo {}", owner.id, todo.id);
        Ok(todo)
    }

    /// Every todo owned by `owner`, oldest first. Never fails for an empty list.
    pub async fn list(&self, owner: &User) -> Result<Vec<Todo>, AppError> {
        self.store.list_todos(owner.id).await
    }

    /// Applies the supplied fields of `changes` and returns the stored result.
    pub async fn update(
        &self,
        owner: &User,
        todo_id: i32,
        changes: TodoUpdate,
    ) -> Result<Todo, AppError> {
        let mut todo = self.owned_todo(owner, todo_id, "update").await?;

        let changes = changes.trimmed();
        changes.validate()?;
        changes.apply_to(&mut todo);

        let saved = self.store.save_todo(&todo).await?;
        log::debug!("User {} updated todo {}", owner.id, saved.id);
        Ok(saved)
    }

    /// Permanently removes the todo.
    pub async fn delete(&self, owner: &User, todo_id: i32) -> Result<(), AppError> {
        let todo = self.owned_todo(owner, todo_id, "delete").await?;

        if !self.store.delete_todo(todo.id).await? {
            return Err(AppError::NotFound("Todo not found".into()));
        }
        log::debug!("User {} deleted todo {}", owner.id, todo.id);
        Ok(())
    }

    async fn owned_todo(&self, owner: &User, todo_id: i32, action: &str) -> Result<Todo, AppError> {
        let todo = self
            .store
            .find_todo(todo_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Todo not found".into()))?;

        if todo.owner_id != owner.id {
            return Err(AppError::Forbidden(format!(
                "Not authorized to {} this todo",
                action
            )));
        }
        Ok(todo)
    }
}
