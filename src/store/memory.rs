use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Store;
use crate::error::AppError;
use crate::models::{Todo, User};

/// In-memory store with sequential ids starting at 1.
///
/// Every write takes the single write lock, so the username check and the insert are
/// one atomic step.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    todos: BTreeMap<i32, Todo>,
    last_user_id: i32,
    last_todo_id: i32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|user| user.username == username) {
            return Err(AppError::UsernameTaken);
        }

        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn insert_todo(
        &self,
        owner_id: i32,
        title: &str,
        description: Option<&str>,
    ) -> Result<Todo, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&owner_id) {
            return Err(AppError::DatabaseError(format!(
                "todos.owner_id {} references a missing user",
                owner_id
            )));
        }

        tables.last_todo_id += 1;
        let todo = Todo {
            id: tables.last_todo_id,
            title: title.to_string(),
            description: description.map(str::to_string),
            completed: false,
            owner_id,
        };
        tables.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn list_todos(&self, owner_id: i32) -> Result<Vec<Todo>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .todos
            .values()
            .filter(|todo| todo.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_todo(&self, id: i32) -> Result<Option<Todo>, AppError> {
        Ok(self.tables.read().await.todos.get(&id).cloned())
    }

    async fn save_todo(&self, todo: &Todo) -> Result<Todo, AppError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .todos
            .get_mut(&todo.id)
            .ok_or_else(|| AppError::NotFound("Todo not found".into()))?;

        stored.title = todo.title.clone();
        stored.description = todo.description.clone();
        stored.completed = todo.completed;
        Ok(stored.clone())
    }

    async fn delete_todo(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.tables.write().await.todos.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn test_usernames_are_unique_and_case_sensitive() {
        let store = MemoryStore::new();
        let alice = store.insert_user("alice", "hash").await.unwrap();
        assert_eq!(alice.id, 1);

        assert!(matches!(
            store.insert_user("alice", "other").await,
            Err(AppError::UsernameTaken)
        ));

        let upper = store.insert_user("Alice", "hash").await.unwrap();
        assert_eq!(upper.id, 2);
        assert_eq!(
            store.find_user_by_username("alice").await.unwrap(),
            Some(alice)
        );
    }

    #[actix_rt::test]
    async fn test_todo_rows() {
        let store = MemoryStore::new();
        let owner = store.insert_user("owner", "hash").await.unwrap();
        let other = store.insert_user("other", "hash").await.unwrap();

        let first = store.insert_todo(owner.id, "one", None).await.unwrap();
        store.insert_todo(other.id, "theirs", None).await.unwrap();
        let third = store.insert_todo(owner.id, "three", Some("d")).await.unwrap();

        assert_eq!(first.id, 1);
        assert!(!first.completed);
        let listed = store.list_todos(owner.id).await.unwrap();
        assert_eq!(listed, vec![first.clone(), third]);

        let mut changed = first.clone();
        changed.completed = true;
        changed.owner_id = other.id;
        let saved = store.save_todo(&changed).await.unwrap();
        assert!(saved.completed);
        assert_eq!(saved.owner_id, owner.id, "owner is never rewritten");

        assert!(store.delete_todo(first.id).await.unwrap());
        assert!(!store.delete_todo(first.id).await.unwrap());
        assert!(store.find_todo(first.id).await.unwrap().is_none());
        assert!(matches!(
            store.save_todo(&changed).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_rt::test]
    async fn test_todo_requires_existing_owner() {
        let store = MemoryStore::new();
        assert!(store.insert_todo(42, "orphan", None).await.is_err());
    }
}
