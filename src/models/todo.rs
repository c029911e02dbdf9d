use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A todo item as stored in the `todos` table and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    /// Assigned by the store on insert.
    pub id: i32,
    /// Always trimmed and non-empty.
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    /// The user who created the item. Never changes.
    pub owner_id: i32,
}

/// Input structure for creating a todo.
///
/// The title is trimmed before validation, so `"   "` fails the minimum length.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TodoInput {
    /// Between 1 and 200 characters after trimming.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// At most 1000 characters if provided.
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub description: Option<String>,
}

impl TodoInput {
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description,
        }
    }
}

/// A partial update. Absent (or `null`) fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TodoUpdate {
    #[validate(length(min = 1, max = 200))]
    #[serde(default)]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub completed: Option<bool>,
}

impl TodoUpdate {
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.map(|title| title.trim().to_string()),
            ..self
        }
    }

    /// Copies every supplied field onto `todo`.
    pub fn apply_to(self, todo: &mut Todo) {
        if let Some(title) = self.title {
            todo.title = title;
        }
        if let Some(description) = self.description {
            todo.description = Some(description);
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Todo {
        Todo {
            id: 1,
            title: "Write spec".to_string(),
            description: Some("first draft".to_string()),
            completed: false,
            owner_id: 3,
        }
    }

    #[test]
    fn test_todo_input_validation() {
        let valid = TodoInput {
            title: "  Buy milk  ".to_string(),
            description: None,
        }
        .trimmed();
        assert!(valid.validate().is_ok());
        assert_eq!(valid.title, "Buy milk");

        let blank = TodoInput {
            title: "   ".to_string(),
            description: None,
        }
        .trimmed();
        assert!(blank.validate().is_err(), "blank title must be rejected");

        let long_title = TodoInput {
            title: "a".repeat(201),
            description: None,
        };
        assert!(long_title.validate().is_err());

        let long_description = TodoInput {
            title: "ok".to_string(),
            description: Some("b".repeat(1001)),
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_update_applies_only_supplied_fields() {
        let mut todo = sample();
        TodoUpdate {
            completed: Some(true),
            ..Default::default()
        }
        .apply_to(&mut todo);

        assert!(todo.completed);
        assert_eq!(todo.title, "Write spec");
        assert_eq!(todo.description.as_deref(), Some("first draft"));
        assert_eq!(todo.owner_id, 3);
    }

    #[test]
    fn test_update_validation() {
        assert!(TodoUpdate::default().validate().is_ok());

        let blank_title = TodoUpdate {
            title: Some("  ".to_string()),
            ..Default::default()
        }
        .trimmed();
        assert!(blank_title.validate().is_err());
    }

    #[test]
    fn test_update_deserializes_missing_and_null_as_absent() {
        let update: TodoUpdate =
            serde_json::from_str(r#"{"completed": true, "description": null}"#).unwrap();
        assert_eq!(update.title, None);
        assert_eq!(update.description, None);
        assert_eq!(update.completed, Some(true));
    }
}
