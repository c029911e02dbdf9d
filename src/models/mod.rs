pub mod todo;
pub mod user;

pub use todo::{Todo, TodoInput, TodoUpdate};
pub use user::{User, UserRead};
