#![doc = "The `todokeep` library crate."]
#![doc = ""]
#![doc = "A multi-user todo service: users sign up, log in for a bearer token, and manage"]
#![doc = "a private list of todo items. This crate holds the domain models, authentication,"]
#![doc = "ownership rules, persistence, routing configuration and error handling. It is used"]
#![doc = "by the main binary (`main.rs`) to construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod todos;

pub use crate::error::AppError;
pub use crate::state::AppState;
