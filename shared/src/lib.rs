//! Shared types for the todos service and client.
//!
//! Both sides speak the same JSON: a task is `{ "_id": ..., "title": ..., ... }`
//! and every other response is `{ "message": ... }`.

pub mod api;
pub mod task;

pub use api::*;
pub use task::*;
