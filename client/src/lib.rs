//! Client side of the todos service.
//!
//! [`TodoState`] keeps the list a user sees in step with the service through
//! a [`TodoApi`]; [`HttpTodoApi`] is the HTTP implementation.
//!
//! ```ignore
//! let mut todos = TodoState::new(HttpTodoApi::new("http://127.0.0.1:5000/api/todos"));
//! todos.load().await;
//! todos.set_pending_title("Buy milk");
//! todos.submit().await;
//! print!("{todos}");
//! ```

pub mod api;
pub mod state;

pub use api::{ClientError, TodoApi};
#[cfg(not(target_arch = "wasm32"))]
pub use api::HttpTodoApi;
pub use state::{TodoItem, TodoState};
