//! Transport between the view-state and the todos service.
//!
//! [`TodoApi`] futures are `Send` on native targets. On `wasm32` they are
//! not, so browser transports built on `fetch` can implement it.

use async_trait::async_trait;
use todos_shared::{Task, TaskId};

/// Error type for calls to the service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response, or the body did not decode.
    #[error("request error: {0}")]
    Request(String),

    /// The service answered with a non-2xx status.
    #[error("server error: status {status}: {message}")]
    Status { status: u16, message: String },
}

/// The operations the view-state issues.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait TodoApi {
    async fn list(&self) -> Result<Vec<Task>, ClientError>;

    async fn create(&self, title: &str) -> Result<Task, ClientError>;

    async fn delete(&self, id: &TaskId) -> Result<(), ClientError>;
}

#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpTodoApi;

#[cfg(not(target_arch = "wasm32"))]
mod http {
    use super::{ClientError, TodoApi};
    use async_trait::async_trait;
    use todos_shared::{MessageResponse, NewTask, Task, TaskId};

    impl From<reqwest::Error> for ClientError {
        fn from(e: reqwest::Error) -> Self {
            ClientError::Request(e.to_string())
        }
    }

    /// [`TodoApi`] over HTTP with JSON bodies.
    #[derive(Debug, Clone)]
    pub struct HttpTodoApi {
        client: reqwest::Client,
        base_url: String,
    }

    impl HttpTodoApi {
        /// `base_url` is the list endpoint, e.g. `http://127.0.0.1:5000/api/todos`.
        pub fn new(base_url: impl Into<String>) -> Self {
            let base_url = base_url.into().trim_end_matches('/').to_string();
            Self {
                client: reqwest::Client::new(),
                base_url,
            }
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }
    }

    /// Turn a non-2xx response into [`ClientError::Status`], using the
    /// `{ "message" }` body when the service sent one.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<MessageResponse>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    #[async_trait]
    impl TodoApi for HttpTodoApi {
        async fn list(&self) -> Result<Vec<Task>, ClientError> {
            let response = self.client.get(&self.base_url).send().await?;
            Ok(check(response).await?.json().await?)
        }

        async fn create(&self, title: &str) -> Result<Task, ClientError> {
            let response = self
                .client
                .post(&self.base_url)
                .json(&NewTask::new(title))
                .send()
                .await?;
            Ok(check(response).await?.json().await?)
        }

        async fn delete(&self, id: &TaskId) -> Result<(), ClientError> {
            let url = format!("{}/{}", self.base_url, id);
            let response = self.client.delete(url).send().await?;
            check(response).await?;
            Ok(())
        }
    }
}
