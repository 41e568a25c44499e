//! [`TodoApi`] over the browser's `fetch`.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use todos_client::{ClientError, TodoApi};
use todos_shared::{MessageResponse, NewTask, Task, TaskId};

#[derive(Debug, Clone)]
pub struct GlooTodoApi {
    base_url: String,
}

impl GlooTodoApi {
    /// `base_url` is the list endpoint as the page sees it, e.g. `/api/todos`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }
}

fn request_error(e: gloo_net::Error) -> ClientError {
    ClientError::Request(e.to_string())
}

async fn check(response: Response) -> Result<Response, ClientError> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let message = match response.json::<MessageResponse>().await {
        Ok(body) => body.message,
        Err(_) => response.status_text(),
    };
    Err(ClientError::Status { status, message })
}

#[async_trait(?Send)]
impl TodoApi for GlooTodoApi {
    async fn list(&self) -> Result<Vec<Task>, ClientError> {
        let response = Request::get(&self.base_url)
            .send()
            .await
            .map_err(request_error)?;
        check(response).await?.json().await.map_err(request_error)
    }

    async fn create(&self, title: &str) -> Result<Task, ClientError> {
        let response = Request::post(&self.base_url)
            .json(&NewTask::new(title))
            .map_err(request_error)?
            .send()
            .await
            .map_err(request_error)?;
        check(response).await?.json().await.map_err(request_error)
    }

    async fn delete(&self, id: &TaskId) -> Result<(), ClientError> {
        let url = format!("{}/{}", self.base_url, id);
        let response = Request::delete(&url).send().await.map_err(request_error)?;
        check(response).await?;
        Ok(())
    }
}
