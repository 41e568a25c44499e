//! Mapping of handler failures onto HTTP responses.

use crate::store::StoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use todos_shared::MessageResponse;

/// Everything a handler can fail with.
///
/// Request errors carry their message to the caller. Store errors are logged
/// and answered with a generic message only.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| ApiError::Store { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(message) => message,
            ApiError::NotFound(message) => message.to_string(),
            ApiError::Store { context, source } => {
                tracing::error!(error = %source, "{context}");
                context.to_string()
            }
        };
        (status, Json(MessageResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn message_of(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice::<MessageResponse>(&bytes)
            .unwrap()
            .message
    }

    #[tokio::test]
    async fn store_errors_hide_their_cause() {
        let err = ApiError::store("Error fetching todos")(StoreError::Document {
            id: "x".into(),
            reason: "secret detail".into(),
        });
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message_of(response).await, "Error fetching todos");
    }

    #[tokio::test]
    async fn request_errors_keep_their_message() {
        let response = ApiError::NotFound("Todo not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(message_of(response).await, "Todo not found");

        let response = ApiError::BadRequest("Invalid todo id".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message_of(response).await, "Invalid todo id");
    }
}
