//! The embedded browser app and its static assets.

use crate::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use rust_embed::RustEmbed;
use serde::Serialize;
use todos_shared::{MessageResponse, PageConfig};

/// The page template. Only ever served through [`Page`].
#[derive(RustEmbed)]
#[folder = "$TODOS_FRONTEND_DIST"]
#[include = "index.html"]
struct Template;

/// Everything else the build produced: the wasm bundle, its JS glue, the icon.
#[derive(RustEmbed)]
#[folder = "$TODOS_FRONTEND_DIST"]
#[exclude = "index.html"]
pub struct StaticAssets;

const CONFIG_PLACEHOLDER: &str = "<!--TODOS_CONFIG-->";

/// Response wrapper that renders `index.html` with `T` injected as JSON.
pub struct Page<T>(pub T);

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        let config_json = match serde_json::to_string(&self.0) {
            Ok(json) => json,
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to serialize page config: {e}"),
                )
                    .into_response();
            }
        };

        let Some(content) = Template::get("index.html") else {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Page assets not found.").into_response();
        };

        let html = String::from_utf8_lossy(&content.data);
        let script = format!(
            r#"<script id="todos-config" type="application/json">{}</script>"#,
            config_json.replace("</", "<\\/")
        );
        Html(html.replace(CONFIG_PLACEHOLDER, &script)).into_response()
    }
}

pub async fn index(State(state): State<AppState>) -> Page<PageConfig> {
    Page(PageConfig {
        api_base: state.prefix().to_string(),
    })
}

/// Fallback: serve an embedded asset or answer 404.
pub async fn static_asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(MessageResponse::new("Not found")),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_to_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn page_injects_config_into_html() {
        let response = Page(PageConfig {
            api_base: "/todos".into(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_string(response).await;
        assert!(body.contains(r#"<script id="todos-config" type="application/json">"#));
        assert!(body.contains(r#""apiBase":"/todos""#));
        assert!(body.contains(r#"<canvas id="the_canvas_id">"#));
        assert!(!body.contains(CONFIG_PLACEHOLDER));
    }

    #[tokio::test]
    async fn page_escapes_script_closing_tag() {
        let response = Page(PageConfig {
            api_base: "</script><script>alert(1)".into(),
        })
        .into_response();
        let body = body_to_string(response).await;

        assert!(body.contains(r#"<\/script>"#));
        assert!(!body.contains("</script><script>"));
    }

    #[tokio::test]
    async fn static_asset_serves_icon_with_mime() {
        let response = static_asset("/favicon.svg".parse().unwrap()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert_eq!(content_type, "image/svg+xml");
    }

    #[tokio::test]
    async fn static_asset_never_serves_raw_template() {
        let response = static_asset("/index.html".parse().unwrap()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn static_asset_unknown_path_is_not_found() {
        let response = static_asset("/nope.txt".parse().unwrap()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
