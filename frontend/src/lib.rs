//! Browser entry point for the todos app.
//!
//! The server injects a [`PageConfig`] into `index.html`; the app reads it to
//! find the list endpoint and falls back to the default prefix without it.

mod api;
mod app;

use eframe::wasm_bindgen::{self, prelude::*};
use todos_shared::PageConfig;

pub use api::GlooTodoApi;
pub use app::TodoApp;

/// WASM entry point - called from JavaScript.
#[wasm_bindgen(start)]
pub fn main() {
    eframe::WebLogger::init(log::LevelFilter::Info).ok();

    wasm_bindgen_futures::spawn_local(async {
        if let Err(err) = start().await {
            log::error!("Failed to start the app: {err:?}");
            if let Some(loading_text) = document().and_then(|d| d.get_element_by_id("loading_text"))
            {
                loading_text.set_inner_html(
                    "<p>The app has crashed. See the developer console for details.</p>",
                );
            }
        }
    });
}

async fn start() -> Result<(), JsValue> {
    let document = document().ok_or_else(|| JsValue::from_str("no document"))?;
    let config: PageConfig = read_page_config(&document).unwrap_or_default();
    log::info!("using todos endpoint {}", config.api_base);

    let canvas = document
        .get_element_by_id("the_canvas_id")
        .ok_or_else(|| JsValue::from_str("no canvas"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()?;

    let api = GlooTodoApi::new(config.api_base);
    eframe::WebRunner::new()
        .start(
            canvas,
            eframe::WebOptions::default(),
            Box::new(move |cc| Ok(Box::new(TodoApp::new(api, &cc.egui_ctx)))),
        )
        .await?;

    if let Some(loading_text) = document.get_element_by_id("loading_text") {
        loading_text.remove();
    }
    Ok(())
}

fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

/// Read the settings the server injected as a JSON script tag.
fn read_page_config(document: &web_sys::Document) -> Option<PageConfig> {
    let script = document.get_element_by_id("todos-config")?;
    let json = script.text_content()?;
    serde_json::from_str(&json).ok()
}
