#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod app;
pub mod bridge;
pub mod ui;
pub mod wasm_utils;

/// WASM entry point for the onboarding UI
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start(canvas_id: &str) -> Result<(), wasm_bindgen::JsValue> {
    wasm_utils::set_panic_hook();

    let config = onboarding::Config::default();
    let backend = onboarding::connect(&config.api).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let canvas = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(canvas_id))
        .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        .ok_or_else(|| JsValue::from_str(&format!("canvas #{} not found", canvas_id)))?;

    let web_options = eframe::WebOptions::default();
    wasm_utils::spawn_async(async move {
        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(app::OnboardingApp::new(cc, config, backend)))),
            )
            .await;

        if let Some(loading_text) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("loading_text"))
        {
            match start_result {
                Ok(_) => loading_text.remove(),
                Err(e) => {
                    loading_text.set_inner_html("<p>The app has crashed. See the developer console for details.</p>");
                    log::error!("failed to start eframe: {:?}", e);
                }
            }
        }
    });

    Ok(())
}
