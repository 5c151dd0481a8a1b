//! Browser entry points.

use crate::session::Session;
use complexwonder_core::{get_plot_config, CanvasSize};
use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

/// Install the panic hook and route `log` to the browser console.
#[wasm_bindgen]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);
}

/// A plotting session driven from JavaScript.
///
/// The page calls `tick` from `requestAnimationFrame`, uploads `positions`
/// and `colors` when it returns true, and draws `vertex_count` vertices
/// every frame.
#[wasm_bindgen]
pub struct Plotter {
    session: Session,
}

#[wasm_bindgen]
impl Plotter {
    #[wasm_bindgen(constructor)]
    pub fn new(config_id: &str, width: u32, height: u32) -> Result<Plotter, JsValue> {
        let config = get_plot_config(config_id)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown plot config: {}", config_id)))?;
        log::info!("Plotter '{}' at {}x{}", config.id, width, height);
        let session = Session::new(config, CanvasSize::new(width, height))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Plotter { session })
    }

    /// Compile and install an expression. Errors carry the syntax message.
    pub fn commit_expression(&mut self, text: &str) -> Result<(), JsValue> {
        self.session
            .commit_expression(text)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Apply a JSON-encoded input event.
    pub fn dispatch(&mut self, json: &str) -> Result<(), JsValue> {
        self.session
            .dispatch(json)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<(), JsValue> {
        self.session
            .pan(dx, dy)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn zoom(&mut self, factor: f64) -> Result<(), JsValue> {
        self.session
            .zoom(factor)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn zoom_at(&mut self, factor: f64, x: f64, y: f64) -> Result<(), JsValue> {
        self.session
            .zoom_at(factor, x, y)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.session
            .resize(width, height)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Returns true when the mesh was rebuilt and buffers need re-uploading.
    pub fn tick(&mut self) -> bool {
        self.session.tick()
    }

    pub fn positions(&self) -> Float32Array {
        Float32Array::from(&self.session.mesh().positions()[..])
    }

    pub fn colors(&self) -> Float32Array {
        Float32Array::from(&self.session.mesh().colors()[..])
    }

    pub fn barycentrics(&self) -> Float32Array {
        Float32Array::from(&self.session.mesh().barycentrics()[..])
    }

    pub fn vertex_count(&self) -> u32 {
        self.session.mesh().vertex_count() as u32
    }

    pub fn last_rebuild_ms(&self) -> f64 {
        self.session.stats().last_rebuild_ms
    }

    /// Rebuild statistics as JSON.
    pub fn stats_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.stats())
            .map_err(|e| JsValue::from_str(&format!("Serialize stats: {}", e)))
    }

    /// Text of the installed expression.
    pub fn expression(&self) -> String {
        self.session.source().to_string()
    }
}
