use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub mod math;
pub mod style;
pub mod config;
pub mod scene;
pub mod animation;
pub mod render;

use animation::AnimationSession;
use config::Settings;
use render::CanvasRenderer;

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    console_log::init_with_level(log::Level::Info).ok();
}

/// Postcard sketch state exposed to JavaScript
#[wasm_bindgen]
pub struct TajimiPostcard {
    renderer: CanvasRenderer,
    session: AnimationSession,
}

#[wasm_bindgen]
impl TajimiPostcard {
    /// Create a sketch with default settings drawing into `canvas`
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<TajimiPostcard, JsValue> {
        Self::with_settings(canvas, Settings::default())
    }

    /// Create a sketch with settings parsed from YAML
    #[wasm_bindgen]
    pub fn new_with_settings(canvas: HtmlCanvasElement, yaml: &str) -> Result<TajimiPostcard, JsValue> {
        let settings = Settings::from_yaml(yaml).map_err(to_js)?;
        Self::with_settings(canvas, settings)
    }

    fn with_settings(canvas: HtmlCanvasElement, settings: Settings) -> Result<TajimiPostcard, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or("Failed to get 2D context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let renderer = CanvasRenderer::new(ctx, canvas.width(), canvas.height());
        let session = AnimationSession::new(settings, random_seed());
        log::info!(
            "postcard ready: {} buildings, seed {}",
            session.postcard().tajimi.buildings.len(),
            session.seed()
        );

        Ok(Self { renderer, session })
    }

    /// Replace the settings from YAML and regenerate
    #[wasm_bindgen]
    pub fn load_settings(&mut self, yaml: &str) -> Result<(), JsValue> {
        let settings = Settings::from_yaml(yaml).map_err(to_js)?;
        self.session.set_settings(settings);
        Ok(())
    }

    /// Current (sanitized) settings as YAML
    #[wasm_bindgen]
    pub fn settings_yaml(&self) -> Result<String, JsValue> {
        self.session.settings().to_yaml().map_err(to_js)
    }

    /// Throw away the current street and build a new one
    #[wasm_bindgen]
    pub fn regenerate(&mut self) {
        self.session.regenerate_with_seed(random_seed());
    }

    /// Build the street for a known seed
    #[wasm_bindgen]
    pub fn regenerate_with_seed(&mut self, seed: u64) {
        self.session.regenerate_with_seed(seed);
    }

    /// Draw the current frame and advance the timeline if playing
    #[wasm_bindgen]
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.session.tick();
        self.draw()
    }

    /// Draw the current frame without advancing
    #[wasm_bindgen]
    pub fn draw(&self) -> Result<(), JsValue> {
        let postcard = self.session.postcard();
        self.renderer.render(
            &self.session.shapes(),
            postcard.view,
            self.session.settings().palette.background_color,
        )
    }

    // === Playback ===

    #[wasm_bindgen]
    pub fn play(&mut self) {
        self.session.play();
    }

    #[wasm_bindgen]
    pub fn pause(&mut self) {
        self.session.pause();
    }

    /// Toggle playback, returning the new state
    #[wasm_bindgen]
    pub fn toggle(&mut self) -> bool {
        self.session.toggle();
        self.session.is_playing()
    }

    #[wasm_bindgen]
    pub fn is_playing(&self) -> bool {
        self.session.is_playing()
    }

    #[wasm_bindgen]
    pub fn seek(&mut self, frame: u64) {
        self.session.seek(frame);
    }

    #[wasm_bindgen]
    pub fn frame(&self) -> u64 {
        self.session.frame()
    }

    #[wasm_bindgen]
    pub fn seed(&self) -> u64 {
        self.session.seed()
    }

    /// New tile colors, same layout
    #[wasm_bindgen]
    pub fn recolor_tiles(&mut self) {
        self.session.recolor_tiles();
    }

    #[wasm_bindgen]
    pub fn building_count(&self) -> usize {
        self.session.postcard().tajimi.buildings.len()
    }

    /// Resize the drawing surface; the postcard is refit on the next draw
    #[wasm_bindgen]
    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// 53 random bits from the host's `Math.random`
fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * (1u64 << 32) as f64) as u64;
    let lo = (js_sys::Math::random() * (1u64 << 21) as f64) as u64;
    (hi << 21) | lo
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::ConfigError;

    #[test]
    fn test_settings_parse_error_message() {
        let err = Settings::from_yaml("postal_width: [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let message = err.to_string();
        assert!(message.starts_with("settings YAML parse error"), "{}", message);
    }
}
