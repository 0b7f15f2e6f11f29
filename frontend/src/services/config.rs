use crate::services::logging::Logger;
use shared::routes::project_id_from_path;
use shared::WidgetConfig;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

/// Id of the optional `<script type="application/json">` block holding overrides
pub const CONFIG_ELEMENT_ID: &str = "consumo-widgets-config";

/// Read the page configuration, falling back to defaults
pub fn load_config(document: &Document) -> WidgetConfig {
    let text = match document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    {
        Some(text) => text,
        None => return WidgetConfig::default(),
    };

    match WidgetConfig::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            Logger::warn_with_component("config", &format!("⚠️ {}; using defaults", e));
            WidgetConfig::default()
        }
    }
}

/// Project the page belongs to: explicit config, then the global
/// variable named in the config, then the `/projects/<id>/` path segment
pub fn resolve_project_id(window: &Window, config: &WidgetConfig) -> Option<String> {
    config
        .project_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .or_else(|| global_project_id(window, &config.project_id_global))
        .or_else(|| {
            window
                .location()
                .pathname()
                .ok()
                .and_then(|path| project_id_from_path(&path))
        })
}

fn global_project_id(window: &Window, name: &str) -> Option<String> {
    let value = js_sys::Reflect::get(window, &JsValue::from_str(name)).ok()?;

    if let Some(text) = value.as_string() {
        let text = text.trim();
        return (!text.is_empty()).then(|| text.to_string());
    }

    value
        .as_f64()
        .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0)
        .map(|n| format!("{}", n as u64))
}
