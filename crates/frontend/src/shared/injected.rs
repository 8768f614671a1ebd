//! Configuration the ERP injects into the page as `window.galleryConfig` / `window.selectorConfig`

use contracts::domain::a030_gallery::GalleryBootstrap;
use contracts::shared::config::{load_settings, Settings};
use serde::Deserialize;
use serde_json::Value;
use wasm_bindgen::JsValue;

const GALLERY_GLOBAL: &str = "galleryConfig";
const SELECTOR_GLOBAL: &str = "selectorConfig";
const DEFAULT_SETTINGS: &str = include_str!("../../settings.toml");

/// Scope of the staff selector
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectorContext {
    #[serde(default)]
    pub company_ids: Vec<i64>,
}

/// Which widget the current page hosts
#[derive(Debug, Clone)]
pub enum PageConfig {
    Gallery(GalleryBootstrap),
    Selector(SelectorContext),
}

fn read_global(name: &str) -> Option<JsValue> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

/// Global as JSON text, so integers survive exactly
fn read_global_json(name: &str) -> Option<Value> {
    let value = read_global(name)?;
    let text = js_sys::JSON::stringify(&value).ok()?.as_string()?;
    match serde_json::from_str(&text) {
        Ok(json) => Some(json),
        Err(e) => {
            log::error!("window.{} is not valid JSON: {}", name, e);
            None
        }
    }
}

/// Detect the hosted widget; the gallery wins when both globals are present
pub fn detect_page() -> Option<PageConfig> {
    if let Some(json) = read_global_json(GALLERY_GLOBAL) {
        return match serde_json::from_value::<GalleryBootstrap>(json) {
            Ok(bootstrap) => Some(PageConfig::Gallery(bootstrap)),
            Err(e) => {
                log::error!("Failed to read window.{}: {}", GALLERY_GLOBAL, e);
                Some(PageConfig::Gallery(GalleryBootstrap::default()))
            }
        };
    }

    let value = read_global(SELECTOR_GLOBAL)?;
    let context = serde_wasm_bindgen::from_value::<SelectorContext>(value).unwrap_or_else(|e| {
        log::warn!("Failed to read window.{}: {}", SELECTOR_GLOBAL, e);
        SelectorContext::default()
    });
    Some(PageConfig::Selector(context))
}

/// Built-in settings with the page's `settings` object merged on top
pub fn page_settings() -> Settings {
    let defaults = load_settings(DEFAULT_SETTINGS).unwrap_or_else(|e| {
        log::error!("Built-in settings are invalid: {}", e);
        Settings::default()
    });

    let overrides = [GALLERY_GLOBAL, SELECTOR_GLOBAL]
        .iter()
        .filter_map(|name| read_global_json(name))
        .filter_map(|config| config.get("settings").cloned())
        .next();

    match overrides {
        Some(overrides) => defaults.with_overrides(&overrides).unwrap_or_else(|e| {
            log::warn!("Ignoring invalid settings overrides: {}", e);
            defaults.clone()
        }),
        None => defaults,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_settings_parse() {
        let settings = load_settings(DEFAULT_SETTINGS).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
