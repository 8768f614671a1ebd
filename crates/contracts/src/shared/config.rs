use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Front-end settings for the public gallery and the staff selector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub gallery: GallerySettings,
    pub selector: SelectorSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GallerySettings {
    /// Prefix of the localStorage key, the gallery token is appended
    pub cart_key_prefix: String,
    pub reservation_endpoint: String,
    /// Days a confirmed reservation is held before it expires
    pub reservation_days: i64,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            cart_key_prefix: "stone_gallery_cart".to_string(),
            reservation_endpoint: "/gallery/confirm_reservation".to_string(),
            reservation_days: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorSettings {
    pub page_size: usize,
    /// Distance from the bottom of the grid at which the next page is appended
    pub scroll_threshold_px: f64,
    pub debounce_ms: u32,
    pub partner_limit: u32,
    /// `stock.location.usage` that counts as available stock
    pub internal_usage: String,
    /// Boolean quant field marking a manual hold
    pub hold_field: String,
    /// Price field naming, `{currency}` and `{tier}` are substituted
    pub price_field_pattern: String,
    pub currencies: Vec<String>,
    pub price_tiers: Vec<String>,
    /// Thumbnail URL, `{id}` is the lot image id
    pub image_url_pattern: String,
    pub lot_fields: LotFields,
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            page_size: 24,
            scroll_threshold_px: 200.0,
            debounce_ms: 400,
            partner_limit: 80,
            internal_usage: "internal".to_string(),
            hold_field: "x_tiene_hold".to_string(),
            price_field_pattern: "x_price_{currency}_{tier}".to_string(),
            currencies: vec!["usd".to_string(), "mxn".to_string()],
            price_tiers: vec!["1".to_string(), "2".to_string()],
            image_url_pattern: "/web/image/stock.lot.image/{id}/image_small".to_string(),
            lot_fields: LotFields::default(),
        }
    }
}

/// Names of the custom `stock.lot` attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotFields {
    pub thickness: String,
    pub height: String,
    pub width: String,
    pub block: String,
    pub bundle: String,
    pub pedimento: String,
    pub container: String,
    pub color: String,
}

impl Default for LotFields {
    fn default() -> Self {
        Self {
            thickness: "x_grosor".to_string(),
            height: "x_alto".to_string(),
            width: "x_ancho".to_string(),
            block: "x_bloque".to_string(),
            bundle: "x_atado".to_string(),
            pedimento: "x_pedimento".to_string(),
            container: "x_contenedor".to_string(),
            color: "x_color".to_string(),
        }
    }
}

impl SelectorSettings {
    /// Product template field holding the price for `currency` and `tier`.
    ///
    /// `None` when either value is not one of the configured options.
    pub fn price_field(&self, currency: &str, tier: &str) -> Option<String> {
        let currency = currency.trim().to_lowercase();
        let tier = tier.trim().to_string();
        if !self.currencies.contains(&currency) || !self.price_tiers.contains(&tier) {
            return None;
        }
        Some(
            self.price_field_pattern
                .replace("{currency}", &currency)
                .replace("{tier}", &tier),
        )
    }

    pub fn image_url(&self, image_id: &str) -> String {
        self.image_url_pattern.replace("{id}", image_id)
    }
}

/// Parse a TOML settings document; absent keys keep their defaults
pub fn load_settings(contents: &str) -> anyhow::Result<Settings> {
    let settings: Settings = toml::from_str(contents)?;
    Ok(settings)
}

impl Settings {
    /// Apply overrides injected by the server as JSON, key by key
    pub fn with_overrides(&self, overrides: &Value) -> anyhow::Result<Settings> {
        let mut merged = serde_json::to_value(self)?;
        merge_json(&mut merged, overrides);
        Ok(serde_json::from_value(merged)?)
    }
}

fn merge_json(base: &mut Value, patch: &Value) {
    match (base, patch) {
        (Value::Object(base_map), Value::Object(patch_map)) => {
            for (key, value) in patch_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_json(existing, value),
                    // unknown keys are dropped on deserialization anyway
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, patch) => *base = patch.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = r#"
[gallery]
reservation_days = 7

[selector]
page_size = 48

[selector.lot_fields]
block = "x_block_code"
"#;

    #[test]
    fn test_partial_document_keeps_defaults() {
        let settings = load_settings(SAMPLE).unwrap();
        assert_eq!(settings.gallery.reservation_days, 7);
        assert_eq!(settings.gallery.cart_key_prefix, "stone_gallery_cart");
        assert_eq!(settings.selector.page_size, 48);
        assert_eq!(settings.selector.lot_fields.block, "x_block_code");
        assert_eq!(settings.selector.lot_fields.height, "x_alto");
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(load_settings("").unwrap(), Settings::default());
    }

    #[test]
    fn test_json_overrides_merge_key_by_key() {
        let base = Settings::default();
        let merged = base
            .with_overrides(&json!({"selector": {"debounce_ms": 300, "unknown": 1}}))
            .unwrap();
        assert_eq!(merged.selector.debounce_ms, 300);
        assert_eq!(merged.selector.page_size, 24);
    }

    #[test]
    fn test_price_field_pattern() {
        let selector = SelectorSettings::default();
        assert_eq!(selector.price_field("USD", "1").as_deref(), Some("x_price_usd_1"));
        assert_eq!(selector.price_field("mxn", " 2 ").as_deref(), Some("x_price_mxn_2"));
        assert_eq!(selector.price_field("eur", "1"), None);
        assert_eq!(selector.price_field("usd", "3"), None);
    }

    #[test]
    fn test_image_url() {
        let selector = SelectorSettings::default();
        assert_eq!(selector.image_url("15"), "/web/image/stock.lot.image/15/image_small");
    }
}
