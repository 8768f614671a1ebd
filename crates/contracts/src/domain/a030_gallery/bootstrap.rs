//! Data the server injects into the public gallery page (`window.galleryConfig`)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::cart::CartItem;

/// Card data of one slab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(flatten)]
    pub item: CartItem,
    /// Spans two grid cells in the bento layout
    #[serde(default)]
    pub is_large: bool,
}

/// Entry of the public grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridEntry {
    Single(GalleryItem),
    /// Members are looked up in `blocks_details` under `key`
    Block {
        key: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        cover_url: String,
    },
}

/// Category heading with its cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GallerySection {
    pub category: String,
    #[serde(default)]
    pub entries: Vec<GridEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitialView {
    #[serde(default)]
    pub sections: Vec<GallerySection>,
}

/// Server-injected configuration, read once at start-up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryBootstrap {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub blocks_details: HashMap<String, Vec<GalleryItem>>,
    #[serde(default)]
    pub initial_view: Option<InitialView>,
}

impl GalleryBootstrap {
    pub fn sections(&self) -> &[GallerySection] {
        self.initial_view
            .as_ref()
            .map(|v| v.sections.as_slice())
            .unwrap_or(&[])
    }

    pub fn block_members(&self, key: &str) -> &[GalleryItem] {
        self.blocks_details
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Members of a block as cart items, in server order
    pub fn block_cart_items(&self, key: &str) -> Vec<CartItem> {
        self.block_members(key)
            .iter()
            .map(|m| m.item.clone())
            .collect()
    }

    pub fn block_total_area(&self, key: &str) -> f64 {
        self.block_members(key).iter().map(|m| m.item.area).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> GalleryBootstrap {
        serde_json::from_value(json!({
            "token": "abc",
            "blocks_details": {
                "B7": [
                    {"id": 11, "quant_id": 4, "name": "Calacatta", "lot_name": "L-11", "dims": "3 x 2 m", "area": 6.0, "url": "/i/11"},
                    {"id": 12, "quant_id": 5, "name": "Calacatta", "lot_name": "L-12", "dims": "3 x 1.5 m", "area": 4.5, "url": "/i/12"}
                ]
            },
            "initial_view": {
                "sections": [{
                    "category": "Mármol",
                    "entries": [
                        {"type": "single", "id": "3", "name": "Carrara", "lot_name": "L-3", "area": 2.0, "url": "/i/3", "is_large": true},
                        {"type": "block", "key": "B7", "cover_url": "/i/11"}
                    ]
                }]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_parses_injected_config() {
        let config = sample();
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.sections().len(), 1);
        let GridEntry::Single(first) = &config.sections()[0].entries[0] else {
            panic!("expected single");
        };
        assert!(first.is_large);
        assert_eq!(first.item.id, "3");
    }

    #[test]
    fn test_block_lookup() {
        let config = sample();
        let members = config.block_cart_items("B7");
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].id, "11");
        assert_eq!(config.block_total_area("B7"), 10.5);
        assert!(config.block_members("missing").is_empty());
    }

    #[test]
    fn test_missing_fields_default() {
        let config: GalleryBootstrap = serde_json::from_value(json!({})).unwrap();
        assert!(config.token.is_none());
        assert!(config.sections().is_empty());
    }
}
