use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::shared::error::GalleryError;

/// One reserved unit (slab) in the public cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub quant_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lot_name: String,
    #[serde(default)]
    pub dims: String,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub url: String,
}

/// What a toggle did to the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    Added,
    Removed,
    Unchanged,
}

/// Ordered cart, insertion order preserved, ids unique
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    pub fn total_area(&self) -> f64 {
        self.items.iter().map(|i| i.area).sum()
    }

    /// Removes the item when present, appends it otherwise
    pub fn add_or_toggle(&mut self, item: CartItem) -> CartChange {
        if self.remove(&item.id) {
            return CartChange::Removed;
        }
        self.items.push(item);
        CartChange::Added
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    /// Toggles a whole block at once.
    ///
    /// A block counts as selected only when every member is in the cart: then all members are
    /// removed. With partial or no membership the missing members are appended.
    pub fn toggle_block(&mut self, members: &[CartItem]) -> CartChange {
        if members.is_empty() {
            return CartChange::Unchanged;
        }
        if self.is_block_fully_selected(members.iter().map(|m| m.id.as_str())) {
            for member in members {
                self.remove(&member.id);
            }
            return CartChange::Removed;
        }
        for member in members {
            if !self.contains(&member.id) {
                self.items.push(member.clone());
            }
        }
        CartChange::Added
    }

    /// True when `ids` is non-empty and every id is in the cart
    pub fn is_block_fully_selected<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> bool {
        let mut any = false;
        for id in ids {
            if !self.contains(id) {
                return false;
            }
            any = true;
        }
        any
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn to_json(&self) -> Result<String, GalleryError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, GalleryError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Durable keyed storage for the serialized cart
pub trait CartStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str) -> Result<(), GalleryError>;
}

/// Storage key namespaced by the share-link token: `<prefix>_<token|default>`
pub fn cart_storage_key(prefix: &str, token: Option<&str>) -> String {
    let token = token.map(str::trim).filter(|t| !t.is_empty()).unwrap_or("default");
    format!("{}_{}", prefix, token)
}

/// Cart bound to its store: every mutation is persisted right away
#[derive(Debug, Clone)]
pub struct CartSession<S: CartStore> {
    cart: Cart,
    store: S,
    key: String,
}

impl<S: CartStore> CartSession<S> {
    /// Restore the cart saved under `key`.
    ///
    /// Unreadable data resets to an empty cart; it is never reported to the caller.
    pub fn restore(store: S, key: String) -> Self {
        let cart = match store.load(&key) {
            Some(raw) => Cart::from_json(&raw).unwrap_or_else(|e| {
                log::warn!("Discarding unreadable cart under {}: {}", key, e);
                Cart::new()
            }),
            None => Cart::new(),
        };
        Self { cart, store, key }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn add_or_toggle(&mut self, item: CartItem) -> CartChange {
        let change = self.cart.add_or_toggle(item);
        self.persist();
        change
    }

    pub fn toggle_block(&mut self, members: &[CartItem]) -> CartChange {
        let change = self.cart.toggle_block(members);
        if change != CartChange::Unchanged {
            self.persist();
        }
        change
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let removed = self.cart.remove(id);
        self.persist();
        removed
    }

    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    fn persist(&self) {
        let result = self
            .cart
            .to_json()
            .and_then(|raw| self.store.save(&self.key, &raw));
        if let Err(e) = result {
            log::error!("Failed to persist cart under {}: {}", self.key, e);
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Ok(None),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Store backed by a shared map so tests can inspect what was persisted
    #[derive(Clone, Default)]
    pub(crate) struct MemoryStore {
        data: Rc<RefCell<HashMap<String, String>>>,
    }

    impl CartStore for MemoryStore {
        fn load(&self, key: &str) -> Option<String> {
            self.data.borrow().get(key).cloned()
        }

        fn save(&self, key: &str, value: &str) -> Result<(), GalleryError> {
            self.data.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    pub(crate) fn item(id: &str, area: f64) -> CartItem {
        CartItem {
            id: id.to_string(),
            quant_id: None,
            name: format!("Placa {}", id),
            lot_name: format!("L-{}", id),
            dims: "3.2 x 1.8 m".to_string(),
            area,
            url: format!("/web/image/stock.lot.image/{}/image", id),
        }
    }

    #[test]
    fn test_toggle_twice_restores_cart() {
        let mut cart = Cart::new();
        cart.add_or_toggle(item("A", 2.0));
        let original = cart.clone();

        assert_eq!(cart.add_or_toggle(item("B", 1.5)), CartChange::Added);
        assert_eq!(cart.add_or_toggle(item("B", 1.5)), CartChange::Removed);
        assert_eq!(cart, original);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_total_area_and_count() {
        let mut cart = Cart::new();
        cart.add_or_toggle(item("A", 2.0));
        cart.add_or_toggle(item("B", 1.5));
        assert_eq!(cart.len(), 2);
        assert_eq!(crate::shared::format::format_area(cart.total_area()), "3.50 m²");
    }

    #[test]
    fn test_block_toggle_adds_missing_then_removes_all() {
        let members = vec![item("1", 1.0), item("2", 1.0), item("3", 1.0)];
        let mut cart = Cart::new();
        cart.add_or_toggle(item("2", 1.0));
        assert!(!cart.is_block_fully_selected(["1", "2", "3"]));

        // partial membership counts as not selected
        assert_eq!(cart.toggle_block(&members), CartChange::Added);
        assert_eq!(cart.len(), 3);
        assert!(cart.is_block_fully_selected(["1", "2", "3"]));
        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);

        assert_eq!(cart.toggle_block(&members), CartChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_removing_one_member_clears_full_selection() {
        let members = vec![item("1", 1.0), item("2", 1.0)];
        let mut cart = Cart::new();
        cart.toggle_block(&members);
        assert!(cart.is_block_fully_selected(["1", "2"]));
        cart.remove("1");
        assert!(!cart.is_block_fully_selected(["1", "2"]));
    }

    #[test]
    fn test_empty_block_is_never_selected() {
        let mut cart = Cart::new();
        assert!(!cart.is_block_fully_selected(std::iter::empty()));
        assert_eq!(cart.toggle_block(&[]), CartChange::Unchanged);
    }

    #[test]
    fn test_storage_key() {
        assert_eq!(cart_storage_key("stone_gallery_cart", Some("tok")), "stone_gallery_cart_tok");
        assert_eq!(cart_storage_key("stone_gallery_cart", None), "stone_gallery_cart_default");
        assert_eq!(cart_storage_key("stone_gallery_cart", Some(" ")), "stone_gallery_cart_default");
    }

    #[test]
    fn test_session_round_trip() {
        let store = MemoryStore::default();
        let mut session = CartSession::restore(store.clone(), "k".to_string());
        session.add_or_toggle(item("A", 2.0));
        session.add_or_toggle(item("B", 1.5));

        let restored = CartSession::restore(store, "k".to_string());
        assert_eq!(restored.cart(), session.cart());
    }

    #[test]
    fn test_corrupt_data_resets_to_empty() {
        let store = MemoryStore::default();
        store.save("k", "{not json").unwrap();
        let session = CartSession::restore(store, "k".to_string());
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_clear_persists_empty_list() {
        let store = MemoryStore::default();
        let mut session = CartSession::restore(store.clone(), "k".to_string());
        session.add_or_toggle(item("A", 2.0));
        session.clear();
        assert_eq!(store.load("k").as_deref(), Some("[]"));
    }

    #[test]
    fn test_numeric_ids_from_legacy_storage() {
        let cart = Cart::from_json(r#"[{"id": 12, "quant_id": 99, "name": "X", "area": 1.5}]"#)
            .unwrap();
        assert!(cart.contains("12"));
        assert_eq!(cart.items()[0].quant_id.as_deref(), Some("99"));
        assert_eq!(cart.items()[0].lot_name, "");
    }
}
