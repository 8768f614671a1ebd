use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filter fields of the selector dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    /// Free text over product, lot and block
    Search,
    Product,
    Lot,
    Block,
    Bundle,
    Pedimento,
    Container,
    Color,
    /// Minimum thickness (cm)
    Thickness,
    /// Minimum height (m)
    Height,
    /// Minimum width (m)
    Width,
    Warehouse,
    Category,
    Currency,
    PriceTier,
    PriceMin,
    PriceMax,
}

impl FilterKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Search => "q",
            FilterKey::Product => "producto",
            FilterKey::Lot => "lote",
            FilterKey::Block => "bloque",
            FilterKey::Bundle => "atado",
            FilterKey::Pedimento => "pedimento",
            FilterKey::Container => "contenedor",
            FilterKey::Color => "color",
            FilterKey::Thickness => "grosor",
            FilterKey::Height => "alto",
            FilterKey::Width => "ancho",
            FilterKey::Warehouse => "almacen_id",
            FilterKey::Category => "categ_id",
            FilterKey::Currency => "moneda",
            FilterKey::PriceTier => "nivel_precio",
            FilterKey::PriceMin => "precio_min",
            FilterKey::PriceMax => "precio_max",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterKey::Search => "Buscar",
            FilterKey::Product => "Producto",
            FilterKey::Lot => "Lote",
            FilterKey::Block => "Bloque",
            FilterKey::Bundle => "Atado",
            FilterKey::Pedimento => "Pedimento",
            FilterKey::Container => "Contenedor",
            FilterKey::Color => "Color",
            FilterKey::Thickness => "Grosor mín.",
            FilterKey::Height => "Alto mín.",
            FilterKey::Width => "Ancho mín.",
            FilterKey::Warehouse => "Almacén",
            FilterKey::Category => "Categoría",
            FilterKey::Currency => "Moneda",
            FilterKey::PriceTier => "Precio",
            FilterKey::PriceMin => "Precio mín.",
            FilterKey::PriceMax => "Precio máx.",
        }
    }

    /// Text fields matched with `ilike`
    pub fn text_keys() -> &'static [FilterKey] {
        &[
            FilterKey::Product,
            FilterKey::Lot,
            FilterKey::Block,
            FilterKey::Bundle,
            FilterKey::Pedimento,
            FilterKey::Container,
            FilterKey::Color,
        ]
    }

    pub fn numeric_keys() -> &'static [FilterKey] {
        &[FilterKey::Thickness, FilterKey::Height, FilterKey::Width]
    }

    /// Typed by hand, so edits are debounced; dropdown keys apply at once
    pub fn is_typed(&self) -> bool {
        !matches!(
            self,
            FilterKey::Warehouse | FilterKey::Category | FilterKey::Currency | FilterKey::PriceTier
        )
    }
}

/// Current filter values, keyed by field name. Empty strings mean unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    values: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: FilterKey, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.values.remove(key.as_str());
        } else {
            self.values.insert(key.as_str().to_string(), value);
        }
    }

    pub fn with(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Raw value as typed by the user
    pub fn raw(&self, key: FilterKey) -> &str {
        self.values.get(key.as_str()).map(String::as_str).unwrap_or("")
    }

    /// Trimmed text, `None` when empty after trimming
    pub fn text(&self, key: FilterKey) -> Option<String> {
        let value = self.raw(key).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Parsed number; anything unparsable counts as unset
    pub fn number(&self, key: FilterKey) -> Option<f64> {
        let value = self.text(key)?.replace(',', ".");
        value.parse::<f64>().ok().filter(|n| n.is_finite())
    }

    /// Positive record id
    pub fn id(&self, key: FilterKey) -> Option<i64> {
        self.text(key)?.parse::<i64>().ok().filter(|id| *id > 0)
    }

    /// True when no field carries a usable value
    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropdown_keys_are_not_typed() {
        assert!(FilterKey::Search.is_typed());
        assert!(FilterKey::PriceMin.is_typed());
        assert!(!FilterKey::Category.is_typed());
        assert!(!FilterKey::Currency.is_typed());
    }

    #[test]
    fn test_text_is_trimmed() {
        let filters = FilterState::new()
            .with(FilterKey::Lot, "  A-12 ")
            .with(FilterKey::Color, "   ");
        assert_eq!(filters.text(FilterKey::Lot).as_deref(), Some("A-12"));
        assert_eq!(filters.text(FilterKey::Color), None);
        assert_eq!(filters.text(FilterKey::Block), None);
    }

    #[test]
    fn test_unparsable_numbers_are_dropped() {
        let filters = FilterState::new()
            .with(FilterKey::Thickness, "2")
            .with(FilterKey::Height, "1,5")
            .with(FilterKey::Width, "abc");
        assert_eq!(filters.number(FilterKey::Thickness), Some(2.0));
        assert_eq!(filters.number(FilterKey::Height), Some(1.5));
        assert_eq!(filters.number(FilterKey::Width), None);
        assert_eq!(
            FilterState::new().with(FilterKey::Width, "NaN").number(FilterKey::Width),
            None
        );
    }

    #[test]
    fn test_ids_must_be_positive() {
        let filters = FilterState::new()
            .with(FilterKey::Warehouse, "5")
            .with(FilterKey::Category, "0");
        assert_eq!(filters.id(FilterKey::Warehouse), Some(5));
        assert_eq!(filters.id(FilterKey::Category), None);
    }

    #[test]
    fn test_setting_empty_unsets() {
        let mut filters = FilterState::new().with(FilterKey::Lot, "A");
        filters.set(FilterKey::Lot, "");
        assert!(filters.is_empty());
        assert_eq!(filters, FilterState::new());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let filters = FilterState::new()
            .with(FilterKey::Thickness, "2")
            .with(FilterKey::Warehouse, "5");
        assert_eq!(
            serde_json::to_value(&filters).unwrap(),
            serde_json::json!({"grosor": "2", "almacen_id": "5"})
        );
    }
}
