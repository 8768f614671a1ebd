use serde::{Deserialize, Serialize};

/// One lot image as rendered on a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleItem {
    pub id: String,
    pub lot_id: Option<i64>,
    pub lot_name: String,
    pub product_name: String,
    pub dims: String,
    pub area: f64,
    pub url: String,
    /// Block the lot was cut from, `None` keeps the item ungrouped
    pub block: Option<String>,
}

/// All singles sharing one block attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockItem {
    pub key: String,
    pub ids: Vec<String>,
    pub items: Vec<SingleItem>,
    pub total_area: f64,
}

impl BlockItem {
    /// Holds when every member id satisfies `is_selected`
    pub fn is_fully_selected(&self, is_selected: impl Fn(&str) -> bool) -> bool {
        !self.ids.is_empty() && self.ids.iter().all(|id| is_selected(id))
    }

    pub fn cover_url(&self) -> Option<&str> {
        self.items.first().map(|i| i.url.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogItem {
    Single(SingleItem),
    Block(BlockItem),
}

impl CatalogItem {
    /// Stable key for keyed rendering
    pub fn key(&self) -> String {
        match self {
            CatalogItem::Single(s) => format!("single:{}", s.id),
            CatalogItem::Block(b) => format!("block:{}", b.key),
        }
    }
}

/// Collapse singles that share a block into one `Block` entry.
///
/// A block takes the position of its first member; singles without a block stay as they are.
pub fn group_into_blocks(items: Vec<SingleItem>) -> Vec<CatalogItem> {
    let mut result: Vec<CatalogItem> = Vec::new();
    let mut block_positions: Vec<(String, usize)> = Vec::new();

    for item in items {
        let Some(block) = item.block.clone().filter(|b| !b.trim().is_empty()) else {
            result.push(CatalogItem::Single(item));
            continue;
        };

        let position = block_positions
            .iter()
            .find(|(key, _)| *key == block)
            .map(|(_, pos)| *pos);

        match position {
            Some(pos) => {
                if let CatalogItem::Block(entry) = &mut result[pos] {
                    entry.ids.push(item.id.clone());
                    entry.total_area += item.area;
                    entry.items.push(item);
                }
            }
            None => {
                block_positions.push((block.clone(), result.len()));
                result.push(CatalogItem::Block(BlockItem {
                    key: block,
                    ids: vec![item.id.clone()],
                    total_area: item.area,
                    items: vec![item],
                }));
            }
        }
    }

    result
}

/// Every item rendered on its own, used inside a block drill-down
pub fn as_singles(items: Vec<SingleItem>) -> Vec<CatalogItem> {
    items.into_iter().map(CatalogItem::Single).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(id: &str, block: Option<&str>, area: f64) -> SingleItem {
        SingleItem {
            id: id.to_string(),
            lot_id: None,
            lot_name: format!("L-{}", id),
            product_name: "Mármol Blanco".to_string(),
            dims: String::new(),
            area,
            url: format!("/img/{}", id),
            block: block.map(str::to_string),
        }
    }

    #[test]
    fn test_grouping_keeps_first_seen_order() {
        let grouped = group_into_blocks(vec![
            single("1", Some("B7"), 2.0),
            single("2", None, 1.0),
            single("3", Some("B7"), 3.0),
            single("4", Some("B9"), 1.5),
        ]);

        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[0].key(), "block:B7");
        assert_eq!(grouped[1].key(), "single:2");
        assert_eq!(grouped[2].key(), "block:B9");

        let CatalogItem::Block(b7) = &grouped[0] else {
            panic!("expected block");
        };
        assert_eq!(b7.ids, vec!["1", "3"]);
        assert_eq!(b7.total_area, 5.0);
        assert_eq!(b7.cover_url(), Some("/img/1"));
    }

    #[test]
    fn test_blank_block_stays_single() {
        let grouped = group_into_blocks(vec![single("1", Some("  "), 1.0)]);
        assert!(matches!(grouped[0], CatalogItem::Single(_)));
    }

    #[test]
    fn test_fully_selected_iff_superset() {
        let grouped = group_into_blocks(vec![
            single("1", Some("B7"), 1.0),
            single("2", Some("B7"), 1.0),
        ]);
        let CatalogItem::Block(block) = &grouped[0] else {
            panic!("expected block");
        };

        let selected = ["1", "2", "99"];
        assert!(block.is_fully_selected(|id| selected.contains(&id)));
        let selected = ["2", "99"];
        assert!(!block.is_fully_selected(|id| selected.contains(&id)));
    }

    #[test]
    fn test_drill_down_renders_singles() {
        let items = as_singles(vec![single("1", Some("B7"), 1.0), single("2", Some("B7"), 1.0)]);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| matches!(i, CatalogItem::Single(_))));
    }
}
