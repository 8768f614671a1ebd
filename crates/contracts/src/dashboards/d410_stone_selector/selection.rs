use crate::domain::a030_gallery::catalog::CatalogItem;

/// Lot images picked on the selector dashboard, in selection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|i| i == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    /// Selects every member, or clears them all when the block is already fully selected
    pub fn toggle_block(&mut self, member_ids: &[String]) {
        if self.is_block_fully_selected(member_ids) {
            self.ids.retain(|id| !member_ids.contains(id));
        } else {
            for id in member_ids {
                if !self.contains(id) {
                    self.ids.push(id.clone());
                }
            }
        }
    }

    pub fn is_block_fully_selected(&self, member_ids: &[String]) -> bool {
        !member_ids.is_empty() && member_ids.iter().all(|id| self.contains(id))
    }

    /// Toggle whatever a grid entry represents
    pub fn toggle_item(&mut self, item: &CatalogItem) {
        match item {
            CatalogItem::Single(single) => {
                self.toggle(&single.id);
            }
            CatalogItem::Block(block) => self.toggle_block(&block.ids),
        }
    }

    pub fn is_item_selected(&self, item: &CatalogItem) -> bool {
        match item {
            CatalogItem::Single(single) => self.contains(&single.id),
            CatalogItem::Block(block) => block.is_fully_selected(|id| self.contains(id)),
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_toggle_pair_is_identity() {
        let mut selection = SelectionSet::new();
        selection.toggle("1");
        let before = selection.clone();
        assert!(selection.toggle("2"));
        assert!(!selection.toggle("2"));
        assert_eq!(selection, before);
    }

    #[test]
    fn test_block_selection() {
        let members = ids(&["1", "2", "3"]);
        let mut selection = SelectionSet::new();
        selection.toggle("2");
        assert!(!selection.is_block_fully_selected(&members));

        selection.toggle_block(&members);
        assert!(selection.is_block_fully_selected(&members));
        assert_eq!(selection.ids(), &ids(&["2", "1", "3"])[..]);

        selection.toggle("3");
        assert!(!selection.is_block_fully_selected(&members));

        selection.toggle_block(&members);
        selection.toggle_block(&members);
        assert!(selection.is_empty());
    }
}
