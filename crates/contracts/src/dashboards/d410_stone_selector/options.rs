use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::erp_domain::{Domain, Operator, Term};
use crate::shared::error::GalleryError;
use crate::shared::orm::{OrmService, SearchOptions};

/// `(id, name)` pair for dropdowns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedOption {
    pub id: i64,
    pub name: String,
}

fn to_options(rows: Vec<Value>, label_field: &str) -> Vec<NamedOption> {
    rows.iter()
        .filter_map(|row| {
            let id = row.get("id")?.as_i64()?;
            let name = row
                .get(label_field)
                .and_then(Value::as_str)
                .or_else(|| row.get("name").and_then(Value::as_str))?
                .to_string();
            Some(NamedOption { id, name })
        })
        .collect()
}

/// Product categories, full path as label
pub async fn load_categories<O: OrmService>(orm: &O) -> Result<Vec<NamedOption>, GalleryError> {
    let rows = orm
        .search_read(
            "product.category",
            &Domain::new(),
            &["id", "name", "complete_name"],
            SearchOptions::default().order("complete_name asc"),
        )
        .await?;
    Ok(to_options(rows, "complete_name"))
}

pub async fn load_warehouses<O: OrmService>(
    orm: &O,
    company_ids: &[i64],
) -> Result<Vec<NamedOption>, GalleryError> {
    let mut domain = Domain::new();
    if !company_ids.is_empty() {
        domain.push(Term::new("company_id", Operator::In, company_ids.to_vec()));
    }
    let rows = orm
        .search_read(
            "stock.warehouse",
            &domain,
            &["id", "name"],
            SearchOptions::default().order("name asc"),
        )
        .await?;
    Ok(to_options(rows, "name"))
}

/// Contacts for the share-link dialog: unfiltered, ordered by name
pub async fn load_partners<O: OrmService>(
    orm: &O,
    limit: u32,
) -> Result<Vec<NamedOption>, GalleryError> {
    let rows = orm
        .search_read(
            "res.partner",
            &Domain::new(),
            &["id", "name"],
            SearchOptions::default().limit(limit).order("name asc"),
        )
        .await?;
    Ok(to_options(rows, "name"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d410_stone_selector::pipeline::tests::FakeOrm;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_categories_use_complete_name() {
        let orm = FakeOrm::default().respond(
            "product.category",
            "search_read",
            json!([
                {"id": 1, "name": "Mármol", "complete_name": "Piedra / Mármol"},
                {"id": 2, "name": "Granito", "complete_name": false}
            ]),
        );
        let options = block_on(load_categories(&orm)).unwrap();
        assert_eq!(
            options,
            vec![
                NamedOption { id: 1, name: "Piedra / Mármol".to_string() },
                NamedOption { id: 2, name: "Granito".to_string() },
            ]
        );
    }

    #[test]
    fn test_partners_query_is_unfiltered() {
        let orm = FakeOrm::default().respond(
            "res.partner",
            "search_read",
            json!([{"id": 3, "name": "Constructora Norte"}]),
        );
        let partners = block_on(load_partners(&orm, 80)).unwrap();
        assert_eq!(partners.len(), 1);
        let calls = orm.calls.borrow();
        assert_eq!(calls[0].2, json!([]));
    }
}
