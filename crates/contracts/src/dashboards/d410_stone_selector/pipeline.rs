use serde_json::Value;
use std::collections::{HashMap, HashSet};

use super::filter::FilterState;
use super::query::QueryBuilder;
use crate::domain::a030_gallery::catalog::{as_singles, group_into_blocks, CatalogItem, SingleItem};
use crate::shared::config::SelectorSettings;
use crate::shared::erp_domain::Domain;
use crate::shared::error::GalleryError;
use crate::shared::format::format_dims;
use crate::shared::orm::{many2one_id, many2one_name, number_field, text_field, OrmService, SearchOptions};

const QUANT_MODEL: &str = "stock.quant";
const LOT_MODEL: &str = "stock.lot";
const IMAGE_MODEL: &str = "stock.lot.image";
const TEMPLATE_MODEL: &str = "product.template";

/// Descriptive attributes of a resolved lot
#[derive(Debug, Clone, Default, PartialEq)]
struct LotInfo {
    name: String,
    product_name: String,
    height: Option<f64>,
    width: Option<f64>,
    block: Option<String>,
}

/// Resolves the selector filters into renderable catalog items.
///
/// Stage one finds candidate lots among available quants; stage two reads lot attributes and
/// images and groups them into blocks. An empty stage ends the run without further calls.
pub struct CatalogPipeline<'a, O: OrmService> {
    orm: &'a O,
    settings: &'a SelectorSettings,
    company_ids: &'a [i64],
}

impl<'a, O: OrmService> CatalogPipeline<'a, O> {
    pub fn new(orm: &'a O, settings: &'a SelectorSettings, company_ids: &'a [i64]) -> Self {
        Self {
            orm,
            settings,
            company_ids,
        }
    }

    /// Run the whole pipeline. With `drill_down` set, only that block is fetched and every
    /// item is returned as a single.
    pub async fn resolve(
        &self,
        filters: &FilterState,
        drill_down: Option<&str>,
    ) -> Result<Vec<CatalogItem>, GalleryError> {
        let builder = QueryBuilder::new(self.settings, filters, self.company_ids);

        let template_ids = match builder.price_query() {
            Some(price) => {
                let rows = self
                    .orm
                    .search_read(TEMPLATE_MODEL, &price.domain, &["id"], SearchOptions::default())
                    .await?;
                let ids: Vec<i64> = rows.iter().filter_map(|r| r.get("id")?.as_i64()).collect();
                if ids.is_empty() {
                    log::debug!("price filter on {} matched no products", price.field);
                    return Ok(Vec::new());
                }
                Some(ids)
            }
            None => None,
        };

        let quant_domain = builder.quant_domain(template_ids.as_deref(), drill_down);
        let lot_ids = self.resolve_lot_ids(&quant_domain).await?;
        if lot_ids.is_empty() {
            log::debug!("no available quants for the current filters");
            return Ok(Vec::new());
        }

        let lots = self.read_lots(&lot_ids).await?;
        let singles = self.read_images(&lot_ids, &lots).await?;
        log::debug!(
            "resolved {} lots into {} images",
            lot_ids.len(),
            singles.len()
        );

        Ok(match drill_down {
            Some(_) => as_singles(singles),
            None => group_into_blocks(singles),
        })
    }

    async fn resolve_lot_ids(
        &self,
        domain: &Domain,
    ) -> Result<Vec<i64>, GalleryError> {
        let groups = self
            .orm
            .read_group(QUANT_MODEL, domain, &["lot_id", "quantity:sum"], &["lot_id"])
            .await?;
        let mut seen = HashSet::with_capacity(groups.len());
        let ids = groups
            .iter()
            .filter_map(|group| group.get("lot_id").and_then(many2one_id))
            .filter(|id| seen.insert(*id))
            .collect();
        Ok(ids)
    }

    async fn read_lots(&self, lot_ids: &[i64]) -> Result<HashMap<i64, LotInfo>, GalleryError> {
        let fields = &self.settings.lot_fields;
        let records = self
            .orm
            .read(
                LOT_MODEL,
                lot_ids,
                &[
                    "id",
                    "name",
                    "product_id",
                    fields.height.as_str(),
                    fields.width.as_str(),
                    fields.block.as_str(),
                ],
            )
            .await?;

        let mut lots = HashMap::new();
        for record in &records {
            let Some(id) = record.get("id").and_then(Value::as_i64) else {
                continue;
            };
            lots.insert(
                id,
                LotInfo {
                    name: text_field(record, "name").unwrap_or_default(),
                    product_name: record
                        .get("product_id")
                        .and_then(many2one_name)
                        .unwrap_or_default(),
                    height: number_field(record, &fields.height),
                    width: number_field(record, &fields.width),
                    block: text_field(record, &fields.block),
                },
            );
        }
        Ok(lots)
    }

    async fn read_images(
        &self,
        lot_ids: &[i64],
        lots: &HashMap<i64, LotInfo>,
    ) -> Result<Vec<SingleItem>, GalleryError> {
        let images = self
            .orm
            .search_read(
                IMAGE_MODEL,
                &QueryBuilder::image_domain(lot_ids),
                &["id", "name", "lot_id"],
                SearchOptions::default().order("lot_id, id"),
            )
            .await?;

        let mut items = Vec::with_capacity(images.len());
        for image in &images {
            let Some(image_id) = image.get("id").and_then(Value::as_i64) else {
                continue;
            };
            let lot_id = image.get("lot_id").and_then(many2one_id);
            let lot = lot_id.and_then(|id| lots.get(&id)).cloned().unwrap_or_default();
            let area = match (lot.height, lot.width) {
                (Some(h), Some(w)) => h * w,
                _ => 0.0,
            };
            let id = image_id.to_string();
            items.push(SingleItem {
                url: self.settings.image_url(&id),
                id,
                lot_id,
                lot_name: lot.name,
                product_name: lot.product_name,
                dims: format_dims(lot.height, lot.width),
                area,
                block: lot.block,
            });
        }
        Ok(items)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::dashboards::d410_stone_selector::filter::FilterKey;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;

    /// In-memory ORM that answers from canned rows and records every call
    #[derive(Default)]
    pub(crate) struct FakeOrm {
        pub responses: HashMap<(String, String), Vec<Value>>,
        pub calls: RefCell<Vec<(String, String, Value)>>,
    }

    impl FakeOrm {
        pub fn respond(mut self, model: &str, method: &str, rows: Value) -> Self {
            let rows = rows.as_array().cloned().unwrap_or_default();
            self.responses
                .insert((model.to_string(), method.to_string()), rows);
            self
        }

        fn answer(&self, model: &str, method: &str, payload: Value) -> Vec<Value> {
            self.calls
                .borrow_mut()
                .push((model.to_string(), method.to_string(), payload));
            self.responses
                .get(&(model.to_string(), method.to_string()))
                .cloned()
                .unwrap_or_default()
        }

        pub fn called(&self, model: &str) -> bool {
            self.calls.borrow().iter().any(|(m, _, _)| m == model)
        }
    }

    #[async_trait(?Send)]
    impl OrmService for FakeOrm {
        async fn search_read(
            &self,
            model: &str,
            domain: &Domain,
            _fields: &[&str],
            _options: SearchOptions,
        ) -> Result<Vec<Value>, GalleryError> {
            Ok(self.answer(model, "search_read", domain.to_value()))
        }

        async fn read(
            &self,
            model: &str,
            ids: &[i64],
            _fields: &[&str],
        ) -> Result<Vec<Value>, GalleryError> {
            Ok(self.answer(model, "read", json!(ids)))
        }

        async fn read_group(
            &self,
            model: &str,
            domain: &Domain,
            _fields: &[&str],
            _groupby: &[&str],
        ) -> Result<Vec<Value>, GalleryError> {
            Ok(self.answer(model, "read_group", domain.to_value()))
        }

        async fn call(
            &self,
            model: &str,
            method: &str,
            args: Vec<Value>,
        ) -> Result<Value, GalleryError> {
            let rows = self.answer(model, method, Value::Array(args));
            Ok(rows.into_iter().next().unwrap_or(Value::Null))
        }
    }

    fn stocked_orm() -> FakeOrm {
        FakeOrm::default()
            .respond(
                "stock.quant",
                "read_group",
                json!([
                    {"lot_id": [1, "L-1"], "quantity": 1.0},
                    {"lot_id": [2, "L-2"], "quantity": 1.0},
                    {"lot_id": [3, "L-3"], "quantity": 1.0}
                ]),
            )
            .respond(
                "stock.lot",
                "read",
                json!([
                    {"id": 1, "name": "L-1", "product_id": [9, "Calacatta"], "x_alto": 3.0, "x_ancho": 2.0, "x_bloque": "B7"},
                    {"id": 2, "name": "L-2", "product_id": [9, "Calacatta"], "x_alto": 3.0, "x_ancho": 1.5, "x_bloque": "B7"},
                    {"id": 3, "name": "L-3", "product_id": [4, "Negro Marquina"], "x_alto": 2.0, "x_ancho": 1.0, "x_bloque": false}
                ]),
            )
            .respond(
                "stock.lot.image",
                "search_read",
                json!([
                    {"id": 101, "name": "a", "lot_id": [1, "L-1"]},
                    {"id": 102, "name": "b", "lot_id": [2, "L-2"]},
                    {"id": 103, "name": "c", "lot_id": [3, "L-3"]}
                ]),
            )
    }

    #[test]
    fn test_no_quants_short_circuits() {
        let orm = FakeOrm::default();
        let settings = SelectorSettings::default();
        let filters = FilterState::new()
            .with(FilterKey::Thickness, "2")
            .with(FilterKey::Warehouse, "5");

        let items = block_on(CatalogPipeline::new(&orm, &settings, &[]).resolve(&filters, None))
            .unwrap();

        assert!(items.is_empty());
        assert_eq!(orm.calls.borrow().len(), 1);
        assert!(!orm.called("stock.lot"));
        assert!(!orm.called("stock.lot.image"));
    }

    #[test]
    fn test_groups_images_by_block() {
        let orm = stocked_orm();
        let settings = SelectorSettings::default();
        let items = block_on(
            CatalogPipeline::new(&orm, &settings, &[1]).resolve(&FilterState::new(), None),
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        let CatalogItem::Block(block) = &items[0] else {
            panic!("expected block first");
        };
        assert_eq!(block.key, "B7");
        assert_eq!(block.ids, vec!["101", "102"]);
        assert_eq!(block.total_area, 10.5);

        let CatalogItem::Single(single) = &items[1] else {
            panic!("expected single");
        };
        assert_eq!(single.product_name, "Negro Marquina");
        assert_eq!(single.dims, "2 x 1 m");
        assert_eq!(single.url, "/web/image/stock.lot.image/103/image_small");
    }

    #[test]
    fn test_repeated_lot_groups_read_once_in_first_seen_order() {
        let orm = FakeOrm::default().respond(
            "stock.quant",
            "read_group",
            json!([
                {"lot_id": [2, "L-2"], "quantity": 1.0},
                {"lot_id": [1, "L-1"], "quantity": 4.0},
                {"lot_id": [2, "L-2"], "quantity": 2.0},
                {"lot_id": false, "quantity": 1.0}
            ]),
        );
        let settings = SelectorSettings::default();
        block_on(CatalogPipeline::new(&orm, &settings, &[]).resolve(&FilterState::new(), None))
            .unwrap();

        let calls = orm.calls.borrow();
        let lot_read = calls.iter().find(|(m, _, _)| m == "stock.lot").unwrap();
        assert_eq!(lot_read.2, json!([2, 1]));
    }

    #[test]
    fn test_drill_down_pins_block_and_skips_grouping() {
        let orm = stocked_orm();
        let settings = SelectorSettings::default();
        let items = block_on(
            CatalogPipeline::new(&orm, &settings, &[]).resolve(&FilterState::new(), Some("B7")),
        )
        .unwrap();

        assert!(items.iter().all(|i| matches!(i, CatalogItem::Single(_))));
        let calls = orm.calls.borrow();
        let (_, _, quant_domain) = &calls[0];
        assert!(quant_domain
            .as_array()
            .unwrap()
            .contains(&json!(["lot_id.x_bloque", "=", "B7"])));
    }

    #[test]
    fn test_price_lookup_without_products_short_circuits() {
        let orm = stocked_orm();
        let settings = SelectorSettings::default();
        let filters = FilterState::new()
            .with(FilterKey::Currency, "usd")
            .with(FilterKey::PriceTier, "1")
            .with(FilterKey::PriceMax, "10");

        let items = block_on(CatalogPipeline::new(&orm, &settings, &[]).resolve(&filters, None))
            .unwrap();

        assert!(items.is_empty());
        assert!(orm.called("product.template"));
        assert!(!orm.called("stock.quant"));
    }

    #[test]
    fn test_price_lookup_restricts_quants() {
        let orm = stocked_orm().respond("product.template", "search_read", json!([{"id": 9}]));
        let settings = SelectorSettings::default();
        let filters = FilterState::new()
            .with(FilterKey::Currency, "usd")
            .with(FilterKey::PriceTier, "1")
            .with(FilterKey::PriceMin, "50");

        block_on(CatalogPipeline::new(&orm, &settings, &[]).resolve(&filters, None)).unwrap();

        let calls = orm.calls.borrow();
        let quant_call = calls.iter().find(|(m, _, _)| m == "stock.quant").unwrap();
        assert!(quant_call
            .2
            .as_array()
            .unwrap()
            .contains(&json!(["product_id.product_tmpl_id", "in", [9]])));
    }
}
