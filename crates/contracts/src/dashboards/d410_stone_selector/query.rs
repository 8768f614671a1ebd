use serde_json::Value;

use super::filter::{FilterKey, FilterState};
use crate::shared::config::SelectorSettings;
use crate::shared::erp_domain::{Domain, Operator, Term};

/// Price restriction resolved against `product.template`
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuery {
    pub field: String,
    pub domain: Domain,
}

/// Translates the selector filters into ERP search domains
pub struct QueryBuilder<'a> {
    settings: &'a SelectorSettings,
    filters: &'a FilterState,
    company_ids: &'a [i64],
}

impl<'a> QueryBuilder<'a> {
    pub fn new(
        settings: &'a SelectorSettings,
        filters: &'a FilterState,
        company_ids: &'a [i64],
    ) -> Self {
        Self {
            settings,
            filters,
            company_ids,
        }
    }

    /// Domain on `stock.quant` selecting available stock that matches the filters.
    ///
    /// `template_ids` restricts to products that passed the price lookup; `pinned_block`
    /// restricts to one block with an exact match.
    pub fn quant_domain(&self, template_ids: Option<&[i64]>, pinned_block: Option<&str>) -> Domain {
        let mut domain = self.availability_domain();
        let lot = &self.settings.lot_fields;

        if let Some(q) = self.filters.text(FilterKey::Search) {
            domain.push_any(vec![
                Term::new("product_id.name", Operator::ILike, q.clone()),
                Term::new("lot_id.name", Operator::ILike, q.clone()),
                Term::new(format!("lot_id.{}", lot.block), Operator::ILike, q),
            ]);
        }

        for key in FilterKey::text_keys() {
            if let Some(value) = self.filters.text(*key) {
                domain.push(Term::new(self.text_field(*key), Operator::ILike, value));
            }
        }

        for key in FilterKey::numeric_keys() {
            if let Some(value) = self.filters.number(*key) {
                domain.push(Term::new(self.numeric_field(*key), Operator::GtEq, value));
            }
        }

        if let Some(warehouse) = self.filters.id(FilterKey::Warehouse) {
            domain.push(Term::new("location_id.warehouse_id", Operator::Eq, warehouse));
        }

        if let Some(category) = self.filters.id(FilterKey::Category) {
            domain.push(Term::new("product_id.categ_id", Operator::ChildOf, category));
        }

        if let Some(ids) = template_ids {
            domain.push(Term::new(
                "product_id.product_tmpl_id",
                Operator::In,
                ids.to_vec(),
            ));
        }

        if let Some(block) = pinned_block {
            domain.push(Term::new(format!("lot_id.{}", lot.block), Operator::Eq, block));
        }

        domain
    }

    /// Scope every search shares: company, internal locations, free positive stock, no hold
    fn availability_domain(&self) -> Domain {
        let mut domain = Domain::new();
        if !self.company_ids.is_empty() {
            domain.push(Term::new(
                "company_id",
                Operator::In,
                self.company_ids.to_vec(),
            ));
        }
        domain
            .push(Term::new(
                "location_id.usage",
                Operator::Eq,
                self.settings.internal_usage.clone(),
            ))
            .push(Term::new("quantity", Operator::Gt, 0))
            .push(Term::new("reserved_quantity", Operator::Eq, 0))
            .push(Term::new(self.settings.hold_field.clone(), Operator::Eq, false))
            .push(Term::new("lot_id", Operator::NotEq, false));
        domain
    }

    /// Domain on `product.template` for the price range.
    ///
    /// Only built when currency and tier are both chosen and at least one bound parses.
    pub fn price_query(&self) -> Option<PriceQuery> {
        let currency = self.filters.text(FilterKey::Currency)?;
        let tier = self.filters.text(FilterKey::PriceTier)?;
        let field = self.settings.price_field(&currency, &tier)?;

        let min = self.filters.number(FilterKey::PriceMin);
        let max = self.filters.number(FilterKey::PriceMax);
        if min.is_none() && max.is_none() {
            return None;
        }

        let mut domain = Domain::new();
        if let Some(min) = min {
            domain.push(Term::new(field.clone(), Operator::GtEq, min));
        }
        if let Some(max) = max {
            domain.push(Term::new(field.clone(), Operator::LtEq, max));
        }
        Some(PriceQuery { field, domain })
    }

    /// Domain on `stock.lot.image` for the resolved lots
    pub fn image_domain(lot_ids: &[i64]) -> Domain {
        Domain::new().with(Term::new("lot_id", Operator::In, Value::from(lot_ids.to_vec())))
    }

    fn text_field(&self, key: FilterKey) -> String {
        let lot = &self.settings.lot_fields;
        match key {
            FilterKey::Product => "product_id.name".to_string(),
            FilterKey::Lot => "lot_id.name".to_string(),
            FilterKey::Block => format!("lot_id.{}", lot.block),
            FilterKey::Bundle => format!("lot_id.{}", lot.bundle),
            FilterKey::Pedimento => format!("lot_id.{}", lot.pedimento),
            FilterKey::Container => format!("lot_id.{}", lot.container),
            _ => format!("lot_id.{}", lot.color),
        }
    }

    fn numeric_field(&self, key: FilterKey) -> String {
        let lot = &self.settings.lot_fields;
        match key {
            FilterKey::Thickness => format!("lot_id.{}", lot.thickness),
            FilterKey::Height => format!("lot_id.{}", lot.height),
            _ => format!("lot_id.{}", lot.width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings() -> SelectorSettings {
        SelectorSettings::default()
    }

    #[test]
    fn test_availability_scope_is_always_present() {
        let settings = settings();
        let filters = FilterState::new();
        let domain = QueryBuilder::new(&settings, &filters, &[1, 3]).quant_domain(None, None);
        assert_eq!(
            domain.to_value(),
            json!([
                ["company_id", "in", [1, 3]],
                ["location_id.usage", "=", "internal"],
                ["quantity", ">", 0],
                ["reserved_quantity", "=", 0],
                ["x_tiene_hold", "=", false],
                ["lot_id", "!=", false]
            ])
        );
    }

    #[test]
    fn test_user_filters_are_appended() {
        let settings = settings();
        let filters = FilterState::new()
            .with(FilterKey::Thickness, "2")
            .with(FilterKey::Warehouse, "5")
            .with(FilterKey::Block, " B-7 ")
            .with(FilterKey::Category, "9")
            .with(FilterKey::Width, "wide");
        let domain = QueryBuilder::new(&settings, &filters, &[]).quant_domain(None, None);

        assert!(domain.find("company_id").is_none());
        assert_eq!(domain.find("lot_id.x_grosor").unwrap().value, json!(2.0));
        assert_eq!(domain.find("lot_id.x_grosor").unwrap().operator, Operator::GtEq);
        assert_eq!(domain.find("location_id.warehouse_id").unwrap().value, json!(5));
        assert_eq!(domain.find("lot_id.x_bloque").unwrap().value, json!("B-7"));
        assert_eq!(domain.find("product_id.categ_id").unwrap().operator, Operator::ChildOf);
        assert!(domain.find("lot_id.x_ancho").is_none());
    }

    #[test]
    fn test_search_spans_product_lot_and_block() {
        let settings = settings();
        let filters = FilterState::new().with(FilterKey::Search, "calacatta");
        let value = QueryBuilder::new(&settings, &filters, &[])
            .quant_domain(None, None)
            .to_value();
        let items = value.as_array().unwrap();
        let tail: Vec<&Value> = items.iter().rev().take(5).collect();
        assert_eq!(tail[4], &json!("|"));
        assert_eq!(tail[3], &json!("|"));
        assert_eq!(tail[0], &json!(["lot_id.x_bloque", "ilike", "calacatta"]));
    }

    #[test]
    fn test_pinned_block_and_templates() {
        let settings = settings();
        let filters = FilterState::new();
        let domain =
            QueryBuilder::new(&settings, &filters, &[]).quant_domain(Some(&[4, 8]), Some("B7"));
        assert_eq!(
            domain.find("product_id.product_tmpl_id").unwrap().value,
            json!([4, 8])
        );
        let pin = domain.find("lot_id.x_bloque").unwrap();
        assert_eq!(pin.operator, Operator::Eq);
        assert_eq!(pin.value, json!("B7"));
    }

    #[test]
    fn test_price_needs_currency_and_tier() {
        let settings = settings();
        let only_currency = FilterState::new()
            .with(FilterKey::Currency, "usd")
            .with(FilterKey::PriceMin, "100");
        assert!(QueryBuilder::new(&settings, &only_currency, &[]).price_query().is_none());

        let full = only_currency
            .clone()
            .with(FilterKey::PriceTier, "2")
            .with(FilterKey::PriceMax, "250.5");
        let price = QueryBuilder::new(&settings, &full, &[]).price_query().unwrap();
        assert_eq!(price.field, "x_price_usd_2");
        assert_eq!(
            price.domain.to_value(),
            json!([["x_price_usd_2", ">=", 100.0], ["x_price_usd_2", "<=", 250.5]])
        );
    }

    #[test]
    fn test_price_without_bounds_is_unset() {
        let settings = settings();
        let filters = FilterState::new()
            .with(FilterKey::Currency, "mxn")
            .with(FilterKey::PriceTier, "1")
            .with(FilterKey::PriceMin, "barato");
        assert!(QueryBuilder::new(&settings, &filters, &[]).price_query().is_none());
    }
}
