//! Abstract access to the ERP object layer.
//!
//! The browser implementation posts JSON-RPC to the ERP; tests substitute an in-memory fake.

use async_trait::async_trait;
use serde_json::Value;

use super::erp_domain::Domain;
use super::error::GalleryError;

/// Extra options for `search_read`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    pub limit: Option<u32>,
    pub order: Option<String>,
}

impl SearchOptions {
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn order(mut self, order: &str) -> Self {
        self.order = Some(order.to_string());
        self
    }
}

#[async_trait(?Send)]
pub trait OrmService {
    /// Search records matching `domain` and read `fields` from them
    async fn search_read(
        &self,
        model: &str,
        domain: &Domain,
        fields: &[&str],
        options: SearchOptions,
    ) -> Result<Vec<Value>, GalleryError>;

    /// Read `fields` of the records with the given ids
    async fn read(&self, model: &str, ids: &[i64], fields: &[&str])
        -> Result<Vec<Value>, GalleryError>;

    /// Aggregate records matching `domain`, one row per distinct value of `groupby`
    async fn read_group(
        &self,
        model: &str,
        domain: &Domain,
        fields: &[&str],
        groupby: &[&str],
    ) -> Result<Vec<Value>, GalleryError>;

    /// Call a public model method with positional arguments
    async fn call(&self, model: &str, method: &str, args: Vec<Value>)
        -> Result<Value, GalleryError>;
}

/// Id of a many2one value (`[id, "display name"]`), `false` when unset
pub fn many2one_id(value: &Value) -> Option<i64> {
    match value {
        Value::Array(pair) => pair.first().and_then(Value::as_i64),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

/// Display name of a many2one value
pub fn many2one_name(value: &Value) -> Option<String> {
    match value {
        Value::Array(pair) => pair.get(1).and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Char field value; the ERP sends `false` for empty fields
pub fn text_field(record: &Value, field: &str) -> Option<String> {
    record
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Float/integer field value, `false` and missing map to `None`
pub fn number_field(record: &Value, field: &str) -> Option<f64> {
    record.get(field).and_then(Value::as_f64)
}
