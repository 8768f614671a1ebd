//! ORM access over the ERP's JSON-RPC `call_kw` endpoint

use async_trait::async_trait;
use contracts::shared::erp_domain::Domain;
use contracts::shared::orm::{OrmService, SearchOptions};
use contracts::shared::rpc::{CallKwParams, JsonRpcRequest, JsonRpcResponse};
use contracts::shared::GalleryError;
use gloo_net::http::Request;
use serde_json::{json, Value};

use super::api_utils::{api_url, rpc_request_id};

/// Browser implementation of [`OrmService`], authenticated by the page's session cookie
#[derive(Debug, Clone, Copy, Default)]
pub struct RpcOrm;

impl RpcOrm {
    async fn call_kw(&self, params: CallKwParams) -> Result<Value, GalleryError> {
        let url = api_url(&params.path());
        log::debug!("call_kw {}.{}", params.model, params.method);
        let envelope = JsonRpcRequest::call(params, rpc_request_id());

        let response = Request::post(&url)
            .json(&envelope)
            .map_err(|e| GalleryError::Transport(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| GalleryError::Transport(format!("Failed to send request: {}", e)))?;

        if !response.ok() {
            return Err(GalleryError::Transport(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let body: JsonRpcResponse<Value> = response
            .json()
            .await
            .map_err(|e| GalleryError::Decode(format!("Failed to parse response: {}", e)))?;
        body.into_result()
    }

    async fn call_rows(&self, params: CallKwParams) -> Result<Vec<Value>, GalleryError> {
        match self.call_kw(params).await? {
            Value::Array(rows) => Ok(rows),
            other => Err(GalleryError::Decode(format!(
                "se esperaba una lista de registros: {}",
                other
            ))),
        }
    }
}

#[async_trait(?Send)]
impl OrmService for RpcOrm {
    async fn search_read(
        &self,
        model: &str,
        domain: &Domain,
        fields: &[&str],
        options: SearchOptions,
    ) -> Result<Vec<Value>, GalleryError> {
        let mut params = CallKwParams::new(model, "search_read", vec![])
            .kwarg("domain", domain.to_value())
            .kwarg("fields", json!(fields));
        if let Some(limit) = options.limit {
            params = params.kwarg("limit", json!(limit));
        }
        if let Some(order) = options.order {
            params = params.kwarg("order", json!(order));
        }
        self.call_rows(params).await
    }

    async fn read(
        &self,
        model: &str,
        ids: &[i64],
        fields: &[&str],
    ) -> Result<Vec<Value>, GalleryError> {
        self.call_rows(CallKwParams::new(model, "read", vec![json!(ids), json!(fields)]))
            .await
    }

    async fn read_group(
        &self,
        model: &str,
        domain: &Domain,
        fields: &[&str],
        groupby: &[&str],
    ) -> Result<Vec<Value>, GalleryError> {
        let params = CallKwParams::new(
            model,
            "read_group",
            vec![domain.to_value(), json!(fields), json!(groupby)],
        )
        .kwarg("lazy", json!(false));
        self.call_rows(params).await
    }

    async fn call(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, GalleryError> {
        self.call_kw(CallKwParams::new(model, method, args)).await
    }
}
