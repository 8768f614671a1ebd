//! JSON-RPC 2.0 envelopes used by the ERP web endpoints

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::GalleryError;

/// Request envelope: `{jsonrpc: "2.0", method: "call", params, id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcRequest<P> {
    pub jsonrpc: String,
    pub method: String,
    pub params: P,
    pub id: u32,
}

impl<P> JsonRpcRequest<P> {
    pub fn call(params: P, id: u32) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: "call".to_string(),
            params,
            id,
        }
    }
}

/// Response envelope, either `result` or `error` is present
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse<R> {
    #[serde(default = "Option::default")]
    pub result: Option<R>,
    #[serde(default)]
    pub error: Option<RpcErrorPayload>,
}

impl<R> JsonRpcResponse<R> {
    /// Turns the envelope into the result, mapping an error payload to a rejection
    pub fn into_result(self) -> Result<R, GalleryError> {
        if let Some(error) = self.error {
            return Err(GalleryError::Rejected(error.display_message()));
        }
        self.result
            .ok_or_else(|| GalleryError::Decode("respuesta sin resultado".to_string()))
    }
}

/// Error payload as sent by the ERP: `{code, message, data: {name, message}}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RpcErrorPayload {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<RpcErrorData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RpcErrorData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RpcErrorPayload {
    /// Most specific message available: `data.message`, then `message`
    pub fn display_message(&self) -> String {
        self.data
            .as_ref()
            .and_then(|d| d.message.clone())
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "Error desconocido".to_string())
    }
}

/// Params of the generic ORM endpoint `/web/dataset/call_kw/<model>/<method>`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallKwParams {
    pub model: String,
    pub method: String,
    pub args: Vec<Value>,
    pub kwargs: Map<String, Value>,
}

impl CallKwParams {
    pub fn new(model: &str, method: &str, args: Vec<Value>) -> Self {
        Self {
            model: model.to_string(),
            method: method.to_string(),
            args,
            kwargs: Map::new(),
        }
    }

    pub fn kwarg(mut self, key: &str, value: Value) -> Self {
        self.kwargs.insert(key.to_string(), value);
        self
    }

    /// Endpoint path for this call
    pub fn path(&self) -> String {
        format!("/web/dataset/call_kw/{}/{}", self.model, self.method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_envelope_shape() {
        let request = JsonRpcRequest::call(json!({"token": "abc"}), 42);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"jsonrpc": "2.0", "method": "call", "params": {"token": "abc"}, "id": 42})
        );
    }

    #[test]
    fn test_error_payload_prefers_data_message() {
        let response: JsonRpcResponse<Value> = serde_json::from_value(json!({
            "error": {"code": 200, "message": "Odoo Server Error", "data": {"message": "Access denied"}}
        }))
        .unwrap();
        assert_eq!(
            response.into_result(),
            Err(GalleryError::Rejected("Access denied".to_string()))
        );
    }

    #[test]
    fn test_missing_result_is_decode_failure() {
        let response: JsonRpcResponse<Value> = serde_json::from_value(json!({"id": 1})).unwrap();
        assert!(matches!(response.into_result(), Err(GalleryError::Decode(_))));
    }

    #[test]
    fn test_call_kw_path_and_kwargs() {
        let params = CallKwParams::new("res.partner", "search_read", vec![json!([])])
            .kwarg("limit", json!(80));
        assert_eq!(params.path(), "/web/dataset/call_kw/res.partner/search_read");
        assert_eq!(params.kwargs.get("limit"), Some(&json!(80)));
    }
}
