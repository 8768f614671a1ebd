//! Helpers for talking to the ERP that serves the page
//!
//! The widgets are rendered by the ERP itself, so every request is same-origin.

/// Origin of the current page, e.g. "https://erp.example.com"
///
/// Empty string when there is no window (unit tests), which yields relative URLs.
pub fn api_base() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Build a full URL from an ERP path such as "/web/dataset/call_kw/res.partner/search_read"
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Random JSON-RPC id, 0..1000
pub fn rpc_request_id() -> u32 {
    (js_sys::Math::random() * 1000.0).floor() as u32
}
