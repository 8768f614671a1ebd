use contracts::domain::a030_gallery::reservation::{build_request, parse_reservation_response};
use contracts::domain::a030_gallery::{Cart, ReservationOutcome};
use contracts::shared::GalleryError;
use gloo_net::http::Request;
use serde_json::Value;

use crate::shared::api_utils::{api_url, rpc_request_id};

/// Submit the cart for reservation under the gallery token
pub async fn confirm_reservation(
    endpoint: &str,
    token: Option<&str>,
    cart: &Cart,
) -> Result<ReservationOutcome, GalleryError> {
    let request = build_request(token, cart, rpc_request_id())?;
    log::info!("Confirming reservation of {} items", cart.len());

    let response = Request::post(&api_url(endpoint))
        .json(&request)
        .map_err(|e| GalleryError::Transport(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| GalleryError::Transport(format!("Request failed: {}", e)))?;

    // error statuses still carry a JSON-RPC body worth reading
    let body: Value = response
        .json()
        .await
        .map_err(|e| GalleryError::Decode(format!("Failed to parse response: {}", e)))?;

    Ok(parse_reservation_response(&body))
}
