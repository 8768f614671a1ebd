use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use serde::Serialize;
use serde_json::Value;

use super::cart::{Cart, CartItem, CartSession, CartStore};
use crate::shared::error::GalleryError;
use crate::shared::format::format_date;
use crate::shared::rpc::JsonRpcRequest;

/// `params` of the reservation call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationParams {
    pub token: String,
    pub items: Vec<CartItem>,
}

/// Build the reservation envelope for the current cart.
///
/// Fails before any network call when the token is missing or the cart is empty.
pub fn build_request(
    token: Option<&str>,
    cart: &Cart,
    id: u32,
) -> Result<JsonRpcRequest<ReservationParams>, GalleryError> {
    let token = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| GalleryError::MissingContext("Token no encontrado.".to_string()))?;
    if cart.is_empty() {
        return Err(GalleryError::MissingContext(
            "Tu selección está vacía.".to_string(),
        ));
    }
    Ok(JsonRpcRequest::call(
        ReservationParams {
            token: token.to_string(),
            items: cart.items().to_vec(),
        },
        id,
    ))
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReservationOutcome {
    Confirmed { message: String, order_name: String },
    Rejected { message: String },
}

impl ReservationOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, ReservationOutcome::Confirmed { .. })
    }

    pub fn user_message(&self) -> String {
        match self {
            ReservationOutcome::Confirmed {
                message,
                order_name,
            } => format!("✅ {}\n\nReferencia: {}", message, order_name),
            ReservationOutcome::Rejected { message } => {
                format!("⚠️ No se pudo reservar:\n{}", message)
            }
        }
    }
}

/// Interpret the reservation response body.
///
/// Success is decided by the truthiness of `result.success`. Otherwise the message falls back
/// through `error.data.message`, `error.message`, `result.message`, then a generic text.
pub fn parse_reservation_response(body: &Value) -> ReservationOutcome {
    let result = body.get("result");
    let success = result
        .and_then(|r| r.get("success"))
        .map(is_truthy)
        .unwrap_or(false);

    if success {
        return ReservationOutcome::Confirmed {
            message: string_at(result, &["message"]).unwrap_or_default(),
            order_name: string_at(result, &["order_name"]).unwrap_or_default(),
        };
    }

    let error = body.get("error");
    let message = string_at(error, &["data", "message"])
        .or_else(|| string_at(error, &["message"]))
        .or_else(|| string_at(result, &["message"]))
        .unwrap_or_else(|| "Error desconocido".to_string());
    ReservationOutcome::Rejected { message }
}

fn string_at(root: Option<&Value>, path: &[&str]) -> Option<String> {
    let mut current = root?;
    for key in path {
        current = current.get(key)?;
    }
    current.as_str().map(str::to_string)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl<S: CartStore> CartSession<S> {
    /// Apply a finished reservation request to the cart and return the text to show.
    ///
    /// Only a confirmed reservation empties the cart; rejections and failed requests keep it
    /// so the user can retry.
    pub fn apply_reservation(
        &mut self,
        result: &Result<ReservationOutcome, GalleryError>,
    ) -> String {
        match result {
            Ok(outcome) if outcome.is_confirmed() => {
                log::info!("Reservation confirmed, clearing cart {}", self.key());
                self.clear();
                outcome.user_message()
            }
            Ok(outcome) => {
                log::warn!("Reservation rejected: {:?}", outcome);
                outcome.user_message()
            }
            Err(e) => {
                log::error!("Reservation failed: {}", e);
                e.user_message()
            }
        }
    }
}

/// Moment a reservation made at `now` expires
pub fn reservation_expiry<Tz: TimeZone>(now: DateTime<Tz>, days: i64) -> DateTime<Tz> {
    now + Duration::days(days)
}

/// Disclaimer shown before submitting
pub fn disclaimer_text(expires_on: NaiveDate, days: i64) -> String {
    format!(
        "Las placas seleccionadas quedarán apartadas durante {} días, hasta el {}. \
         Después de esa fecha la reserva se libera automáticamente. ¿Deseas continuar?",
        days,
        format_date(expires_on)
    )
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReservationPhase {
    #[default]
    Idle,
    /// Disclaimer on screen, waiting for the user
    Confirming { expires_on: NaiveDate },
    /// Request in flight, the confirm button is disabled
    Submitting,
}

/// Confirmation gate in front of the reservation request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFlow {
    phase: ReservationPhase,
}

impl ReservationFlow {
    pub fn phase(&self) -> &ReservationPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == ReservationPhase::Submitting
    }

    /// Show the disclaimer; ignored for an empty cart or while a request is running
    pub fn request_confirmation(&mut self, expires_on: NaiveDate, cart: &Cart) -> bool {
        if cart.is_empty() || self.phase != ReservationPhase::Idle {
            return false;
        }
        self.phase = ReservationPhase::Confirming { expires_on };
        true
    }

    /// User declined; nothing else changes
    pub fn decline(&mut self) {
        if matches!(self.phase, ReservationPhase::Confirming { .. }) {
            self.phase = ReservationPhase::Idle;
        }
    }

    /// User accepted; returns true when the request should be sent
    pub fn accept(&mut self) -> bool {
        if !matches!(self.phase, ReservationPhase::Confirming { .. }) {
            return false;
        }
        self.phase = ReservationPhase::Submitting;
        true
    }

    /// Request finished, whatever the outcome
    pub fn finish(&mut self) {
        self.phase = ReservationPhase::Idle;
    }
}
