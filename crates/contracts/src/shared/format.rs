//! Display formatting shared by the gallery and the selector

use chrono::NaiveDate;

/// Formats a surface in square meters with two decimals, e.g. `3.50 m²`
pub fn format_area(value: f64) -> String {
    format!("{:.2} m²", value)
}

/// Formats slab dimensions as `alto x ancho m`
///
/// Returns an empty string when either side is unknown.
pub fn format_dims(height: Option<f64>, width: Option<f64>) -> String {
    match (height, width) {
        (Some(h), Some(w)) => format!("{} x {} m", trim_number(h), trim_number(w)),
        _ => String::new(),
    }
}

/// Format a date as DD/MM/YYYY
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn trim_number(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
