use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::domain::category::Category;
use crate::domain::fee::{compute_fee, format_points, FeeField, ReservationTiming};
use crate::domain::input::FieldUpdate;

/// Request body for a fee quote
#[derive(Debug, Deserialize)]
pub struct FeeQuoteRequest {
    pub category: Category,
    pub match_date: NaiveDate,
    /// Defaults to today (UTC)
    pub reserved_on: Option<NaiveDate>,
    #[serde(default)]
    pub has_fee: bool,
    /// Raw amount as typed, commas allowed
    pub fee_amount: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeeQuoteResponse {
    pub category: Category,
    pub timing: ReservationTiming,
    pub amount: u32,
    pub display_amount: String,
}

/// Quote the per-participant fee
///
/// POST /api/fees/quote
pub async fn quote_fee(
    ApiJson(req): ApiJson<FeeQuoteRequest>,
) -> Result<Json<FeeQuoteResponse>, ApiError> {
    let reserved_on = req.reserved_on.unwrap_or_else(|| Utc::now().date_naive());
    let timing = ReservationTiming::from_dates(reserved_on, req.match_date);

    // A disabled or fixed fee never reads the typed amount
    let mut field = FeeField::new(req.has_fee);
    let editable = req.has_fee && !req.category.has_fixed_fee();
    if let Some(raw) = req.fee_amount.as_deref().filter(|_| editable) {
        if let FieldUpdate::Ignored { reason } = field.input(raw) {
            return Err(ApiError::bad_request(format!("fee_amount: {}", reason)));
        }
    }

    let amount = compute_fee(req.category, timing.is_early(), &field)
        .map_err(|e| ApiError::unprocessable(e.to_string()))?;

    Ok(Json(FeeQuoteResponse {
        category: req.category,
        timing,
        amount,
        display_amount: format_points(amount),
    }))
}
