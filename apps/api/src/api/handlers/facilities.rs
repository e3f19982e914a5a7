use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::extract::ApiJson;
use crate::domain::facility::BusinessNumber;

#[derive(Debug, Deserialize)]
pub struct VerifyBusinessNumberRequest {
    pub business_number: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyBusinessNumberResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Check a facility owner's business registration number
///
/// POST /api/facilities/business-number/verify
pub async fn verify_business_number(
    ApiJson(req): ApiJson<VerifyBusinessNumberRequest>,
) -> Json<VerifyBusinessNumberResponse> {
    let response = match BusinessNumber::parse(&req.business_number) {
        Ok(number) => VerifyBusinessNumberResponse {
            valid: true,
            business_number: Some(number.to_string()),
            reason: None,
        },
        Err(err) => {
            tracing::info!(error = %err, "business number rejected");
            VerifyBusinessNumberResponse {
                valid: false,
                business_number: None,
                reason: Some(err.to_string()),
            }
        }
    };

    Json(response)
}
