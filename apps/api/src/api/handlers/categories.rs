use axum::{extract::Path, Json};
use serde::Serialize;

use crate::api::errors::ApiError;
use crate::domain::category::Category;
use crate::domain::fee::FeeSchedule;
use crate::domain::group::team_balance::MinPlayers;
use crate::domain::group::wizard::WizardStep;

/// Defaults the web client needs to start the creation wizard
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub category: Category,
    pub display_name: &'static str,
    pub fixed_fee: Option<FeeSchedule>,
    pub suggested_min_players: u8,
    pub positions: &'static [&'static str],
    pub steps: Vec<WizardStep>,
}

/// Describe a category
///
/// GET /api/categories/:category
pub async fn get_category(Path(raw): Path<String>) -> Result<Json<CategoryResponse>, ApiError> {
    let category = raw
        .parse::<Category>()
        .map_err(|e| ApiError::not_found(e.to_string()))?;
    let policy = category.policy();

    Ok(Json(CategoryResponse {
        category,
        display_name: category.display_name(),
        fixed_fee: policy.fixed_fee,
        suggested_min_players: MinPlayers::suggested(category).get(),
        positions: policy.positions,
        steps: WizardStep::sequence(category),
    }))
}
