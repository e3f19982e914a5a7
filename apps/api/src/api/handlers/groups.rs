use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::middleware::JwtAuth;
use crate::api::state::AppState;
use crate::domain::category::Category;
use crate::domain::group::team_balance::MinPlayersInput;
use crate::domain::group::value_objects::{GenderRestriction, MatchSchedule, TeamColor};
use crate::domain::group::{GroupCreationRequest, GroupCreationWizard};
use crate::domain::input::FieldUpdate;

/// Request body for creating a group in one submission
///
/// The fields are fed through the creation wizard in step order, so the
/// same guards apply as in the interactive flow.
#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub category: Category,
    pub name: String,
    pub match_date: NaiveDate,
    /// Defaults to today (UTC)
    pub reserved_on: Option<NaiveDate>,
    #[serde(default)]
    pub team: TeamRequest,
    pub gender_restriction: Option<GenderRestriction>,
    #[serde(default)]
    pub has_fee: bool,
    /// Raw amount as typed, commas allowed
    pub fee_amount: Option<String>,
}

/// Team balance fields of [`CreateGroupRequest`]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TeamRequest {
    pub positions: Vec<String>,
    pub balance_by_experience: bool,
    pub balance_by_rank: bool,
    /// Number or text; unparseable text becomes 1
    pub min_players_per_team: Option<MinPlayersInput>,
    pub creator_position_code: Option<String>,
    pub creator_team: Option<TeamColor>,
}

/// Create a new match group
///
/// POST /api/groups
pub async fn create_group(
    State(state): State<AppState>,
    JwtAuth(organizer_id): JwtAuth,
    ApiJson(req): ApiJson<CreateGroupRequest>,
) -> Result<(StatusCode, Json<GroupCreationRequest>), ApiError> {
    let reserved_on = req.reserved_on.unwrap_or_else(|| Utc::now().date_naive());
    let schedule = MatchSchedule::new(req.match_date, reserved_on);
    let mut wizard =
        GroupCreationWizard::new(req.category, schedule, organizer_id, state.notifier.clone())
            .with_validator(state.team_validator());

    let team = req.team;
    let mut updates = vec![
        ("name", wizard.set_match_name(req.name)),
        ("team.positions", wizard.set_positions(team.positions)),
        (
            "team.balance_by_experience",
            wizard.set_balance_by_experience(team.balance_by_experience),
        ),
        ("team.balance_by_rank", wizard.set_balance_by_rank(team.balance_by_rank)),
        (
            "gender_restriction",
            wizard.set_gender_restriction(req.gender_restriction),
        ),
    ];
    // Absent team size keeps the category suggestion
    if let Some(input) = team.min_players_per_team {
        let update = match input {
            MinPlayersInput::Number(value) => wizard.set_min_players(Some(value)),
            MinPlayersInput::Text(raw) => wizard.input_min_players(&raw),
        };
        updates.push(("team.min_players_per_team", update));
    }
    if !req.category.has_fixed_fee() {
        updates.push(("has_fee", wizard.set_has_fee(req.has_fee)));
        if let Some(raw) = req.fee_amount.as_deref().filter(|_| req.has_fee) {
            updates.push(("fee_amount", wizard.input_fee(raw)));
        }
    }
    if team.creator_position_code.is_some() || team.creator_team.is_some() {
        updates.push((
            "team.creator",
            wizard.set_creator(team.creator_position_code, team.creator_team),
        ));
    }

    if let Some((field, FieldUpdate::Ignored { reason })) =
        updates.into_iter().find(|(_, update)| !update.is_applied())
    {
        return Err(ApiError::bad_request(format!("{}: {}", field, reason)));
    }

    let (request, events) = wizard.complete()?;

    state
        .groups
        .save(&request)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Failed to save group: {}", e)))?;

    for event in &events {
        tracing::info!(group_id = %event.group_id(), ?event, "group event published");
    }

    Ok((StatusCode::CREATED, Json(request)))
}

/// Get a group by ID
///
/// GET /api/groups/:id
pub async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GroupCreationRequest>, ApiError> {
    let group = state
        .groups
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Storage error: {}", e)))?
        .ok_or_else(|| ApiError::not_found(format!("Group not found: {}", id)))?;

    Ok(Json(group))
}

/// List the caller's groups
///
/// GET /api/groups
pub async fn list_my_groups(
    State(state): State<AppState>,
    JwtAuth(organizer_id): JwtAuth,
) -> Result<Json<Vec<GroupCreationRequest>>, ApiError> {
    let groups = state
        .groups
        .find_by_creator(organizer_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Storage error: {}", e)))?;

    Ok(Json(groups))
}
