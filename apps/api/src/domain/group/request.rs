use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::events::GroupEvent;
use super::team_balance::TeamBalanceSettings;
use super::value_objects::{GenderRestriction, MatchName, MatchSchedule};
use crate::domain::category::Category;
use crate::domain::fee::FeeConfiguration;

/// Fully validated request to create a match group
///
/// Produced only by [`GroupCreationWizard::complete`](super::wizard::GroupCreationWizard::complete)
/// once every step guard has passed, and immutable afterwards.
///
/// # Invariants
/// - Name is 2 to 100 characters
/// - Team settings were normalized for `category`
/// - Fixed-fee categories carry the fee derived from `schedule`
/// - Free matches carry no fee amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCreationRequest {
    id: Uuid,
    category: Category,
    name: MatchName,
    team_settings: TeamBalanceSettings,
    gender_restriction: Option<GenderRestriction>,
    fee_config: FeeConfiguration,
    schedule: MatchSchedule,
    created_by: Uuid,
    created_at: DateTime<Utc>,
}

impl GroupCreationRequest {
    /// Assembles the request and the `Created` event
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        category: Category,
        name: MatchName,
        team_settings: TeamBalanceSettings,
        gender_restriction: Option<GenderRestriction>,
        fee_config: FeeConfiguration,
        schedule: MatchSchedule,
        created_by: Uuid,
    ) -> (Self, Vec<GroupEvent>) {
        let request = Self {
            id: Uuid::new_v4(),
            category,
            name,
            team_settings,
            gender_restriction,
            fee_config,
            schedule,
            created_by,
            created_at: Utc::now(),
        };

        let events = vec![GroupEvent::Created {
            group_id: request.id,
            category: request.category,
            name: request.name.to_string(),
            created_by: request.created_by,
            fee_amount: request.fee_config.amount(),
        }];

        (request, events)
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn name(&self) -> &MatchName {
        &self.name
    }

    pub fn team_settings(&self) -> &TeamBalanceSettings {
        &self.team_settings
    }

    /// `None` when anyone may join
    pub fn gender_restriction(&self) -> Option<GenderRestriction> {
        self.gender_restriction
    }

    pub fn fee_config(&self) -> FeeConfiguration {
        self.fee_config
    }

    pub fn schedule(&self) -> MatchSchedule {
        self.schedule
    }

    /// Organizer who ran the wizard
    pub fn created_by(&self) -> Uuid {
        self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
