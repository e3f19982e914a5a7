use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use super::events::GroupEvent;
use super::request::GroupCreationRequest;
use super::team_balance::{MinPlayers, TeamBalanceCandidate, TeamBalanceSettings, TeamBalanceValidator};
use super::value_objects::{GenderRestriction, MatchName, MatchSchedule, TeamColor};
use crate::domain::category::Category;
use crate::domain::fee::{compute_fee, FeeConfiguration, FeeField};
use crate::domain::input::FieldUpdate;
use crate::notifications::Notifier;

/// Steps of the group creation flow
///
/// # Order
/// ```text
/// MatchName -> LevelSettings -> GenderRestriction -> Fee -> [CreatorPosition] -> Complete
/// ```
/// `CreatorPosition` only exists for categories with a position vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    MatchName,
    LevelSettings,
    GenderRestriction,
    Fee,
    CreatorPosition,
    Complete,
}

impl WizardStep {
    /// Ordered steps for a category, ending with `Complete`
    ///
    /// # Example
    /// ```
    /// use matchup_api::domain::category::Category;
    /// use matchup_api::domain::group::wizard::WizardStep;
    ///
    /// assert!(WizardStep::sequence(Category::Soccer).contains(&WizardStep::CreatorPosition));
    /// assert!(!WizardStep::sequence(Category::Tennis).contains(&WizardStep::CreatorPosition));
    /// ```
    pub fn sequence(category: Category) -> Vec<WizardStep> {
        let mut steps = vec![
            WizardStep::MatchName,
            WizardStep::LevelSettings,
            WizardStep::GenderRestriction,
            WizardStep::Fee,
        ];
        if category.uses_positions() {
            steps.push(WizardStep::CreatorPosition);
        }
        steps.push(WizardStep::Complete);
        steps
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardStep::MatchName => write!(f, "match_name"),
            WizardStep::LevelSettings => write!(f, "level_settings"),
            WizardStep::GenderRestriction => write!(f, "gender_restriction"),
            WizardStep::Fee => write!(f, "fee"),
            WizardStep::CreatorPosition => write!(f, "creator_position"),
            WizardStep::Complete => write!(f, "complete"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Step {step} is incomplete: {reason}")]
    StepIncomplete { step: WizardStep, reason: String },

    #[error("Already at the first step")]
    AtFirstStep,

    #[error("Step {0} is not part of this flow")]
    StepNotInFlow(WizardStep),

    #[error("Group request was already assembled")]
    AlreadyComplete,
}

impl WizardError {
    /// Step the caller has to return to, if any
    pub fn step(&self) -> Option<WizardStep> {
        match self {
            WizardError::StepIncomplete { step, .. } => Some(*step),
            WizardError::StepNotInFlow(step) => Some(*step),
            WizardError::AtFirstStep | WizardError::AlreadyComplete => None,
        }
    }

    fn incomplete(step: WizardStep, reason: impl ToString) -> Self {
        WizardError::StepIncomplete {
            step,
            reason: reason.to_string(),
        }
    }
}

/// Drives the multi-step creation of a match group
///
/// The wizard exclusively owns its in-progress state. Nothing leaves it
/// until [`complete`](Self::complete) hands out an immutable
/// [`GroupCreationRequest`].
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use matchup_api::domain::category::Category;
/// use matchup_api::domain::group::value_objects::MatchSchedule;
/// use matchup_api::domain::group::wizard::{GroupCreationWizard, WizardStep};
/// use matchup_api::notifications::Notifier;
/// use uuid::Uuid;
///
/// let day = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
/// let mut wizard = GroupCreationWizard::new(
///     Category::Tennis,
///     MatchSchedule::new(day, day),
///     Uuid::new_v4(),
///     Notifier::tracing(),
/// );
///
/// let _ = wizard.set_match_name("Doubles ladder");
/// let (request, events) = wizard.complete().expect("all guards pass");
/// assert_eq!(request.name().as_str(), "Doubles ladder");
/// assert_eq!(wizard.current_step(), WizardStep::Complete);
/// assert_eq!(events.len(), 1);
/// ```
#[derive(Debug)]
pub struct GroupCreationWizard {
    category: Category,
    schedule: MatchSchedule,
    created_by: Uuid,
    validator: TeamBalanceValidator,
    notifier: Notifier,
    steps: Vec<WizardStep>,
    current: usize,
    assembled: bool,
    name: String,
    team: TeamBalanceCandidate,
    gender_restriction: Option<GenderRestriction>,
    fee: FeeField,
}

impl GroupCreationWizard {
    pub fn new(category: Category, schedule: MatchSchedule, created_by: Uuid, notifier: Notifier) -> Self {
        let team = TeamBalanceCandidate {
            min_players_per_team: Some(i64::from(MinPlayers::suggested(category).get())),
            ..Default::default()
        };

        Self {
            category,
            schedule,
            created_by,
            validator: TeamBalanceValidator::default(),
            notifier,
            steps: WizardStep::sequence(category),
            current: 0,
            assembled: false,
            name: String::new(),
            team,
            gender_restriction: None,
            fee: FeeField::new(category.has_fixed_fee()),
        }
    }

    /// Uses a validator with a different policy or position vocabulary
    pub fn with_validator(mut self, validator: TeamBalanceValidator) -> Self {
        self.validator = validator;
        self
    }

    // ===== Navigation =====

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn steps(&self) -> &[WizardStep] {
        &self.steps
    }

    pub fn current_step(&self) -> WizardStep {
        self.steps[self.current]
    }

    pub fn is_complete(&self) -> bool {
        self.assembled
    }

    /// Moves forward if the current step's guard passes
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        if self.assembled {
            return Err(WizardError::AlreadyComplete);
        }
        let step = self.current_step();
        if step == WizardStep::Complete {
            return Ok(step);
        }
        if let Err(err) = self.check(step) {
            self.notifier.warning(err.to_string());
            return Err(err);
        }
        self.current += 1;
        Ok(self.current_step())
    }

    /// Moves one step back
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        if self.assembled {
            return Err(WizardError::AlreadyComplete);
        }
        if self.current == 0 {
            return Err(WizardError::AtFirstStep);
        }
        self.current -= 1;
        Ok(self.current_step())
    }

    /// Jumps to a step
    ///
    /// Going back is always allowed; going forward requires every step
    /// before the target to pass its guard.
    pub fn go_to(&mut self, target: WizardStep) -> Result<WizardStep, WizardError> {
        if self.assembled {
            return Err(WizardError::AlreadyComplete);
        }
        let index = self
            .steps
            .iter()
            .position(|s| *s == target)
            .ok_or(WizardError::StepNotInFlow(target))?;

        if index > self.current {
            self.first_unmet(&self.steps[..index])?;
        }
        self.current = index;
        Ok(target)
    }

    // ===== Fields =====

    /// Stores the name as typed; an invalid name marks the step incomplete
    pub fn set_match_name(&mut self, name: impl Into<String>) -> FieldUpdate {
        if self.assembled {
            return FieldUpdate::ignored("group request was already assembled");
        }
        self.name = name.into();
        FieldUpdate::Applied
    }

    pub fn match_name(&self) -> &str {
        &self.name
    }

    /// Applies a numeric team size, keeping the last valid one when out of range
    pub fn set_min_players(&mut self, value: Option<i64>) -> FieldUpdate {
        if self.assembled {
            return FieldUpdate::ignored("group request was already assembled");
        }
        match MinPlayers::normalize(value, self.validator.policy()) {
            Ok(min) => {
                self.team.min_players_per_team = Some(i64::from(min.get()));
                FieldUpdate::Applied
            }
            Err(err) => FieldUpdate::ignored(err.to_string()),
        }
    }

    /// Text variant of [`set_min_players`](Self::set_min_players)
    pub fn input_min_players(&mut self, raw: &str) -> FieldUpdate {
        self.set_min_players(raw.trim().parse::<i64>().ok())
    }

    pub fn min_players(&self) -> Option<i64> {
        self.team.min_players_per_team
    }

    pub fn set_positions<I, S>(&mut self, positions: I) -> FieldUpdate
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.assembled {
            return FieldUpdate::ignored("group request was already assembled");
        }
        self.team.positions = positions.into_iter().map(Into::into).collect();
        FieldUpdate::Applied
    }

    pub fn set_balance_by_experience(&mut self, enabled: bool) -> FieldUpdate {
        if self.assembled {
            return FieldUpdate::ignored("group request was already assembled");
        }
        self.team.balance_by_experience = enabled;
        FieldUpdate::Applied
    }

    pub fn set_balance_by_rank(&mut self, enabled: bool) -> FieldUpdate {
        if self.assembled {
            return FieldUpdate::ignored("group request was already assembled");
        }
        self.team.balance_by_rank = enabled;
        FieldUpdate::Applied
    }

    pub fn set_gender_restriction(&mut self, restriction: Option<GenderRestriction>) -> FieldUpdate {
        if self.assembled {
            return FieldUpdate::ignored("group request was already assembled");
        }
        self.gender_restriction = restriction;
        FieldUpdate::Applied
    }

    pub fn set_has_fee(&mut self, has_fee: bool) -> FieldUpdate {
        if self.assembled {
            return FieldUpdate::ignored("group request was already assembled");
        }
        if self.category.has_fixed_fee() {
            return FieldUpdate::ignored(format!("fee is fixed for {}", self.category));
        }
        self.fee.set_has_fee(has_fee);
        FieldUpdate::Applied
    }

    /// Feeds a typed amount into the fee field
    pub fn input_fee(&mut self, raw: &str) -> FieldUpdate {
        if self.assembled {
            return FieldUpdate::ignored("group request was already assembled");
        }
        if self.category.has_fixed_fee() {
            return FieldUpdate::ignored(format!("fee is fixed for {}", self.category));
        }
        self.fee.input(raw)
    }

    pub fn fee_field(&self) -> &FeeField {
        &self.fee
    }

    /// Fee participants will pay, if it can be resolved yet
    pub fn fee_preview(&self) -> Option<u32> {
        compute_fee(self.category, self.schedule.timing().is_early(), &self.fee).ok()
    }

    /// Sets the organizer's own position and team
    pub fn set_creator(&mut self, position_code: Option<String>, team: Option<TeamColor>) -> FieldUpdate {
        if self.assembled {
            return FieldUpdate::ignored("group request was already assembled");
        }
        if !self.steps.contains(&WizardStep::CreatorPosition) {
            return FieldUpdate::ignored(format!("{} does not use positions", self.category));
        }
        self.team.creator_position_code = position_code;
        self.team.creator_team = team;
        FieldUpdate::Applied
    }

    // ===== Completion =====

    /// Assembles the immutable request
    ///
    /// Every guard is checked in step order; the first unmet one is
    /// reported and the wizard stays editable.
    pub fn complete(&mut self) -> Result<(GroupCreationRequest, Vec<GroupEvent>), WizardError> {
        if self.assembled {
            return Err(WizardError::AlreadyComplete);
        }

        if let Err(err) = self.first_unmet(&self.steps) {
            self.notifier.warning(err.to_string());
            return Err(err);
        }

        let name = self.resolved_name()?;
        let team_settings = self.resolved_team(true)?;
        let fee_config = self.resolved_fee()?;

        let (request, events) = GroupCreationRequest::assemble(
            self.category,
            name,
            team_settings,
            self.gender_restriction,
            fee_config,
            self.schedule,
            self.created_by,
        );

        self.assembled = true;
        self.current = self.steps.len() - 1;

        tracing::info!(
            group_id = %request.id(),
            category = %self.category,
            fee = fee_config.amount(),
            "group creation request assembled"
        );
        self.notifier
            .success(format!("{} is ready to publish", request.name()));

        Ok((request, events))
    }

    fn first_unmet(&self, steps: &[WizardStep]) -> Result<(), WizardError> {
        steps.iter().try_for_each(|step| self.check(*step))
    }

    fn check(&self, step: WizardStep) -> Result<(), WizardError> {
        match step {
            WizardStep::MatchName => self.resolved_name().map(drop),
            WizardStep::LevelSettings => self.resolved_team(false).map(drop),
            WizardStep::GenderRestriction | WizardStep::Complete => Ok(()),
            WizardStep::Fee => self.resolved_fee().map(drop),
            WizardStep::CreatorPosition => self.resolved_team(true).map(drop),
        }
    }

    fn resolved_name(&self) -> Result<MatchName, WizardError> {
        MatchName::new(self.name.clone()).map_err(|e| WizardError::incomplete(WizardStep::MatchName, e))
    }

    fn resolved_team(&self, with_creator: bool) -> Result<TeamBalanceSettings, WizardError> {
        if with_creator {
            let step = if self.steps.contains(&WizardStep::CreatorPosition) {
                WizardStep::CreatorPosition
            } else {
                WizardStep::LevelSettings
            };
            return self
                .validator
                .validate(&self.team, self.category)
                .map_err(|e| WizardError::incomplete(step, e));
        }

        let level_only = TeamBalanceCandidate {
            creator_position_code: None,
            creator_team: None,
            ..self.team.clone()
        };
        self.validator
            .validate(&level_only, self.category)
            .map_err(|e| WizardError::incomplete(WizardStep::LevelSettings, e))
    }

    fn resolved_fee(&self) -> Result<FeeConfiguration, WizardError> {
        self.fee
            .resolve(self.category, self.schedule.timing())
            .map_err(|e| WizardError::incomplete(WizardStep::Fee, e))
    }
}
