use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::group::team_balance::TeamBalanceValidator;
use crate::domain::repositories::GroupRepository;
use crate::infrastructure::repositories::InMemoryGroupRepository;
use crate::notifications::Notifier;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub groups: Arc<dyn GroupRepository>,
    pub notifier: Notifier,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, groups: Arc<dyn GroupRepository>, notifier: Notifier) -> Self {
        let notifier = notifier.with_default_duration(config.notification_duration_ms);
        Self {
            groups,
            notifier,
            config: Arc::new(config),
        }
    }

    /// State backed by the in-memory repository
    pub fn in_memory(config: AppConfig, notifier: Notifier) -> Self {
        Self::new(config, Arc::new(InMemoryGroupRepository::new()), notifier)
    }

    /// Validator honoring the configured team size policy
    pub fn team_validator(&self) -> TeamBalanceValidator {
        TeamBalanceValidator::new(self.config.min_players_policy)
    }
}
