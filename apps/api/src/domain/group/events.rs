use serde::Serialize;
use uuid::Uuid;

use crate::domain::category::Category;

/// Domain events that occur when organizing a match group
///
/// Published to whatever persists or announces new groups.
///
/// # Example
/// ```
/// use matchup_api::domain::category::Category;
/// use matchup_api::domain::group::events::GroupEvent;
/// use uuid::Uuid;
///
/// let group_id = Uuid::new_v4();
/// let event = GroupEvent::Created {
///     group_id,
///     category: Category::Soccer,
///     name: "Friday night five-a-side".to_string(),
///     created_by: Uuid::new_v4(),
///     fee_amount: 8000,
/// };
/// assert_eq!(event.group_id(), group_id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GroupEvent {
    /// Fired when the creation wizard assembles a request
    Created {
        group_id: Uuid,
        category: Category,
        name: String,
        created_by: Uuid,
        /// Per-participant fee in points, zero when free
        fee_amount: u32,
    },
}

impl GroupEvent {
    pub fn group_id(&self) -> Uuid {
        match self {
            GroupEvent::Created { group_id, .. } => *group_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_event_serializes_with_tag() {
        let group_id = Uuid::new_v4();
        let event = GroupEvent::Created {
            group_id,
            category: Category::Futsal,
            name: "Lunch futsal".to_string(),
            created_by: Uuid::new_v4(),
            fee_amount: 0,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "created");
        assert_eq!(json["category"], "futsal");
        assert_eq!(event.group_id(), group_id);
    }
}
