use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::group::GroupCreationRequest;

/// Repository trait for finished group creation requests
///
/// This is the hand-off point of the creation wizard. Implementations
/// receive requests that are already fully validated.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Store a group request
    async fn save(&self, request: &GroupCreationRequest) -> Result<(), String>;

    /// Find a group request by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<GroupCreationRequest>, String>;

    /// Find all group requests created by an organizer, oldest first
    async fn find_by_creator(&self, user_id: Uuid) -> Result<Vec<GroupCreationRequest>, String>;
}
