use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::group::GroupCreationRequest;
use crate::domain::repositories::GroupRepository;

/// In-process implementation of GroupRepository
///
/// Keeps requests for the lifetime of the server. Durable storage is
/// provided by the platform behind the API, not by this service.
#[derive(Debug, Default)]
pub struct InMemoryGroupRepository {
    groups: RwLock<HashMap<Uuid, GroupCreationRequest>>,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn save(&self, request: &GroupCreationRequest) -> Result<(), String> {
        let mut groups = self.groups.write().await;
        if groups.contains_key(&request.id()) {
            return Err(format!("Group already exists: {}", request.id()));
        }
        groups.insert(request.id(), request.clone());
        tracing::debug!(group_id = %request.id(), total = groups.len(), "group stored");
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<GroupCreationRequest>, String> {
        Ok(self.groups.read().await.get(&id).cloned())
    }

    async fn find_by_creator(&self, user_id: Uuid) -> Result<Vec<GroupCreationRequest>, String> {
        let groups = self.groups.read().await;
        let mut owned: Vec<_> = groups
            .values()
            .filter(|g| g.created_by() == user_id)
            .cloned()
            .collect();
        owned.sort_by_key(|g| g.created_at());
        Ok(owned)
    }
}
