use serde::{Deserialize, Serialize};

/// Request body for adding members to a role
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddMembersRequest {
    pub members: Vec<String>,
}
