use serde::{Deserialize, Serialize};

/// Named group of members usable as a subject in policies.
///
/// Members are subject strings or other role identifiers, which enables role
/// nesting. The member list has set semantics on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,

    #[serde(default)]
    pub members: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_wire_field_names() {
        let role = Role {
            id: "admins".to_string(),
            members: vec!["user:snake-eyes".to_string(), "user:scarlet".to_string()],
        };
        let value = serde_json::to_value(&role).unwrap();
        assert_eq!(value["id"], "admins");
        assert_eq!(value["members"], json!(["user:snake-eyes", "user:scarlet"]));
    }

    #[test]
    fn test_role_members_default_when_absent() {
        let role: Role = serde_json::from_str(r#"{"id":"admins"}"#).unwrap();
        assert_eq!(role.id, "admins");
        assert!(role.members.is_empty());
    }
}
