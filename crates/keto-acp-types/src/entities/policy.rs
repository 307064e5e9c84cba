use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Access control policy stored by the ACP engine.
///
/// Identifiers are opaque strings, unique per flavor. A policy is immutable
/// once returned from a read except through upsert. The `conditions` payload
/// has no fixed schema on the server side and is carried as an opaque JSON
/// document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,

    #[serde(default)]
    pub description: String,

    /// Subject patterns the policy applies to (users or role identifiers)
    #[serde(default)]
    pub subjects: Vec<String>,

    /// Resource patterns the policy applies to
    #[serde(default)]
    pub resources: Vec<String>,

    /// Action patterns the policy applies to
    #[serde(default)]
    pub actions: Vec<String>,

    #[serde(default)]
    pub effect: Effect,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Value>,
}

/// Outcome when a policy matches a check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    #[default]
    Allow,
    Deny,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_effect_serde() {
        assert_eq!(serde_json::to_string(&Effect::Allow).unwrap(), r#""allow""#);
        assert_eq!(serde_json::to_string(&Effect::Deny).unwrap(), r#""deny""#);
        let effect: Effect = serde_json::from_str(r#""deny""#).unwrap();
        assert_eq!(effect, Effect::Deny);
    }

    #[test]
    fn test_policy_wire_field_names() {
        let policy = Policy {
            id: "id1".to_string(),
            description: "Delete action for Snake Eyes".to_string(),
            subjects: vec!["user:snake-eyes".to_string()],
            resources: vec!["blog1:post:33".to_string()],
            actions: vec!["delete".to_string()],
            effect: Effect::Allow,
            conditions: Some(json!({"test": "value"})),
        };

        let value = serde_json::to_value(&policy).unwrap();
        assert_eq!(value["id"], "id1");
        assert_eq!(value["description"], "Delete action for Snake Eyes");
        assert_eq!(value["subjects"], json!(["user:snake-eyes"]));
        assert_eq!(value["resources"], json!(["blog1:post:33"]));
        assert_eq!(value["actions"], json!(["delete"]));
        assert_eq!(value["effect"], "allow");
        assert_eq!(value["conditions"], json!({"test": "value"}));
    }

    #[test]
    fn test_policy_round_trip() {
        let policy = Policy {
            id: "id1".to_string(),
            effect: Effect::Deny,
            ..Default::default()
        };
        let decoded: Policy =
            serde_json::from_str(&serde_json::to_string(&policy).unwrap()).unwrap();
        assert_eq!(decoded, policy);
    }

    #[test]
    fn test_policy_conditions_omitted_when_none() {
        let policy = Policy { id: "id1".to_string(), ..Default::default() };
        let value = serde_json::to_value(&policy).unwrap();
        assert!(value.get("conditions").is_none());
    }
}
