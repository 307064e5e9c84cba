use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for an authorization check.
///
/// The `(subject, action, resource)` tuple is evaluated against the stored
/// policy patterns of the addressed flavor; `context` is an opaque document
/// handed to condition evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllowedRequest {
    pub subject: String,
    pub action: String,
    pub resource: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_allowed_request_wire_field_names() {
        let request = AllowedRequest {
            subject: "user:snake-eyes".to_string(),
            action: "delete".to_string(),
            resource: "blog1:post:33".to_string(),
            context: Some(json!({"ip": "10.0.0.1"})),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["subject"], "user:snake-eyes");
        assert_eq!(value["action"], "delete");
        assert_eq!(value["resource"], "blog1:post:33");
        assert_eq!(value["context"], json!({"ip": "10.0.0.1"}));
    }

    #[test]
    fn test_allowed_request_context_omitted_when_none() {
        let request = AllowedRequest {
            subject: "s".to_string(),
            action: "a".to_string(),
            resource: "r".to_string(),
            context: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("context").is_none());
    }
}
