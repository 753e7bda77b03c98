//! Domain DTOs for the scheduler's triggers API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! Field names on the wire are camelCase (`frequencyType`). `uuid` is empty
//! until the server assigns one, and `timeout` is left off outgoing JSON
//! while it is zero so the server can apply its own default.

use serde::{Deserialize, Serialize};

/// A named, scheduled dyno-execution job.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    #[serde(default)]
    pub uuid: String,
    pub name: String,
    pub state: String,
    pub dyno: String,
    pub frequency_type: String,
    pub schedule: String,
    pub timezone: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub timeout: i64,
}

impl Trigger {
    /// Whether the server has assigned this trigger an identifier.
    pub fn is_persisted(&self) -> bool {
        !self.uuid.is_empty()
    }
}

fn is_zero(timeout: &i64) -> bool {
    *timeout == 0
}

/// Single-trigger response wrapper returned by get and create.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriggerEnvelope {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
    pub trigger: Trigger,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nightly_backup() -> Trigger {
        Trigger {
            name: "nightly-backup".to_string(),
            state: "enabled".to_string(),
            dyno: "worker".to_string(),
            frequency_type: "cron".to_string(),
            schedule: "0 2 * * *".to_string(),
            timezone: "UTC".to_string(),
            ..Trigger::default()
        }
    }

    #[test]
    fn zero_timeout_is_omitted() {
        let json = serde_json::to_value(nightly_backup()).unwrap();
        assert!(json.get("timeout").is_none());
        assert_eq!(json["uuid"], "");
    }

    #[test]
    fn non_zero_timeout_is_serialized() {
        let trigger = Trigger {
            timeout: 45,
            ..nightly_backup()
        };
        let json = serde_json::to_value(trigger).unwrap();
        assert_eq!(json["timeout"], 45);
    }

    #[test]
    fn uses_camel_case_field_names() {
        let json = serde_json::to_value(nightly_backup()).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["dyno", "frequencyType", "name", "schedule", "state", "timezone", "uuid", "value"]
        );
    }

    #[test]
    fn missing_uuid_and_timeout_default() {
        let trigger: Trigger = serde_json::from_str(
            r#"{"name":"n","state":"enabled","dyno":"web","frequencyType":"cron",
                "schedule":"* * * * *","timezone":"UTC","value":""}"#,
        )
        .unwrap();
        assert!(!trigger.is_persisted());
        assert_eq!(trigger.timeout, 0);
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let result: Result<Trigger, _> = serde_json::from_str(r#"{"uuid":"abc","name":"n"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn envelope_roundtrip_keeps_trigger() {
        let trigger = Trigger {
            uuid: "abc-123".to_string(),
            timeout: 30,
            ..nightly_backup()
        };
        let envelope = TriggerEnvelope {
            message: "ok".to_string(),
            code: 200,
            trigger: trigger.clone(),
        };
        let json = serde_json::to_string(&envelope).unwrap();
        let back: TriggerEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(back.trigger, trigger);
        assert!(back.trigger.is_persisted());
    }

    #[test]
    fn envelope_tolerates_missing_message_and_code() {
        let envelope: TriggerEnvelope = serde_json::from_str(
            r#"{"trigger":{"uuid":"x","name":"n","state":"s","dyno":"d","frequencyType":"f",
                "schedule":"s","timezone":"UTC","value":"v","timeout":10}}"#,
        )
        .unwrap();
        assert_eq!(envelope.code, 0);
        assert_eq!(envelope.trigger.timeout, 10);
    }
}
