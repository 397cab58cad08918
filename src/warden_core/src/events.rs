use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    #[serde(rename = "AUTHENTICATION_SUCCEEDED")]
    AuthenticationSucceeded,
    #[serde(rename = "AUTHENTICATION_FAILED")]
    AuthenticationFailed,
}

impl Topic {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Topic::AuthenticationSucceeded => "AUTHENTICATION_SUCCEEDED",
            Topic::AuthenticationFailed => "AUTHENTICATION_FAILED",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One realm's reason for rejecting a token, as carried by failure events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmFailure {
    pub realm_name: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventPayload {
    AuthenticationSucceeded {
        identifier: String,
        realm_name: String,
    },
    AuthenticationFailed {
        identifier: String,
        errors: Vec<RealmFailure>,
    },
}

impl EventPayload {
    pub fn identifier(&self) -> &str {
        match self {
            EventPayload::AuthenticationSucceeded { identifier, .. }
            | EventPayload::AuthenticationFailed { identifier, .. } => identifier,
        }
    }
}

/// Immutable record handed to every subscriber of a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    id: Uuid,
    topic: Topic,
    payload: EventPayload,
    occurred_at: DateTime<Utc>,
}

impl Event {
    pub fn new(topic: Topic, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic,
            payload,
            occurred_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_topic_and_tagged_payload() {
        let event = Event::new(
            Topic::AuthenticationSucceeded,
            EventPayload::AuthenticationSucceeded {
                identifier: "alice".to_string(),
                realm_name: "AccountStoreRealm".to_string(),
            },
        );

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["topic"], "AUTHENTICATION_SUCCEEDED");
        assert_eq!(json["payload"]["kind"], "authentication_succeeded");
        assert_eq!(json["payload"]["realm_name"], "AccountStoreRealm");

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
