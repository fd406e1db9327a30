use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification payload as posted to the endpoint. Values are optional so a
/// key can be sent with an explicit JSON `null`; keys can also be left out
/// entirely. Nothing is validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationRecord {
    fields: BTreeMap<String, Option<String>>,
}

impl NotificationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), Some(value.into()));
        self
    }

    pub fn with_null(mut self, key: impl Into<String>) -> Self {
        self.fields.insert(key.into(), None);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Option<String>> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// What goes into the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Encoded by the configured scheme. An empty token still sends the
    /// scheme prefix (`"Basic "`).
    Token(String),
    /// No `Authorization` header at all.
    Absent,
}

impl Credential {
    pub fn token(token: impl Into<String>) -> Self {
        Credential::Token(token.into())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Credential::Token(t) if t.is_empty() => "empty",
            Credential::Token(_) => "token",
            Credential::Absent => "absent",
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Token(t) if t.is_empty() => write!(f, "Token(\"\")"),
            Credential::Token(_) => write!(f, "Token(<redacted>)"),
            Credential::Absent => write!(f, "Absent"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub record: NotificationRecord,
    pub credential: Credential,
    pub expected_status: u16,
    pub known_issue: Option<String>,
}

impl Scenario {
    pub fn new(
        name: impl Into<String>,
        record: NotificationRecord,
        credential: Credential,
        expected_status: u16,
    ) -> Self {
        Self {
            name: name.into(),
            record,
            credential,
            expected_status,
            known_issue: None,
        }
    }

    pub fn with_known_issue(mut self, note: impl Into<String>) -> Self {
        self.known_issue = Some(note.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub status_code: u16,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed,
    Errored,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: String,
    pub outcome: Outcome,
    pub expected_status: u16,
    pub actual_status: Option<u16>,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_issue: Option<String>,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl ScenarioResult {
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub target: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<ScenarioResult>,
}

impl RunReport {
    pub fn count(&self, outcome: Outcome) -> usize {
        self.results.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(ScenarioResult::passed)
    }

    pub fn result(&self, scenario: &str) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.scenario == scenario)
    }

    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "target": self.target,
            "total": self.results.len(),
            "passed": self.count(Outcome::Passed),
            "failed": self.count(Outcome::Failed),
            "errored": self.count(Outcome::Errored),
        })
    }
}
