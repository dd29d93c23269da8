use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A keyword that did not match any variant of the named kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseKindError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseKindError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Governance,
    Security,
    Airdrop,
    Upgrade,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Governance,
        Category::Security,
        Category::Airdrop,
        Category::Upgrade,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Governance => "governance",
            Self::Security => "security",
            Self::Airdrop => "airdrop",
            Self::Upgrade => "upgrade",
        }
    }
}

impl FromStr for Category {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseKindError::new("category", s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseKindError::new("priority", s)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirdropStatus {
    #[default]
    Active,
    Upcoming,
    Expired,
}

impl AirdropStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Upcoming => "upcoming",
            Self::Expired => "expired",
        }
    }
}

impl FromStr for AirdropStatus {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "upcoming" => Ok(Self::Upcoming),
            "expired" => Ok(Self::Expired),
            _ => Err(ParseKindError::new("airdrop status", s)),
        }
    }
}

impl fmt::Display for AirdropStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields that only exist on airdrop notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirdropDetails {
    pub airdrop_status: AirdropStatus,
    pub amount: String,
    pub end_date: NaiveDate,
}

/// The normalized record handed to a notification store.
///
/// Optional fields are omitted from the serialized form rather than written
/// as empty values. `airdrop` is flattened so its three keys sit next to the
/// others, and is never `Some` outside [`Category::Airdrop`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    #[serde(rename = "type")]
    pub category: Category,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    #[serde(flatten)]
    pub airdrop: Option<AirdropDetails>,
    /// Milliseconds since the Unix epoch. Only quick-push sets this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl NotificationPayload {
    /// Only airdrop notifications may carry airdrop details. Quick-push
    /// airdrops have none, so the reverse does not hold.
    pub fn is_consistent(&self) -> bool {
        self.category == Category::Airdrop || self.airdrop.is_none()
    }
}

/// A notification as recorded by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    #[serde(flatten)]
    pub payload: NotificationPayload,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(value: &serde_json::Value) -> Vec<String> {
        let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    #[test]
    fn category_keywords_parse() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        let err = "weather".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category 'weather'");
    }

    #[test]
    fn standard_payload_omits_absent_fields() {
        let payload = NotificationPayload {
            category: Category::Security,
            title: "Patch".into(),
            description: "Apply now".into(),
            priority: Priority::High,
            action_url: None,
            airdrop: None,
            timestamp: None,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(keys(&json), ["description", "priority", "title", "type"]);
        assert_eq!(json["type"], "security");
        assert_eq!(json["priority"], "high");
    }

    #[test]
    fn airdrop_payload_flattens_details() {
        let payload = NotificationPayload {
            category: Category::Airdrop,
            title: "Drop X".into(),
            description: "claim now".into(),
            priority: Priority::Low,
            action_url: None,
            airdrop: Some(AirdropDetails {
                airdrop_status: AirdropStatus::Upcoming,
                amount: "500 XYZ".into(),
                end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            }),
            timestamp: None,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            keys(&json),
            [
                "airdropStatus",
                "amount",
                "description",
                "endDate",
                "priority",
                "title",
                "type"
            ]
        );
        assert_eq!(json["endDate"], "2025-01-01");
        assert_eq!(json["airdropStatus"], "upcoming");
        assert!(payload.is_consistent());
    }

    #[test]
    fn airdrop_details_on_other_category_is_inconsistent() {
        let payload = NotificationPayload {
            category: Category::Upgrade,
            title: "v2".into(),
            description: "soon".into(),
            priority: Priority::Medium,
            action_url: None,
            airdrop: Some(AirdropDetails {
                airdrop_status: AirdropStatus::Active,
                amount: "1".into(),
                end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            }),
            timestamp: None,
        };
        assert!(!payload.is_consistent());
    }
}
