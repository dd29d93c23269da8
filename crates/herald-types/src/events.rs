use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events the panel sends to its parent view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PanelEvent {
    /// A notification was recorded; the parent should refresh its list
    NotificationAdded { id: Uuid },

    /// Something to tell the user about the last action
    Acknowledged(Acknowledgement),

    /// The user asked to leave the panel
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Acknowledgement {
    Added,
    PermissionDeclined,
    Failed { reason: String },
}

impl Acknowledgement {
    /// Text shown to the user.
    pub fn message(&self) -> String {
        match self {
            Self::Added => "Notification added successfully!".to_string(),
            Self::PermissionDeclined => "Please enable notifications to use this feature".to_string(),
            Self::Failed { reason } => format!("Failed to add notification: {}", reason),
        }
    }
}
