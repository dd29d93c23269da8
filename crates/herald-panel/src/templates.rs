use herald_types::{Category, NotificationPayload, Priority};

/// Fixed text pushed by the one-click buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickPushTemplate {
    pub title: &'static str,
    pub body: &'static str,
}

pub fn template_for(category: Category) -> QuickPushTemplate {
    match category {
        Category::Governance => QuickPushTemplate {
            title: "New Governance Update",
            body: "Important: New governance proposal available for voting",
        },
        Category::Security => QuickPushTemplate {
            title: "Security Alert",
            body: "Critical security update required",
        },
        Category::Airdrop => QuickPushTemplate {
            title: "New Airdrop Available",
            body: "A new token airdrop is available for claiming",
        },
        Category::Upgrade => QuickPushTemplate {
            title: "Protocol Upgrade",
            body: "New protocol upgrade announcement",
        },
    }
}

impl QuickPushTemplate {
    /// Quick-push records are always high priority and stamped with the
    /// push time. They carry no airdrop details, even for the airdrop
    /// category.
    pub fn payload(&self, category: Category, timestamp_ms: i64) -> NotificationPayload {
        NotificationPayload {
            category,
            title: self.title.to_string(),
            description: self.body.to_string(),
            priority: Priority::High,
            action_url: None,
            airdrop: None,
            timestamp: Some(timestamp_ms),
        }
    }
}
