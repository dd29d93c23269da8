use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use herald_types::{AirdropDetails, AirdropStatus, Category, NotificationPayload, Priority};

use crate::error::{PanelError, PanelResult};

/// The in-progress form. Text fields hold whatever the user typed; nothing is
/// normalized until [`NotificationDraft::to_payload`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDraft {
    #[serde(rename = "type")]
    pub category: Category,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub action_url: String,
    pub airdrop_status: AirdropStatus,
    pub amount: String,
    pub end_date: String,
}

/// One field replacement, as sent by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum DraftUpdate {
    #[serde(rename = "type")]
    Category(Category),
    Title(String),
    Description(String),
    Priority(Priority),
    ActionUrl(String),
    AirdropStatus(AirdropStatus),
    Amount(String),
    EndDate(String),
}

/// Names a required field when it is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
    Amount,
    EndDate,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Amount => "amount",
            Self::EndDate => "end date",
        })
    }
}

impl NotificationDraft {
    /// Replace exactly one attribute.
    pub fn with(mut self, update: DraftUpdate) -> Self {
        match update {
            DraftUpdate::Category(v) => self.category = v,
            DraftUpdate::Title(v) => self.title = v,
            DraftUpdate::Description(v) => self.description = v,
            DraftUpdate::Priority(v) => self.priority = v,
            DraftUpdate::ActionUrl(v) => self.action_url = v,
            DraftUpdate::AirdropStatus(v) => self.airdrop_status = v,
            DraftUpdate::Amount(v) => self.amount = v,
            DraftUpdate::EndDate(v) => self.end_date = v,
        }
        self
    }

    pub fn shows_airdrop_fields(&self) -> bool {
        self.category == Category::Airdrop
    }

    /// Build the payload, refusing drafts with a blank required field.
    ///
    /// Text is trimmed. A blank action URL is dropped. Airdrop values are
    /// carried only for the airdrop category, even if the user filled them in
    /// before switching to another one.
    pub fn to_payload(&self) -> PanelResult<NotificationPayload> {
        let title = required(&self.title, DraftField::Title)?;
        let description = required(&self.description, DraftField::Description)?;

        let action_url = match self.action_url.trim() {
            "" => None,
            url => Some(url.to_string()),
        };

        let airdrop = if self.shows_airdrop_fields() {
            let amount = required(&self.amount, DraftField::Amount)?;
            let end_date = required(&self.end_date, DraftField::EndDate)?;
            let end_date = parse_end_date(&end_date)?;
            Some(AirdropDetails {
                airdrop_status: self.airdrop_status,
                amount,
                end_date,
            })
        } else {
            None
        };

        Ok(NotificationPayload {
            category: self.category,
            title,
            description,
            priority: self.priority,
            action_url,
            airdrop,
            timestamp: None,
        })
    }
}

/// Strict `YYYY-MM-DD`; chrono alone would also take `2025-1-1`.
fn parse_end_date(raw: &str) -> PanelResult<NaiveDate> {
    if raw.len() != 10 {
        return Err(PanelError::InvalidEndDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| PanelError::InvalidEndDate(raw.to_string()))
}

fn required(value: &str, field: DraftField) -> PanelResult<String> {
    match value.trim() {
        "" => Err(PanelError::MissingField(field)),
        v => Ok(v.to_string()),
    }
}
