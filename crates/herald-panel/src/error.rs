use thiserror::Error;

use crate::draft::DraftField;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("{0} is required")]
    MissingField(DraftField),

    #[error("end date '{0}' is not a valid YYYY-MM-DD date")]
    InvalidEndDate(String),

    #[error("unknown notification category '{0}'")]
    UnknownCategory(String),

    #[error("notification permission was declined")]
    PermissionDeclined,

    #[error("a dispatch is already in progress")]
    Busy,

    #[error("store append failed: {0}")]
    Store(#[source] anyhow::Error),
}

pub type PanelResult<T> = Result<T, PanelError>;
