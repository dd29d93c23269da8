use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use herald_panel::PanelError;
use herald_types::api::ErrorResponse;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Panel(#[from] PanelError),

    /// The request body could not be read as the expected JSON
    #[error("{message}")]
    BadBody { status: StatusCode, message: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Panel(PanelError::MissingField(_) | PanelError::InvalidEndDate(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Panel(PanelError::UnknownCategory(_)) => StatusCode::BAD_REQUEST,
            Self::Panel(PanelError::PermissionDeclined) => StatusCode::FORBIDDEN,
            Self::Panel(PanelError::Busy) => StatusCode::CONFLICT,
            Self::Panel(PanelError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadBody { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Panel(e) if status.is_server_error() => error!("Request failed: {:#}", e),
            Self::BadBody { message, .. } => warn!("Rejected request body: {}", message),
            _ => {}
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            status: status.as_u16(),
        });
        (status, body).into_response()
    }
}
