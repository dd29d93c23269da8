use serde::{Deserialize, Serialize};
use uuid::Uuid;

// -- Dispatch --

#[derive(Debug, Serialize, Deserialize)]
pub struct DispatchResponse {
    pub id: Uuid,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}
