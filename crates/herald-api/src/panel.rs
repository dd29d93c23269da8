use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;

use herald_panel::{DraftUpdate, NotificationDraft};
use herald_types::api::DispatchResponse;

use crate::AppState;
use crate::error::ApiResult;

/// The draft plus what the form needs to decide which inputs to render.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    #[serde(flatten)]
    pub draft: NotificationDraft,
    pub shows_airdrop_fields: bool,
}

impl From<NotificationDraft> for DraftView {
    fn from(draft: NotificationDraft) -> Self {
        Self {
            shows_airdrop_fields: draft.shows_airdrop_fields(),
            draft,
        }
    }
}

pub async fn get_draft(State(state): State<AppState>) -> Json<DraftView> {
    Json(state.composer.draft().await.into())
}

pub async fn update_draft(
    State(state): State<AppState>,
    update: Result<Json<DraftUpdate>, JsonRejection>,
) -> ApiResult<Json<DraftView>> {
    let Json(update) = update?;
    Ok(Json(state.composer.apply(update).await?.into()))
}

pub async fn submit(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let id = state.composer.submit().await?;
    Ok((StatusCode::CREATED, Json(DispatchResponse { id })))
}

pub async fn quick_push(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = state.composer.quick_push(&category).await?;
    Ok((StatusCode::CREATED, Json(DispatchResponse { id })))
}

pub async fn close(State(state): State<AppState>) -> StatusCode {
    state.composer.close();
    StatusCode::NO_CONTENT
}
