//! Ownership-checked note CRUD handlers
//!
//! Every handler runs behind `require_auth` and receives the resolved
//! identity as an extension. The owner of a note is always the
//! authenticated user; any owner field a client sends in a body is
//! ignored by construction, since the request types have none.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store::notes::{self, Note};

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub title: String,
    pub content: Option<String>,
}

fn note_not_found() -> ApiError {
    // One message whether the note is absent or owned by someone else
    ApiError::NotFound("Note not found".to_string())
}

/// GET /notes
pub async fn list_notes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Note>>> {
    let notes = notes::list_for_owner(&state.pool, user.id).await?;
    Ok(Json(notes))
}

/// POST /notes
pub async fn create_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<NoteRequest>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let note = notes::create(&state.pool, user.id, &req.title, req.content.as_deref()).await?;

    tracing::info!(user_id = %user.id, note_id = %note.id, "Note created");
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Note>> {
    let note = notes::get_owned(&state.pool, id, user.id)
        .await?
        .ok_or_else(note_not_found)?;
    Ok(Json(note))
}

/// PUT /notes/{id}
pub async fn update_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(req): Json<NoteRequest>,
) -> ApiResult<Json<Note>> {
    let note = notes::update_owned(&state.pool, id, user.id, &req.title, req.content.as_deref())
        .await?
        .ok_or_else(note_not_found)?;

    tracing::info!(user_id = %user.id, note_id = %note.id, "Note updated");
    Ok(Json(note))
}

/// DELETE /notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Note>> {
    let note = notes::delete_owned(&state.pool, id, user.id)
        .await?
        .ok_or_else(note_not_found)?;

    tracing::info!(user_id = %user.id, note_id = %note.id, "Note deleted");
    Ok(Json(note))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_supplied_owner_id_is_ignored() {
        // The request type has no owner field, so a client-supplied
        // owner_id deserializes away without effect
        let req: NoteRequest = serde_json::from_str(
            r#"{"title":"T","content":"C","owner_id":999}"#,
        )
        .expect("parse failed");

        assert_eq!(req.title, "T");
        assert_eq!(req.content.as_deref(), Some("C"));
    }

    #[test]
    fn content_is_optional() {
        let req: NoteRequest =
            serde_json::from_str(r#"{"title":"T"}"#).expect("parse failed");
        assert_eq!(req.title, "T");
        assert!(req.content.is_none());
    }
}
