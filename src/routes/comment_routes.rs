//! Comment endpoints. Only reachable through the session gate.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::bad_body;
use crate::auth::Identity;
use crate::error::BoardError;
use crate::models::CommentId;
use crate::state::AppState;

/// Registers the comment routes. The caller adds the session gate.
pub fn routes() -> Router<AppState> {
    Router::new().route("/comments", get(list_comments).post(post_comment))
}

#[derive(Deserialize)]
struct NewComment {
    text: String,
}

#[derive(Serialize)]
struct PostedComment {
    id: CommentId,
}

#[derive(Serialize)]
struct CommentView {
    id: CommentId,
    uid: String,
    name: Option<String>,
    text: String,
    posted_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct CommentList {
    comments: Vec<CommentView>,
}

async fn post_comment(
    State(state): State<AppState>,
    identity: Identity,
    payload: Result<Json<NewComment>, JsonRejection>,
) -> Result<(StatusCode, Json<PostedComment>), BoardError> {
    let Json(comment) = payload.map_err(bad_body)?;
    let id = state.board.post_comment(&identity, &comment.text).await?;
    Ok((StatusCode::CREATED, Json(PostedComment { id })))
}

async fn list_comments(State(state): State<AppState>, identity: Identity) -> Json<CommentList> {
    let snapshot = state.board.list_comments(&identity).await;

    let mut comments = Vec::with_capacity(snapshot.len());
    for comment in snapshot {
        let name = state.board.display_name(&comment.uid).await;
        comments.push(CommentView {
            id: comment.id,
            uid: comment.uid,
            name,
            text: comment.text,
            posted_at: comment.posted_at,
        });
    }
    Json(CommentList { comments })
}
