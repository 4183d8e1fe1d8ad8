//! Sign-up and sign-in: exchange an identity-provider token for a session.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::bad_body;
use crate::error::BoardError;
use crate::models::Session;
use crate::state::AppState;

/// Registers the public authentication routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
}

#[derive(Deserialize)]
struct Credentials {
    token: String,
    name: String,
}

#[derive(Serialize, Deserialize)]
struct SessionResponse {
    uid: String,
    name: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        SessionResponse {
            uid: session.uid,
            name: session.name,
        }
    }
}

async fn sign_up(
    State(state): State<AppState>,
    session: tower_sessions::Session,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<(StatusCode, Json<SessionResponse>), BoardError> {
    let Json(credentials) = payload.map_err(bad_body)?;
    let bound = state
        .board
        .sign_up(&session, &credentials.token, &credentials.name)
        .await?;
    Ok((StatusCode::CREATED, Json(bound.into())))
}

async fn sign_in(
    State(state): State<AppState>,
    session: tower_sessions::Session,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<(StatusCode, Json<SessionResponse>), BoardError> {
    let Json(credentials) = payload.map_err(bad_body)?;
    let bound = state
        .board
        .sign_in(&session, &credentials.token, &credentials.name)
        .await?;
    Ok((StatusCode::CREATED, Json(bound.into())))
}
