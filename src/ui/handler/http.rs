//! HTTP API endpoint handlers.
//!
//! Thin CRUD over the group and message stores; the session core never
//! goes through these routes.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::common::time::now_millis;
use crate::domain::{Group, GroupName, StoreError, Timestamp, UserName};
use crate::infrastructure::dto::http::{CreateGroupRequest, ErrorDto, GroupDto, MessageDto};
use crate::ui::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get group document by name
pub async fn get_group(
    State(state): State<Arc<AppState>>,
    Path(group_name): Path<String>,
) -> Result<Json<GroupDto>, (StatusCode, Json<ErrorDto>)> {
    let name = GroupName::new(group_name).map_err(|_| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorDto::new("Group not found")),
        )
    })?;

    match state.stores.groups.find_group(&name).await {
        Ok(Some(group)) => Ok(Json(GroupDto::from(&group))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorDto::new("Group not found")),
        )),
        Err(e) => {
            tracing::error!(group = %name, error = %e, "group lookup failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorDto::new("Failed to fetch group details")),
            ))
        }
    }
}

/// Create a group. The creator becomes the first member.
pub async fn create_group(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<GroupDto>), (StatusCode, Json<ErrorDto>)> {
    let name = request
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto::new("Group name is required")),
            )
        })?;
    let name = GroupName::new(name)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorDto::new(e.to_string()))))?;

    let creator = request.creator.unwrap_or_else(|| "Anonymous".to_string());
    let creator = UserName::new(creator)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorDto::new(e.to_string()))))?;

    let group = Group::new(name, request.about, creator, Timestamp::new(now_millis()));

    match state.stores.groups.create_group(group).await {
        Ok(created) => {
            tracing::info!(group = %created.name, creator = %created.creator, "group created");
            Ok((StatusCode::CREATED, Json(GroupDto::from(&created))))
        }
        Err(StoreError::DuplicateGroup(_)) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorDto::new("Group name already exists")),
        )),
        Err(e) => {
            tracing::error!(error = %e, "group creation failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorDto::new("Failed to create group")),
            ))
        }
    }
}

/// List persisted messages for a room.
///
/// Messages are not relayed live; clients read them back here.
pub async fn get_group_messages(
    State(state): State<Arc<AppState>>,
    Path(group_name): Path<String>,
) -> Result<Json<Vec<MessageDto>>, (StatusCode, Json<ErrorDto>)> {
    let name = GroupName::new(group_name).map_err(|_| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorDto::new("Group not found")),
        )
    })?;

    match state.stores.messages.list_by_room(&name).await {
        Ok(messages) => Ok(Json(messages.iter().map(MessageDto::from).collect())),
        Err(e) => {
            tracing::error!(group = %name, error = %e, "message listing failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorDto::new("Failed to fetch messages")),
            ))
        }
    }
}
