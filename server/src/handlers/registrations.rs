use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;

use crate::dto::EventUserDto;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<EventUserDto>,
) -> Result<Response, AppError> {
    let registration = state.registrations.register(request).await?;
    Ok(created(registration, "User registered in event"))
}

pub async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let registration = state.registrations.get_by_id(id).await?;
    Ok(success(registration, "Registration retrieved"))
}

pub async fn unregister(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let registration = state.registrations.get_by_id(id).await?;
    state.registrations.unregister(registration).await?;
    Ok(empty_success("User unregistered from event"))
}
