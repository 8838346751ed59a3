use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;

use crate::dto::UserDto;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

pub async fn list_users(State(state): State<AppState>) -> Result<Response, AppError> {
    let users = state.users.get_all().await?;
    Ok(success(users, "Users retrieved"))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let user = state.users.get_by_id(id).await?;
    Ok(success(user, "User retrieved"))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<UserDto>,
) -> Result<Response, AppError> {
    let user = state.users.create(user).await?;
    Ok(created(user, "User created"))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(mut user): Json<UserDto>,
) -> Result<Response, AppError> {
    user.id = id;
    let user = state.users.update(user).await?;
    Ok(success(user, "User updated"))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let user = state.users.get_by_id(id).await?;
    state.users.delete(user).await?;
    Ok(empty_success("User deleted"))
}

pub async fn list_user_events(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let events = state.registrations.events_of_user(id).await?;
    Ok(success(events, "Events of user retrieved"))
}
