use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use crate::dto::EventDto;
use crate::services::EventQuery;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

/// Raw listing parameters, kept as text so malformed values degrade
/// instead of being rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct ListEventsParams {
    #[serde(rename = "sortby", alias = "sortBy")]
    pub sort_by: Option<String>,
    pub value: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

impl ListEventsParams {
    fn into_query(self, default_page_size: i32) -> EventQuery {
        let page_size = self
            .page_size
            .as_deref()
            .and_then(|size| size.trim().parse().ok())
            .unwrap_or(default_page_size);

        EventQuery {
            sort_by: self.sort_by,
            value: self.value,
            page_number: self.page,
            page_size,
        }
    }
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListEventsParams>,
) -> Result<Response, AppError> {
    let query = params.into_query(state.default_page_size);
    let events = state.events.get_sorted_and_paginated(&query).await?;
    Ok(success(events, "Events retrieved"))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let event = state.events.get_by_id(id).await?;
    Ok(success(event, "Event retrieved"))
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(event): Json<EventDto>,
) -> Result<Response, AppError> {
    let event = state.events.create(event).await?;
    Ok(created(event, "Event created"))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(mut event): Json<EventDto>,
) -> Result<Response, AppError> {
    event.id = id;
    let event = state.events.update(event).await?;
    Ok(success(event, "Event updated"))
}

/// The stored record is loaded first because deletion validates the whole
/// event, not just its id.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let event = state.events.get_by_id(id).await?;
    state.events.delete(event).await?;
    Ok(empty_success("Event deleted"))
}

pub async fn list_participants(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let participants = state.registrations.users_of_event(id).await?;
    Ok(success(participants, "Participants retrieved"))
}
