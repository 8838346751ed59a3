use chrono::NaiveDateTime;
use tracing::{debug, info};

use super::{ensure_non_negative, not_found};
use crate::dto::EventDto;
use crate::models::Event;
use crate::unit_of_work::UnitOfWork;
use crate::utils::datetime::parse_date_time;
use crate::utils::error::AppError;
use crate::utils::pagination::PaginatedList;
use crate::validation::{EventValidator, ValidationErrors, Validator};

/// Filter and page request for [`EventService::get_sorted_and_paginated`].
///
/// Mirrors the raw query string: nothing here is validated up front.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    pub sort_by: Option<String>,
    pub value: Option<String>,
    pub page_number: Option<String>,
    pub page_size: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortKey {
    Name,
    Category,
    Venue,
    Date,
}

impl SortKey {
    /// Case-sensitive.
    fn parse(key: &str) -> Option<Self> {
        match key {
            "name" => Some(Self::Name),
            "category" => Some(Self::Category),
            "venue" => Some(Self::Venue),
            "date" => Some(Self::Date),
            _ => None,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn project(events: Vec<Event>) -> Vec<EventDto> {
    events.into_iter().map(EventDto::from).collect()
}

/// Returns one page when the query asks for a usable one, otherwise everything.
fn paginate_if_requested(events: Vec<EventDto>, query: &EventQuery) -> Vec<EventDto> {
    let page_number = query
        .page_number
        .as_deref()
        .and_then(|p| p.trim().parse::<i32>().ok());

    match page_number {
        Some(page_number) if query.page_size > 1 => {
            let page = PaginatedList::create(events, page_number, query.page_size);
            debug!(
                page = page.page_number,
                total_count = page.total_count,
                total_pages = page.total_pages,
                "Returning single page"
            );
            page.items
        }
        _ => events,
    }
}

#[derive(Clone)]
pub struct EventService {
    uow: UnitOfWork,
    validator: EventValidator,
}

impl EventService {
    pub fn new(uow: UnitOfWork) -> Self {
        Self {
            uow,
            validator: EventValidator,
        }
    }

    #[tracing::instrument(skip_all, fields(name = %event.name))]
    pub async fn create(&self, mut event: EventDto) -> Result<EventDto, AppError> {
        event.is_update = false;
        self.validator.validate(&event)?;
        self.ensure_unique_name(&event).await?;

        let created = self
            .uow
            .event_repository()
            .create(Event::from(event))
            .await?;
        info!(id = created.id, "Event created");
        Ok(created.into())
    }

    #[tracing::instrument(skip_all, fields(id = event.id))]
    pub async fn update(&self, mut event: EventDto) -> Result<EventDto, AppError> {
        event.is_update = true;
        self.validator.validate(&event)?;
        self.ensure_unique_name(&event).await?;

        let updated = self
            .uow
            .event_repository()
            .update(Event::from(event))
            .await?;
        info!("Event updated");
        Ok(updated.into())
    }

    /// Deletes the event identified by `event.id`.
    ///
    /// The full record goes through the same validator as create and update,
    /// so callers must submit a complete event, not just its id.
    #[tracing::instrument(skip_all, fields(id = event.id))]
    pub async fn delete(&self, event: EventDto) -> Result<(), AppError> {
        self.validator.validate(&event)?;
        self.uow.event_repository().delete(event.id).await?;
        info!("Event deleted");
        Ok(())
    }

    pub async fn get_all(&self) -> Result<Vec<EventDto>, AppError> {
        Ok(project(self.uow.event_repository().get_all().await?))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<EventDto, AppError> {
        ensure_non_negative("id", id)?;
        self.uow
            .event_repository()
            .get_by_id(id)
            .await?
            .map(EventDto::from)
            .ok_or_else(|| not_found("Event", id))
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<EventDto>, AppError> {
        let event = self.uow.event_repository().get_by_name(name).await?;
        Ok(event.map(EventDto::from))
    }

    pub async fn get_by_category(&self, category: &str) -> Result<Vec<EventDto>, AppError> {
        Ok(project(
            self.uow.event_repository().get_by_category(category).await?,
        ))
    }

    pub async fn get_by_venue(&self, venue: &str) -> Result<Vec<EventDto>, AppError> {
        Ok(project(self.uow.event_repository().get_by_venue(venue).await?))
    }

    pub async fn get_by_date(&self, date: NaiveDateTime) -> Result<Vec<EventDto>, AppError> {
        Ok(project(self.uow.event_repository().get_by_date(date).await?))
    }

    /// Filtered, optionally paged event listing.
    ///
    /// Malformed filter or paging input never fails: it degrades to either
    /// the full list or an empty one. Only store failures surface as errors.
    /// The `name` lookup and unrecognized sort keys are never paged.
    #[tracing::instrument(
        skip_all,
        fields(
            sort_by = ?query.sort_by,
            value = ?query.value,
            page = ?query.page_number,
            page_size = query.page_size,
        )
    )]
    pub async fn get_sorted_and_paginated(
        &self,
        query: &EventQuery,
    ) -> Result<Vec<EventDto>, AppError> {
        let repo = self.uow.event_repository();

        let (sort_by, value) = match (non_empty(&query.sort_by), non_empty(&query.value)) {
            (Some(sort_by), Some(value)) => (sort_by, value),
            _ => {
                debug!("No filter given, listing all events");
                let events = project(repo.get_all().await?);
                return Ok(paginate_if_requested(events, query));
            }
        };

        let events = match SortKey::parse(sort_by) {
            Some(SortKey::Name) => {
                debug!("Looking up event by name");
                let event = repo.get_by_name(value).await?;
                return Ok(event.map(EventDto::from).into_iter().collect());
            }
            Some(SortKey::Category) => project(repo.get_by_category(value).await?),
            Some(SortKey::Venue) => project(repo.get_by_venue(value).await?),
            Some(SortKey::Date) => match parse_date_time(value) {
                Some(date) => project(repo.get_by_date(date).await?),
                None => {
                    debug!("Unparsable date filter, returning nothing");
                    return Ok(Vec::new());
                }
            },
            None => {
                debug!("Unknown sort key, listing all events");
                return Ok(project(repo.get_all().await?));
            }
        };

        debug!(matched = events.len(), "Filter applied");
        Ok(paginate_if_requested(events, query))
    }

    async fn ensure_unique_name(&self, event: &EventDto) -> Result<(), AppError> {
        let existing = self.uow.event_repository().get_by_name(&event.name).await?;
        match existing {
            Some(other) if !event.is_update || other.id != event.id => {
                Err(ValidationErrors::single(format!(
                    "An event named '{}' already exists",
                    event.name
                ))
                .into())
            }
            _ => Ok(()),
        }
    }
}
