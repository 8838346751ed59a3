//! Store collaborators.
//!
//! Every backend implements the same three object-safe traits so services
//! can be wired against Postgres in production and the in-memory store in
//! tests without caring which one they got.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error;

use crate::models::{Event, EventUser, Participant, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{entity} with id {id} was not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("{0}")]
    Conflict(String),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn get_all(&self) -> RepositoryResult<Vec<Event>>;

    async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<Event>>;

    /// Exact name match. Names are unique, so at most one event comes back.
    async fn get_by_name(&self, name: &str) -> RepositoryResult<Option<Event>>;

    async fn get_by_category(&self, category: &str) -> RepositoryResult<Vec<Event>>;

    async fn get_by_venue(&self, venue: &str) -> RepositoryResult<Vec<Event>>;

    async fn get_by_date(&self, date: NaiveDateTime) -> RepositoryResult<Vec<Event>>;

    /// Stores a new event and returns it with its assigned id.
    ///
    /// Fails with [`RepositoryError::Conflict`] when another event has the same name.
    async fn create(&self, event: Event) -> RepositoryResult<Event>;

    /// Same name rule as [`EventRepository::create`].
    async fn update(&self, event: Event) -> RepositoryResult<Event>;

    async fn delete(&self, id: i32) -> RepositoryResult<()>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_all(&self) -> RepositoryResult<Vec<User>>;

    async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;

    async fn create(&self, user: User) -> RepositoryResult<User>;

    async fn update(&self, user: User) -> RepositoryResult<User>;

    async fn delete(&self, id: i32) -> RepositoryResult<()>;
}

#[async_trait]
pub trait EventUserRepository: Send + Sync {
    async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<EventUser>>;

    async fn find(&self, user_id: i32, event_id: i32) -> RepositoryResult<Option<EventUser>>;

    /// Fails with [`RepositoryError::Conflict`] when the pair is already registered.
    async fn register_user_in_event(&self, registration: EventUser)
        -> RepositoryResult<EventUser>;

    async fn unregister_user_in_event(&self, id: i32) -> RepositoryResult<()>;

    async fn get_users_of_event(&self, event_id: i32) -> RepositoryResult<Vec<Participant>>;

    async fn get_events_of_user(&self, user_id: i32) -> RepositoryResult<Vec<Event>>;
}

pub(crate) fn duplicate_registration(user_id: i32, event_id: i32) -> RepositoryError {
    RepositoryError::Conflict(format!(
        "User {user_id} is already registered in event {event_id}"
    ))
}

pub(crate) fn duplicate_event_name(name: &str) -> RepositoryError {
    RepositoryError::Conflict(format!("An event named '{name}' already exists"))
}
