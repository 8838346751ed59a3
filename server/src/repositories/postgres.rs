//! PostgreSQL store backed by `sqlx`.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::postgres::PgPool;

use super::{
    duplicate_event_name, duplicate_registration, EventRepository, EventUserRepository,
    RepositoryError, RepositoryResult, UserRepository,
};
use crate::models::{Event, EventUser, Participant, User};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn not_found(entity: &'static str, id: i32) -> RepositoryError {
    RepositoryError::NotFound { entity, id }
}

/// Turns a unique-index violation into `conflict`, anything else into a database error.
fn unique_or(err: sqlx::Error, conflict: impl FnOnce() -> RepositoryError) -> RepositoryError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => conflict(),
        other => other.into(),
    }
}

#[async_trait]
impl EventRepository for PgStore {
    async fn get_all(&self) -> RepositoryResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(event)
    }

    async fn get_by_name(&self, name: &str) -> RepositoryResult<Option<Event>> {
        let event =
            sqlx::query_as::<_, Event>("SELECT * FROM events WHERE name = $1 ORDER BY id LIMIT 1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(event)
    }

    async fn get_by_category(&self, category: &str) -> RepositoryResult<Vec<Event>> {
        let events =
            sqlx::query_as::<_, Event>("SELECT * FROM events WHERE category = $1 ORDER BY id")
                .bind(category)
                .fetch_all(&self.pool)
                .await?;
        Ok(events)
    }

    async fn get_by_venue(&self, venue: &str) -> RepositoryResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE venue = $1 ORDER BY id")
            .bind(venue)
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    async fn get_by_date(&self, date: NaiveDateTime) -> RepositoryResult<Vec<Event>> {
        let events =
            sqlx::query_as::<_, Event>("SELECT * FROM events WHERE date_and_time = $1 ORDER BY id")
                .bind(date)
                .fetch_all(&self.pool)
                .await?;
        Ok(events)
    }

    #[tracing::instrument(skip_all, fields(name = %event.name))]
    async fn create(&self, event: Event) -> RepositoryResult<Event> {
        let created = sqlx::query_as::<_, Event>(
            "INSERT INTO events (name, description, date_and_time, venue, category,
                                 current_number_of_participants, max_number_of_participants, image)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.date_and_time)
        .bind(&event.venue)
        .bind(&event.category)
        .bind(event.current_number_of_participants)
        .bind(event.max_number_of_participants)
        .bind(&event.image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_or(e, || duplicate_event_name(&event.name)))?;
        Ok(created)
    }

    #[tracing::instrument(skip_all, fields(id = event.id))]
    async fn update(&self, event: Event) -> RepositoryResult<Event> {
        sqlx::query_as::<_, Event>(
            "UPDATE events
             SET name = $2, description = $3, date_and_time = $4, venue = $5, category = $6,
                 current_number_of_participants = $7, max_number_of_participants = $8, image = $9
             WHERE id = $1
             RETURNING *",
        )
        .bind(event.id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.date_and_time)
        .bind(&event.venue)
        .bind(&event.category)
        .bind(event.current_number_of_participants)
        .bind(event.max_number_of_participants)
        .bind(&event.image)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unique_or(e, || duplicate_event_name(&event.name)))?
        .ok_or_else(|| not_found("Event", event.id))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i32) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found("Event", id));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn get_all(&self) -> RepositoryResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create(&self, user: User) -> RepositoryResult<User> {
        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, surname, email, birth_date)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.email)
        .bind(user.birth_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, user: User) -> RepositoryResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = $2, surname = $3, email = $4, birth_date = $5
             WHERE id = $1
             RETURNING *",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.email)
        .bind(user.birth_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found("User", user.id))
    }

    async fn delete(&self, id: i32) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found("User", id));
        }
        Ok(())
    }
}

#[async_trait]
impl EventUserRepository for PgStore {
    async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<EventUser>> {
        let registration =
            sqlx::query_as::<_, EventUser>("SELECT * FROM event_users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(registration)
    }

    async fn find(&self, user_id: i32, event_id: i32) -> RepositoryResult<Option<EventUser>> {
        let registration = sqlx::query_as::<_, EventUser>(
            "SELECT * FROM event_users WHERE user_id = $1 AND event_id = $2",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(registration)
    }

    #[tracing::instrument(skip_all, fields(user_id = registration.user_id, event_id = registration.event_id))]
    async fn register_user_in_event(
        &self,
        registration: EventUser,
    ) -> RepositoryResult<EventUser> {
        let inserted = sqlx::query_as::<_, EventUser>(
            "INSERT INTO event_users (user_id, event_id, registration_date)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(registration.user_id)
        .bind(registration.event_id)
        .bind(registration.registration_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            unique_or(e, || {
                duplicate_registration(registration.user_id, registration.event_id)
            })
        })?;
        Ok(inserted)
    }

    async fn unregister_user_in_event(&self, id: i32) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM event_users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found("Registration", id));
        }
        Ok(())
    }

    async fn get_users_of_event(&self, event_id: i32) -> RepositoryResult<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(
            "SELECT u.id AS user_id, u.name, u.surname, u.email, u.birth_date, eu.registration_date
             FROM event_users eu
             JOIN users u ON u.id = eu.user_id
             WHERE eu.event_id = $1
             ORDER BY eu.registration_date, u.id",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(participants)
    }

    async fn get_events_of_user(&self, user_id: i32) -> RepositoryResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT e.*
             FROM events e
             JOIN event_users eu ON eu.event_id = e.id
             WHERE eu.user_id = $1
             ORDER BY e.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }
}
