use chrono::Utc;
use tracing::info;

use super::{ensure_non_negative, not_found};
use crate::dto::{EventDto, EventUserDto, ParticipantDto};
use crate::models::EventUser;
use crate::repositories::duplicate_registration;
use crate::unit_of_work::UnitOfWork;
use crate::utils::error::AppError;
use crate::validation::{EventUserValidator, Validator};

/// Registers users in events and answers who attends what.
///
/// Registrations are independent of the event record: the event's
/// participant counter is not touched here.
#[derive(Clone)]
pub struct RegistrationService {
    uow: UnitOfWork,
    validator: EventUserValidator,
}

impl RegistrationService {
    pub fn new(uow: UnitOfWork) -> Self {
        Self {
            uow,
            validator: EventUserValidator,
        }
    }

    #[tracing::instrument(skip_all, fields(user_id = request.user_id, event_id = request.event_id))]
    pub async fn register(&self, request: EventUserDto) -> Result<EventUserDto, AppError> {
        self.validator.validate(&request)?;
        self.ensure_event_exists(request.event_id).await?;
        self.ensure_user_exists(request.user_id).await?;

        let existing = self
            .uow
            .event_user_repository()
            .find(request.user_id, request.event_id)
            .await?;
        if existing.is_some() {
            return Err(duplicate_registration(request.user_id, request.event_id).into());
        }

        let saved = self
            .uow
            .event_user_repository()
            .register_user_in_event(EventUser {
                id: 0,
                user_id: request.user_id,
                event_id: request.event_id,
                registration_date: Utc::now().naive_utc(),
            })
            .await?;
        info!(id = saved.id, "User registered in event");
        Ok(saved.into())
    }

    /// Removes the registration identified by `registration.id`.
    ///
    /// The record is validated like a new registration, so callers submit
    /// the stored registration rather than a bare id.
    pub async fn unregister(&self, registration: EventUserDto) -> Result<(), AppError> {
        self.validator.validate(&registration)?;
        ensure_non_negative("id", registration.id)?;
        self.uow
            .event_user_repository()
            .unregister_user_in_event(registration.id)
            .await?;
        info!(id = registration.id, "User unregistered from event");
        Ok(())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<EventUserDto, AppError> {
        ensure_non_negative("id", id)?;
        self.uow
            .event_user_repository()
            .get_by_id(id)
            .await?
            .map(EventUserDto::from)
            .ok_or_else(|| not_found("Registration", id))
    }

    pub async fn users_of_event(&self, event_id: i32) -> Result<Vec<ParticipantDto>, AppError> {
        ensure_non_negative("eventId", event_id)?;
        self.ensure_event_exists(event_id).await?;
        let participants = self
            .uow
            .event_user_repository()
            .get_users_of_event(event_id)
            .await?;
        Ok(participants.into_iter().map(ParticipantDto::from).collect())
    }

    pub async fn events_of_user(&self, user_id: i32) -> Result<Vec<EventDto>, AppError> {
        ensure_non_negative("userId", user_id)?;
        self.ensure_user_exists(user_id).await?;
        let events = self
            .uow
            .event_user_repository()
            .get_events_of_user(user_id)
            .await?;
        Ok(events.into_iter().map(EventDto::from).collect())
    }

    async fn ensure_event_exists(&self, event_id: i32) -> Result<(), AppError> {
        match self.uow.event_repository().get_by_id(event_id).await? {
            Some(_) => Ok(()),
            None => Err(not_found("Event", event_id)),
        }
    }

    async fn ensure_user_exists(&self, user_id: i32) -> Result<(), AppError> {
        match self.uow.user_repository().get_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(not_found("User", user_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::UserDto;
    use crate::services::{EventService, UserService};

    struct Fixture {
        registrations: RegistrationService,
        events: EventService,
        event_id: i32,
        user_id: i32,
    }

    async fn fixture() -> Fixture {
        let uow = UnitOfWork::in_memory();
        let events = EventService::new(uow.clone());
        let users = UserService::new(uow.clone());

        let event = events
            .create(EventDto {
                name: "Workshop".to_string(),
                description: "Hands-on".to_string(),
                category: "Education".to_string(),
                venue: "Lab".to_string(),
                max_number_of_participants: 20,
                ..EventDto::default()
            })
            .await
            .unwrap();
        let user = users
            .create(UserDto {
                name: "Grace".to_string(),
                surname: "Hopper".to_string(),
                email: "grace@example.com".to_string(),
                ..UserDto::default()
            })
            .await
            .unwrap();

        Fixture {
            registrations: RegistrationService::new(uow),
            events,
            event_id: event.id,
            user_id: user.id,
        }
    }

    fn request(user_id: i32, event_id: i32) -> EventUserDto {
        EventUserDto {
            user_id,
            event_id,
            ..EventUserDto::default()
        }
    }

    #[tokio::test]
    async fn test_register_and_list_both_ways() {
        let f = fixture().await;

        let saved = f
            .registrations
            .register(request(f.user_id, f.event_id))
            .await
            .unwrap();
        assert!(saved.registration_date.is_some());
        assert_eq!(f.registrations.get_by_id(saved.id).await.unwrap(), saved);

        let participants = f.registrations.users_of_event(f.event_id).await.unwrap();
        assert_eq!(participants.len(), 1);
        assert_eq!(participants[0].surname, "Hopper");

        let events = f.registrations.events_of_user(f.user_id).await.unwrap();
        assert_eq!(events[0].name, "Workshop");

        // The counter on the event is left alone.
        let event = f.events.get_by_id(f.event_id).await.unwrap();
        assert_eq!(event.current_number_of_participants, 0);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_conflict() {
        let f = fixture().await;
        f.registrations
            .register(request(f.user_id, f.event_id))
            .await
            .unwrap();

        let err = f
            .registrations
            .register(request(f.user_id, f.event_id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_unknown_references() {
        let f = fixture().await;

        let err = f
            .registrations
            .register(request(f.user_id, 77))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = f
            .registrations
            .register(request(88, f.event_id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = f.registrations.register(request(0, 0)).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_unregister() {
        let f = fixture().await;
        let saved = f
            .registrations
            .register(request(f.user_id, f.event_id))
            .await
            .unwrap();

        let bare = EventUserDto {
            id: saved.id,
            ..EventUserDto::default()
        };
        assert!(matches!(
            f.registrations.unregister(bare).await.unwrap_err(),
            AppError::ValidationError(_)
        ));
        assert_eq!(f.registrations.users_of_event(f.event_id).await.unwrap().len(), 1);

        f.registrations.unregister(saved.clone()).await.unwrap();

        assert!(f
            .registrations
            .users_of_event(f.event_id)
            .await
            .unwrap()
            .is_empty());
        assert!(matches!(
            f.registrations.unregister(saved).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            f.registrations.get_by_id(-1).await.unwrap_err(),
            AppError::OutOfRange(_)
        ));
    }
}
