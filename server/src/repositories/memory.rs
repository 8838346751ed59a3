//! In-process store used by tests and by local runs without `DATABASE_URL`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use super::{
    duplicate_event_name, duplicate_registration, EventRepository, EventUserRepository,
    RepositoryError, RepositoryResult, UserRepository,
};
use crate::models::{Event, EventUser, Participant, User};

#[derive(Default)]
struct Tables {
    events: BTreeMap<i32, Event>,
    users: BTreeMap<i32, User>,
    registrations: BTreeMap<i32, EventUser>,
    next_event_id: i32,
    next_user_id: i32,
    next_registration_id: i32,
}

impl Tables {
    fn name_taken(&self, name: &str, except_id: Option<i32>) -> bool {
        self.events
            .values()
            .any(|e| e.name == name && Some(e.id) != except_id)
    }

    fn events_where(&self, predicate: impl Fn(&Event) -> bool) -> Vec<Event> {
        self.events.values().filter(|e| predicate(*e)).cloned().collect()
    }
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// Rows are kept in id order, matching the `ORDER BY id` of the Postgres store.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn get_all(&self) -> RepositoryResult<Vec<Event>> {
        Ok(self.tables.read().await.events_where(|_| true))
    }

    async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<Event>> {
        Ok(self.tables.read().await.events.get(&id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> RepositoryResult<Option<Event>> {
        let tables = self.tables.read().await;
        Ok(tables.events.values().find(|e| e.name == name).cloned())
    }

    async fn get_by_category(&self, category: &str) -> RepositoryResult<Vec<Event>> {
        Ok(self
            .tables
            .read()
            .await
            .events_where(|e| e.category == category))
    }

    async fn get_by_venue(&self, venue: &str) -> RepositoryResult<Vec<Event>> {
        Ok(self.tables.read().await.events_where(|e| e.venue == venue))
    }

    async fn get_by_date(&self, date: NaiveDateTime) -> RepositoryResult<Vec<Event>> {
        Ok(self
            .tables
            .read()
            .await
            .events_where(|e| e.date_and_time == date))
    }

    async fn create(&self, mut event: Event) -> RepositoryResult<Event> {
        let mut tables = self.tables.write().await;
        if tables.name_taken(&event.name, None) {
            return Err(duplicate_event_name(&event.name));
        }
        event.id = next_id(&mut tables.next_event_id);
        tables.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn update(&self, event: Event) -> RepositoryResult<Event> {
        let mut tables = self.tables.write().await;
        if tables.name_taken(&event.name, Some(event.id)) {
            return Err(duplicate_event_name(&event.name));
        }
        match tables.events.get_mut(&event.id) {
            Some(stored) => {
                *stored = event.clone();
                Ok(event)
            }
            None => Err(RepositoryError::NotFound {
                entity: "Event",
                id: event.id,
            }),
        }
    }

    async fn delete(&self, id: i32) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .events
            .remove(&id)
            .ok_or(RepositoryError::NotFound { entity: "Event", id })?;
        tables.registrations.retain(|_, r| r.event_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get_all(&self) -> RepositoryResult<Vec<User>> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn create(&self, mut user: User) -> RepositoryResult<User> {
        let mut tables = self.tables.write().await;
        user.id = next_id(&mut tables.next_user_id);
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> RepositoryResult<User> {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(user)
            }
            None => Err(RepositoryError::NotFound {
                entity: "User",
                id: user.id,
            }),
        }
    }

    async fn delete(&self, id: i32) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .users
            .remove(&id)
            .ok_or(RepositoryError::NotFound { entity: "User", id })?;
        tables.registrations.retain(|_, r| r.user_id != id);
        Ok(())
    }
}

#[async_trait]
impl EventUserRepository for MemoryStore {
    async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<EventUser>> {
        Ok(self.tables.read().await.registrations.get(&id).cloned())
    }

    async fn find(&self, user_id: i32, event_id: i32) -> RepositoryResult<Option<EventUser>> {
        let tables = self.tables.read().await;
        Ok(tables
            .registrations
            .values()
            .find(|r| r.user_id == user_id && r.event_id == event_id)
            .cloned())
    }

    async fn register_user_in_event(
        &self,
        mut registration: EventUser,
    ) -> RepositoryResult<EventUser> {
        let mut tables = self.tables.write().await;
        let duplicate = tables
            .registrations
            .values()
            .any(|r| r.user_id == registration.user_id && r.event_id == registration.event_id);
        if duplicate {
            return Err(duplicate_registration(
                registration.user_id,
                registration.event_id,
            ));
        }
        registration.id = next_id(&mut tables.next_registration_id);
        tables
            .registrations
            .insert(registration.id, registration.clone());
        Ok(registration)
    }

    async fn unregister_user_in_event(&self, id: i32) -> RepositoryResult<()> {
        self.tables
            .write()
            .await
            .registrations
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound {
                entity: "Registration",
                id,
            })
    }

    async fn get_users_of_event(&self, event_id: i32) -> RepositoryResult<Vec<Participant>> {
        let tables = self.tables.read().await;
        let mut participants: Vec<Participant> = tables
            .registrations
            .values()
            .filter(|r| r.event_id == event_id)
            .filter_map(|r| {
                tables.users.get(&r.user_id).map(|u| Participant {
                    user_id: u.id,
                    name: u.name.clone(),
                    surname: u.surname.clone(),
                    email: u.email.clone(),
                    birth_date: u.birth_date,
                    registration_date: r.registration_date,
                })
            })
            .collect();
        participants.sort_by_key(|p| (p.registration_date, p.user_id));
        Ok(participants)
    }

    async fn get_events_of_user(&self, user_id: i32) -> RepositoryResult<Vec<Event>> {
        let tables = self.tables.read().await;
        let mut events: Vec<Event> = tables
            .registrations
            .values()
            .filter(|r| r.user_id == user_id)
            .filter_map(|r| tables.events.get(&r.event_id).cloned())
            .collect();
        events.sort_by_key(|e| e.id);
        Ok(events)
    }
}
