use std::sync::Arc;

use sqlx::postgres::PgPool;

use crate::repositories::{
    EventRepository, EventUserRepository, MemoryStore, PgStore, UserRepository,
};

/// Single handle over every repository a service may touch.
#[derive(Clone)]
pub struct UnitOfWork {
    events: Arc<dyn EventRepository>,
    users: Arc<dyn UserRepository>,
    event_users: Arc<dyn EventUserRepository>,
}

impl UnitOfWork {
    pub fn new(
        events: Arc<dyn EventRepository>,
        users: Arc<dyn UserRepository>,
        event_users: Arc<dyn EventUserRepository>,
    ) -> Self {
        Self {
            events,
            users,
            event_users,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self::new(store.clone(), store.clone(), store)
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store.clone(), store)
    }

    pub fn event_repository(&self) -> &dyn EventRepository {
        self.events.as_ref()
    }

    pub fn user_repository(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }

    pub fn event_user_repository(&self) -> &dyn EventUserRepository {
        self.event_users.as_ref()
    }
}
