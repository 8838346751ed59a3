use crate::services::{EventService, RegistrationService, UserService};
use crate::unit_of_work::UnitOfWork;

#[derive(Clone)]
pub struct AppState {
    pub events: EventService,
    pub users: UserService,
    pub registrations: RegistrationService,
    /// Used when a listing request carries no usable `pageSize`.
    pub default_page_size: i32,
}

impl AppState {
    pub fn new(uow: UnitOfWork, default_page_size: i32) -> Self {
        Self {
            events: EventService::new(uow.clone()),
            users: UserService::new(uow.clone()),
            registrations: RegistrationService::new(uow),
            default_page_size,
        }
    }
}
