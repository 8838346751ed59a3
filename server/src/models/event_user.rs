use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Registration of a user in an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EventUser {
    pub id: i32,
    pub user_id: i32,
    pub event_id: i32,
    pub registration_date: NaiveDateTime,
}

/// A registered user as seen from one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Participant {
    pub user_id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub registration_date: NaiveDateTime,
}
