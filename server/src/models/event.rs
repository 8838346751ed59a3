use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub date_and_time: NaiveDateTime,
    pub venue: String,
    pub category: String,
    pub current_number_of_participants: i32,
    pub max_number_of_participants: i32,
    pub image: Option<Vec<u8>>,
}
