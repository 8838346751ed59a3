use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::Event;

/// Event as exposed to callers.
///
/// `is_update` tells the shared validator whether the record is meant to
/// replace an existing event or create a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub date_and_time: NaiveDateTime,
    pub venue: String,
    pub category: String,
    pub current_number_of_participants: i32,
    pub max_number_of_participants: i32,
    #[serde(with = "super::image")]
    pub image: Option<Vec<u8>>,
    pub is_update: bool,
}

impl From<Event> for EventDto {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            description: event.description,
            date_and_time: event.date_and_time,
            venue: event.venue,
            category: event.category,
            current_number_of_participants: event.current_number_of_participants,
            max_number_of_participants: event.max_number_of_participants,
            image: event.image,
            is_update: false,
        }
    }
}

impl From<EventDto> for Event {
    fn from(dto: EventDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            description: dto.description,
            date_and_time: dto.date_and_time,
            venue: dto.venue,
            category: dto.category,
            current_number_of_participants: dto.current_number_of_participants,
            max_number_of_participants: dto.max_number_of_participants,
            image: dto.image,
        }
    }
}
