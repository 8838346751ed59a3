use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{EventUser, Participant};

/// Registration request and response body.
///
/// `registration_date` is ignored on input; the service stamps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventUserDto {
    pub id: i32,
    pub user_id: i32,
    pub event_id: i32,
    pub registration_date: Option<NaiveDateTime>,
}

impl From<EventUser> for EventUserDto {
    fn from(registration: EventUser) -> Self {
        Self {
            id: registration.id,
            user_id: registration.user_id,
            event_id: registration.event_id,
            registration_date: Some(registration.registration_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub user_id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub registration_date: NaiveDateTime,
}

impl From<Participant> for ParticipantDto {
    fn from(participant: Participant) -> Self {
        Self {
            user_id: participant.user_id,
            name: participant.name,
            surname: participant.surname,
            email: participant.email,
            birth_date: participant.birth_date,
            registration_date: participant.registration_date,
        }
    }
}
