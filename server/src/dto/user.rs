use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::User;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub birth_date: NaiveDate,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            email: user.email,
            birth_date: user.birth_date,
        }
    }
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            surname: dto.surname,
            email: dto.email,
            birth_date: dto.birth_date,
        }
    }
}
