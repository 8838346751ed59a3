use tracing::info;

use super::{ensure_non_negative, not_found};
use crate::dto::UserDto;
use crate::models::User;
use crate::unit_of_work::UnitOfWork;
use crate::utils::error::AppError;
use crate::validation::{UserValidator, Validator};

#[derive(Clone)]
pub struct UserService {
    uow: UnitOfWork,
    validator: UserValidator,
}

impl UserService {
    pub fn new(uow: UnitOfWork) -> Self {
        Self {
            uow,
            validator: UserValidator,
        }
    }

    pub async fn create(&self, user: UserDto) -> Result<UserDto, AppError> {
        self.validator.validate(&user)?;
        let created = self.uow.user_repository().create(User::from(user)).await?;
        info!(id = created.id, "User created");
        Ok(created.into())
    }

    pub async fn update(&self, user: UserDto) -> Result<UserDto, AppError> {
        self.validator.validate(&user)?;
        ensure_non_negative("id", user.id)?;
        let updated = self.uow.user_repository().update(User::from(user)).await?;
        info!(id = updated.id, "User updated");
        Ok(updated.into())
    }

    /// Deletes the user identified by `user.id` after validating the whole record.
    pub async fn delete(&self, user: UserDto) -> Result<(), AppError> {
        self.validator.validate(&user)?;
        ensure_non_negative("id", user.id)?;
        self.uow.user_repository().delete(user.id).await?;
        info!(id = user.id, "User deleted");
        Ok(())
    }

    pub async fn get_all(&self) -> Result<Vec<UserDto>, AppError> {
        let users = self.uow.user_repository().get_all().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<UserDto, AppError> {
        ensure_non_negative("id", id)?;
        self.uow
            .user_repository()
            .get_by_id(id)
            .await?
            .map(UserDto::from)
            .ok_or_else(|| not_found("User", id))
    }
}
