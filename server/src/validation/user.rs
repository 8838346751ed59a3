use super::{Rules, ValidationErrors, Validator};
use crate::dto::UserDto;

#[derive(Debug, Clone, Copy, Default)]
pub struct UserValidator;

impl Validator<UserDto> for UserValidator {
    fn validate(&self, user: &UserDto) -> Result<(), ValidationErrors> {
        let mut rules = Rules::default();
        rules
            .required("Name", &user.name)
            .required("Surname", &user.surname)
            .required("Email", &user.email);
        if !user.email.trim().is_empty() {
            rules.check(user.email.contains('@'), "Email is not a valid address");
        }
        rules.finish()
    }
}
