use super::{Rules, ValidationErrors, Validator};
use crate::dto::EventUserDto;

#[derive(Debug, Clone, Copy, Default)]
pub struct EventUserValidator;

impl Validator<EventUserDto> for EventUserValidator {
    fn validate(&self, registration: &EventUserDto) -> Result<(), ValidationErrors> {
        Rules::default()
            .positive("UserId", registration.user_id)
            .positive("EventId", registration.event_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_needs_both_identifiers() {
        let ok = EventUserDto {
            user_id: 1,
            event_id: 2,
            ..EventUserDto::default()
        };
        assert!(EventUserValidator.validate(&ok).is_ok());

        let err = EventUserValidator
            .validate(&EventUserDto::default())
            .unwrap_err();
        assert_eq!(
            err.messages(),
            ["UserId must be greater than zero", "EventId must be greater than zero"]
        );
    }
}
