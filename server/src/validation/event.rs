use super::{Rules, ValidationErrors, Validator};
use crate::dto::EventDto;

/// Validates events for create, update and delete alike.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventValidator;

impl Validator<EventDto> for EventValidator {
    fn validate(&self, event: &EventDto) -> Result<(), ValidationErrors> {
        let mut rules = Rules::default();
        rules
            .required("Name", &event.name)
            .required("Description", &event.description)
            .required("Category", &event.category)
            .positive("MaxNumberOfParticipants", event.max_number_of_participants)
            .non_negative(
                "CurrentNumberOfParticipants",
                event.current_number_of_participants,
            )
            .check(
                event.current_number_of_participants <= event.max_number_of_participants,
                "CurrentNumberOfParticipants must not exceed MaxNumberOfParticipants",
            );
        if event.is_update {
            rules.positive("Id", event.id);
        }
        rules.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_event() -> EventDto {
        EventDto {
            id: 1,
            name: "New Event".to_string(),
            description: "Description".to_string(),
            category: "Category".to_string(),
            venue: "Venue".to_string(),
            max_number_of_participants: 1,
            ..EventDto::default()
        }
    }

    fn with_fields(name: &str, description: &str, category: &str, max: i32) -> EventDto {
        EventDto {
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            max_number_of_participants: max,
            ..valid_event()
        }
    }

    #[test]
    fn test_valid_event_passes() {
        assert!(EventValidator.validate(&valid_event()).is_ok());
    }

    #[test]
    fn test_each_missing_field_is_rejected() {
        let cases = [
            with_fields("", "Description", "Category", 10),
            with_fields("   ", "Description", "Category", 10),
            with_fields("Name", "", "Category", 10),
            with_fields("Name", "Description", "", 10),
            with_fields("Name", "Description", "Category", 0),
        ];

        for event in cases {
            let err = EventValidator.validate(&event).unwrap_err();
            assert_eq!(err.messages().len(), 1, "{event:?} -> {err}");
        }
    }

    #[test]
    fn test_participant_counts_must_fit_maximum() {
        let event = EventDto {
            current_number_of_participants: 11,
            max_number_of_participants: 10,
            ..valid_event()
        };
        let err = EventValidator.validate(&event).unwrap_err();
        assert_eq!(
            err.messages(),
            ["CurrentNumberOfParticipants must not exceed MaxNumberOfParticipants"]
        );

        let event = EventDto {
            current_number_of_participants: -1,
            ..valid_event()
        };
        assert!(EventValidator.validate(&event).is_err());
    }

    #[test]
    fn test_update_requires_identifier() {
        let event = EventDto {
            id: 0,
            is_update: true,
            ..valid_event()
        };
        let err = EventValidator.validate(&event).unwrap_err();
        assert_eq!(err.messages(), ["Id must be greater than zero"]);

        let create = EventDto {
            id: 0,
            ..valid_event()
        };
        assert!(EventValidator.validate(&create).is_ok());
    }

    #[test]
    fn test_blank_record_reports_every_rule() {
        let err = EventValidator.validate(&EventDto::default()).unwrap_err();
        assert_eq!(err.messages().len(), 4);
    }
}
