//! Use-cases over the unit of work.
//!
//! Every mutation runs its validator before the store is touched.

pub mod events;
pub mod registrations;
pub mod users;

pub use events::{EventQuery, EventService};
pub use registrations::RegistrationService;
pub use users::UserService;

use crate::utils::error::AppError;
use crate::validation::messages::PARAMETER_IS_LESS_THAN_ZERO;

fn ensure_non_negative(parameter: &str, value: i32) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::OutOfRange(format!(
            "{parameter}: {PARAMETER_IS_LESS_THAN_ZERO}"
        )));
    }
    Ok(())
}

fn not_found(entity: &str, id: i32) -> AppError {
    AppError::NotFound(format!("{entity} with id {id} was not found"))
}
