//! Transport records exchanged with API callers.
//!
//! Stored entities never cross the HTTP boundary directly; handlers and
//! services speak these types and convert with the `From` impls below.

pub mod event;
pub mod event_user;
mod image;
pub mod user;

pub use event::EventDto;
pub use event_user::{EventUserDto, ParticipantDto};
pub use user::UserDto;
