pub mod event;
pub mod event_user;
pub mod user;

pub use event::Event;
pub use event_user::{EventUser, Participant};
pub use user::User;
