pub mod description;
pub mod event;

pub use description::{DescriptionFacts, GeneratedDescription};
pub use event::{Attendees, Event, EventDraft, EventType, RsvpStatus, UnknownEventType};
