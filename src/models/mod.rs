pub mod event;

pub use event::{Event, EventDocument, EventFields, EventPayload, DEFAULT_COLOR};
