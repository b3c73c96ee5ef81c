pub mod event;
pub mod raw_entry;
pub mod normalizer;

pub use event::{DetailPayload, EventRecord};
pub use raw_entry::{RawCalendarEntry, StartDescriptor};
pub use normalizer::{normalize, normalize_in, DisplayZone};
