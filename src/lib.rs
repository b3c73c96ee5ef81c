pub mod app;
pub mod calendar;
pub mod storage;
pub mod sync;
pub mod ui;

pub use app::{FetchOutcome, LoadState, ScheduleScreen};
pub use calendar::{normalize, DetailPayload, EventRecord, RawCalendarEntry};
pub use sync::google_api::{CalendarFeed, FetchError, GoogleCalendarFeed};
