mod session;
mod presentation;
mod schedule_list;
mod event_detail;

pub use session::run_tui;
