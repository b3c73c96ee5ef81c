pub mod presentation;
pub mod content_formatting;
