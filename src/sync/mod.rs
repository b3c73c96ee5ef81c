pub mod google_api;
pub mod sync_engine;
