use crate::app::{FetchOutcome, ScheduleScreen};
use crate::calendar::{normalize_in, DisplayZone, EventRecord};
use crate::storage::config::{Config, ConfigError};
use crate::sync::google_api::{CalendarFeed, FetchError, GoogleCalendarFeed};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub struct SyncEngine {
    feed: Box<dyn CalendarFeed>,
    zone: DisplayZone,
}

impl SyncEngine {
    pub fn new(config: &Config) -> Result<Self, SyncError> {
        config.validate()?;
        let zone = config.display_zone()?;
        let feed = GoogleCalendarFeed::from_config(&config.google);
        Ok(Self::with_feed(Box::new(feed), zone))
    }

    pub fn with_feed(feed: Box<dyn CalendarFeed>, zone: DisplayZone) -> Self {
        Self { feed, zone }
    }

    pub fn zone(&self) -> &DisplayZone {
        &self.zone
    }

    pub async fn load(&self) -> Result<Vec<EventRecord>, FetchError> {
        let entries = self.feed.fetch_events().await?;
        Ok(normalize_in(entries, &self.zone))
    }

    /// Races `load` against `cancel`; the in-flight request is dropped on cancellation.
    pub async fn load_until_cancelled(
        &self,
        cancel: &CancellationToken,
    ) -> Option<Result<Vec<EventRecord>, FetchError>> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Fetch cancelled before completion");
                None
            }
            result = self.load() => Some(result),
        }
    }

    /// One full fetch cycle bound to the screen's lifetime.
    pub async fn run_fetch_cycle(&self, screen: &mut ScheduleScreen) -> Option<FetchOutcome> {
        screen.begin_fetch();
        let lifetime = screen.lifetime();
        let result = self.load_until_cancelled(&lifetime).await?;
        screen.settle(result).cloned()
    }
}
