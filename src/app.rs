use tokio_util::sync::CancellationToken;

use crate::calendar::{DetailPayload, EventRecord};
use crate::sync::google_api::{FetchError, NetworkError, ProviderError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Settled,
}

/// How the most recent fetch cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(usize),
    Empty,
    ProviderFailed(ProviderError),
    NetworkFailed(String),
}

impl FetchOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, FetchOutcome::ProviderFailed(_) | FetchOutcome::NetworkFailed(_))
    }
}

pub struct ScheduleScreen {
    header: String,
    state: LoadState,
    events: Vec<EventRecord>,
    last_outcome: Option<FetchOutcome>,
    selected_index: usize,
    detail: Option<DetailPayload>,
    lifetime: CancellationToken,
}

impl ScheduleScreen {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            state: LoadState::Loading,
            events: Vec::new(),
            last_outcome: None,
            selected_index: 0,
            detail: None,
            lifetime: CancellationToken::new(),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn last_outcome(&self) -> Option<&FetchOutcome> {
        self.last_outcome.as_ref()
    }

    /// Token cancelled when the screen is disposed; fetches bound to it stop.
    pub fn lifetime(&self) -> CancellationToken {
        self.lifetime.clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.lifetime.is_cancelled()
    }

    pub fn dispose(&mut self) {
        tracing::debug!("Disposing schedule screen");
        self.lifetime.cancel();
    }

    pub fn begin_fetch(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.state = LoadState::Loading;
    }

    /// Settles the current fetch cycle. Returns `None` when the cycle was already
    /// settled or the screen has been disposed; the state is left untouched then.
    pub fn settle(&mut self, result: Result<Vec<EventRecord>, FetchError>) -> Option<&FetchOutcome> {
        if self.is_disposed() {
            tracing::debug!("Ignoring fetch result for disposed screen");
            return None;
        }
        if self.state == LoadState::Settled {
            tracing::warn!("Fetch cycle already settled; ignoring result");
            return None;
        }

        let outcome = match result {
            Ok(events) => {
                let outcome = if events.is_empty() {
                    FetchOutcome::Empty
                } else {
                    FetchOutcome::Loaded(events.len())
                };
                self.events = events;
                self.selected_index = 0;
                self.detail = None;
                outcome
            }
            Err(FetchError::Provider(error)) => {
                tracing::error!("Google Calendar API error: {}", error);
                FetchOutcome::ProviderFailed(error)
            }
            Err(FetchError::Network(error)) => {
                tracing::error!("Error fetching events: {}", error);
                FetchOutcome::NetworkFailed(describe_network_error(&error))
            }
        };

        self.last_outcome = Some(outcome);
        self.state = LoadState::Settled;
        self.last_outcome.as_ref()
    }

    /// Text shown in place of an empty list. Failures stay indistinguishable from
    /// an empty calendar unless `show_fetch_errors` is set.
    pub fn empty_list_message(&self, show_fetch_errors: bool) -> String {
        match self.last_outcome.as_ref() {
            Some(FetchOutcome::ProviderFailed(error)) if show_fetch_errors => {
                format!("Could not load events: {}", error.message)
            }
            Some(FetchOutcome::NetworkFailed(reason)) if show_fetch_errors => {
                format!("Could not load events: {}", reason)
            }
            _ => "No events scheduled.".to_string(),
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&EventRecord> {
        self.events.get(self.selected_index)
    }

    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.events.len() {
            self.selected_index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn open_selected(&mut self) -> Option<&DetailPayload> {
        if self.is_loading() {
            return None;
        }
        let payload = self.selected()?.detail_payload();
        tracing::debug!("Opening detail view for event {}", payload.id);
        self.detail = Some(payload);
        self.detail.as_ref()
    }

    pub fn detail(&self) -> Option<&DetailPayload> {
        self.detail.as_ref()
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }
}

fn describe_network_error(error: &NetworkError) -> String {
    match error {
        NetworkError::Transport(e) if e.is_connect() => "could not connect to calendar provider".to_string(),
        NetworkError::Transport(e) if e.is_timeout() => "calendar provider timed out".to_string(),
        other => other.to_string(),
    }
}

impl Drop for ScheduleScreen {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(id: &str) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            title: format!("Session {}", id),
            time: "All Day".to_string(),
            location: "TBD".to_string(),
            description: String::new(),
        }
    }

    fn provider_error() -> FetchError {
        FetchError::Provider(ProviderError {
            code: Some(403),
            message: "Forbidden".to_string(),
            ..ProviderError::default()
        })
    }

    fn malformed_error() -> FetchError {
        let parse_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        FetchError::Network(NetworkError::MalformedBody(parse_error))
    }

    #[test]
    fn new_screen_starts_loading_with_no_events() {
        let screen = ScheduleScreen::new("SHPE Conference 2026");

        assert!(screen.is_loading());
        assert!(screen.events().is_empty());
        assert!(screen.last_outcome().is_none());
        assert_eq!(screen.header(), "SHPE Conference 2026");
    }

    #[test]
    fn successful_fetch_settles_with_events() {
        let mut screen = ScheduleScreen::new("Conf");

        let outcome = screen.settle(Ok(vec![record("a"), record("b")])).cloned();

        assert_eq!(outcome, Some(FetchOutcome::Loaded(2)));
        assert_eq!(screen.state(), LoadState::Settled);
        assert_eq!(screen.events(), &[record("a"), record("b")]);
    }

    #[test]
    fn zero_items_settles_as_empty_not_error() {
        let mut screen = ScheduleScreen::new("Conf");

        let outcome = screen.settle(Ok(Vec::new())).cloned();

        assert_eq!(outcome, Some(FetchOutcome::Empty));
        assert!(!screen.is_loading());
        assert!(!screen.last_outcome().unwrap().is_failure());
    }

    #[test]
    fn provider_error_settles_without_populating_list() {
        let mut screen = ScheduleScreen::new("Conf");

        let outcome = screen.settle(Err(provider_error())).cloned();

        assert!(matches!(outcome, Some(FetchOutcome::ProviderFailed(ref e)) if e.code == Some(403)));
        assert!(!screen.is_loading());
        assert!(screen.events().is_empty());
    }

    #[test]
    fn network_error_settles_without_populating_list() {
        let mut screen = ScheduleScreen::new("Conf");

        let outcome = screen.settle(Err(malformed_error())).cloned();

        assert!(matches!(outcome, Some(FetchOutcome::NetworkFailed(_))));
        assert!(!screen.is_loading());
        assert!(screen.events().is_empty());
    }

    #[test]
    fn failed_cycle_keeps_last_known_list() {
        let mut screen = ScheduleScreen::new("Conf");
        screen.settle(Ok(vec![record("a")]));

        screen.begin_fetch();
        screen.settle(Err(provider_error()));

        assert_eq!(screen.events(), &[record("a")]);
    }

    #[test]
    fn new_cycle_replaces_list_entirely() {
        let mut screen = ScheduleScreen::new("Conf");
        screen.settle(Ok(vec![record("a"), record("b")]));

        screen.begin_fetch();
        screen.settle(Ok(vec![record("c")]));

        assert_eq!(screen.events(), &[record("c")]);
    }

    #[test]
    fn settling_twice_in_one_cycle_is_ignored() {
        let mut screen = ScheduleScreen::new("Conf");
        screen.settle(Ok(vec![record("a")]));

        let second = screen.settle(Ok(vec![record("z")]));

        assert!(second.is_none());
        assert_eq!(screen.events(), &[record("a")]);
    }

    #[test]
    fn disposed_screen_ignores_late_results() {
        let mut screen = ScheduleScreen::new("Conf");
        let lifetime = screen.lifetime();

        screen.dispose();
        let outcome = screen.settle(Ok(vec![record("late")]));

        assert!(outcome.is_none());
        assert!(lifetime.is_cancelled());
        assert!(screen.events().is_empty());
        assert!(screen.is_loading());
    }

    #[test]
    fn selection_stays_within_bounds() {
        let mut screen = ScheduleScreen::new("Conf");
        screen.settle(Ok(vec![record("a"), record("b")]));

        screen.select_previous();
        assert_eq!(screen.selected_index(), 0);

        screen.select_next();
        screen.select_next();
        assert_eq!(screen.selected().map(|e| e.id.as_str()), Some("b"));
    }

    #[test]
    fn open_selected_forwards_detail_payload() {
        let mut screen = ScheduleScreen::new("Conf");
        screen.settle(Ok(vec![record("a"), record("b")]));
        screen.select_next();

        let payload = screen.open_selected().cloned().unwrap();

        assert_eq!(payload, record("b").detail_payload());
        assert_eq!(screen.detail(), Some(&payload));

        screen.close_detail();
        assert!(screen.detail().is_none());
    }

    #[test]
    fn open_selected_is_unavailable_while_loading() {
        let mut screen = ScheduleScreen::new("Conf");
        assert!(screen.open_selected().is_none());
    }

    #[test]
    fn failures_look_like_empty_calendar_by_default() {
        let mut screen = ScheduleScreen::new("Conf");
        screen.settle(Err(provider_error()));

        assert_eq!(screen.empty_list_message(false), "No events scheduled.");
        assert_eq!(screen.empty_list_message(true), "Could not load events: Forbidden");
    }

    #[test]
    fn empty_calendar_message_ignores_error_switch() {
        let mut screen = ScheduleScreen::new("Conf");
        screen.settle(Ok(Vec::new()));

        assert_eq!(screen.empty_list_message(true), "No events scheduled.");
    }

    #[test]
    fn dropping_screen_cancels_lifetime() {
        let screen = ScheduleScreen::new("Conf");
        let lifetime = screen.lifetime();

        drop(screen);

        assert!(lifetime.is_cancelled());
    }
}
