//! Schedule data loader: fetches a class's timetable and swaps it into the
//! calendar's event set.
//!
//! [`ScheduleState`] is the component-owned state.  A fetch is split into
//! [`ScheduleState::begin`] and [`ScheduleState::finish`] so that callers
//! driving the request themselves (the browser, via `spawn_local`) get the
//! same guarantees as [`ScheduleLoader`]:
//!
//! * an empty class selection never issues a request;
//! * a successful response replaces the whole set in one step;
//! * a failed response keeps the previous set and records a message;
//! * the loading flag is cleared when the latest request settles, whatever
//!   the outcome;
//! * a response for a request that has since been superseded is dropped.

use tracing::{debug, info, warn};

use crate::api::ScheduleApi;
use crate::error::ScheduleError;
use crate::event::{events_from_entries, CalendarEvent};
use crate::protocol::ScheduleEntry;
use crate::session::Session;
use crate::stats::ScheduleStats;

/// Fallback banner text when a fetch fails without a backend message.
pub const LOAD_FAILED: &str = "Failed to load schedule";

/// Handle for one in-flight fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    class_id: String,
}

impl FetchTicket {
    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What [`ScheduleState::finish`] did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Event set replaced with this many events.
    Applied(usize),
    /// Request failed; previous events kept.
    Failed(String),
    /// A newer request was issued meanwhile; response ignored.
    Stale,
    /// No request was made (empty class or missing credentials).
    Skipped,
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleState {
    events: Vec<CalendarEvent>,
    loading: bool,
    error: Option<String>,
    class_id: Option<String>,
    issued: u64,
}

impl ScheduleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Class of the most recent request.
    pub fn class_id(&self) -> Option<&str> {
        self.class_id.as_deref()
    }

    /// Statistics over the full (unfiltered) event set.
    pub fn stats(&self) -> Option<ScheduleStats> {
        ScheduleStats::from_events(&self.events)
    }

    /// Start a fetch for `class_id`.  Blank ids are a no-op.
    pub fn begin(&mut self, class_id: &str) -> Option<FetchTicket> {
        let class_id = class_id.trim();
        if class_id.is_empty() {
            return None;
        }
        self.issued += 1;
        self.loading = true;
        self.class_id = Some(class_id.to_string());
        debug!("Schedule fetch #{} for class {class_id}", self.issued);
        Some(FetchTicket {
            seq: self.issued,
            class_id: class_id.to_string(),
        })
    }

    /// Start a re-fetch of the most recently requested class, so a reload
    /// issued after a write lands on whatever the user selected last.
    pub fn begin_refresh(&mut self) -> Option<FetchTicket> {
        let class_id = self.class_id.clone()?;
        self.begin(&class_id)
    }

    /// Settle the fetch identified by `ticket`.
    pub fn finish(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<ScheduleEntry>, ScheduleError>,
    ) -> FetchOutcome {
        if ticket.seq != self.issued {
            debug!(
                "Dropping stale schedule response #{} (latest #{})",
                ticket.seq, self.issued
            );
            return FetchOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(entries) => {
                self.events = events_from_entries(entries);
                self.error = None;
                info!(
                    "Loaded {} schedule entries for class {}",
                    self.events.len(),
                    ticket.class_id
                );
                FetchOutcome::Applied(self.events.len())
            }
            Err(e) => {
                warn!("Schedule fetch for class {} failed: {e}", ticket.class_id);
                let msg = e.user_message(LOAD_FAILED);
                self.error = Some(msg.clone());
                FetchOutcome::Failed(msg)
            }
        }
    }

    /// Record an error raised before any request was made.
    pub fn reject(&mut self, error: &ScheduleError) {
        self.error = Some(error.user_message(LOAD_FAILED));
    }
}

/// Loader that drives the requests itself through a [`ScheduleApi`].
#[derive(Debug)]
pub struct ScheduleLoader<A> {
    api: A,
    session: Session,
    state: ScheduleState,
}

impl<A: ScheduleApi> ScheduleLoader<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            state: ScheduleState::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ScheduleState {
        &mut self.state
    }

    pub fn events(&self) -> &[CalendarEvent] {
        self.state.events()
    }

    /// Fetch `class_id` and replace the event set.
    pub async fn load(&mut self, class_id: &str) -> FetchOutcome {
        if class_id.trim().is_empty() {
            return FetchOutcome::Skipped;
        }
        if let Err(e) = self.session.bearer() {
            self.state.reject(&e);
            return FetchOutcome::Skipped;
        }
        let Some(ticket) = self.state.begin(class_id) else {
            return FetchOutcome::Skipped;
        };
        let result = self.api.list_schedule(&self.session, ticket.class_id()).await;
        self.state.finish(ticket, result)
    }

    /// Re-fetch the currently selected class.
    pub async fn refresh(&mut self) -> FetchOutcome {
        if self.state.class_id().is_none() {
            return FetchOutcome::Skipped;
        }
        if let Err(e) = self.session.bearer() {
            self.state.reject(&e);
            return FetchOutcome::Skipped;
        }
        let Some(ticket) = self.state.begin_refresh() else {
            return FetchOutcome::Skipped;
        };
        let result = self.api.list_schedule(&self.session, ticket.class_id()).await;
        self.state.finish(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::fixtures::entry;

    #[test]
    fn test_begin_ignores_blank_class() {
        let mut state = ScheduleState::new();
        assert!(state.begin("").is_none());
        assert!(state.begin("   ").is_none());
        assert!(!state.is_loading());
        assert!(state.class_id().is_none());
    }

    #[test]
    fn test_failure_keeps_previous_events() {
        let mut state = ScheduleState::new();
        let t = state.begin("c5a").unwrap();
        state.finish(t, Ok(vec![entry("e1", "Math", "Alice", 19, 9, 10)]));
        assert_eq!(state.events().len(), 1);

        let t = state.begin("c5a").unwrap();
        assert!(state.is_loading());
        let outcome = state.finish(
            t,
            Err(ScheduleError::Api {
                status: 500,
                message: Some("Database unavailable".into()),
            }),
        );
        assert_eq!(outcome, FetchOutcome::Failed("Database unavailable".into()));
        assert!(!state.is_loading());
        assert_eq!(state.events().len(), 1);
        assert_eq!(state.error(), Some("Database unavailable"));
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut state = ScheduleState::new();
        let first = state.begin("c5a").unwrap();
        let second = state.begin("c6b").unwrap();

        let late = state.finish(first, Ok(vec![entry("old", "Math", "Alice", 19, 9, 10)]));
        assert_eq!(late, FetchOutcome::Stale);
        assert!(state.is_loading());
        assert!(state.events().is_empty());

        let fresh = state.finish(
            second,
            Ok(vec![
                entry("n1", "Art", "Carol", 19, 9, 10),
                entry("n2", "Music", "Dan", 19, 10, 11),
            ]),
        );
        assert_eq!(fresh, FetchOutcome::Applied(2));
        assert!(!state.is_loading());
        assert_eq!(state.class_id(), Some("c6b"));
    }

    #[test]
    fn test_success_clears_previous_error() {
        let mut state = ScheduleState::new();
        let t = state.begin("c5a").unwrap();
        state.finish(t, Err(ScheduleError::Transport("down".into())));
        assert_eq!(state.error(), Some(LOAD_FAILED));

        let t = state.begin("c5a").unwrap();
        state.finish(t, Ok(vec![]));
        assert_eq!(state.error(), None);
        assert!(state.stats().is_none());
    }

    #[test]
    fn test_refresh_follows_newest_selection() {
        let mut state = ScheduleState::new();
        assert!(state.begin_refresh().is_none());

        // A write in class c5a is in flight when the user switches to c6b.
        state.begin("c5a").unwrap();
        let switch = state.begin("c6b").unwrap();
        let reload = state.begin_refresh().unwrap();
        assert_eq!(reload.class_id(), "c6b");

        let late = state.finish(switch, Ok(vec![entry("x", "Math", "Alice", 19, 9, 10)]));
        assert_eq!(late, FetchOutcome::Stale);
        let fresh = state.finish(reload, Ok(vec![entry("n1", "Art", "Carol", 19, 9, 10)]));
        assert_eq!(fresh, FetchOutcome::Applied(1));
        assert_eq!(state.class_id(), Some("c6b"));
        assert_eq!(state.events()[0].id, "n1");
    }

    #[test]
    fn test_clear_error_keeps_events() {
        let mut state = ScheduleState::new();
        let t = state.begin("c5a").unwrap();
        state.finish(t, Ok(vec![entry("e1", "Math", "Alice", 19, 9, 10)]));
        state.reject(&ScheduleError::MissingCredentials);
        assert!(state.error().is_some());

        state.clear_error();
        assert_eq!(state.error(), None);
        assert_eq!(state.events().len(), 1);
    }
}
