//! Async driver for the autocomplete state machine
//!
//! [`Controller`] runs [`AutocompleteState`] inside a tokio task. UI
//! events go in through cheap non-blocking methods; completion fetches
//! are spawned against a [`SuggestSource`] and fed back as they finish;
//! submitted queries come out of a channel for the host to execute. A
//! state snapshot is published through a watch channel after every
//! applied event.
//!
//! Dropping the last handle stops the worker; responses from still
//! running fetches are discarded with it.

use super::sources::SuggestSource;
use super::state::{AutocompleteState, Command, Event};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::debug;

/// How long a blur waits before hiding the panel, leaving room for a
/// click on a suggestion to land first
pub const BLUR_GRACE: Duration = Duration::from_millis(150);

/// Handle to a running autocomplete session
#[derive(Clone)]
pub struct Controller {
    events: mpsc::UnboundedSender<Event>,
    state: watch::Receiver<AutocompleteState>,
}

impl Controller {
    /// Spawn a session backed by `source`
    ///
    /// Returns the handle and the stream of submitted queries. The host
    /// runs each submitted search and reports back with
    /// [`Controller::submit_finished`] so the session leaves the
    /// submitting phase.
    pub fn spawn<S: SuggestSource>(source: S) -> (Self, mpsc::UnboundedReceiver<String>) {
        Self::spawn_with_grace(source, BLUR_GRACE)
    }

    /// Same as [`Controller::spawn`] with a custom blur grace period
    pub fn spawn_with_grace<S: SuggestSource>(
        source: S,
        blur_grace: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (submit_tx, submit_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(AutocompleteState::new());

        let worker = Worker {
            state: AutocompleteState::new(),
            source: Arc::new(source),
            events: events_tx.downgrade(),
            submissions: submit_tx,
            snapshots: state_tx,
            blur_grace,
        };
        tokio::spawn(worker.run(events_rx));

        (
            Self {
                events: events_tx,
                state: state_rx,
            },
            submit_rx,
        )
    }

    /// Record a keystroke; `text` is the full new box content
    pub fn input(&self, text: &str) {
        self.send(Event::Input(text.to_string()));
    }

    /// Activate a suggestion
    pub fn select(&self, term: &str) {
        self.send(Event::Select(term.to_string()));
    }

    /// Submit the current text
    pub fn submit(&self) {
        self.send(Event::Submit);
    }

    /// The box lost focus
    pub fn blur(&self) {
        self.send(Event::Blur);
    }

    /// The host finished the submitted search, successfully or not
    pub fn submit_finished(&self) {
        self.send(Event::SubmitDone);
    }

    /// Latest state snapshot
    pub fn state(&self) -> AutocompleteState {
        self.state.borrow().clone()
    }

    /// Subscribe to state snapshots
    pub fn subscribe(&self) -> watch::Receiver<AutocompleteState> {
        self.state.clone()
    }

    fn send(&self, event: Event) {
        // The worker only stops once every handle is gone, so a failed
        // send means nobody is listening anymore
        let _ = self.events.send(event);
    }
}

struct Worker<S> {
    state: AutocompleteState,
    source: Arc<S>,
    events: mpsc::WeakUnboundedSender<Event>,
    submissions: mpsc::UnboundedSender<String>,
    snapshots: watch::Sender<AutocompleteState>,
    blur_grace: Duration,
}

impl<S: SuggestSource> Worker<S> {
    async fn run(mut self, mut events: mpsc::UnboundedReceiver<Event>) {
        while let Some(event) = events.recv().await {
            let command = self.state.apply(event);
            let _ = self.snapshots.send(self.state.clone());
            if let Some(command) = command {
                self.execute(command);
            }
        }
        debug!("autocomplete session closed");
    }

    fn execute(&self, command: Command) {
        match command {
            Command::Fetch { query, generation } => {
                let source = self.source.clone();
                let events = self.events.clone();
                tokio::spawn(async move {
                    let suggestions = match source.complete(&query).await {
                        Ok(terms) => Some(terms),
                        Err(e) => {
                            debug!("suggestion fetch failed: {}", e);
                            None
                        }
                    };
                    if let Some(events) = events.upgrade() {
                        let _ = events.send(Event::FetchDone {
                            generation,
                            suggestions,
                        });
                    }
                });
            }
            Command::Submit { query } => {
                let _ = self.submissions.send(query);
            }
            Command::ScheduleBlurCheck { interaction } => {
                let events = self.events.clone();
                let grace = self.blur_grace;
                tokio::spawn(async move {
                    tokio::time::sleep(grace).await;
                    if let Some(events) = events.upgrade() {
                        let _ = events.send(Event::BlurElapsed { interaction });
                    }
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::state::Phase;
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    /// Echoes the prefix back uppercased, after an optional delay
    struct Canned {
        calls: Arc<AtomicUsize>,
        delay: Duration,
        fail: bool,
    }

    #[async_trait]
    impl SuggestSource for Canned {
        async fn complete(&self, prefix: &str) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            sleep(self.delay).await;
            if self.fail {
                anyhow::bail!("canned failure");
            }
            Ok(vec![prefix.to_uppercase()])
        }
    }

    fn canned(calls: &Arc<AtomicUsize>, delay: Duration, fail: bool) -> Canned {
        Canned {
            calls: calls.clone(),
            delay,
            fail,
        }
    }

    async fn wait_for<F>(
        state: &mut watch::Receiver<AutocompleteState>,
        predicate: F,
    ) -> AutocompleteState
    where
        F: Fn(&AutocompleteState) -> bool,
    {
        loop {
            {
                let snapshot = state.borrow_and_update();
                if predicate(&snapshot) {
                    return snapshot.clone();
                }
            }
            state.changed().await.unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_populates_suggestions() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (controller, _submissions) =
            Controller::spawn(canned(&calls, Duration::ZERO, false));
        let mut state = controller.subscribe();

        controller.input("ap");
        let snapshot = wait_for(&mut state, |s| s.panel_visible()).await;
        assert_eq!(snapshot.suggestions(), ["AP"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_char_never_fetches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (controller, _submissions) =
            Controller::spawn(canned(&calls, Duration::ZERO, false));
        let mut state = controller.subscribe();

        controller.input("a");
        controller.input("ap");
        wait_for(&mut state, |s| s.panel_visible()).await;
        // Only the two-char input reached the source
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_leaves_panel_hidden() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (controller, _submissions) =
            Controller::spawn(canned(&calls, Duration::ZERO, true));

        controller.input("ap");
        sleep(Duration::from_millis(50)).await;

        let snapshot = controller.state();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(snapshot.phase(), Phase::Typing);
        assert!(!snapshot.panel_visible());
        assert!(snapshot.suggestions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_emits_query() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (controller, mut submissions) =
            Controller::spawn(canned(&calls, Duration::ZERO, false));
        let mut state = controller.subscribe();

        controller.input("ap");
        wait_for(&mut state, |s| s.panel_visible()).await;
        controller.submit();

        assert_eq!(submissions.recv().await.as_deref(), Some("ap"));
        let snapshot = controller.state();
        assert_eq!(snapshot.phase(), Phase::Submitting);
        assert!(!snapshot.panel_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_fetch_after_submit_stays_hidden() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (controller, mut submissions) =
            Controller::spawn(canned(&calls, Duration::from_millis(200), false));

        controller.input("ap");
        controller.submit();
        assert_eq!(submissions.recv().await.as_deref(), Some("ap"));

        // Let the slow fetch finish and its response get discarded
        sleep(Duration::from_millis(400)).await;
        let snapshot = controller.state();
        assert_eq!(snapshot.phase(), Phase::Submitting);
        assert!(!snapshot.panel_visible());
        assert!(snapshot.suggestions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_keeps_only_latest_fetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (controller, _submissions) =
            Controller::spawn(canned(&calls, Duration::from_millis(100), false));

        controller.input("ap");
        controller.input("app");
        sleep(Duration::from_millis(300)).await;

        let snapshot = controller.state();
        assert_eq!(snapshot.suggestions(), ["APP"]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blur_hides_panel_after_grace() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (controller, _submissions) = Controller::spawn_with_grace(
            canned(&calls, Duration::ZERO, false),
            Duration::from_millis(100),
        );
        let mut state = controller.subscribe();

        controller.input("ap");
        wait_for(&mut state, |s| s.panel_visible()).await;
        controller.blur();
        sleep(Duration::from_millis(300)).await;

        let snapshot = controller.state();
        assert!(!snapshot.panel_visible());
        assert_eq!(snapshot.phase(), Phase::Typing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_during_grace_beats_the_hide() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (controller, mut submissions) = Controller::spawn_with_grace(
            canned(&calls, Duration::ZERO, false),
            Duration::from_secs(5),
        );
        let mut state = controller.subscribe();

        controller.input("ap");
        wait_for(&mut state, |s| s.panel_visible()).await;
        controller.blur();
        controller.select("apple");

        assert_eq!(submissions.recv().await.as_deref(), Some("apple"));
        sleep(Duration::from_secs(6)).await;
        assert_eq!(controller.state().phase(), Phase::Submitting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_finished_returns_to_typing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (controller, mut submissions) =
            Controller::spawn(canned(&calls, Duration::ZERO, false));
        let mut state = controller.subscribe();

        controller.input("apple");
        controller.submit();
        assert_eq!(submissions.recv().await.as_deref(), Some("apple"));

        controller.submit_finished();
        let snapshot = wait_for(&mut state, |s| s.phase() == Phase::Typing).await;
        assert_eq!(snapshot.text(), "apple");
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_closes_when_handles_drop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (controller, mut submissions) =
            Controller::spawn(canned(&calls, Duration::ZERO, false));

        drop(controller);
        assert!(submissions.recv().await.is_none());
    }
}
