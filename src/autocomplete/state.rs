//! Autocomplete state machine
//!
//! A synchronous reducer over the transient state of one search box:
//! the current text, the fetched suggestions, and where in the input
//! lifecycle the box is. The machine does no I/O; it answers each
//! [`Event`] with an optional [`Command`] for the caller to execute,
//! which keeps every transition unit-testable.
//!
//! Two guards keep fast typing honest. Every keystroke bumps a fetch
//! generation, and a completion whose generation is no longer current
//! is dropped, so out-of-order responses cannot resurface stale
//! suggestions. Completions are also dropped outright while a
//! submission is in flight, so a late response never reopens the panel
//! after submit.

/// Minimum input length (in chars) before completions are fetched
pub const MIN_PREFIX_CHARS: usize = 2;

/// Lifecycle phase of the input session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No text in the box
    Idle,
    /// Text present; a completion fetch may be in flight
    Typing,
    /// The latest fetch has delivered; the panel shows if it found anything
    Suggesting,
    /// A search was handed to the host and has not come back yet
    Submitting,
}

/// Inputs accepted by [`AutocompleteState::apply`]
#[derive(Debug, Clone)]
pub enum Event {
    /// The box content changed; carries the full new text
    Input(String),
    /// A completion fetch finished; `None` marks a failed fetch
    FetchDone {
        generation: u64,
        suggestions: Option<Vec<String>>,
    },
    /// The user activated a suggestion
    Select(String),
    /// The user submitted the current text (enter key or button)
    Submit,
    /// The box lost focus
    Blur,
    /// The blur grace period elapsed; carries the interaction counter
    /// observed when the blur happened
    BlurElapsed { interaction: u64 },
    /// The host finished the submitted search, successfully or not
    SubmitDone,
}

/// Work the caller must perform after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch completions for `query`; report back with
    /// [`Event::FetchDone`] carrying the same generation
    Fetch { query: String, generation: u64 },
    /// Hand `query` to the host for an actual search
    Submit { query: String },
    /// Wait out the blur grace period, then send
    /// [`Event::BlurElapsed`] with the same counter
    ScheduleBlurCheck { interaction: u64 },
}

/// Transient state of one search box session
///
/// Created when the box mounts, dropped when it goes away; nothing in
/// here survives navigation.
#[derive(Debug, Clone)]
pub struct AutocompleteState {
    text: String,
    suggestions: Vec<String>,
    phase: Phase,
    /// Generation of the most recently issued fetch. Bumped on every
    /// text change and submission so stragglers identify themselves.
    generation: u64,
    /// Counts keystrokes, selections and submits; lets a blur check
    /// detect whether anything happened during the grace period.
    interaction: u64,
}

impl AutocompleteState {
    /// Fresh state for an empty box
    pub fn new() -> Self {
        Self {
            text: String::new(),
            suggestions: Vec::new(),
            phase: Phase::Idle,
            generation: 0,
            interaction: 0,
        }
    }

    /// Current box text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Completions from the most recent honored fetch
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the suggestion panel should be on screen
    ///
    /// True only when the latest input's fetch delivered a non-empty
    /// list and no keystroke or submit has superseded it since.
    pub fn panel_visible(&self) -> bool {
        self.phase == Phase::Suggesting && !self.suggestions.is_empty()
    }

    /// Advance the machine by one event
    pub fn apply(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::Input(text) => self.on_input(text),
            Event::FetchDone {
                generation,
                suggestions,
            } => self.on_fetch_done(generation, suggestions),
            Event::Select(term) => self.on_select(term),
            Event::Submit => self.on_submit(),
            Event::Blur => Some(Command::ScheduleBlurCheck {
                interaction: self.interaction,
            }),
            Event::BlurElapsed { interaction } => self.on_blur_elapsed(interaction),
            Event::SubmitDone => self.on_submit_done(),
        }
    }

    fn on_input(&mut self, text: String) -> Option<Command> {
        if self.phase == Phase::Submitting {
            // The box is disabled while a search runs
            return None;
        }

        self.text = text;
        self.interaction += 1;
        // Any in-flight fetch now answers a prompt that no longer exists
        self.generation += 1;

        if self.text.chars().count() < MIN_PREFIX_CHARS {
            self.suggestions.clear();
            self.phase = if self.text.is_empty() {
                Phase::Idle
            } else {
                Phase::Typing
            };
            return None;
        }

        // Panel stays hidden until the fresh fetch lands
        self.phase = Phase::Typing;
        Some(Command::Fetch {
            query: self.text.clone(),
            generation: self.generation,
        })
    }

    fn on_fetch_done(
        &mut self,
        generation: u64,
        suggestions: Option<Vec<String>>,
    ) -> Option<Command> {
        if generation != self.generation {
            // Superseded by a later keystroke or submit
            return None;
        }
        if !matches!(self.phase, Phase::Typing | Phase::Suggesting) {
            return None;
        }
        match suggestions {
            Some(terms) => {
                self.suggestions = terms;
                self.phase = Phase::Suggesting;
            }
            None => {
                self.suggestions.clear();
                self.phase = Phase::Typing;
            }
        }
        None
    }

    fn on_select(&mut self, term: String) -> Option<Command> {
        if self.phase == Phase::Submitting {
            return None;
        }
        self.interaction += 1;
        self.generation += 1;
        self.text = term;
        self.suggestions.clear();
        self.phase = Phase::Submitting;
        Some(Command::Submit {
            query: self.text.clone(),
        })
    }

    fn on_submit(&mut self) -> Option<Command> {
        if self.phase == Phase::Submitting || self.text.trim().is_empty() {
            return None;
        }
        self.interaction += 1;
        self.generation += 1;
        self.suggestions.clear();
        self.phase = Phase::Submitting;
        Some(Command::Submit {
            query: self.text.clone(),
        })
    }

    fn on_blur_elapsed(&mut self, interaction: u64) -> Option<Command> {
        if interaction == self.interaction && self.phase == Phase::Suggesting {
            // Nothing happened during the grace period; put the panel away
            self.phase = Phase::Typing;
        }
        None
    }

    fn on_submit_done(&mut self) -> Option<Command> {
        if self.phase == Phase::Submitting {
            self.phase = if self.text.trim().is_empty() {
                Phase::Idle
            } else {
                Phase::Typing
            };
        }
        None
    }
}

impl Default for AutocompleteState {
    fn default() -> Self {
        Self::new()
    }
}
