//! Headless autocomplete for driving a search box
//!
//! The behavior lives in [`AutocompleteState`], a synchronous state
//! machine: feed it [`Event`]s, execute the [`Command`]s it hands back.
//! [`Controller`] wraps that machine in a tokio task wired to a
//! [`SuggestSource`], so a UI only forwards keystrokes and renders
//! snapshots.
//!
//! ```
//! use shopsearch::autocomplete::{Controller, SuggestSource};
//!
//! struct Canned;
//!
//! #[async_trait::async_trait]
//! impl SuggestSource for Canned {
//!     async fn complete(&self, _prefix: &str) -> anyhow::Result<Vec<String>> {
//!         Ok(vec!["apple".to_string()])
//!     }
//! }
//!
//! tokio_test::block_on(async {
//!     let (controller, mut submissions) = Controller::spawn(Canned);
//!     controller.input("appl");
//!     controller.submit();
//!     assert_eq!(submissions.recv().await.as_deref(), Some("appl"));
//! });
//! ```

mod controller;
mod sources;
mod state;

pub use controller::{Controller, BLUR_GRACE};
pub use sources::{HttpSuggestSource, SuggestSource};
pub use state::{AutocompleteState, Command, Event, Phase, MIN_PREFIX_CHARS};
