//! Shopsearch: typo-tolerant product search backed by OpenSearch
//!
//! Exposes a small JSON API (/search, /suggest) that turns free text
//! into fuzzy product matches and prefix completions, plus a headless
//! autocomplete state machine for driving a search box.

pub mod autocomplete;
pub mod config;
pub mod engine;
pub mod query;
pub mod results;
pub mod web;

pub use autocomplete::Controller;
pub use config::Settings;
pub use engine::EngineClient;
pub use results::Product;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
