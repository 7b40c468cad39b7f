//! Connectivity to the OpenSearch cluster
//!
//! The client owns transport and authentication and exposes a single
//! search operation; query semantics live in [`crate::query`] and
//! response interpretation in [`crate::results`].

mod client;

pub use client::{EngineClient, EngineError};
