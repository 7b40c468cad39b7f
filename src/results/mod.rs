//! Result types and engine response normalization
//!
//! This module defines the domain result structures and the defensive
//! extraction of them from raw engine responses.

pub mod normalize;
mod types;

pub use types::Product;
