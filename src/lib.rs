//! Hidden Grid Library
//!
//! Fetches a published table of (character, x, y) rows and renders the
//! characters onto a grid so the hidden message becomes readable.

pub mod cli;
pub mod config;
pub mod document;
pub mod logging;
pub mod pipeline;
pub mod properties;
pub mod render;
