//! Mock REAPER extension server.
//!
//! Stands in for the ToneForge REAPER extension when the mapper test suite
//! runs without a live REAPER install. Serves the extension's HTTP surface
//! (/tracks, /fx/*) from canned scenario fixtures instead of a real project:
//! a reset endpoint selects a named track/FX/parameter tree, and the usual
//! read/write endpoints operate on it in memory.

pub mod archetypes;
pub mod config;
pub mod display;
pub mod errors;
pub mod http;
pub mod model;
pub mod scenarios;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use errors::{MockError, MockResult};
pub use model::{FormatHint, Parameter, Plugin, SessionState, Track};
pub use server::MockServer;
pub use state::MockState;
