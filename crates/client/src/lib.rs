//! Session-facing components for coldstart.
//!
//! This crate provides the live-session collaborator trait, the network
//! emulator that answers bootstrap requests from cached data, and the
//! `SessionCache` orchestrator exposing the persist/restore cycle.

pub mod cache;
pub mod emulator;
pub mod session;

pub use cache::SessionCache;
pub use emulator::NetworkEmulator;
pub use session::{Session, SessionError};

#[cfg(feature = "browser")]
pub use session::browser::BrowserSession;
