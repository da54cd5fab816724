//! Session lifecycle
//!
//! A [`Session`] lives for one CLI invocation. It owns a working copy of the
//! profile and the provider, and moves through [`SessionState`] as the user
//! logs in and selects an instance or org. Only the profile is persisted.

mod state;

pub use state::{require_selector, LoginRequest, Session, SessionState};
