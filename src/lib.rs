//! Chat client for the Gov Terms AI question-answering service.
//!
//! The conversation state machine, query client, preference store and local summary
//! live here and work without any front-end. The Dioxus front-end is behind the `ui`
//! feature.

pub mod api;
pub mod config;
pub mod controller;
pub mod preferences;
pub mod session;
pub mod summary;
pub mod theme;
pub mod types;

#[cfg(feature = "ui")]
pub mod ui;
#[cfg(feature = "ui")]
pub mod views;

pub use controller::Controller;
pub use session::SessionState;
