//! Weather lookup TUI
//!
//! Library half of the binary: state, reducer, components, and the
//! provider and share plumbing, exposed for the integration tests.

pub mod action;
pub mod api;
pub mod band;
pub mod components;
pub mod config;
pub mod effect;
pub mod logging;
pub mod reducer;
pub mod share;
pub mod sprites;
pub mod state;
