//! Matchup API Library
//!
//! Rules for organizing local sports matches: the group creation wizard,
//! fee policy, team balance settings, facility owner verification, and
//! the HTTP adapters around them.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod notifications;
