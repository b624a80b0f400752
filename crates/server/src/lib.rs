//! Host channel for the Sonarr provider: the plugin calls as JSON over HTTP.

pub mod api;
pub mod state;
