//! # API Module
//!
//! HTTP endpoints for the local server. Two concerns live here:
//!
//! - **OAuth Authentication**: [`callback`] completes the Spotify OAuth 2.0
//!   PKCE flow by exchanging the authorization code for an access token.
//! - **On-demand Sync**: [`sync`] runs the full reconciliation pipeline for
//!   an externally supplied user id, so playlists can be synthesized on
//!   request instead of from the batch command.
//! - **Health Monitoring**: [`health`] reports application status and
//!   version for monitoring.
//!
//! The endpoints are plain [axum](https://docs.rs/axum) async handlers;
//! `server::start_api_server` wires them into a router. The sync endpoint
//! runs the same sequential pipeline as `sprankcli sync` - the core takes
//! the user identifier as a plain input parameter either way.

mod callback;
mod health;
mod sync;

pub use callback::callback;
pub use health::health;
pub use sync::sync;
