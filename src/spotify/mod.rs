//! # Spotify Integration Module
//!
//! This module is the integration layer between sprankcli and the Spotify
//! Web API: authentication, paginated data retrieval, batch audio-feature
//! lookups, and playlist management. It abstracts HTTP requests, OAuth
//! flows, retry handling, and API quirks behind a small Rust interface the
//! pipeline builds on.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, sync pipeline)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE, client credentials)
//!     ├── Generic Paginator (saved tracks, playlists, playlist items)
//!     ├── Track Operations (audio features, library counts)
//!     └── Playlist Operations (lookup, create, fill, truncate)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow (browser launch, local callback server,
//!   token exchange) plus the app-only client-credentials grant. Tokens are
//!   refreshed proactively through the token manager.
//! - [`pager`] - One generic offset paginator driven by the
//!   [`pager::ListOperation`] descriptor. Every paginated listing goes
//!   through it, and every drained listing is verified against the
//!   server-reported total before it is trusted.
//! - [`tracks`] - Batch audio-feature retrieval with order-preserving
//!   concatenation and count-parity verification, and the minimal
//!   saved-track count query.
//! - [`playlist`] - Exact-name playlist lookup, creation of private
//!   playlists, and batched add/remove of playlist items.
//!
//! ## Error Handling
//!
//! All remote operations return [`ApiError`]:
//!
//! - `IncompleteResults` - a drained listing or feature batch does not add
//!   up to the server-reported total. Fatal and never retried; no partial
//!   output is trusted.
//! - `Remote` - an underlying call failed after the bounded retry policy
//!   (429 honors `Retry-After` up to 120 s, 502 retries after 10 s, at most
//!   5 attempts per request).
//! - `RateLimited` - the service asked for a longer delay than the retry
//!   policy is willing to wait.
//!
//! ## API Coverage
//!
//! - `GET /me` - current user profile
//! - `GET /me/tracks` - saved tracks with pagination
//! - `GET /audio-features` - batch audio-feature lookup (100 ids per call)
//! - `GET /users/{user_id}/playlists` - playlist listing for name lookup
//! - `GET /playlists/{playlist_id}/tracks` - current playlist membership
//! - `POST /users/{user_id}/playlists` - create playlist
//! - `POST /playlists/{playlist_id}/tracks` - add items (100 per call)
//! - `DELETE /playlists/{playlist_id}/tracks` - remove all occurrences
//! - `POST /api/token` - token exchange and refresh
//!
//! ## Thread Safety
//!
//! The module is designed for async single-task use: all operations are
//! sequential blocking round-trips from the caller's perspective, and the
//! only shared state is the auth flow's `Arc<Mutex<>>` handoff.

mod error;

pub mod auth;
pub mod pager;
pub mod playlist;
pub mod tracks;
pub mod user;

pub use error::ApiError;
