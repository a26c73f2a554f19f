//! # CLI Module
//!
//! The command-line interface layer for sprankcli. Each command delegates
//! to the spotify integration, the management layer, and the sync pipeline
//! while handling user feedback and error presentation.
//!
//! ## Commands
//!
//! - [`auth`] - Spotify OAuth authentication (PKCE by default, optional
//!   client-credentials grant)
//! - [`sync`] - the full collect → merge → rank → reconcile run against
//!   the configured playlist specs
//! - [`rank`] - ranked preview of the library by one metric, no playlist
//!   is touched
//! - [`export`] - write the merged record set as tab-delimited text
//! - [`info`] - saved-track counts and configured playlist specs
//!
//! ## Error Handling
//!
//! Commands print progress with the crate's colored output macros and
//! terminate through `error!` on unrecoverable failures, so a batch
//! invocation exits non-zero with the operation name and counts in the
//! message. Nothing is swallowed; partial pipeline output is never
//! reported as success.

mod auth;
mod export;
mod info;
mod rank;
mod sync;

pub use auth::auth;
pub use auth::auth_client_credentials;
pub use export::export;
pub use info::info;
pub use rank::rank;
pub use sync::sync;
