//! Async client for the user API: authenticate, fetch a user, update a user.
//!
//! # Overview
//! `ApiClient` turns each operation into one HTTP request against a
//! configured base URL, sends it through a caller-supplied session and
//! decodes the JSON body into an [`Envelope`]. Whether the envelope's
//! `status` is `"OK"` is checked separately with [`is_status_ok`].
//!
//! # Design
//! - `ApiClient` is stateless: it holds the base URL and the session handle.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_envelope` (consumes response), so the I/O boundary is explicit
//!   and the request shapes can be tested without a server.
//! - The network side is the [`Transport`] trait, implemented for
//!   `reqwest::Client`.
//! - No retries or timeouts are added here; configure them on the session.

pub mod client;
pub mod error;
pub mod http;
pub mod status;
pub mod transport;
pub mod types;

pub use client::{ApiClient, DEFAULT_HOST, DEFAULT_PORT};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use status::{is_status_ok, STATUS_OK};
pub use transport::Transport;
pub use types::{Envelope, Permission, UserUpdate};
