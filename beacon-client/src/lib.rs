//! Client library for the beacon notification service.
//!
//! Beacon delivers short best-effort notifications (a line of text, a metrics
//! summary, a rendered figure) to a single recipient identified by an opaque
//! access token. The token is issued out of band and embedded in the request
//! URL, so the only thing a caller needs is the token itself:
//!
//! ```no_run
//! use beacon_client::{BeaconClient, ClientConfig};
//!
//! let client = BeaconClient::new(ClientConfig {
//!     token: Some("abc123".into()),
//!     ..ClientConfig::default()
//! })?;
//! client.send_text("training finished, loss 0.042")?;
//! # Ok::<(), beacon_client::Error>(())
//! ```
//!
//! Delivery is fire and forget: one synchronous POST per call, no retries, no
//! queuing. A rejected or undeliverable notification is reported through the
//! return value and the log, never as a panic, so a long-running host process
//! is not taken down by a failed side notification.

pub mod client;
pub mod encoder;
pub mod error;
pub mod types;

pub use client::{BeaconClient, ClientConfig};
pub use encoder::{FormBuilder, FormData};
pub use error::Error;
pub use types::Part;

pub use isahc::http::StatusCode;

/// Default production endpoint. The access token is appended verbatim.
pub const BASE_URL: &str = "https://beacon.fyi/api/notify/";

/// Fixed loopback endpoint used when debug mode is on, for integration
/// testing against a locally running server.
pub const DEBUG_URL: &str = "http://localhost:8080/api/notify/";

/// User agent reported with every request.
pub const USER_AGENT: &str = concat!("beacon/", env!("CARGO_PKG_VERSION"));
