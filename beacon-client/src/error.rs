use thiserror::Error;

/// Failures raised before any network activity takes place.
///
/// Remote rejections and transport faults are deliberately absent here: both
/// are reported through the return value of a send so that a failed
/// notification never unwinds through the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// No access token has been supplied, neither at construction nor through
    /// `set_token`.
    #[error("access token is not set")]
    TokenNotSet,

    /// No collision-free multipart boundary was found within the attempt
    /// budget. The offending payload is not sent.
    #[error("no collision-free boundary found after {attempts} attempts")]
    BoundaryExhausted { attempts: usize },

    /// The request could not be assembled, e.g. the configured base URL plus
    /// token does not form a valid URI.
    #[error("failed to build request: {0}")]
    Request(#[from] isahc::http::Error),

    /// The underlying HTTP client could not be initialized.
    #[error("failed to initialize http client: {0}")]
    Client(#[from] isahc::Error),
}
