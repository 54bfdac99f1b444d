use serde::{Deserialize, Serialize};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No credential was supplied, the request was never attempted.
    Unconfigured,
    /// The request could not reach the service at all.
    Transport,
    /// The service answered with a non-success HTTP status.
    Status,
    /// The service answered successfully, but the payload carried no
    /// usable text.
    Empty,
    /// Any other errors.
    Other,
}
