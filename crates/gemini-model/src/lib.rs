//! A text provider for the Google Generative Language API.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use folio_model::{ErrorKind, ProviderError, TextProvider};
use mime::Mime;
use reqwest::{Client, StatusCode, header};

pub use config::{GeminiConfig, GeminiConfigBuilder};
use proto::GenerateContentResponse;

/// Error type for [`GeminiProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Model provider backed by the `generateContent` REST endpoint.
///
/// The provider performs a single non-streaming request per call and
/// resolves to the first candidate's first text part. Anything else the
/// service answers with is reported as an [`ErrorKind::Empty`] error,
/// so callers always see either real text or a classified failure.
#[derive(Clone, Debug)]
pub struct GeminiProvider {
    client: Client,
    config: Arc<GeminiConfig>,
}

impl GeminiProvider {
    /// Creates a new `GeminiProvider` with the given configuration.
    #[inline]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl TextProvider for GeminiProvider {
    type Error = Error;

    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'static
    {
        let body = proto::create_request(prompt);
        let resp_fut = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.config.base_url, self.config.model
            ))
            .header("x-goog-api-key", &self.config.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send();

        async move {
            let resp = match resp_fut.await {
                Ok(resp) => resp,
                Err(err) => {
                    return Err(Error::new(
                        format!("{err}"),
                        ErrorKind::Transport,
                    ));
                }
            };

            let status = resp.status();
            if !status.is_success() {
                return Err(status_error(status));
            }

            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok());
            let is_json = content_type
                .and_then(|v| v.parse().ok())
                .map(|m: Mime| m.subtype() == mime::JSON)
                .unwrap_or(false);
            if !is_json {
                return Err(Error::new(
                    format!("unexpected content type: {content_type:?}"),
                    ErrorKind::Empty,
                ));
            }

            // Here we got a successful response.
            let payload: GenerateContentResponse = match resp.json().await {
                Ok(payload) => payload,
                Err(err) => {
                    debug!("undecodable payload: {err}");
                    return Err(Error::new(
                        format!("undecodable payload: {err}"),
                        ErrorKind::Empty,
                    ));
                }
            };
            trace!("got a payload: {payload:?}");

            proto::extract_text(payload).ok_or_else(|| {
                Error::new("the payload carried no text", ErrorKind::Empty)
            })
        }
    }
}

fn status_error(status: StatusCode) -> Error {
    Error::new(format!("HTTP {}", status.as_u16()), ErrorKind::Status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error() {
        let err = status_error(StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.kind(), ErrorKind::Status);
        assert_eq!(err.message(), "HTTP 429");
    }
}
