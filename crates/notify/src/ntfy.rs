use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use reqwest::Client;

use crate::{Notification, NotificationSink};

/// Error type for [`NtfySink`].
#[derive(Debug)]
pub struct Error {
    message: String,
}

impl Error {
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

/// Builder for [`NtfyConfig`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NtfyConfigBuilder {
    topic: Option<String>,
    base_url: Option<String>,
}

impl NtfyConfigBuilder {
    /// Creates a builder with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the topic to publish to.
    #[inline]
    pub fn with_topic<S: Into<String>>(mut self, topic: S) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Sets a custom base URL.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> NtfyConfig {
        NtfyConfig {
            topic: self
                .topic
                .unwrap_or_else(|| "pelayo_iot_portfolio_contact".to_string()),
            base_url: self
                .base_url
                .unwrap_or_else(|| "https://ntfy.sh".to_string()),
        }
    }
}

/// Configuration for the ntfy.sh sink.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NtfyConfig {
    pub(crate) topic: String,
    pub(crate) base_url: String,
}

/// Notification sink publishing to an [ntfy.sh](https://ntfy.sh) topic.
///
/// The topic is public write: anyone who knows its name can post to
/// it, which is exactly how the site uses it. Pick an unguessable
/// topic name if that matters to you.
#[derive(Clone, Debug)]
pub struct NtfySink {
    client: Client,
    config: Arc<NtfyConfig>,
}

impl NtfySink {
    /// Creates a new `NtfySink` with the given configuration.
    #[inline]
    pub fn new(config: NtfyConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl NotificationSink for NtfySink {
    type Error = Error;

    fn push(
        &self,
        note: &Notification,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'static
    {
        let resp_fut = self
            .client
            .post(format!("{}/{}", self.config.base_url, self.config.topic))
            .header("Title", &note.title)
            .header("Tags", &note.tags)
            .body(note.body.clone())
            .send();

        async move {
            let resp = match resp_fut.await {
                Ok(resp) => resp,
                Err(err) => {
                    error!("delivery failed: {err}");
                    return Err(Error {
                        message: format!("{err}"),
                    });
                }
            };
            let status = resp.status();
            if !status.is_success() {
                return Err(Error {
                    message: format!("HTTP {}", status.as_u16()),
                });
            }
            trace!("notification delivered");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NtfyConfigBuilder::new().build();
        assert_eq!(config.topic, "pelayo_iot_portfolio_contact");
        assert_eq!(config.base_url, "https://ntfy.sh");
    }
}
