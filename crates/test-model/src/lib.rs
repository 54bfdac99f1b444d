//! A local fake text provider for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use folio_model::{ErrorKind, ProviderError, TextProvider};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    #[allow(dead_code)]
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl StdError for Error {}

impl ProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// A local fake text provider for testing purpose.
///
/// Before sending requests, you need to set up the reply script, which
/// is how the provider should answer each prompt. Replies are consumed
/// in order, one per `generate` call; when the script runs out, an
/// error is returned.
///
/// Every prompt the provider receives is recorded and can be inspected
/// later with [`seen_prompts`](Self::seen_prompts), so tests can assert
/// both what was asked and how many calls were actually issued.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy
/// memory copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    script: Arc<Mutex<VecDeque<PresetReply>>>,
    seen: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl ScriptedProvider {
    /// Appends a reply to the script.
    #[inline]
    pub fn push_reply(&mut self, reply: PresetReply) {
        self.script.lock().expect("script lock poisoned").push_back(reply);
    }

    /// Appends a successful text reply to the script.
    #[inline]
    pub fn push_text<S: Into<String>>(&mut self, text: S) {
        self.push_reply(PresetReply::Text(text.into()));
    }

    /// Appends a failing reply of the given kind to the script.
    #[inline]
    pub fn push_failure(&mut self, kind: ErrorKind) {
        self.push_reply(PresetReply::Failure(kind));
    }

    /// Sets an artificial latency for every reply, so that tests can
    /// overlap calls while one is still in flight.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns every prompt received so far, in call order.
    #[inline]
    pub fn seen_prompts(&self) -> Vec<String> {
        self.seen.lock().expect("seen lock poisoned").clone()
    }

    /// Returns how many `generate` calls have been issued.
    #[inline]
    pub fn calls(&self) -> usize {
        self.seen.lock().expect("seen lock poisoned").len()
    }
}

impl TextProvider for ScriptedProvider {
    type Error = Error;

    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'static
    {
        self.seen
            .lock()
            .expect("seen lock poisoned")
            .push(prompt.to_owned());
        let reply = self
            .script
            .lock()
            .expect("script lock poisoned")
            .pop_front();
        let delay = self.delay;

        async move {
            if let Some(delay) = delay {
                sleep(delay).await;
            }
            match reply {
                Some(PresetReply::Text(text)) => Ok(text),
                Some(PresetReply::Failure(kind)) => Err(Error {
                    message: "scripted failure",
                    kind,
                }),
                None => Err(Error {
                    message: "reply script exhausted",
                    kind: ErrorKind::Other,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_in_order() {
        let mut provider = ScriptedProvider::default();
        provider.push_text("first");
        provider.push_text("second");

        assert_eq!(provider.generate("a").await.unwrap(), "first");
        assert_eq!(provider.generate("b").await.unwrap(), "second");
        assert_eq!(provider.seen_prompts(), ["a", "b"]);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let mut provider = ScriptedProvider::default();
        provider.push_failure(ErrorKind::Status);

        let err = provider.generate("a").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Status);
    }

    #[tokio::test]
    async fn test_exhausted_script() {
        let provider = ScriptedProvider::default();
        let err = provider.generate("a").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
    }
}
