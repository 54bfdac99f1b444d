use std::error::Error;

use crate::error::ErrorKind;

/// The error type for a text provider.
pub trait ProviderError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that can complete a natural-language prompt, which is the
/// single outbound operation every AI convenience on the site routes
/// through.
///
/// One prompt goes in, one finished text comes out. Providers don't
/// stream partial output, and they don't retry: each `generate` call
/// maps to exactly one attempt against the backing service.
///
/// Once the provider is created, it should behave like a stateless
/// object. It can still have internal state, but callers should not
/// rely on it, and the provider should be prepared for being dropped
/// anytime.
pub trait TextProvider: Send + Sync {
    /// The error type that may be returned by the provider.
    type Error: ProviderError;

    /// Completes the given prompt.
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'static;
}
