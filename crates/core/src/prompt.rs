use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::pin::Pin;
use std::sync::Arc;

use folio_model::{ErrorKind, ProviderError, TextProvider};
use tracing::Instrument;

use crate::chat::ChatMessage;

/// How many history entries are forwarded as chat context. Fixed
/// policy to bound prompt size and cost, not user-configurable.
const CHAT_CONTEXT_LEN: usize = 4;

/// How many subject suggestions are kept from one reply.
const MAX_SUBJECTS: usize = 3;

const PERSONA: &str =
    "Eres \"PelayoAI\", el asistente virtual del ingeniero Pelayo López Tomé.\n\
     Objetivo: Convencer a reclutadores de que Pelayo es el candidato ideal para puestos de IoT o Full Stack.\n\
     Perfil: Graduado en Ingeniería Informática (UDC), Máster IoT. Experto en ESP32, MQTT, React, Docker, Linux.\n\
     Estilo: Breve, profesional y directo al grano.\n\
     Si te preguntan algo que no sea sobre Pelayo, di amablemente que solo hablas de él.";

const MISSING_KEY_WARNING: &str =
    "⚠️ Error: Falta la API Key. Define la variable de entorno \
     GEMINI_API_KEY para activar las funciones de IA.";

const NO_REPLY_FALLBACK: &str = "La IA no devolvió respuesta.";

type GenerateResult = Result<String, Box<dyn ProviderError>>;
type BoxedGenerateFuture = Pin<Box<dyn Future<Output = GenerateResult> + Send>>;
type HandlerFn = Arc<dyn Fn(String) -> BoxedGenerateFuture + Send + Sync>;

/// A wrapper around a text provider that provides a type-erased
/// interface for the other modules, so controllers don't need to carry
/// the provider type around.
#[derive(Clone)]
pub struct TextClient {
    handler_fn: HandlerFn,
}

impl TextClient {
    /// Creates a client wrapping the given provider.
    #[inline]
    pub fn new<P: TextProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since `TextClient` doesn't
        // have a generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |prompt| {
            let fut = provider.generate(&prompt);
            Box::pin(
                async move {
                    trace!("sending a prompt ({} chars)", prompt.len());
                    match fut.await {
                        Ok(text) => {
                            trace!("finished a request");
                            Ok(text)
                        }
                        Err(err) => {
                            error!("got an error: {err:?}");
                            Err(Box::new(err) as Box<dyn ProviderError>)
                        }
                    }
                }
                .instrument(trace_span!("text client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a prompt and returns the completed text.
    #[inline]
    pub async fn generate(&self, prompt: &str) -> GenerateResult {
        (self.handler_fn)(prompt.to_owned()).await
    }
}

/// The outcome of a failed generation, carrying both the machine-level
/// kind and the human-readable detail.
///
/// The `Display` rendering is the exact text the site shows inline in
/// place of AI output, so a controller can always fall back to
/// `err.to_string()` for display while callers that care can still
/// branch on [`kind`](Self::kind).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptError {
    kind: ErrorKind,
    detail: String,
}

impl PromptError {
    #[inline]
    fn unconfigured() -> Self {
        Self {
            kind: ErrorKind::Unconfigured,
            detail: String::new(),
        }
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the raw failure detail.
    #[inline]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Unconfigured => f.write_str(MISSING_KEY_WARNING),
            ErrorKind::Empty => f.write_str(NO_REPLY_FALLBACK),
            _ => write!(f, "Error técnico: {}", self.detail),
        }
    }
}

impl StdError for PromptError {}

impl From<Box<dyn ProviderError>> for PromptError {
    fn from(err: Box<dyn ProviderError>) -> Self {
        Self {
            kind: err.kind(),
            detail: err.to_string(),
        }
    }
}

/// Builds task-specific prompts and performs the single outbound call
/// each of them needs.
///
/// The credential decision is made once, at construction: a service is
/// either backed by a provider or explicitly unconfigured. An
/// unconfigured service answers every call with an
/// [`ErrorKind::Unconfigured`] error before any request is even built.
///
/// No retries, no caching: repeated identical calls always re-hit the
/// provider.
#[derive(Clone)]
pub struct PromptService {
    client: Option<TextClient>,
}

impl PromptService {
    /// Creates a service backed by the given provider.
    #[inline]
    pub fn with_provider<P: TextProvider + 'static>(provider: P) -> Self {
        Self {
            client: Some(TextClient::new(provider)),
        }
    }

    /// Creates a service without a provider.
    #[inline]
    pub fn unconfigured() -> Self {
        Self { client: None }
    }

    /// Whether a provider is attached.
    #[inline]
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Completes a raw prompt. This is the sole network-calling
    /// primitive; all higher-level operations route through it.
    pub async fn generate(&self, prompt: &str) -> Result<String, PromptError> {
        let Some(client) = &self.client else {
            debug!("prompt discarded: no provider configured");
            return Err(PromptError::unconfigured());
        };
        client.generate(prompt).await.map_err(PromptError::from)
    }

    /// Produces a one-sentence recruiter-facing summary of a project.
    pub async fn summarize_project(
        &self,
        title: &str,
        description: &str,
    ) -> Result<String, PromptError> {
        self.generate(&summarize_prompt(title, description)).await
    }

    /// Produces the assistant's reply to a chat message, with at most
    /// the last [`CHAT_CONTEXT_LEN`] history entries as context.
    pub async fn chat_reply(
        &self,
        user_message: &str,
        history: &[ChatMessage],
    ) -> Result<String, PromptError> {
        self.generate(&chat_prompt(user_message, history)).await
    }

    /// Suggests up to three short email subject lines for a contact
    /// message.
    pub async fn suggest_subjects(
        &self,
        message_body: &str,
    ) -> Result<Vec<String>, PromptError> {
        let raw = self.generate(&subjects_prompt(message_body)).await?;
        Ok(split_subjects(&raw))
    }
}

fn summarize_prompt(title: &str, description: &str) -> String {
    format!(
        "Actúa como un CTO evaluando candidatos. Resume este proyecto \
         técnico en 1 frase potente (máx 25 palabras) destacando el stack \
         tecnológico: Título: {title}. Descripción: {description}"
    )
}

fn chat_prompt(user_message: &str, history: &[ChatMessage]) -> String {
    let tail = &history[history.len().saturating_sub(CHAT_CONTEXT_LEN)..];
    let rendered = tail
        .iter()
        .map(|msg| format!("{}: {}", msg.sender, msg.text))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{PERSONA}\n\nHistorial:\n{rendered}\n\n\
         Usuario: {user_message}\nPelayoAI:"
    )
}

fn subjects_prompt(message_body: &str) -> String {
    format!(
        "Lee este mensaje de contacto y dame 3 asuntos de email \
         profesionales y cortos (separados por coma): \"{message_body}\""
    )
}

fn split_subjects(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .take(MAX_SUBJECTS)
        .map(str::to_owned)
        .collect()
}
