use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use folio_notify::{Notification, NotificationSink};
use tokio::time::Instant;

use crate::prompt::PromptService;

/// Subject suggestion unlocks once the message is longer than this
/// many characters.
const SUGGEST_THRESHOLD: usize = 15;

/// How long the "sent" indicator stays on after a successful
/// submission.
const SENT_WINDOW: Duration = Duration::from_secs(5);

/// Error returned when a contact submission could not be delivered.
///
/// This is the one failure in the system that is propagated instead of
/// rendered inline: the embedding UI is expected to raise a blocking
/// alert from it while the visitor's typed input stays intact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitError {
    detail: String,
}

impl SubmitError {
    /// Returns the underlying delivery failure detail.
    #[inline]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Error al enviar. Por favor contáctame por LinkedIn.")
    }
}

impl StdError for SubmitError {}

type PushResult = Result<(), SubmitError>;
type BoxedPushFuture = Pin<Box<dyn Future<Output = PushResult> + Send>>;
type SinkFn = Arc<dyn Fn(Notification) -> BoxedPushFuture + Send + Sync>;

/// Type-erased wrapper over a notification sink, same idea as
/// [`TextClient`](crate::TextClient).
#[derive(Clone)]
struct SinkClient {
    sink_fn: SinkFn,
}

impl SinkClient {
    fn new<S: NotificationSink + 'static>(sink: S) -> Self {
        let sink_fn: SinkFn = Arc::new(move |note| {
            let fut = sink.push(&note);
            Box::pin(async move {
                fut.await.map_err(|err| {
                    error!("submission failed: {err}");
                    SubmitError {
                        detail: err.to_string(),
                    }
                })
            })
        });
        Self { sink_fn }
    }

    async fn push(&self, note: Notification) -> PushResult {
        (self.sink_fn)(note).await
    }
}

/// A snapshot of the contact form, as the UI should render it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactDraft {
    /// The visitor's name field.
    pub name: String,
    /// The visitor's email field.
    pub email: String,
    /// The message body.
    pub message: String,
    /// Subject suggestions currently offered (0 to 3).
    pub suggestions: Vec<String>,
    /// Whether a submission is in flight.
    pub sending: bool,
    /// Whether the sent indicator is currently showing.
    pub sent: bool,
}

#[derive(Default)]
struct ContactState {
    name: String,
    email: String,
    message: String,
    suggestions: Vec<String>,
    suggesting: bool,
    sending: bool,
    sent_at: Option<Instant>,
}

impl ContactState {
    fn sent_active(&self) -> bool {
        self.sent_at
            .map(|at| at.elapsed() < SENT_WINDOW)
            .unwrap_or(false)
    }

    fn can_suggest(&self) -> bool {
        self.message.chars().count() > SUGGEST_THRESHOLD
            && self.suggestions.is_empty()
    }
}

/// The contact-form state machine.
///
/// Two sub-flows share the draft: subject suggestion (AI) and the
/// actual submission (notification sink). Both are single-flight, each
/// guarded by its own flag written under the state lock before the
/// outbound call starts. A successful submission wipes the draft and
/// shows a sent indicator for five seconds, measured on the tokio
/// clock; a failed one keeps every field so nothing the visitor typed
/// is lost.
#[derive(Clone)]
pub struct ContactForm {
    prompts: PromptService,
    sink: SinkClient,
    state: Arc<Mutex<ContactState>>,
}

impl ContactForm {
    /// Creates a contact form backed by the given prompt service and
    /// notification sink.
    pub fn new<S: NotificationSink + 'static>(
        prompts: PromptService,
        sink: S,
    ) -> Self {
        Self {
            prompts,
            sink: SinkClient::new(sink),
            state: Arc::new(Mutex::new(ContactState::default())),
        }
    }

    /// Replaces the name field.
    pub fn set_name<S: Into<String>>(&self, name: S) {
        self.state().name = name.into();
    }

    /// Replaces the email field.
    pub fn set_email<S: Into<String>>(&self, email: S) {
        self.state().email = email.into();
    }

    /// Replaces the message body.
    pub fn set_message<S: Into<String>>(&self, message: S) {
        self.state().message = message.into();
    }

    /// Returns the draft as the UI should render it right now.
    pub fn draft(&self) -> ContactDraft {
        let state = self.state();
        ContactDraft {
            name: state.name.clone(),
            email: state.email.clone(),
            message: state.message.clone(),
            suggestions: state.suggestions.clone(),
            sending: state.sending,
            sent: state.sent_active(),
        }
    }

    /// Whether the suggestion trigger should be offered: the message
    /// is long enough and no suggestions are populated yet.
    pub fn can_suggest(&self) -> bool {
        self.state().can_suggest()
    }

    /// Whether a suggestion request is in flight.
    pub fn is_suggesting(&self) -> bool {
        self.state().suggesting
    }

    /// Whether the sent indicator is currently showing. Reverts on its
    /// own once the window elapses.
    pub fn just_sent(&self) -> bool {
        self.state().sent_active()
    }

    /// Asks for subject suggestions for the current message.
    ///
    /// A no-op unless [`can_suggest`](Self::can_suggest) holds and no
    /// suggestion request is already running. A failed request still
    /// populates the list: the rendered error text becomes the single
    /// suggestion, so the UI renders it through the same chips.
    pub async fn suggest_subject(&self) {
        let body = {
            let mut state = self.state();
            if state.suggesting || !state.can_suggest() {
                return;
            }
            state.suggesting = true;
            state.message.clone()
        };

        let result = self.prompts.suggest_subjects(&body).await;

        let mut state = self.state();
        state.suggesting = false;
        state.suggestions = match result {
            Ok(subjects) => subjects,
            Err(err) => vec![err.to_string()],
        };
    }

    /// Folds a picked suggestion into the message as an
    /// `Asunto:` header line and clears the suggestion list.
    pub fn pick_subject(&self, subject: &str) {
        let mut state = self.state();
        state.message = format!("Asunto: {subject}\n\n{}", state.message);
        state.suggestions.clear();
    }

    /// Submits the draft to the notification sink.
    ///
    /// A no-op while a submission is in flight or while the sent
    /// indicator is showing. On success the whole draft (including
    /// suggestions) is cleared and the sent window opens; on failure
    /// every field is left as typed and the error is returned for the
    /// caller to alert on. No retry is attempted.
    pub async fn submit(&self) -> Result<(), SubmitError> {
        let note = {
            let mut state = self.state();
            if state.sending || state.sent_active() {
                debug!("submit discarded: already sending or just sent");
                return Ok(());
            }
            state.sending = true;
            Notification::contact_lead(
                &state.name,
                &state.email,
                &state.message,
            )
        };

        let result = self.sink.push(note).await;

        let mut state = self.state();
        state.sending = false;
        match result {
            Ok(()) => {
                state.name.clear();
                state.email.clear();
                state.message.clear();
                state.suggestions.clear();
                state.sent_at = Some(Instant::now());
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn state(&self) -> MutexGuard<'_, ContactState> {
        self.state.lock().expect("contact state lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use folio_model::ErrorKind;
    use folio_test_model::ScriptedProvider;
    use tokio::time::{advance, sleep};

    use super::*;

    #[derive(Debug)]
    struct SinkDown;

    impl fmt::Display for SinkDown {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("sink unreachable")
        }
    }

    impl StdError for SinkDown {}

    #[derive(Clone, Default)]
    struct FakeSink {
        notes: Arc<Mutex<Vec<Notification>>>,
        fail: bool,
        delay: Option<Duration>,
    }

    impl FakeSink {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn pushes(&self) -> Vec<Notification> {
            self.notes.lock().unwrap().clone()
        }
    }

    impl NotificationSink for FakeSink {
        type Error = SinkDown;

        fn push(
            &self,
            note: &Notification,
        ) -> impl Future<Output = Result<(), SinkDown>> + Send + 'static
        {
            self.notes.lock().unwrap().push(note.clone());
            let fail = self.fail;
            let delay = self.delay;
            async move {
                if let Some(delay) = delay {
                    sleep(delay).await;
                }
                if fail { Err(SinkDown) } else { Ok(()) }
            }
        }
    }

    fn form_with(provider: ScriptedProvider, sink: FakeSink) -> ContactForm {
        ContactForm::new(PromptService::with_provider(provider), sink)
    }

    fn filled_form(sink: FakeSink) -> ContactForm {
        let form = form_with(ScriptedProvider::default(), sink);
        form.set_name("Ana");
        form.set_email("ana@example.com");
        form.set_message("Hola, tengo un proyecto IoT entre manos.");
        form
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_submit_resets_and_shows_sent() {
        let sink = FakeSink::default();
        let form = filled_form(sink.clone());

        form.submit().await.unwrap();

        let pushes = sink.pushes();
        assert_eq!(pushes.len(), 1);
        assert_eq!(
            pushes[0].body,
            "De: Ana (ana@example.com)\n\nHola, tengo un proyecto IoT entre manos."
        );

        let draft = form.draft();
        assert_eq!(draft.name, "");
        assert_eq!(draft.email, "");
        assert_eq!(draft.message, "");
        assert!(draft.suggestions.is_empty());
        assert!(!draft.sending);
        assert!(draft.sent);
        assert!(form.just_sent());

        advance(Duration::from_secs(5)).await;
        assert!(!form.just_sent());
        assert!(!form.draft().sent);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_during_sent_window_is_a_noop() {
        let sink = FakeSink::default();
        let form = filled_form(sink.clone());

        form.submit().await.unwrap();
        form.submit().await.unwrap();
        assert_eq!(sink.pushes().len(), 1);

        advance(Duration::from_secs(6)).await;
        form.set_name("Ana");
        form.submit().await.unwrap();
        assert_eq!(sink.pushes().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_while_sending_is_a_noop() {
        let sink = FakeSink {
            delay: Some(Duration::from_millis(50)),
            ..FakeSink::default()
        };
        let form = filled_form(sink.clone());

        let racing = form.clone();
        let (first, second) = tokio::join!(form.submit(), async {
            tokio::task::yield_now().await;
            racing.submit().await
        });
        first.unwrap();
        second.unwrap();

        assert_eq!(sink.pushes().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_the_draft() {
        let form = filled_form(FakeSink::failing());

        let err = form.submit().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error al enviar. Por favor contáctame por LinkedIn."
        );
        assert_eq!(err.detail(), "sink unreachable");

        let draft = form.draft();
        assert_eq!(draft.name, "Ana");
        assert_eq!(draft.email, "ana@example.com");
        assert_eq!(draft.message, "Hola, tengo un proyecto IoT entre manos.");
        assert!(!draft.sending);
        assert!(!draft.sent);
    }

    #[tokio::test]
    async fn test_suggest_threshold_counts_characters() {
        let form = form_with(ScriptedProvider::default(), FakeSink::default());

        form.set_message("123456789012345");
        assert!(!form.can_suggest());

        form.set_message("1234567890123456");
        assert!(form.can_suggest());

        // 16 bytes but only 8 characters.
        form.set_message("ñ".repeat(8));
        assert!(!form.can_suggest());
    }

    #[tokio::test]
    async fn test_suggest_below_threshold_is_a_noop() {
        let provider = ScriptedProvider::default();
        let form = form_with(provider.clone(), FakeSink::default());

        form.set_message("corto");
        form.suggest_subject().await;

        assert_eq!(provider.calls(), 0);
        assert!(form.draft().suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_suggestions_populate_and_block_retrigger() {
        let mut provider = ScriptedProvider::default();
        provider.push_text("Propuesta IoT, Colaboración, Consulta técnica");
        let form = form_with(provider.clone(), FakeSink::default());

        form.set_message("Hola, tengo un proyecto IoT entre manos.");
        form.suggest_subject().await;

        assert_eq!(
            form.draft().suggestions,
            ["Propuesta IoT", "Colaboración", "Consulta técnica"]
        );
        // Populated suggestions hide the trigger.
        assert!(!form.can_suggest());
        form.suggest_subject().await;
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_suggest_is_single_flight() {
        let mut provider = ScriptedProvider::default();
        provider.push_text("a, b, c");
        provider.set_delay(Duration::from_millis(50));
        let form = form_with(provider.clone(), FakeSink::default());
        form.set_message("Hola, tengo un proyecto IoT entre manos.");

        let racing = form.clone();
        tokio::join!(form.suggest_subject(), async {
            tokio::task::yield_now().await;
            racing.suggest_subject().await;
        });

        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_pick_subject_prepends_and_clears() {
        let mut provider = ScriptedProvider::default();
        provider.push_text("Propuesta IoT, Colaboración");
        let form = form_with(provider, FakeSink::default());

        form.set_message("Hola, tengo un proyecto IoT entre manos.");
        form.suggest_subject().await;
        form.pick_subject("Propuesta IoT");

        let draft = form.draft();
        assert_eq!(
            draft.message,
            "Asunto: Propuesta IoT\n\nHola, tengo un proyecto IoT entre manos."
        );
        assert!(draft.suggestions.is_empty());
        // The list is gone, so the trigger is offered again.
        assert!(form.can_suggest());
    }

    #[tokio::test]
    async fn error_text_becomes_the_only_suggestion() {
        // Mirrors the site: a failed suggestion request is surfaced as
        // if it were a suggestion, through the same rendering path.
        let mut provider = ScriptedProvider::default();
        provider.push_failure(ErrorKind::Status);
        let form = form_with(provider, FakeSink::default());

        form.set_message("Hola, tengo un proyecto IoT entre manos.");
        form.suggest_subject().await;

        let suggestions = form.draft().suggestions;
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].starts_with("Error técnico:"));
    }
}
