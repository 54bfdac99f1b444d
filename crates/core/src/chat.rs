use std::fmt::{self, Display};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::prompt::PromptService;

/// Who authored a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The site visitor.
    User,
    /// The AI assistant.
    Assistant,
}

impl Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => f.write_str("user"),
            Sender::Assistant => f.write_str("assistant"),
        }
    }
}

/// One entry of the chat history. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChatMessage {
    /// Who authored this message.
    pub sender: Sender,
    /// The message text.
    pub text: String,
}

impl ChatMessage {
    /// Creates a visitor message.
    #[inline]
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    /// Creates an assistant message.
    #[inline]
    pub fn assistant<S: Into<String>>(text: S) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }
}

#[derive(Default)]
struct ChatState {
    messages: Vec<ChatMessage>,
    waiting: bool,
}

/// The chat panel state machine.
///
/// History is append-only and session-only; messages land in strict
/// request order. At most one exchange is in flight at any time: the
/// waiting flag is checked and set under the state lock before the
/// user message is appended, so a second submit during an exchange is
/// a no-op and no interleaving between two replies can happen.
#[derive(Clone)]
pub struct ChatPanel {
    prompts: PromptService,
    state: Arc<Mutex<ChatState>>,
}

impl ChatPanel {
    /// Creates a chat panel backed by the given prompt service.
    pub fn new(prompts: PromptService) -> Self {
        Self {
            prompts,
            state: Arc::new(Mutex::new(ChatState::default())),
        }
    }

    /// Seeds the history with an assistant greeting.
    ///
    /// The greeting is regular history: it shows in the transcript and
    /// counts towards the reply context like any other message.
    pub fn with_greeting<S: Into<String>>(self, text: S) -> Self {
        self.state().messages.push(ChatMessage::assistant(text));
        self
    }

    /// Returns the full transcript so far.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.state().messages.clone()
    }

    /// Whether an exchange is currently in flight.
    pub fn is_waiting(&self) -> bool {
        self.state().waiting
    }

    /// Submits a visitor message and waits for the assistant's reply.
    ///
    /// Empty or whitespace-only input is discarded, as is any submit
    /// made while a previous exchange is still waiting. Otherwise the
    /// user message is appended immediately, and exactly one assistant
    /// message follows once the reply (or its error rendering) is in.
    pub async fn submit(&self, input: &str) {
        let input = input.trim();
        if input.is_empty() {
            return;
        }

        let history = {
            let mut state = self.state();
            if state.waiting {
                debug!("submit discarded: an exchange is in flight");
                return;
            }
            // The reply context is the history as it was before this
            // submit; the new message reaches the model only as the
            // explicit user turn of the prompt.
            let history = state.messages.clone();
            state.messages.push(ChatMessage::user(input));
            state.waiting = true;
            history
        };

        let reply = self.prompts.chat_reply(input, &history).await;
        let text = match reply {
            Ok(text) => text,
            Err(err) => err.to_string(),
        };

        let mut state = self.state();
        state.messages.push(ChatMessage::assistant(text));
        state.waiting = false;
    }

    fn state(&self) -> MutexGuard<'_, ChatState> {
        self.state.lock().expect("chat state lock poisoned")
    }
}
