use folio_core::{ChatPanel, ContactForm, PromptService, SummaryBoard};
use folio_model::TextProvider;
use folio_notify::NotificationSink;

use crate::content::{self, Project};

const DEFAULT_GREETING: &str = "👋 Hola. Soy el asistente virtual de \
    Pelayo. ¿Quieres saber más sobre su experiencia en IoT?";

/// A [`Site`] builder.
pub struct SiteBuilder {
    prompts: PromptService,
    greeting: String,
}

impl SiteBuilder {
    /// Creates a builder with the specified text provider.
    pub fn with_text_provider<P: TextProvider + 'static>(provider: P) -> Self {
        Self {
            prompts: PromptService::with_provider(provider),
            greeting: DEFAULT_GREETING.to_owned(),
        }
    }

    /// Creates a builder without a text provider. Every AI surface
    /// will answer with the missing-credential warning instead of
    /// attempting a network call.
    pub fn unconfigured() -> Self {
        Self {
            prompts: PromptService::unconfigured(),
            greeting: DEFAULT_GREETING.to_owned(),
        }
    }

    /// Overrides the assistant's greeting message.
    #[inline]
    pub fn with_greeting<S: Into<String>>(mut self, greeting: S) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Builds the site with the given notification sink for the
    /// contact form.
    pub fn build<S: NotificationSink + 'static>(self, sink: S) -> Site {
        let summaries = SummaryBoard::new(self.prompts.clone());
        let chat =
            ChatPanel::new(self.prompts.clone()).with_greeting(self.greeting);
        let contact = ContactForm::new(self.prompts.clone(), sink);

        Site {
            prompts: self.prompts,
            projects: content::projects(),
            summaries,
            chat,
            contact,
        }
    }
}

/// The wired-up portfolio site: static content plus one controller per
/// AI surface, all sharing the same prompt service.
pub struct Site {
    prompts: PromptService,
    projects: Vec<Project>,
    summaries: SummaryBoard,
    chat: ChatPanel,
    contact: ContactForm,
}

impl Site {
    /// Whether a text provider is attached.
    #[inline]
    pub fn is_configured(&self) -> bool {
        self.prompts.is_configured()
    }

    /// The featured projects, in display order.
    #[inline]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// The per-project summary state machines.
    #[inline]
    pub fn summaries(&self) -> &SummaryBoard {
        &self.summaries
    }

    /// The chat panel.
    #[inline]
    pub fn chat(&self) -> &ChatPanel {
        &self.chat
    }

    /// The contact form.
    #[inline]
    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }
}
