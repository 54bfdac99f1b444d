use std::collections::HashMap;
use std::fmt::{self, Display};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::prompt::PromptService;

/// Stable identifier of a portfolio project.
///
/// Summaries are keyed by this slug rather than by the project's
/// position in whatever list the UI happens to render, so reordering
/// the page never reassigns a summary.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a project id from a slug.
    #[inline]
    pub fn new<S: Into<String>>(slug: S) -> Self {
        Self(slug.into())
    }

    /// Returns the slug.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProjectId {
    #[inline]
    fn from(slug: &str) -> Self {
        Self::new(slug)
    }
}

impl Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The summary state of one project.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SummaryState {
    /// No summary was requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The summary text arrived. Terminal for the session; the text is
    /// displayed as-is whether it was real output or a rendered error.
    Done(String),
}

/// The per-project summary state machines.
///
/// Each project id owns an independent `Idle → Loading → Done` machine
/// that materializes lazily on the first request. The state entry is
/// the single-flight guard: `Loading` is written under the lock before
/// the network call starts, so a rapid second trigger for the same id
/// never issues a duplicate request. Distinct ids don't affect each
/// other.
#[derive(Clone)]
pub struct SummaryBoard {
    prompts: PromptService,
    state: Arc<Mutex<HashMap<ProjectId, SummaryState>>>,
}

impl SummaryBoard {
    /// Creates a board backed by the given prompt service.
    pub fn new(prompts: PromptService) -> Self {
        Self {
            prompts,
            state: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the current state for a project.
    pub fn state(&self, id: &ProjectId) -> SummaryState {
        self.entries().get(id).cloned().unwrap_or_default()
    }

    /// Requests the summary for a project and waits for it to land.
    ///
    /// A no-op while a request for the same id is already in flight,
    /// and once a summary is present: `Done` never reverts within a
    /// session.
    pub async fn summarize(
        &self,
        id: &ProjectId,
        title: &str,
        description: &str,
    ) {
        {
            let mut entries = self.entries();
            match entries.get(id) {
                Some(SummaryState::Loading) | Some(SummaryState::Done(_)) => {
                    debug!("summary for {id} already requested");
                    return;
                }
                Some(SummaryState::Idle) | None => {}
            }
            entries.insert(id.clone(), SummaryState::Loading);
        }

        let text = match self.prompts.summarize_project(title, description).await
        {
            Ok(text) => text,
            Err(err) => err.to_string(),
        };

        self.entries().insert(id.clone(), SummaryState::Done(text));
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<ProjectId, SummaryState>> {
        self.state.lock().expect("summary state lock poisoned")
    }
}
