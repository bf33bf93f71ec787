//! RequestCoaching command handler.
//!
//! Builds the coaching prompt from the relationship context and a draft,
//! sends it to the AI provider, and normalizes whatever text comes back.
//! Malformed model output is never an error; only configuration, validation
//! and transport problems are.

use std::sync::Arc;
use thiserror::Error;

use crate::application::preference_store::PreferenceStore;
use crate::config;
use crate::domain::coaching::{
    normalize_response, CoachingPrompt, CoachingResult, ConversationDraft, COACHING_TEMPERATURE,
};
use crate::domain::foundation::ValidationError;
use crate::domain::memory::PreferenceSnapshot;
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole, RequestMetadata};

/// Command to request coaching on one draft.
#[derive(Debug, Clone)]
pub struct RequestCoachingCommand {
    /// Relationship context at the time of the request.
    pub snapshot: PreferenceSnapshot,
    /// The message pair to coach.
    pub draft: ConversationDraft,
    /// Whether the draft's focus and tone selections apply.
    pub advanced: bool,
}

impl RequestCoachingCommand {
    /// Creates a command from an explicit snapshot.
    pub fn new(snapshot: PreferenceSnapshot, draft: ConversationDraft, advanced: bool) -> Self {
        Self {
            snapshot,
            draft,
            advanced,
        }
    }

    /// Creates a command from the store's current snapshot.
    ///
    /// Refuses while the store is still loading, since the snapshot would
    /// not yet reflect what the user saved.
    pub fn from_store(
        store: &PreferenceStore,
        draft: ConversationDraft,
        advanced: bool,
    ) -> Result<Self, ValidationError> {
        if !store.is_hydrated() {
            return Err(ValidationError::not_ready("memory"));
        }
        Ok(Self::new(store.get(), draft, advanced))
    }
}

/// Errors that can occur when requesting coaching.
#[derive(Debug, Error)]
pub enum CoachingError {
    /// AI settings are missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ValidationError),

    /// The draft is not ready to send.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The endpoint could not be reached or rejected the request.
    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),
}

impl CoachingError {
    /// Whether sending the same request again might work.
    pub fn is_retryable(&self) -> bool {
        match self {
            CoachingError::Provider(err) => err.is_retryable(),
            _ => false,
        }
    }
}

/// Handler for RequestCoaching commands.
pub struct RequestCoachingHandler {
    ai_provider: Arc<dyn AIProvider>,
}

impl RequestCoachingHandler {
    /// Creates a new handler with the given provider.
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }

    /// Handles a request coaching command.
    ///
    /// The draft is validated before anything is sent.
    pub async fn handle(&self, cmd: RequestCoachingCommand) -> Result<CoachingResult, CoachingError> {
        cmd.draft.validate()?;

        let prompt = CoachingPrompt::build(&cmd.snapshot, &cmd.draft, cmd.advanced);
        let metadata = RequestMetadata::generate();
        let trace_id = metadata.trace_id.clone();

        let request = CompletionRequest::new(metadata)
            .with_system_prompt(prompt.system)
            .with_message(MessageRole::User, prompt.user)
            .with_temperature(COACHING_TEMPERATURE);

        tracing::info!(
            trace_id = %trace_id,
            advanced = cmd.advanced,
            provider = %self.ai_provider.provider_info().name,
            "Requesting coaching"
        );

        let response = self.ai_provider.complete(request).await?;
        let result = normalize_response(&response.content);

        tracing::info!(
            trace_id = %trace_id,
            fallback = result.is_fallback(),
            options = result.reply_options.len(),
            "Coaching received"
        );

        Ok(result)
    }
}
