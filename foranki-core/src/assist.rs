use crate::{
    CardDraft, GenerationService, Generation, Modified, ModifyRequest, GENERATE_FAILED,
    MODIFY_FAILED,
};
use tracing::{error, info};

/// Result of an AI action as the UI sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssistOutcome<T> {
    /// Blank input; nothing was sent.
    Skipped,
    Done(T),
    /// User-facing failure message.
    Failed(String),
}

impl<T> AssistOutcome<T> {
    pub fn done(self) -> Option<T> {
        match self {
            AssistOutcome::Done(v) => Some(v),
            _ => None,
        }
    }
}

pub async fn generate<S>(svc: &S, prompt: &str) -> AssistOutcome<Generation>
where
    S: GenerationService + ?Sized,
{
    if prompt.trim().is_empty() {
        return AssistOutcome::Skipped;
    }
    match svc.generate(prompt).await {
        Ok(g) => {
            info!(has_card = g.has_card(), "generation finished");
            AssistOutcome::Done(g)
        }
        Err(e) => {
            error!(error = %e, "generation failed");
            AssistOutcome::Failed(e.user_message(GENERATE_FAILED))
        }
    }
}

pub async fn modify<S>(svc: &S, front: &str, back: &str, instruction: &str) -> AssistOutcome<Modified>
where
    S: GenerationService + ?Sized,
{
    if instruction.trim().is_empty() {
        return AssistOutcome::Skipped;
    }
    let req = ModifyRequest {
        front: front.to_string(),
        back: back.to_string(),
        instruction: instruction.to_string(),
    };
    match svc.modify(&req).await {
        Ok(m) => AssistOutcome::Done(m),
        Err(e) => {
            error!(error = %e, "modification failed");
            AssistOutcome::Failed(e.user_message(MODIFY_FAILED))
        }
    }
}

/// Prefill for the new-card form, only when the model produced both sides.
pub fn draft_from(generation: &Generation, deck_name: &str) -> Option<CardDraft> {
    generation
        .has_card()
        .then(|| CardDraft::new(&generation.front, &generation.back, deck_name))
}
