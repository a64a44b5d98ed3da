//! Replay a recorded action log against a fresh draft.

use std::path::Path;
use std::sync::Arc;

use forklift_wizard::{ActionEnvelope, DraftSettings, InitialParams, PlanDraft, WizardSession};
use serde::Deserialize;

/// A recorded wizard session: how it was opened and what was dispatched.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    pub context: InitialParams,
    #[serde(default)]
    pub actions: Vec<ActionEnvelope>,
}

pub struct ReplayOutcome {
    pub session: WizardSession,
    pub draft: Arc<PlanDraft>,
    pub applied: usize,
    /// Envelopes whose type this build does not know.
    pub ignored: usize,
}

pub fn load_script(path: &Path) -> eyre::Result<ReplayScript> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read script at {}: {e}", path.display()))?;
    let script = serde_json::from_str(&contents)
        .map_err(|e| eyre::eyre!("invalid replay script {}: {e}", path.display()))?;
    Ok(script)
}

/// Dispatch every envelope in order. Stops at the first malformed payload.
pub async fn replay(script: ReplayScript, settings: DraftSettings) -> eyre::Result<ReplayOutcome> {
    let session = WizardSession::new(PlanDraft::new(script.context, settings));
    let mut applied = 0;
    let mut ignored = 0;

    for (index, envelope) in script.actions.into_iter().enumerate() {
        let kind = envelope.kind.clone();
        let dispatched = session
            .dispatch_envelope(envelope)
            .await
            .map_err(|e| eyre::eyre!("action #{index} ({kind}): {e}"))?;
        match dispatched {
            Some(_) => applied += 1,
            None => {
                tracing::warn!(index, kind = %kind, "skipping unknown action");
                ignored += 1;
            }
        }
    }

    let draft = session.snapshot().await;
    tracing::info!(
        applied,
        ignored,
        ready = draft.is_ready_to_submit(),
        "replay finished"
    );
    Ok(ReplayOutcome {
        session,
        draft,
        applied,
        ignored,
    })
}
