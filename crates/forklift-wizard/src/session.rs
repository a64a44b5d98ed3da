use std::sync::Arc;

use tokio::sync::{Mutex, watch};

use crate::action::{Action, ActionEnvelope};
use crate::draft::PlanDraft;
use crate::error::WizardError;
use crate::reducer::reduce;

/// One wizard session: the single writer of a draft.
///
/// Dispatches are serialized through the mutex and each one is applied to
/// completion before the next. Readers get immutable `Arc` snapshots and
/// never see a half-applied action.
pub struct WizardSession {
    draft: Arc<Mutex<Arc<PlanDraft>>>,
    updates: watch::Sender<Arc<PlanDraft>>,
}

impl WizardSession {
    pub fn new(draft: PlanDraft) -> Self {
        let draft = Arc::new(draft);
        let (updates, _) = watch::channel(draft.clone());
        Self {
            draft: Arc::new(Mutex::new(draft)),
            updates,
        }
    }

    /// Apply `action` and publish the resulting draft.
    pub async fn dispatch(&self, action: Action) -> Arc<PlanDraft> {
        let mut current = self.draft.lock().await;
        let kind = action.kind();
        let next = Arc::new(reduce(PlanDraft::clone(&current), action));

        if *next != **current {
            tracing::trace!(action = %kind, "draft changed");
            self.updates.send_replace(next.clone());
        }
        *current = next.clone();
        next
    }

    /// Decode and apply a wire envelope. Unknown action types leave the draft
    /// untouched and yield `None`.
    pub async fn dispatch_envelope(
        &self,
        envelope: ActionEnvelope,
    ) -> Result<Option<Arc<PlanDraft>>, WizardError> {
        match envelope.decode()? {
            Some(action) => Ok(Some(self.dispatch(action).await)),
            None => Ok(None),
        }
    }

    pub async fn snapshot(&self) -> Arc<PlanDraft> {
        self.draft.lock().await.clone()
    }

    /// Receiver notified after every dispatch that changed the draft.
    pub fn subscribe(&self) -> watch::Receiver<Arc<PlanDraft>> {
        self.updates.subscribe()
    }
}
