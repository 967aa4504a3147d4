//! AI enhancement: the service seam and the single in-flight request slot.
//!
//! At most one enhancement runs at a time. The slot moves
//! `Idle -> Pending -> (Succeeded | Failed) -> Idle`; a second request while
//! `Pending` is rejected with [`CoreError::Conflict`].

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::prompt::{ImagePrompt, PromptDocument};

/// A remote service that rewrites a section map into a richer document.
///
/// Implementations return [`CoreError::Transport`] for every failure,
/// including responses that do not parse as a document.
#[async_trait]
pub trait PromptEnhancer: Send + Sync {
    async fn enhance(&self, prompt: &ImagePrompt) -> Result<PromptDocument, CoreError>;
}

// ---------------------------------------------------------------------------
// Slot state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnhanceState {
    #[default]
    Idle,
    Pending,
    Succeeded(Box<PromptDocument>),
    Failed(String),
}

/// Serializable summary of the slot for clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnhanceStatus {
    Idle,
    Pending,
}

#[derive(Debug, Default)]
pub struct EnhanceSlot {
    state: EnhanceState,
}

impl EnhanceSlot {
    pub fn state(&self) -> &EnhanceState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == EnhanceState::Pending
    }

    pub fn status(&self) -> EnhanceStatus {
        if self.is_pending() {
            EnhanceStatus::Pending
        } else {
            EnhanceStatus::Idle
        }
    }

    /// `Idle -> Pending`.
    pub fn begin(&mut self) -> Result<(), CoreError> {
        match self.state {
            EnhanceState::Idle => {
                self.state = EnhanceState::Pending;
                Ok(())
            }
            EnhanceState::Pending => Err(CoreError::Conflict(
                "An enhancement request is already in progress".into(),
            )),
            _ => Err(CoreError::Conflict(
                "Previous enhancement result has not been settled".into(),
            )),
        }
    }

    /// `Pending -> Succeeded | Failed`.
    pub fn complete(&mut self, result: Result<PromptDocument, CoreError>) -> Result<(), CoreError> {
        if !self.is_pending() {
            return Err(CoreError::Conflict(
                "No enhancement request is in progress".into(),
            ));
        }
        self.state = match result {
            Ok(doc) => EnhanceState::Succeeded(Box::new(doc)),
            Err(e) => EnhanceState::Failed(e.to_string()),
        };
        Ok(())
    }

    /// `Succeeded | Failed -> Idle`, yielding the outcome.
    ///
    /// Returns `None` (and leaves the slot alone) in any other state.
    pub fn settle(&mut self) -> Option<Result<PromptDocument, String>> {
        match std::mem::take(&mut self.state) {
            EnhanceState::Succeeded(doc) => Some(Ok(*doc)),
            EnhanceState::Failed(reason) => Some(Err(reason)),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Force the slot back to `Idle` regardless of state.
    pub fn reset(&mut self) {
        self.state = EnhanceState::Idle;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::prompt::default_prompt;

    #[test]
    fn begin_from_idle_goes_pending() {
        let mut slot = EnhanceSlot::default();
        slot.begin().unwrap();
        assert!(slot.is_pending());
        assert_eq!(slot.status(), EnhanceStatus::Pending);
    }

    #[test]
    fn begin_while_pending_is_rejected() {
        let mut slot = EnhanceSlot::default();
        slot.begin().unwrap();
        assert_matches!(slot.begin(), Err(CoreError::Conflict(_)));
        assert!(slot.is_pending());
    }

    #[test]
    fn success_settles_back_to_idle() {
        let mut slot = EnhanceSlot::default();
        slot.begin().unwrap();
        slot.complete(Ok(default_prompt())).unwrap();
        assert_matches!(slot.state(), EnhanceState::Succeeded(_));
        assert_eq!(slot.settle(), Some(Ok(default_prompt())));
        assert_eq!(slot.state(), &EnhanceState::Idle);
    }

    #[test]
    fn failure_settles_back_to_idle() {
        let mut slot = EnhanceSlot::default();
        slot.begin().unwrap();
        slot.complete(Err(CoreError::Transport("timeout".into())))
            .unwrap();
        let outcome = slot.settle().unwrap();
        assert_matches!(outcome, Err(reason) if reason.contains("timeout"));
        assert_eq!(slot.status(), EnhanceStatus::Idle);
    }

    #[test]
    fn complete_without_begin_is_rejected() {
        let mut slot = EnhanceSlot::default();
        assert_matches!(slot.complete(Ok(default_prompt())), Err(CoreError::Conflict(_)));
        assert_eq!(slot.state(), &EnhanceState::Idle);
    }

    #[test]
    fn settle_while_pending_leaves_slot_pending() {
        let mut slot = EnhanceSlot::default();
        slot.begin().unwrap();
        assert_eq!(slot.settle(), None);
        assert!(slot.is_pending());
    }

    #[test]
    fn reset_releases_pending_slot() {
        let mut slot = EnhanceSlot::default();
        slot.begin().unwrap();
        slot.reset();
        slot.begin().unwrap();
    }
}
