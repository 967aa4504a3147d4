//! The live prompt being edited.
//!
//! A [`PromptSession`] owns the current document and a version counter that
//! increments on every replacement. All edits go through the pure functions
//! in [`crate::patch`]; the session only swaps in their results.

use crate::codec;
use crate::enhance::{EnhanceSlot, EnhanceStatus};
use crate::error::CoreError;
use crate::patch::{apply_field_edit, apply_negative_terms, FieldEdit};
use crate::prompt::{default_prompt, ImagePrompt, PromptDocument};
use crate::randomizer::random_prompt;

#[derive(Debug, Default)]
pub struct PromptSession {
    document: PromptDocument,
    version: u64,
    enhance: EnhanceSlot,
}

impl PromptSession {
    pub fn new(document: PromptDocument) -> Self {
        Self {
            document,
            version: 0,
            enhance: EnhanceSlot::default(),
        }
    }

    pub fn document(&self) -> &PromptDocument {
        &self.document
    }

    /// Number of replacements since the session started.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replace the whole document.
    pub fn replace(&mut self, document: PromptDocument) -> &PromptDocument {
        self.document = document;
        self.version += 1;
        tracing::debug!(version = self.version, "Prompt replaced");
        &self.document
    }

    pub fn apply_edit(&mut self, edit: FieldEdit) -> &PromptDocument {
        tracing::debug!(section = %edit.section(), field = edit.field(), "Applying field edit");
        let next = apply_field_edit(&self.document, edit);
        self.replace(next)
    }

    pub fn set_negative_terms(&mut self, terms: Vec<String>) -> &PromptDocument {
        let next = apply_negative_terms(&self.document, terms);
        self.replace(next)
    }

    pub fn reset(&mut self) -> &PromptDocument {
        self.replace(default_prompt())
    }

    pub fn randomize(&mut self) -> &PromptDocument {
        self.replace(random_prompt())
    }

    /// Load a shared document from a URL fragment.
    ///
    /// Returns `true` when the document was replaced. A malformed fragment
    /// is logged and leaves the current document untouched.
    pub fn load_share_fragment(&mut self, fragment: &str) -> bool {
        match codec::from_share_token(fragment) {
            Ok(doc) => {
                self.replace(doc);
                tracing::info!(version = self.version, "Loaded prompt from share link");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring invalid share link");
                false
            }
        }
    }

    // -- enhancement --

    pub fn enhance_status(&self) -> EnhanceStatus {
        self.enhance.status()
    }

    /// Claim the enhancement slot and snapshot the section map to send.
    pub fn begin_enhancement(&mut self) -> Result<ImagePrompt, CoreError> {
        self.enhance.begin()?;
        tracing::info!(version = self.version, "Enhancement started");
        Ok(self.document.image_prompt.clone())
    }

    /// Release the enhancement slot with the service's result.
    ///
    /// On success the returned document replaces whatever is current (edits
    /// made while the request was pending are overwritten). On failure the
    /// document is unchanged and the reason is returned as
    /// [`CoreError::Transport`]. The slot is idle afterwards in every case.
    pub fn finish_enhancement(
        &mut self,
        result: Result<PromptDocument, CoreError>,
    ) -> Result<&PromptDocument, CoreError> {
        if let Err(e) = self.enhance.complete(result) {
            self.enhance.reset();
            return Err(e);
        }
        match self.enhance.settle() {
            Some(Ok(doc)) => {
                self.replace(doc);
                tracing::info!(version = self.version, "Enhancement applied");
                Ok(&self.document)
            }
            Some(Err(reason)) => {
                tracing::warn!(reason = %reason, "Enhancement failed");
                Err(CoreError::Transport(reason))
            }
            None => {
                self.enhance.reset();
                Err(CoreError::Internal("Enhancement slot in unexpected state".into()))
            }
        }
    }

    /// Force-release the slot when the request never produced a result.
    pub fn abandon_enhancement(&mut self) {
        tracing::warn!("Enhancement abandoned");
        self.enhance.reset();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
