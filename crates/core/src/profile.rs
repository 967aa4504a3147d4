//! Derived metrics for the prompt analysis panel.
//!
//! Provides the five-axis radar profile and the token-usage estimate. Both
//! are display-only projections of a [`PromptDocument`] and are never stored.

use serde::Serialize;

use crate::prompt::{DetailLevel, PromptDocument, Resolution};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Token budget the usage gauge is drawn against.
pub const TOKEN_BUDGET: usize = 500;

/// Usage percentage above which the gauge is flagged.
pub const NEAR_LIMIT_PERCENT: f64 = 90.0;

/// Rough bytes-per-token ratio used by [`estimate_tokens`].
const BYTES_PER_TOKEN: usize = 4;

const SCORE_MIN: f64 = 0.0;
const SCORE_MAX: f64 = 100.0;

// ---------------------------------------------------------------------------
// Radar profile
// ---------------------------------------------------------------------------

/// Five 0–100 scores summarising a document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptProfile {
    pub realism: f64,
    pub atmosphere: f64,
    pub complexity: f64,
    pub tech_specs: f64,
    pub stylization: f64,
}

/// One labelled radar axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileAxis {
    pub label: &'static str,
    pub value: f64,
    pub full_mark: f64,
}

impl PromptProfile {
    /// The scores as labelled axes, in radar order.
    pub fn axes(&self) -> [ProfileAxis; 5] {
        let axis = |label, value| ProfileAxis {
            label,
            value,
            full_mark: SCORE_MAX,
        };
        [
            axis("Realism", self.realism),
            axis("Atmosphere", self.atmosphere),
            axis("Complexity", self.complexity),
            axis("Tech Specs", self.tech_specs),
            axis("Stylization", self.stylization),
        ]
    }
}

fn score(value: f64) -> f64 {
    value.clamp(SCORE_MIN, SCORE_MAX)
}

/// Compute the radar profile.
///
/// Inputs outside 0–100 (accepted by the patch engine) are tolerated; every
/// score is clamped to 0–100.
pub fn compute_profile(doc: &PromptDocument) -> PromptProfile {
    let p = &doc.image_prompt;

    let atmosphere = if p.mood.emotional_tone != "neutral" {
        80.0
    } else {
        30.0
    };

    let detail_bonus = if p.environment.detail_level == DetailLevel::Intricate {
        100.0
    } else {
        50.0
    };

    let resolution_bonus = if p.quality.resolution == Resolution::EightK {
        100.0
    } else {
        50.0
    };

    PromptProfile {
        realism: score(p.style.fidelity as f64),
        atmosphere: score(atmosphere),
        complexity: score((detail_bonus + p.lighting.shadow_intensity as f64) / 2.0),
        tech_specs: score((resolution_bonus + p.quality.sharpness as f64) / 2.0),
        stylization: score(100.0 - p.style.texture_realism as f64),
    }
}

// ---------------------------------------------------------------------------
// Token estimate
// ---------------------------------------------------------------------------

/// Approximate token count of the section map.
///
/// This is `ceil(bytes / 4)` of the compact JSON of `image_prompt` (the
/// wrapper key excluded). It is a size proxy, not the output of any real
/// tokenizer.
pub fn estimate_tokens(doc: &PromptDocument) -> usize {
    serde_json::to_vec(&doc.image_prompt)
        .map(|bytes| bytes.len().div_ceil(BYTES_PER_TOKEN))
        .unwrap_or(0)
}

/// Token estimate positioned against [`TOKEN_BUDGET`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TokenDensity {
    pub tokens: usize,
    pub budget: usize,
    /// Share of the budget used, capped at 100.
    pub percent: f64,
    pub near_limit: bool,
}

pub fn token_density(doc: &PromptDocument) -> TokenDensity {
    let tokens = estimate_tokens(doc);
    let percent = (tokens as f64 / TOKEN_BUDGET as f64 * 100.0).min(100.0);
    TokenDensity {
        tokens,
        budget: TOKEN_BUDGET,
        percent,
        near_limit: percent > NEAR_LIMIT_PERCENT,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
