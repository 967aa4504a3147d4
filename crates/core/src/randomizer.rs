//! Random document generation.
//!
//! Every field is sampled independently. Integer fields use their own
//! sampling ranges (narrower than the slider ranges). Three fields follow
//! fixed product rules: `quality.artifact_suppression` is always on,
//! `style.artistic_reference` is filled only [`ARTISTIC_REFERENCE_PROBABILITY`]
//! of the time, and the negative terms are the fixed [`RANDOM_NEGATIVE_TERMS`].

use std::ops::RangeInclusive;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::options;
use crate::prompt::{
    CameraAngle, CameraSettings, ColorTemperature, DepthOfField, DetailLevel,
    EnvironmentSettings, Framing, Gender, ImagePrompt, LightingSettings, LocationType,
    MoodSettings, PromptDocument, QualitySettings, Resolution, StyleSettings, SubjectSettings,
};

// ---------------------------------------------------------------------------
// Sampling ranges and policy constants
// ---------------------------------------------------------------------------

pub const AGE_SAMPLE: RangeInclusive<i64> = 18..=70;
pub const FIDELITY_SAMPLE: RangeInclusive<i64> = 60..=100;
pub const TEXTURE_REALISM_SAMPLE: RangeInclusive<i64> = 50..=100;
pub const SHADOW_INTENSITY_SAMPLE: RangeInclusive<i64> = 20..=80;
pub const SHARPNESS_SAMPLE: RangeInclusive<i64> = 60..=90;
pub const NOISE_LEVEL_SAMPLE: RangeInclusive<i64> = 5..=30;

/// Chance that `style.artistic_reference` names an artist.
pub const ARTISTIC_REFERENCE_PROBABILITY: f64 = 0.3;

/// Negative terms of every randomized document.
pub const RANDOM_NEGATIVE_TERMS: &[&str] = &[
    "blurry",
    "distorted",
    "low quality",
    "bad anatomy",
    "watermark",
];

// ---------------------------------------------------------------------------
// Pools
// ---------------------------------------------------------------------------

const ETHNICITIES: &[&str] = &[
    "East Asian",
    "Caucasian",
    "Black",
    "Latino",
    "South Asian",
    "Middle Eastern",
    "Mixed",
];
const HAIR_STYLES: &[&str] = &["Short bob", "Long flowing", "Buzz cut", "Mohawk", "Braided", "Bald"];
const EXPRESSIONS: &[&str] = &["Neutral", "Happy", "Angry", "Mysterious", "Surprised", "Serene"];
const CLOTHING: &[&str] = &[
    "Casual Streetwear",
    "Formal Suit",
    "Cybernetic Armor",
    "Vintage 1950s",
    "High Fantasy Robes",
    "Tactical Gear",
    "Minimalist Fashion",
];
const POSES: &[&str] = &[
    "Standing confident",
    "Sitting relaxed",
    "Action jump",
    "Portrait close-up",
    "Walking away",
    "Floating zero-g",
];
const ACCESSORIES: &[&str] = &["Glasses", "Earrings", "Necklace", "Scarf", "Hat", "Headphones"];
const MATERIALS: &[&str] = &["Organic", "Metallic", "Plastic", "Fabric", "Liquid", "Ethereal"];
const REFERENCE_ARTISTS: &[&str] = &[
    "Greg Rutkowski",
    "Syd Mead",
    "Alphonse Mucha",
    "Zaha Hadid",
    "Roger Deakins",
    "Wes Anderson",
];
const DEPTHS_OF_FIELD: &[&str] = &["shallow", "medium", "deep"];
const FRAMINGS: &[&str] = &["close-up", "medium-shot", "full-body", "wide-angle"];
const ANGLES: &[&str] = &["eye-level", "low-angle", "high-angle"];
const LIGHT_DIRECTIONS: &[&str] = &["front", "side", "back", "top", "bottom"];
const DESCRIPTIONS: &[&str] = &[
    "Busy city street",
    "Quiet forest",
    "Neon lab",
    "Desert dunes",
    "Ocean cliff",
    "Cozy living room",
];
const TIMES_OF_DAY: &[&str] = &["Dawn", "Noon", "Dusk", "Midnight"];
const WEATHER: &[&str] = &["Clear", "Rainy", "Cloudy", "Snowy", "Foggy"];
const COLOR_GRADINGS: &[&str] = &["Vibrant", "Muted", "Black & White", "Sepia", "Teal & Orange"];
const EMOTIONAL_TONES: &[&str] = &["Peaceful", "Energetic", "Dark", "Hopeful"];

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Uniform pick from a non-empty pool.
fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&str]) -> String {
    pool.choose(rng).copied().unwrap_or_default().to_string()
}

/// Generate a random document from the given source of randomness.
pub fn randomize_with<R: Rng + ?Sized>(rng: &mut R) -> PromptDocument {
    let subject = SubjectSettings {
        age: Some(rng.random_range(AGE_SAMPLE)),
        gender: Gender::from(pick(rng, Gender::KNOWN).as_str()),
        ethnicity: pick(rng, ETHNICITIES),
        skin_tone: pick(rng, options::SKIN_TONES),
        hair_style: pick(rng, HAIR_STYLES),
        hair_color: pick(rng, options::HAIR_COLORS),
        expression: pick(rng, EXPRESSIONS),
        clothing: pick(rng, CLOTHING),
        pose: pick(rng, POSES),
        accessories: pick(rng, ACCESSORIES),
        ..SubjectSettings::default()
    };

    let artistic_reference = if rng.random_bool(ARTISTIC_REFERENCE_PROBABILITY) {
        pick(rng, REFERENCE_ARTISTS)
    } else {
        String::new()
    };
    let style = StyleSettings {
        art_style: pick(rng, options::ART_STYLES),
        fidelity: rng.random_range(FIDELITY_SAMPLE),
        texture_realism: rng.random_range(TEXTURE_REALISM_SAMPLE),
        material_influence: pick(rng, MATERIALS),
        artistic_reference,
        ..StyleSettings::default()
    };

    let camera = CameraSettings {
        kind: pick(rng, options::CAMERA_TYPES),
        lens: pick(rng, options::LENSES),
        depth_of_field: DepthOfField::from(pick(rng, DEPTHS_OF_FIELD).as_str()),
        framing: Framing::from(pick(rng, FRAMINGS).as_str()),
        angle: CameraAngle::from(pick(rng, ANGLES).as_str()),
        rule_of_thirds: rng.random_bool(0.5),
        ..CameraSettings::default()
    };

    let lighting = LightingSettings {
        kind: pick(rng, options::LIGHTING_TYPES),
        direction: pick(rng, LIGHT_DIRECTIONS),
        color_temperature: ColorTemperature::from(pick(rng, ColorTemperature::KNOWN).as_str()),
        shadow_intensity: rng.random_range(SHADOW_INTENSITY_SAMPLE),
        hdr_enabled: rng.random_bool(0.5),
        ..LightingSettings::default()
    };

    let environment = EnvironmentSettings {
        location_type: LocationType::from(pick(rng, LocationType::KNOWN).as_str()),
        description: pick(rng, DESCRIPTIONS),
        time_of_day: pick(rng, TIMES_OF_DAY),
        weather: pick(rng, WEATHER),
        detail_level: DetailLevel::from(pick(rng, DetailLevel::KNOWN).as_str()),
        ..EnvironmentSettings::default()
    };

    let mood = MoodSettings {
        preset: pick(rng, options::MOODS),
        color_grading: pick(rng, COLOR_GRADINGS),
        emotional_tone: pick(rng, EMOTIONAL_TONES),
        ..MoodSettings::default()
    };

    let quality = QualitySettings {
        resolution: Resolution::from(pick(rng, options::RESOLUTIONS).as_str()),
        artifact_suppression: true,
        sharpness: rng.random_range(SHARPNESS_SAMPLE),
        noise_level: rng.random_range(NOISE_LEVEL_SAMPLE),
        consistency_lock: rng.random_bool(0.5),
        ..QualitySettings::default()
    };

    PromptDocument {
        image_prompt: ImagePrompt {
            subject,
            style,
            camera,
            lighting,
            environment,
            mood,
            quality,
            negative_prompt: RANDOM_NEGATIVE_TERMS.iter().map(|t| t.to_string()).collect(),
        },
    }
}

/// Generate a random document using the thread-local RNG.
pub fn random_prompt() -> PromptDocument {
    randomize_with(&mut rand::rng())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
