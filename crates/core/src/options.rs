//! Suggested values offered by the editing surface.
//!
//! These lists are presentation hints for free-form fields and the
//! randomizer's pools; nothing validates a document against them.

use serde::Serialize;

use crate::prompt::{
    CameraAngle, ColorTemperature, DepthOfField, DetailLevel, Framing, IntRange, AGE_RANGE,
    PERCENT_RANGE,
};

pub const GENDERS: &[&str] = &["male", "female", "non-binary", "unspecified"];

pub const SKIN_TONES: &[&str] = &[
    "pale",
    "fair",
    "neutral",
    "olive",
    "tan",
    "brown",
    "dark brown",
    "black",
    "fantasy",
];

pub const HAIR_COLORS: &[&str] = &[
    "blonde", "brunette", "black", "red", "white", "grey", "pastel", "neon",
];

pub const ART_STYLES: &[&str] = &[
    "photorealistic",
    "cinematic",
    "anime",
    "digital painting",
    "oil painting",
    "cyberpunk",
    "vaporwave",
    "noir",
    "minimalist",
    "pixel art",
];

pub const CAMERA_TYPES: &[&str] = &[
    "DSLR",
    "mirrorless",
    "film camera",
    "smartphone",
    "drone",
    "security cam",
];

pub const LENSES: &[&str] = &[
    "14mm",
    "24mm",
    "35mm",
    "50mm",
    "85mm",
    "135mm",
    "200mm",
    "macro 100mm",
];

pub const LIGHTING_TYPES: &[&str] = &[
    "natural",
    "studio",
    "cinematic",
    "neon",
    "candlelight",
    "bioluminescent",
    "hard flash",
];

/// Location suggestions. The last two are outside [`crate::prompt::LocationType`]'s
/// known set and are stored verbatim when chosen.
pub const LOCATIONS: &[&str] = &[
    "indoor",
    "outdoor",
    "studio",
    "abstract",
    "space",
    "underwater",
];

pub const MOODS: &[&str] = &[
    "balanced",
    "dramatic",
    "joyful",
    "melancholic",
    "eerie",
    "romantic",
    "tense",
    "ethereal",
];

pub const RESOLUTIONS: &[&str] = &["1K", "2K", "4K", "8K"];

// ---------------------------------------------------------------------------
// Editor catalogue
// ---------------------------------------------------------------------------

/// Everything an editing surface needs to render its controls: suggestion
/// lists for free-form fields, the closed sets of enumerated fields, and the
/// integer slider ranges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorOptions {
    pub genders: &'static [&'static str],
    pub skin_tones: &'static [&'static str],
    pub hair_colors: &'static [&'static str],
    pub art_styles: &'static [&'static str],
    pub camera_types: &'static [&'static str],
    pub lenses: &'static [&'static str],
    pub depths_of_field: &'static [&'static str],
    pub framings: &'static [&'static str],
    pub camera_angles: &'static [&'static str],
    pub lighting_types: &'static [&'static str],
    pub color_temperatures: &'static [&'static str],
    pub locations: &'static [&'static str],
    pub detail_levels: &'static [&'static str],
    pub moods: &'static [&'static str],
    pub resolutions: &'static [&'static str],
    pub ranges: SliderRanges,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderRanges {
    pub age: IntRange,
    pub fidelity: IntRange,
    pub texture_realism: IntRange,
    pub shadow_intensity: IntRange,
    pub sharpness: IntRange,
    pub noise_level: IntRange,
}

pub fn editor_options() -> EditorOptions {
    EditorOptions {
        genders: GENDERS,
        skin_tones: SKIN_TONES,
        hair_colors: HAIR_COLORS,
        art_styles: ART_STYLES,
        camera_types: CAMERA_TYPES,
        lenses: LENSES,
        depths_of_field: DepthOfField::KNOWN,
        framings: Framing::KNOWN,
        camera_angles: CameraAngle::KNOWN,
        lighting_types: LIGHTING_TYPES,
        color_temperatures: ColorTemperature::KNOWN,
        locations: LOCATIONS,
        detail_levels: DetailLevel::KNOWN,
        moods: MOODS,
        resolutions: RESOLUTIONS,
        ranges: SliderRanges {
            age: AGE_RANGE,
            fidelity: PERCENT_RANGE,
            texture_realism: PERCENT_RANGE,
            shadow_intensity: PERCENT_RANGE,
            sharpness: PERCENT_RANGE,
            noise_level: PERCENT_RANGE,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{default_prompt, Gender, LocationType, Resolution};

    #[test]
    fn enum_backed_lists_match_known_sets() {
        assert_eq!(GENDERS, Gender::KNOWN);
        assert_eq!(RESOLUTIONS, Resolution::KNOWN);
        assert!(LocationType::KNOWN.iter().all(|l| LOCATIONS.contains(l)));
    }

    #[test]
    fn default_values_are_offered() {
        let p = default_prompt().image_prompt;
        let opts = editor_options();
        assert!(opts.camera_types.contains(&p.camera.kind.as_str()));
        assert!(opts.lenses.contains(&p.camera.lens.as_str()));
        assert!(opts.moods.contains(&p.mood.preset.as_str()));
        assert!(opts.ranges.age.contains(p.subject.age.unwrap()));
    }

    #[test]
    fn catalogue_serializes_ranges() {
        let value = serde_json::to_value(editor_options()).unwrap();
        assert_eq!(value["ranges"]["age"], serde_json::json!({"min": 1, "max": 100}));
        assert_eq!(value["framings"][0], "close-up");
    }
}
