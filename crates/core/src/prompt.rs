//! Prompt configuration model.
//!
//! A [`PromptDocument`] is the `{ "image_prompt": { ... } }` envelope sent to
//! the image model. Its shape is fixed: seven sections, each with a fixed
//! field set, plus the negative-term list. Enumerated fields accept values
//! outside their known set (kept in an `Other` variant) and every section
//! keeps unknown keys in `extra`, so documents from external producers
//! survive a round trip unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Top-level key wrapping the section map.
pub const WRAPPER_KEY: &str = "image_prompt";

/// Negative terms of the baseline document.
pub const DEFAULT_NEGATIVE_TERMS: &[&str] = &["blurry", "distorted", "low quality", "bad anatomy"];

/// Inclusive integer range used by the editing surface's sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }
}

/// Slider range for `subject.age`.
pub const AGE_RANGE: IntRange = IntRange::new(1, 100);

/// Slider range for every percentage-style integer field.
pub const PERCENT_RANGE: IntRange = IntRange::new(0, 100);

// ---------------------------------------------------------------------------
// Enumerated field values
// ---------------------------------------------------------------------------

/// Declares a string-backed enum with a verbatim `Other` fallback.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            /// A value outside the known set, kept verbatim.
            Other(String),
        }

        impl $name {
            /// Every known wire value, in declaration order.
            pub const KNOWN: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(value) => value.as_str(),
                }
            }

            /// Whether the value is one of [`Self::KNOWN`].
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $($text => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Ok(Self::from(raw.as_str()))
            }
        }
    };
}

choice_enum! {
    Gender {
        Male => "male",
        Female => "female",
        NonBinary => "non-binary",
        Unspecified => "unspecified",
    }
}

choice_enum! {
    DepthOfField {
        Shallow => "shallow",
        Medium => "medium",
        Deep => "deep",
        Infinite => "infinite",
    }
}

choice_enum! {
    Framing {
        CloseUp => "close-up",
        MediumShot => "medium-shot",
        FullBody => "full-body",
        WideAngle => "wide-angle",
        Macro => "macro",
    }
}

choice_enum! {
    CameraAngle {
        EyeLevel => "eye-level",
        LowAngle => "low-angle",
        HighAngle => "high-angle",
        BirdEye => "bird-eye",
        DutchAngle => "dutch-angle",
    }
}

choice_enum! {
    ColorTemperature {
        Warm => "warm",
        Neutral => "neutral",
        Cool => "cool",
    }
}

choice_enum! {
    LocationType {
        Indoor => "indoor",
        Outdoor => "outdoor",
        Studio => "studio",
        Abstract => "abstract",
    }
}

choice_enum! {
    DetailLevel {
        Minimal => "minimal",
        Moderate => "moderate",
        High => "high",
        Intricate => "intricate",
    }
}

choice_enum! {
    Resolution {
        OneK => "1K",
        TwoK => "2K",
        FourK => "4K",
        EightK => "8K",
    }
}

// ---------------------------------------------------------------------------
// Section names
// ---------------------------------------------------------------------------

/// The seven fixed sections of an [`ImagePrompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionName {
    Subject,
    Style,
    Camera,
    Lighting,
    Environment,
    Mood,
    Quality,
}

impl SectionName {
    /// All sections in canonical order.
    pub const ALL: [SectionName; 7] = [
        Self::Subject,
        Self::Style,
        Self::Camera,
        Self::Lighting,
        Self::Environment,
        Self::Mood,
        Self::Quality,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Style => "style",
            Self::Camera => "camera",
            Self::Lighting => "lighting",
            Self::Environment => "environment",
            Self::Mood => "mood",
            Self::Quality => "quality",
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| CoreError::Shape(format!("Unknown section '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    pub gender: Gender,
    pub ethnicity: String,
    pub skin_tone: String,
    pub hair_style: String,
    pub hair_color: String,
    pub expression: String,
    pub clothing: String,
    pub pose: String,
    pub accessories: String,
    /// Fields outside the fixed set (e.g. added by the enhancement service).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SubjectSettings {
    fn default() -> Self {
        Self {
            age: Some(25),
            gender: Gender::Unspecified,
            ethnicity: "unspecified".into(),
            skin_tone: "neutral".into(),
            hair_style: "natural".into(),
            hair_color: "natural".into(),
            expression: "neutral".into(),
            clothing: "casual".into(),
            pose: "standing".into(),
            accessories: String::new(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    pub art_style: String,
    pub fidelity: i64,
    pub texture_realism: i64,
    pub material_influence: String,
    pub artistic_reference: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            art_style: "photorealistic".into(),
            fidelity: 90,
            texture_realism: 80,
            material_influence: "organic".into(),
            artistic_reference: String::new(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    #[serde(rename = "type")]
    pub kind: String,
    pub lens: String,
    pub depth_of_field: DepthOfField,
    pub framing: Framing,
    pub angle: CameraAngle,
    pub rule_of_thirds: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            kind: "DSLR".into(),
            lens: "50mm".into(),
            depth_of_field: DepthOfField::Medium,
            framing: Framing::MediumShot,
            angle: CameraAngle::EyeLevel,
            rule_of_thirds: true,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingSettings {
    #[serde(rename = "type")]
    pub kind: String,
    pub direction: String,
    pub color_temperature: ColorTemperature,
    pub shadow_intensity: i64,
    pub hdr_enabled: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            kind: "softbox".into(),
            direction: "front-left".into(),
            color_temperature: ColorTemperature::Neutral,
            shadow_intensity: 40,
            hdr_enabled: false,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentSettings {
    pub location_type: LocationType,
    pub description: String,
    pub time_of_day: String,
    pub weather: String,
    pub detail_level: DetailLevel,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        Self {
            location_type: LocationType::Studio,
            description: "simple backdrop".into(),
            time_of_day: "unknown".into(),
            weather: "clear".into(),
            detail_level: DetailLevel::Moderate,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodSettings {
    pub preset: String,
    pub color_grading: String,
    pub emotional_tone: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for MoodSettings {
    fn default() -> Self {
        Self {
            preset: "balanced".into(),
            color_grading: "standard".into(),
            emotional_tone: "neutral".into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualitySettings {
    pub resolution: Resolution,
    pub artifact_suppression: bool,
    pub sharpness: i64,
    pub noise_level: i64,
    pub consistency_lock: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for QualitySettings {
    fn default() -> Self {
        Self {
            resolution: Resolution::FourK,
            artifact_suppression: true,
            sharpness: 75,
            noise_level: 10,
            consistency_lock: true,
            extra: Map::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// The section map: seven sections plus negative terms.
///
/// Missing keys in parsed input fall back to the baseline values so the
/// shape is always complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePrompt {
    pub subject: SubjectSettings,
    pub style: StyleSettings,
    pub camera: CameraSettings,
    pub lighting: LightingSettings,
    pub environment: EnvironmentSettings,
    pub mood: MoodSettings,
    pub quality: QualitySettings,
    pub negative_prompt: Vec<String>,
}

impl Default for ImagePrompt {
    fn default() -> Self {
        Self {
            subject: SubjectSettings::default(),
            style: StyleSettings::default(),
            camera: CameraSettings::default(),
            lighting: LightingSettings::default(),
            environment: EnvironmentSettings::default(),
            mood: MoodSettings::default(),
            quality: QualitySettings::default(),
            negative_prompt: DEFAULT_NEGATIVE_TERMS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// A complete prompt configuration: `{ "image_prompt": { ... } }`.
///
/// The wrapper key is required when deserializing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PromptDocument {
    pub image_prompt: ImagePrompt,
}

/// The canonical baseline document.
pub fn default_prompt() -> PromptDocument {
    PromptDocument::default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_baseline_values() {
        let doc = default_prompt();
        let p = &doc.image_prompt;
        assert_eq!(p.subject.age, Some(25));
        assert_eq!(p.subject.gender, Gender::Unspecified);
        assert_eq!(p.style.fidelity, 90);
        assert_eq!(p.style.texture_realism, 80);
        assert_eq!(p.camera.kind, "DSLR");
        assert_eq!(p.lighting.shadow_intensity, 40);
        assert_eq!(p.environment.detail_level, DetailLevel::Moderate);
        assert_eq!(p.mood.emotional_tone, "neutral");
        assert_eq!(p.quality.resolution, Resolution::FourK);
        assert_eq!(p.quality.sharpness, 75);
        assert_eq!(
            p.negative_prompt,
            vec!["blurry", "distorted", "low quality", "bad anatomy"]
        );
    }

    #[test]
    fn default_is_deterministic() {
        assert_eq!(default_prompt(), default_prompt());
    }

    // -- choice enums --

    #[test]
    fn known_values_map_to_variants() {
        assert_eq!(Gender::from("non-binary"), Gender::NonBinary);
        assert_eq!(Framing::from("close-up"), Framing::CloseUp);
        assert_eq!(Resolution::from("8K"), Resolution::EightK);
    }

    #[test]
    fn unknown_values_are_kept_verbatim() {
        let loc = LocationType::from("underwater");
        assert_eq!(loc, LocationType::Other("underwater".into()));
        assert_eq!(loc.as_str(), "underwater");
        assert!(!loc.is_known());
    }

    #[test]
    fn choice_enum_serializes_as_wire_string() {
        let json = serde_json::to_string(&CameraAngle::BirdEye).unwrap();
        assert_eq!(json, "\"bird-eye\"");
        let back: CameraAngle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CameraAngle::BirdEye);
    }

    // -- serde shape --

    #[test]
    fn camera_kind_uses_type_key() {
        let value = serde_json::to_value(CameraSettings::default()).unwrap();
        assert_eq!(value["type"], "DSLR");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn sections_serialize_in_declaration_order() {
        let value = serde_json::to_value(default_prompt()).unwrap();
        let keys: Vec<&str> = value[WRAPPER_KEY]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            vec![
                "subject",
                "style",
                "camera",
                "lighting",
                "environment",
                "mood",
                "quality",
                "negative_prompt"
            ]
        );
    }

    #[test]
    fn missing_fields_fall_back_to_baseline() {
        let doc: PromptDocument =
            serde_json::from_str(r#"{"image_prompt":{"subject":{"gender":"male"},"style":{"fidelity":12}}}"#)
                .unwrap();
        assert_eq!(doc.image_prompt.style.fidelity, 12);
        assert_eq!(doc.image_prompt.style.texture_realism, 80);
        assert_eq!(doc.image_prompt.camera, CameraSettings::default());
        // Age is optional and stays absent when omitted from a present section.
        assert_eq!(doc.image_prompt.subject.age, None);
        assert_eq!(doc.image_prompt.subject.pose, "standing");
    }

    #[test]
    fn unknown_section_keys_are_preserved_in_extra() {
        let doc: PromptDocument = serde_json::from_str(
            r#"{"image_prompt":{"mood":{"preset":"eerie","film_stock":"Portra 400"}}}"#,
        )
        .unwrap();
        assert_eq!(doc.image_prompt.mood.preset, "eerie");
        assert_eq!(doc.image_prompt.mood.extra["film_stock"], "Portra 400");
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value[WRAPPER_KEY]["mood"]["film_stock"], "Portra 400");
    }

    #[test]
    fn wrapper_key_is_required() {
        let result: Result<PromptDocument, _> = serde_json::from_str(r#"{"subject":{}}"#);
        assert!(result.is_err());
    }

    // -- section names / ranges --

    #[test]
    fn section_name_parses_known_and_rejects_unknown() {
        assert_eq!("lighting".parse::<SectionName>().unwrap(), SectionName::Lighting);
        assert!("audio".parse::<SectionName>().is_err());
    }

    #[test]
    fn int_range_clamps_and_contains() {
        assert_eq!(AGE_RANGE.clamp(0), 1);
        assert_eq!(PERCENT_RANGE.clamp(140), 100);
        assert!(PERCENT_RANGE.contains(0));
        assert!(!AGE_RANGE.contains(101));
    }
}
