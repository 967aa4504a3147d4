//! Shape-preserving edits to a [`PromptDocument`].
//!
//! Edits are a closed enum over the seven sections, each carrying its own
//! typed field enum, so Rust callers cannot name a section or field that
//! does not exist. [`FieldEdit::from_path`] is the single dynamic entry
//! point for string-addressed edits coming from the HTTP surface.
//!
//! Both operations are pure: the input document is borrowed and a new,
//! independently owned document is returned.

use serde_json::Value;

use crate::error::CoreError;
use crate::prompt::{
    CameraAngle, CameraSettings, ColorTemperature, DepthOfField, DetailLevel,
    EnvironmentSettings, Framing, Gender, LightingSettings, LocationType, MoodSettings,
    PromptDocument, QualitySettings, Resolution, SectionName, StyleSettings, SubjectSettings,
    AGE_RANGE, PERCENT_RANGE,
};

/// Declares the field enum of one section.
macro_rules! section_fields {
    (
        $(#[$meta:meta])*
        $edit:ident for $settings:ident in $section:literal {
            $($variant:ident($key:literal) => $field:ident: $ty:ty),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $edit {
            $($variant($ty),)+
        }

        impl $edit {
            /// Wire names of every field in this section, in canonical order.
            pub const KEYS: &'static [&'static str] = &[$($key),+];

            /// Wire name of the edited field.
            pub fn key(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => $key,)+
                }
            }

            fn apply(self, target: &mut $settings) {
                match self {
                    $(Self::$variant(value) => target.$field = value,)+
                }
            }

            fn from_value(field: &str, value: Value) -> Result<Self, CoreError> {
                match field {
                    $($key => serde_json::from_value::<$ty>(value)
                        .map(Self::$variant)
                        .map_err(|e| CoreError::Shape(format!(
                            "Invalid value for {}.{}: {e}", $section, field
                        ))),)+
                    other => Err(CoreError::Shape(format!(
                        "Unknown field '{other}' in section '{}'", $section
                    ))),
                }
            }
        }
    };
}

section_fields! {
    SubjectField for SubjectSettings in "subject" {
        Age("age") => age: Option<i64>,
        Gender("gender") => gender: Gender,
        Ethnicity("ethnicity") => ethnicity: String,
        SkinTone("skin_tone") => skin_tone: String,
        HairStyle("hair_style") => hair_style: String,
        HairColor("hair_color") => hair_color: String,
        Expression("expression") => expression: String,
        Clothing("clothing") => clothing: String,
        Pose("pose") => pose: String,
        Accessories("accessories") => accessories: String,
    }
}

section_fields! {
    StyleField for StyleSettings in "style" {
        ArtStyle("art_style") => art_style: String,
        Fidelity("fidelity") => fidelity: i64,
        TextureRealism("texture_realism") => texture_realism: i64,
        MaterialInfluence("material_influence") => material_influence: String,
        ArtisticReference("artistic_reference") => artistic_reference: String,
    }
}

section_fields! {
    CameraField for CameraSettings in "camera" {
        Kind("type") => kind: String,
        Lens("lens") => lens: String,
        DepthOfField("depth_of_field") => depth_of_field: DepthOfField,
        Framing("framing") => framing: Framing,
        Angle("angle") => angle: CameraAngle,
        RuleOfThirds("rule_of_thirds") => rule_of_thirds: bool,
    }
}

section_fields! {
    LightingField for LightingSettings in "lighting" {
        Kind("type") => kind: String,
        Direction("direction") => direction: String,
        ColorTemperature("color_temperature") => color_temperature: ColorTemperature,
        ShadowIntensity("shadow_intensity") => shadow_intensity: i64,
        HdrEnabled("hdr_enabled") => hdr_enabled: bool,
    }
}

section_fields! {
    EnvironmentField for EnvironmentSettings in "environment" {
        LocationType("location_type") => location_type: LocationType,
        Description("description") => description: String,
        TimeOfDay("time_of_day") => time_of_day: String,
        Weather("weather") => weather: String,
        DetailLevel("detail_level") => detail_level: DetailLevel,
    }
}

section_fields! {
    MoodField for MoodSettings in "mood" {
        Preset("preset") => preset: String,
        ColorGrading("color_grading") => color_grading: String,
        EmotionalTone("emotional_tone") => emotional_tone: String,
    }
}

section_fields! {
    QualityField for QualitySettings in "quality" {
        Resolution("resolution") => resolution: Resolution,
        ArtifactSuppression("artifact_suppression") => artifact_suppression: bool,
        Sharpness("sharpness") => sharpness: i64,
        NoiseLevel("noise_level") => noise_level: i64,
        ConsistencyLock("consistency_lock") => consistency_lock: bool,
    }
}

// ---------------------------------------------------------------------------
// FieldEdit
// ---------------------------------------------------------------------------

/// A single-field edit addressed to one section.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Subject(SubjectField),
    Style(StyleField),
    Camera(CameraField),
    Lighting(LightingField),
    Environment(EnvironmentField),
    Mood(MoodField),
    Quality(QualityField),
}

impl FieldEdit {
    /// Build an edit from string coordinates and a JSON value.
    ///
    /// Fails with [`CoreError::Shape`] when the section or field is unknown,
    /// or when `value` cannot be read as the field's type. Range is not
    /// checked.
    pub fn from_path(section: &str, field: &str, value: Value) -> Result<Self, CoreError> {
        let edit = match section.parse::<SectionName>()? {
            SectionName::Subject => Self::Subject(SubjectField::from_value(field, value)?),
            SectionName::Style => Self::Style(StyleField::from_value(field, value)?),
            SectionName::Camera => Self::Camera(CameraField::from_value(field, value)?),
            SectionName::Lighting => Self::Lighting(LightingField::from_value(field, value)?),
            SectionName::Environment => {
                Self::Environment(EnvironmentField::from_value(field, value)?)
            }
            SectionName::Mood => Self::Mood(MoodField::from_value(field, value)?),
            SectionName::Quality => Self::Quality(QualityField::from_value(field, value)?),
        };
        Ok(edit)
    }

    pub fn section(&self) -> SectionName {
        match self {
            Self::Subject(_) => SectionName::Subject,
            Self::Style(_) => SectionName::Style,
            Self::Camera(_) => SectionName::Camera,
            Self::Lighting(_) => SectionName::Lighting,
            Self::Environment(_) => SectionName::Environment,
            Self::Mood(_) => SectionName::Mood,
            Self::Quality(_) => SectionName::Quality,
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            Self::Subject(f) => f.key(),
            Self::Style(f) => f.key(),
            Self::Camera(f) => f.key(),
            Self::Lighting(f) => f.key(),
            Self::Environment(f) => f.key(),
            Self::Mood(f) => f.key(),
            Self::Quality(f) => f.key(),
        }
    }

    /// Clamp integer values to the slider ranges of the editing surface.
    ///
    /// Non-integer edits are returned unchanged.
    pub fn clamped(self) -> Self {
        match self {
            Self::Subject(SubjectField::Age(Some(age))) => {
                Self::Subject(SubjectField::Age(Some(AGE_RANGE.clamp(age))))
            }
            Self::Style(StyleField::Fidelity(v)) => {
                Self::Style(StyleField::Fidelity(PERCENT_RANGE.clamp(v)))
            }
            Self::Style(StyleField::TextureRealism(v)) => {
                Self::Style(StyleField::TextureRealism(PERCENT_RANGE.clamp(v)))
            }
            Self::Lighting(LightingField::ShadowIntensity(v)) => {
                Self::Lighting(LightingField::ShadowIntensity(PERCENT_RANGE.clamp(v)))
            }
            Self::Quality(QualityField::Sharpness(v)) => {
                Self::Quality(QualityField::Sharpness(PERCENT_RANGE.clamp(v)))
            }
            Self::Quality(QualityField::NoiseLevel(v)) => {
                Self::Quality(QualityField::NoiseLevel(PERCENT_RANGE.clamp(v)))
            }
            other => other,
        }
    }
}

/// Wire names of the fields of `section`, in canonical order.
pub fn section_keys(section: SectionName) -> &'static [&'static str] {
    match section {
        SectionName::Subject => SubjectField::KEYS,
        SectionName::Style => StyleField::KEYS,
        SectionName::Camera => CameraField::KEYS,
        SectionName::Lighting => LightingField::KEYS,
        SectionName::Environment => EnvironmentField::KEYS,
        SectionName::Mood => MoodField::KEYS,
        SectionName::Quality => QualityField::KEYS,
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Return a copy of `doc` with one field replaced.
///
/// No range or content validation is performed.
pub fn apply_field_edit(doc: &PromptDocument, edit: FieldEdit) -> PromptDocument {
    let mut next = doc.clone();
    let prompt = &mut next.image_prompt;
    match edit {
        FieldEdit::Subject(f) => f.apply(&mut prompt.subject),
        FieldEdit::Style(f) => f.apply(&mut prompt.style),
        FieldEdit::Camera(f) => f.apply(&mut prompt.camera),
        FieldEdit::Lighting(f) => f.apply(&mut prompt.lighting),
        FieldEdit::Environment(f) => f.apply(&mut prompt.environment),
        FieldEdit::Mood(f) => f.apply(&mut prompt.mood),
        FieldEdit::Quality(f) => f.apply(&mut prompt.quality),
    }
    next
}

/// Return a copy of `doc` with the negative terms replaced wholesale.
pub fn apply_negative_terms(doc: &PromptDocument, terms: Vec<String>) -> PromptDocument {
    let mut next = doc.clone();
    next.image_prompt.negative_prompt = terms;
    next
}

/// Split comma-separated text into trimmed, non-empty terms.
pub fn parse_negative_terms(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render terms the way the editing surface displays them.
pub fn join_negative_terms(terms: &[String]) -> String {
    terms.join(", ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
