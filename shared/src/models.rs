//! Data models for the SkinGlow client core

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

use crate::scoring::SkinScore;

// ============================================================================
// User Profile
// ============================================================================

/// Gender as collected during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// Dietary preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diet {
    #[serde(rename = "vegetarian")]
    Vegetarian,
    #[serde(rename = "non-vegetarian")]
    NonVegetarian,
}

impl Diet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Diet::Vegetarian => "vegetarian",
            Diet::NonVegetarian => "non-vegetarian",
        }
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Diet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "vegetarian" | "veg" => Ok(Diet::Vegetarian),
            "non-vegetarian" | "non-veg" | "nonvegetarian" => Ok(Diet::NonVegetarian),
            _ => Err(format!("Unknown diet: {}", s)),
        }
    }
}

/// A complete user profile.
///
/// Only complete profiles are ever persisted. Partially filled input lives in
/// [`crate::validation::ProfileForm`] until it validates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u32,
    pub gender: Gender,
    pub height_cm: u32,
    pub weight_kg: u32,
    pub diet: Diet,
    #[serde(default)]
    pub ethnicity: Option<String>,
}

// ============================================================================
// Analysis Result
// ============================================================================

/// Food recommendations block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FoodRecommendations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eat_more: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Health and routine recommendations block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HealthRecommendations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_habits: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routine: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Whether a palette color suits the user.
///
/// Kinds the client does not know are kept as their wire string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SwatchKind {
    Recommended,
    Avoid,
    Other(String),
}

impl From<String> for SwatchKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "recommended" => SwatchKind::Recommended,
            "avoid" => SwatchKind::Avoid,
            _ => SwatchKind::Other(s),
        }
    }
}

impl From<SwatchKind> for String {
    fn from(kind: SwatchKind) -> Self {
        match kind {
            SwatchKind::Recommended => "recommended".to_string(),
            SwatchKind::Avoid => "avoid".to_string(),
            SwatchKind::Other(s) => s,
        }
    }
}

/// One entry of the style color palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSwatch {
    pub hex: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SwatchKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Style recommendations block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleRecommendations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clothing: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_palette: Option<Vec<ColorSwatch>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StyleRecommendations {
    /// Palette entries of the given kind, in backend order
    pub fn palette<'a>(&'a self, kind: &'a SwatchKind) -> impl Iterator<Item = &'a ColorSwatch> {
        self.color_palette
            .iter()
            .flatten()
            .filter(move |swatch| &swatch.kind == kind)
    }
}

/// The most recent skin analysis returned by the backend.
///
/// Any JSON object is accepted. A known field whose value does not have the
/// expected shape stays raw in `extra` next to the fields the client does
/// not model (e.g. `status`, `image_info`), so the cached payload survives a
/// round trip unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnalysisResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin_tone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<SkinScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_issues: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positive_aspects: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifestyle_tips: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food: Option<FoodRecommendations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthRecommendations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleRecommendations>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for AnalysisResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;

        Ok(Self {
            skin_type: take_field(&mut fields, "skin_type"),
            skin_tone: take_field(&mut fields, "skin_tone"),
            overall_condition: take_field(&mut fields, "overall_condition"),
            score: take_field(&mut fields, "score"),
            visible_issues: take_field(&mut fields, "visible_issues"),
            positive_aspects: take_field(&mut fields, "positive_aspects"),
            recommendations: take_field(&mut fields, "recommendations"),
            lifestyle_tips: take_field(&mut fields, "lifestyle_tips"),
            food: take_field(&mut fields, "food"),
            health: take_field(&mut fields, "health"),
            style: take_field(&mut fields, "style"),
            extra: fields,
        })
    }
}

/// Move `key` out of `fields` when it decodes as `T`; otherwise leave it raw
fn take_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    let parsed = T::deserialize(fields.get(key)?).ok()?;
    fields.remove(key);
    Some(parsed)
}

impl AnalysisResult {
    /// Numeric score usable for history, if any
    pub fn score_value(&self) -> Option<i64> {
        self.score.as_ref().and_then(SkinScore::value)
    }

    /// True when the backend answered with its canned fallback analysis
    pub fn is_fallback(&self) -> bool {
        self.extra.get("status").and_then(Value::as_str) == Some("fallback")
    }

    /// Descriptive fields copied into a history entry
    pub fn history_context(&self) -> HistoryContext {
        HistoryContext {
            skin_type: self.skin_type.clone(),
            skin_tone: self.skin_tone.clone(),
            overall_condition: self.overall_condition.clone(),
        }
    }
}

// ============================================================================
// Score History
// ============================================================================

/// Descriptive fields denormalized into each history entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryContext {
    pub skin_type: Option<String>,
    pub skin_tone: Option<String>,
    pub overall_condition: Option<String>,
}

/// One data point in the score trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreHistoryEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub score: i64,
    #[serde(default)]
    pub skin_type: Option<String>,
    #[serde(default)]
    pub skin_tone: Option<String>,
    #[serde(default)]
    pub overall_condition: Option<String>,
}

impl ScoreHistoryEntry {
    /// Build a new entry stamped with `date` and a time-ordered id
    pub fn capture(score: i64, context: HistoryContext, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            date,
            score,
            skin_type: context.skin_type,
            skin_tone: context.skin_tone,
            overall_condition: context.overall_condition,
        }
    }
}
