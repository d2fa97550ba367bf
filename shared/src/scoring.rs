//! Skin score interpretation and score-history statistics
//!
//! The backend reports `score` either as a bare number or as an object
//! carrying a total, a label and a per-factor breakdown. Objects that do not
//! fit the typed breakdown are kept as raw JSON; their `total` still counts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::models::ScoreHistoryEntry;

/// Lowest valid skin score
pub const MIN_SCORE: i64 = 0;

/// Highest valid skin score
pub const MAX_SCORE: i64 = 100;

/// Per-factor contribution to a structured score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorScore {
    pub score: i64,
    pub max: i64,
    pub percentage: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Structured score object
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<BTreeMap<String, FactorScore>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `score` field of an analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkinScore {
    Plain(i64),
    Breakdown(ScoreBreakdown),
    Unrecognized(Value),
}

impl SkinScore {
    /// Numeric score: the bare number first, then `total`.
    ///
    /// Whole-number floats count; values outside 0-100 count as absent.
    pub fn value(&self) -> Option<i64> {
        let raw = match self {
            SkinScore::Plain(score) => Some(*score),
            SkinScore::Breakdown(breakdown) => breakdown.total,
            SkinScore::Unrecognized(value) => {
                whole_number(value).or_else(|| value.get("total").and_then(whole_number))
            }
        };
        raw.filter(|score| (MIN_SCORE..=MAX_SCORE).contains(score))
    }

    /// Backend label when provided, otherwise derived from the value
    pub fn label(&self) -> Option<String> {
        let provided = match self {
            SkinScore::Breakdown(breakdown) => breakdown.label.clone(),
            SkinScore::Unrecognized(value) => {
                value.get("label").and_then(Value::as_str).map(str::to_string)
            }
            SkinScore::Plain(_) => None,
        };
        provided.or_else(|| self.value().map(|score| score_label(score).to_string()))
    }

    pub fn breakdown(&self) -> Option<&BTreeMap<String, FactorScore>> {
        match self {
            SkinScore::Breakdown(breakdown) => breakdown.breakdown.as_ref(),
            _ => None,
        }
    }
}

fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Human-readable label for a numeric score
pub fn score_label(score: i64) -> &'static str {
    if score >= 90 {
        "excellent"
    } else if score >= 75 {
        "good"
    } else if score >= 60 {
        "fair"
    } else {
        "needs attention"
    }
}

/// Summary figures for the progress view
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStats {
    pub count: usize,
    pub average: f64,
    pub best: i64,
    pub latest: i64,
    /// Last score minus first score
    pub trend: i64,
}

impl HistoryStats {
    /// Compute stats over entries in insertion order; `None` when empty
    pub fn from_entries(entries: &[ScoreHistoryEntry]) -> Option<Self> {
        let first = entries.first()?;
        let last = entries.last()?;

        let sum: i64 = entries.iter().map(|e| e.score).sum();
        let best = entries.iter().map(|e| e.score).max()?;

        Some(Self {
            count: entries.len(),
            average: sum as f64 / entries.len() as f64,
            best,
            latest: last.score,
            trend: last.score - first.score,
        })
    }

    /// Average rounded to one decimal place for display
    pub fn average_rounded(&self) -> f64 {
        (self.average * 10.0).round() / 10.0
    }
}

/// Newest-first view of an insertion-ordered history
pub fn reverse_chronological(entries: &[ScoreHistoryEntry]) -> Vec<&ScoreHistoryEntry> {
    entries.iter().rev().collect()
}
