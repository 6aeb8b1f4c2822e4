//! Wire models for the three backend endpoints.
//!
//! The backend serializes unset text fields as `""` rather than `null`, and
//! may emit severity values outside the known set. Decoding normalizes both:
//! blank strings become `None`, unrecognized severities become `None`. The
//! severity distribution and the translate guard both rely on that
//! normalization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Coarse seriousness classification assigned by the extraction backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Mild, Severity::Moderate, Severity::Severe];

    /// Parse a wire value, returning `None` for anything outside the known set.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "mild" => Some(Self::Mild),
            "moderate" => Some(Self::Moderate),
            "severe" => Some(Self::Severe),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

/// Target language for outcome translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "sw")]
    Swahili,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Self::French => "fr",
            Self::Swahili => "sw",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::French => "French",
            Self::Swahili => "Swahili",
        }
    }
}

/// Structured fields extracted from one submitted report.
///
/// Replaced wholesale on each submission; never merged with a prior value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExtractionResult {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub drug: Option<String>,
    #[serde(default)]
    pub adverse_events: Vec<String>,
    #[serde(default, deserialize_with = "lenient_severity")]
    pub severity: Option<Severity>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub outcome: Option<String>,
}

/// One previously processed report, as returned by `GET /reports`.
///
/// The list is authoritative (newest first) and fully replaces the local copy
/// on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub raw_report: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub drug: Option<String>,
    #[serde(default)]
    pub adverse_events: Vec<String>,
    #[serde(default, deserialize_with = "lenient_severity")]
    pub severity: Option<Severity>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub outcome: Option<String>,
}

/// Response of `POST /translate`: the submitted outcome echoed back together
/// with its translation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Translation {
    pub outcome: String,
    pub language: Language,
    pub translated: String,
}

fn blank_as_none<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

fn lenient_severity<'de, D>(de: D) -> Result<Option<Severity>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.as_deref().and_then(Severity::parse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extraction_result_full_payload() {
        let result: ExtractionResult = serde_json::from_value(json!({
            "drug": "Drug X",
            "adverse_events": ["nausea", "headache"],
            "severity": "moderate",
            "outcome": "recovered",
        }))
        .unwrap();
        assert_eq!(result.drug.as_deref(), Some("Drug X"));
        assert_eq!(result.adverse_events, vec!["nausea", "headache"]);
        assert_eq!(result.severity, Some(Severity::Moderate));
        assert_eq!(result.outcome.as_deref(), Some("recovered"));
    }

    #[test]
    fn blank_strings_decode_to_none() {
        let result: ExtractionResult = serde_json::from_value(json!({
            "drug": "",
            "adverse_events": [],
            "severity": "",
            "outcome": "",
        }))
        .unwrap();
        assert_eq!(result.drug, None);
        assert!(result.adverse_events.is_empty());
        assert_eq!(result.severity, None);
        assert_eq!(result.outcome, None);
    }

    #[test]
    fn missing_fields_decode_to_none() {
        let result: ExtractionResult = serde_json::from_value(json!({})).unwrap();
        assert_eq!(result, ExtractionResult::default());
    }

    #[test]
    fn unknown_severity_decodes_to_none() {
        let result: ExtractionResult =
            serde_json::from_value(json!({ "severity": "critical" })).unwrap();
        assert_eq!(result.severity, None);
    }

    #[test]
    fn history_entry_decodes_backend_row() {
        let entry: HistoryEntry = serde_json::from_value(json!({
            "id": 7,
            "raw_report": "Patient had a mild rash.",
            "drug": "",
            "adverse_events": ["rash"],
            "severity": "mild",
            "outcome": "ongoing",
            "created_at": "2025-06-01T09:30:00.123456Z",
        }))
        .unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.raw_report.as_deref(), Some("Patient had a mild rash."));
        assert_eq!(entry.drug, None);
        assert_eq!(entry.severity, Some(Severity::Mild));
    }

    #[test]
    fn language_wire_codes() {
        assert_eq!(serde_json::to_value(Language::French).unwrap(), json!("fr"));
        assert_eq!(serde_json::to_value(Language::Swahili).unwrap(), json!("sw"));
        let lang: Language = serde_json::from_value(json!("sw")).unwrap();
        assert_eq!(lang, Language::Swahili);
        assert_eq!(lang.label(), "Swahili");
    }

    #[test]
    fn translation_decodes_echo_shape() {
        let t: Translation = serde_json::from_value(json!({
            "outcome": "recovered",
            "language": "fr",
            "translated": "rétabli",
        }))
        .unwrap();
        assert_eq!(t.language, Language::French);
        assert_eq!(t.translated, "rétabli");
    }
}
