//! Session domain model.
//!
//! This module contains the working-session entity and the structured
//! result kinds produced by the generation capability. These are the
//! "pure" domain models that business logic operates on, independent of
//! any specific storage format.
//!
//! Serde renames preserve the remote service's field names exactly
//! (camelCase), so persisted snapshots and wire payloads stay
//! interoperable with the unchanged remote contract.

use serde::{Deserialize, Serialize};

/// The current in-memory working state: the user's source input plus the
/// last-received value for each result kind.
///
/// A single Session is "current" at any time. Result slots are replaced
/// wholesale by each successful generation call and are never partially
/// updated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// The user's description of the source IP
    pub ip_input: String,
    /// The generated narrative text
    pub generated_text: String,
    /// Analysis of the source IP, if any
    pub analysis: Option<Analysis>,
    /// Generated transformative twists, if any
    pub twists: Option<Twists>,
    /// Explored fandom tropes, if any
    pub tropes: Option<Vec<String>>,
    /// Risk assessment of the generated text, if any
    pub risk: Option<Risk>,
}

/// The result of a source-IP analysis. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Latent characteristics of the IP
    pub characteristics: String,
    /// Common tropes found in the IP
    pub tropes: String,
    /// Recurring motifs in the IP
    pub motifs: String,
    /// Elements prone to direct memorization (named characters, unique
    /// locations, plot points)
    pub copyrightable_elements: String,
}

/// A set of generated transformative twists, one per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Twists {
    pub conceptual_blending: String,
    pub dimensional_thinking: String,
    pub multi_perspective: String,
    pub core_inversion: String,
}

/// The result of an advisory risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    /// The assessed risk score
    pub risk_score: RiskScore,
    /// An explanation for the assigned score
    pub explanation: String,
    /// Passages in the generated text that are highly similar to the
    /// source IP
    pub similar_passages: Vec<String>,
}

/// Risk score levels, serialized exactly as the remote service emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskScore {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskScore::Low => "Low",
            RiskScore::Medium => "Medium",
            RiskScore::High => "High",
        };
        write!(f, "{s}")
    }
}

/// How far a forged narrative may deviate stylistically and thematically
/// from the source material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviationLevel {
    Low,
    Medium,
    High,
}

impl DeviationLevel {
    /// The capitalized form used in operation keys (`deviation-Low`).
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviationLevel::Low => "Low",
            DeviationLevel::Medium => "Medium",
            DeviationLevel::High => "High",
        }
    }
}

impl std::fmt::Display for DeviationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Length presets for the narrative divergence prompter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeLength {
    Short,
    Medium,
    Long,
}

impl NarrativeLength {
    /// The phrase spliced into the divergence instruction.
    pub fn phrase(&self) -> &'static str {
        match self {
            NarrativeLength::Short => "about 50 words",
            NarrativeLength::Medium => "about 150-200 words",
            NarrativeLength::Long => "about 300 words",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_serializes_with_remote_field_names() {
        let session = Session {
            ip_input: "a young wizard".into(),
            generated_text: "Once upon a time".into(),
            analysis: Some(Analysis {
                characteristics: "c".into(),
                tropes: "t".into(),
                motifs: "m".into(),
                copyrightable_elements: "e".into(),
            }),
            twists: None,
            tropes: Some(vec!["found family".into()]),
            risk: None,
        };

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["ipInput"], "a young wizard");
        assert_eq!(value["generatedText"], "Once upon a time");
        assert_eq!(value["analysis"]["copyrightableElements"], "e");
        assert!(value["twists"].is_null());
        assert_eq!(value["tropes"][0], "found family");
    }

    #[test]
    fn risk_round_trips_with_camel_case_keys() {
        let json = r#"{
            "riskScore": "Medium",
            "explanation": "close paraphrasing",
            "similarPassages": ["the boy who lived"]
        }"#;
        let risk: Risk = serde_json::from_str(json).unwrap();
        assert_eq!(risk.risk_score, RiskScore::Medium);
        assert_eq!(risk.similar_passages.len(), 1);

        let back = serde_json::to_value(&risk).unwrap();
        assert_eq!(back["riskScore"], "Medium");
        assert_eq!(back["similarPassages"][0], "the boy who lived");
    }

    #[test]
    fn risk_score_rejects_unknown_levels() {
        let result: serde_json::Result<RiskScore> = serde_json::from_str("\"Severe\"");
        assert!(result.is_err());
    }
}
