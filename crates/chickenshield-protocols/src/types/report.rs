//! Risk report types.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::content::{ContentDescription, ContentKind};

/// Explanation attached to a report when the analysis could not be completed.
pub const FALLBACK_EXPLANATION: &str =
    "Failed to connect to AI service. Please check your API key or internet connection.";

/// Categorical risk conclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Safe,
    Suspicious,
    Dangerous,
    #[default]
    Unknown,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Safe => "safe",
            Verdict::Suspicious => "suspicious",
            Verdict::Dangerous => "dangerous",
            Verdict::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Verdict {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "safe" => Verdict::Safe,
            "suspicious" => Verdict::Suspicious,
            "dangerous" => Verdict::Dangerous,
            _ => Verdict::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => Verdict::from(s.as_str()),
            _ => Verdict::Unknown,
        })
    }
}

/// Reputation of the sender or site as judged by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderReputation {
    Low,
    Medium,
    High,
    #[default]
    Unknown,
}

impl SenderReputation {
    pub fn as_str(&self) -> &'static str {
        match self {
            SenderReputation::Low => "low",
            SenderReputation::Medium => "medium",
            SenderReputation::High => "high",
            SenderReputation::Unknown => "unknown",
        }
    }
}

impl From<&str> for SenderReputation {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => SenderReputation::Low,
            "medium" => SenderReputation::Medium,
            "high" => SenderReputation::High,
            _ => SenderReputation::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for SenderReputation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => SenderReputation::from(s.as_str()),
            _ => SenderReputation::Unknown,
        })
    }
}

/// The part of a report produced by the model.
///
/// Deserialization is lenient: absent or `null` fields take their defaults
/// and unrecognised enum strings map to `unknown`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelAssessment {
    #[serde(default, deserialize_with = "de::content_kind", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentKind>,

    #[serde(default, deserialize_with = "de::opt_string", skip_serializing_if = "Option::is_none")]
    pub creation_date_estimate: Option<String>,

    #[serde(default, deserialize_with = "de::non_negative", skip_serializing_if = "Option::is_none")]
    pub domain_age_estimate_days: Option<u64>,

    #[serde(default)]
    pub sender_reputation: SenderReputation,

    #[serde(default, deserialize_with = "de::tags")]
    pub social_engineering_indicators: Vec<String>,

    #[serde(default, deserialize_with = "de::tags")]
    pub technical_indicators: Vec<String>,

    /// Whatever integer the model returned. Not clamped.
    #[serde(default, deserialize_with = "de::score")]
    pub risk_score: i64,

    #[serde(default)]
    pub verdict: Verdict,

    #[serde(default, deserialize_with = "de::string")]
    pub explanation_technical: String,

    #[serde(default, deserialize_with = "de::string")]
    pub explanation_simple: String,
}

impl ModelAssessment {
    /// Parse the JSON object the model returned as message content.
    pub fn from_model_reply(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text.trim())?;
        if !value.is_object() {
            return Err(serde::de::Error::custom("model reply is not a JSON object"));
        }
        serde_json::from_value(value)
    }
}

/// Structured analysis result combined with provenance metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    #[serde(flatten)]
    pub assessment: ModelAssessment,

    /// Human-readable message set on failure reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    #[serde(default)]
    pub source: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub timestamp: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub error: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl RiskReport {
    /// Attach provenance to a model assessment.
    pub fn from_assessment(
        assessment: ModelAssessment,
        description: &ContentDescription,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            assessment,
            explanation: None,
            source: description.source.clone(),
            title: description.title.clone(),
            timestamp: timestamp.into(),
            error: false,
        }
    }

    /// The degraded report used whenever analysis fails.
    pub fn fallback(description: &ContentDescription, timestamp: impl Into<String>) -> Self {
        Self {
            assessment: ModelAssessment {
                content_type: Some(description.kind),
                risk_score: 0,
                verdict: Verdict::Unknown,
                ..Default::default()
            },
            explanation: Some(FALLBACK_EXPLANATION.to_string()),
            source: description.source.clone(),
            title: description.title.clone(),
            timestamp: timestamp.into(),
            error: true,
        }
    }

    pub fn verdict(&self) -> Verdict {
        self.assessment.verdict
    }

    pub fn risk_score(&self) -> i64 {
        self.assessment.risk_score
    }

    /// Current time in the format used for report timestamps.
    pub fn now_timestamp() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Lenient field deserializers for model output.
mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::types::ContentKind;

    pub fn content_kind<'de, D: Deserializer<'de>>(d: D) -> Result<Option<ContentKind>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "email" => Some(ContentKind::Email),
                "website" => Some(ContentKind::Website),
                _ => None,
            },
            _ => None,
        })
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) if !s.is_empty() && s != "null" => Some(s),
            _ => None,
        })
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        })
    }

    pub fn non_negative<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
            Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
            _ => None,
        })
    }

    pub fn score<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        match Option::<Value>::deserialize(d)? {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.round() as i64))
                .ok_or_else(|| serde::de::Error::custom("risk_score out of range")),
            Some(Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| serde::de::Error::custom("risk_score is not an integer")),
            Some(Value::Null) | None => Ok(0),
            Some(_) => Err(serde::de::Error::custom("risk_score is not a number")),
        }
    }

    pub fn tags<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        let mut out: Vec<String> = Vec::new();
        if let Some(Value::Array(items)) = Option::<Value>::deserialize(d)? {
            for item in items {
                if let Value::String(tag) = item {
                    if !tag.is_empty() && !out.contains(&tag) {
                        out.push(tag);
                    }
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
