//! Response extraction and validation.
//!
//! Model output is an untrusted external payload. This stage recovers a
//! JSON candidate from free-form text through layered strategies, parses
//! it, and validates every field against the timeline-set schema before
//! any domain value is built. Failures are typed; nothing is silently
//! defaulted or clamped here.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::domain::decision::{Impact, MetricDimension, TimelineMetric, TimelineMetrics, Trend};

/// Soft target range for the number of timelines per generation.
///
/// Enforced by the prompt, not hard-rejected here; deviations are only
/// logged.
pub const EXPECTED_TIMELINES: std::ops::RangeInclusive<usize> = 3..=5;

/// Errors that can occur while extracting a generation result.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractionError {
    #[error("JSON parse error: {0}")]
    Parse(String),

    #[error("missing required field '{0}'")]
    MissingField(String),

    #[error("field '{field}' has wrong type: expected {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("field '{field}' out of range: {value} not in [0,100]")]
    ScoreOutOfRange { field: String, value: i64 },

    #[error("field '{field}' has unknown value '{value}'")]
    UnknownEnum { field: String, value: String },

    #[error("timelines array is empty")]
    EmptyTimelines,

    #[error("timeline '{title}' has no events")]
    EmptyEvents { title: String },
}

/// One timeline as produced by the model, validated but not yet
/// persistable (no identities, event order not yet assigned).
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTimeline {
    pub title: String,
    pub summary: String,
    pub probability: f64,
    pub metrics: TimelineMetrics,
    pub events: Vec<GeneratedEvent>,
    pub tradeoffs: Vec<String>,
    pub second_order_effects: Vec<String>,
}

/// One event as produced by the model, order not yet assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedEvent {
    pub period: String,
    pub description: String,
    pub impact: Impact,
}

/// A validated generation result.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub timelines: Vec<GeneratedTimeline>,
}

/// Extracts and validates a generation result from raw model output.
pub fn extract(raw: &str) -> Result<GenerationResult, ExtractionError> {
    let candidate = extract_json_candidate(raw);
    debug!(candidate_len = candidate.len(), "parsing generation output");

    let value: Value =
        serde_json::from_str(&candidate).map_err(|e| ExtractionError::Parse(e.to_string()))?;

    validate(&value)
}

/// Recovers a JSON candidate from free-form text.
///
/// Strategies in order, first match wins:
/// 1. inner content of a fenced code block
/// 2. first balanced `{...}` span when the text does not start with `{`
/// 3. the trimmed text verbatim
fn extract_json_candidate(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Some(inner) = extract_from_code_block(trimmed) {
        return inner;
    }

    if !trimmed.starts_with('{') {
        if let Some(start) = trimmed.find('{') {
            if let Some(span) = extract_balanced_object(trimmed, start) {
                return span;
            }
        }
    }

    trimmed.to_string()
}

/// Looks for ```json ... ``` or ``` ... ``` and returns the inner content.
fn extract_from_code_block(s: &str) -> Option<String> {
    let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

    for pattern in patterns {
        if let Some(start) = s.find(pattern) {
            let inner_start = start + pattern.len();
            if let Some(end) = s[inner_start..].find("```") {
                return Some(s[inner_start..inner_start + end].trim().to_string());
            }
        }
    }
    None
}

/// Scans forward from `start` for a balanced `{...}` span, tracking
/// string literals and escapes so braces inside strings don't count.
fn extract_balanced_object(s: &str, start: usize) -> Option<String> {
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(s[start..start + i + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

// ───────────────────────────────────────────────────────────────────
// Schema validation
// ───────────────────────────────────────────────────────────────────

fn validate(value: &Value) -> Result<GenerationResult, ExtractionError> {
    let timelines = value
        .get("timelines")
        .ok_or_else(|| ExtractionError::MissingField("timelines".to_string()))?
        .as_array()
        .ok_or_else(|| ExtractionError::WrongType {
            field: "timelines".to_string(),
            expected: "array",
        })?;

    if timelines.is_empty() {
        return Err(ExtractionError::EmptyTimelines);
    }

    if !EXPECTED_TIMELINES.contains(&timelines.len()) {
        debug!(
            count = timelines.len(),
            "timeline count outside expected 3-5 range"
        );
    }

    let timelines = timelines
        .iter()
        .enumerate()
        .map(|(i, t)| validate_timeline(t, i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GenerationResult { timelines })
}

fn validate_timeline(value: &Value, index: usize) -> Result<GeneratedTimeline, ExtractionError> {
    let at = |field: &str| format!("timelines[{}].{}", index, field);

    let title = require_string(value, "title", &at("title"))?;
    let summary = require_string(value, "summary", &at("summary"))?;
    let probability = require_number(value, "probability", &at("probability"))?;

    let metrics_value = value
        .get("metrics")
        .ok_or_else(|| ExtractionError::MissingField(at("metrics")))?;
    let metrics = validate_metrics(metrics_value, &at("metrics"))?;

    let events_value = value
        .get("events")
        .ok_or_else(|| ExtractionError::MissingField(at("events")))?
        .as_array()
        .ok_or_else(|| ExtractionError::WrongType {
            field: at("events"),
            expected: "array",
        })?;
    if events_value.is_empty() {
        return Err(ExtractionError::EmptyEvents {
            title: title.clone(),
        });
    }
    let events = events_value
        .iter()
        .enumerate()
        .map(|(j, e)| validate_event(e, &format!("{}[{}]", at("events"), j)))
        .collect::<Result<Vec<_>, _>>()?;

    let tradeoffs = require_string_array(value, "tradeoffs", &at("tradeoffs"))?;
    let second_order_effects =
        require_string_array(value, "secondOrderEffects", &at("secondOrderEffects"))?;

    Ok(GeneratedTimeline {
        title,
        summary,
        probability,
        metrics,
        events,
        tradeoffs,
        second_order_effects,
    })
}

fn validate_metrics(value: &Value, path: &str) -> Result<TimelineMetrics, ExtractionError> {
    let mut validated = Vec::with_capacity(5);
    for dimension in MetricDimension::all() {
        let field = format!("{}.{}", path, dimension.key());
        let metric_value = value
            .get(dimension.key())
            .ok_or_else(|| ExtractionError::MissingField(field.clone()))?;
        validated.push(validate_metric(metric_value, &field)?);
    }

    Ok(TimelineMetrics {
        emotional: validated[0],
        financial: validated[1],
        career: validated[2],
        relationships: validated[3],
        risk: validated[4],
    })
}

fn validate_metric(value: &Value, path: &str) -> Result<TimelineMetric, ExtractionError> {
    let score_field = format!("{}.score", path);
    let score = value
        .get("score")
        .ok_or_else(|| ExtractionError::MissingField(score_field.clone()))?
        .as_i64()
        .ok_or_else(|| ExtractionError::WrongType {
            field: score_field.clone(),
            expected: "integer",
        })?;

    if !(0..=100).contains(&score) {
        return Err(ExtractionError::ScoreOutOfRange {
            field: score_field,
            value: score,
        });
    }

    let trend_field = format!("{}.trend", path);
    let trend = match require_str(value, "trend", &trend_field)? {
        "up" => Trend::Up,
        "stable" => Trend::Stable,
        "down" => Trend::Down,
        other => {
            return Err(ExtractionError::UnknownEnum {
                field: trend_field,
                value: other.to_string(),
            })
        }
    };

    // Range already checked, the cast cannot truncate.
    Ok(TimelineMetric {
        score: score as u8,
        trend,
    })
}

fn validate_event(value: &Value, path: &str) -> Result<GeneratedEvent, ExtractionError> {
    let period = require_string(value, "period", &format!("{}.period", path))?;
    let description = require_string(value, "description", &format!("{}.description", path))?;

    let impact_field = format!("{}.impact", path);
    let impact = match require_str(value, "impact", &impact_field)? {
        "positive" => Impact::Positive,
        "neutral" => Impact::Neutral,
        "negative" => Impact::Negative,
        other => {
            return Err(ExtractionError::UnknownEnum {
                field: impact_field,
                value: other.to_string(),
            })
        }
    };

    Ok(GeneratedEvent {
        period,
        description,
        impact,
    })
}

fn require_str<'a>(value: &'a Value, key: &str, path: &str) -> Result<&'a str, ExtractionError> {
    value
        .get(key)
        .ok_or_else(|| ExtractionError::MissingField(path.to_string()))?
        .as_str()
        .ok_or_else(|| ExtractionError::WrongType {
            field: path.to_string(),
            expected: "string",
        })
}

fn require_string(value: &Value, key: &str, path: &str) -> Result<String, ExtractionError> {
    require_str(value, key, path).map(str::to_string)
}

fn require_number(value: &Value, key: &str, path: &str) -> Result<f64, ExtractionError> {
    value
        .get(key)
        .ok_or_else(|| ExtractionError::MissingField(path.to_string()))?
        .as_f64()
        .ok_or_else(|| ExtractionError::WrongType {
            field: path.to_string(),
            expected: "number",
        })
}

fn require_string_array(
    value: &Value,
    key: &str,
    path: &str,
) -> Result<Vec<String>, ExtractionError> {
    let array = value
        .get(key)
        .ok_or_else(|| ExtractionError::MissingField(path.to_string()))?
        .as_array()
        .ok_or_else(|| ExtractionError::WrongType {
            field: path.to_string(),
            expected: "array",
        })?;

    array
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| ExtractionError::WrongType {
                    field: format!("{}[{}]", path, i),
                    expected: "string",
                })
        })
        .collect()
}
