//! Resource batch prompt and decoder
//!
//! The prompt spells out the exact record schema; the decoder is the
//! boundary between untrusted model text and [`LearningResource`] values.
//! Anything that violates the schema is reported as a [`DecodeError`] so the
//! gateway can fall back to generated records.

use super::{extract_array_span, strip_code_fences};
use crate::error::DecodeError;
use crate::fallback::BATCH_SIZE;
use crate::resource::{Difficulty, LearningResource, ResourceType};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

const MIN_QUALITY: f64 = 1.0;
const MAX_QUALITY: f64 = 5.0;

/// Generates the structured-output prompt for `topic`
///
/// # Examples
///
/// ```
/// use studyscout::prompts::generate_resource_prompt;
///
/// let prompt = generate_resource_prompt("Linear Algebra");
/// assert!(prompt.contains("\"Linear Algebra\""));
/// assert!(prompt.contains("\"qualityScore\""));
/// ```
pub fn generate_resource_prompt(topic: &str) -> String {
    format!(
        r#"Generate {count} high-quality educational resources for the topic "{topic}".
Include a mix of 'video', 'article', and 'pdf' types.
Ensure strict JSON output matching the following schema array:
[{{
  "id": "string",
  "title": "string",
  "source": "string (e.g. YouTube Channel, Blog Name, University)",
  "type": "video" | "article" | "pdf",
  "qualityScore": number (1.0 to 5.0),
  "duration": "string (e.g. '10 min' or '15 min read')",
  "difficulty": "Beginner" | "Intermediate" | "Advanced",
  "summary": ["string", "string", "string"],
  "url": "string (placeholder '#')",
  "views": "string (optional, e.g. '1.2M')",
  "date": "string (e.g. '1 year ago')",
  "tags": ["string"]
}}]"#,
        count = BATCH_SIZE,
        topic = topic.trim()
    )
}

/// A record exactly as the model produced it
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResource {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    source: Option<Value>,
    #[serde(default, rename = "type")]
    resource_type: Option<String>,
    #[serde(default)]
    quality_score: Option<Value>,
    #[serde(default)]
    duration: Option<Value>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    summary: Option<Vec<Value>>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    views: Option<Value>,
    #[serde(default)]
    date: Option<Value>,
    #[serde(default)]
    tags: Option<Vec<Value>>,
}

impl RawResource {
    fn validate(self, index: usize) -> Result<LearningResource, DecodeError> {
        let violation = |reason: String| DecodeError::SchemaViolation { index, reason };

        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| violation("missing title".to_string()))?;

        let resource_type = self
            .resource_type
            .ok_or_else(|| violation("missing type".to_string()))?
            .parse::<ResourceType>()
            .map_err(violation)?;

        let difficulty = self
            .difficulty
            .ok_or_else(|| violation("missing difficulty".to_string()))?
            .parse::<Difficulty>()
            .map_err(violation)?;

        let quality_score = match self.quality_score {
            None | Some(Value::Null) => MIN_QUALITY,
            Some(value) => number_from(&value)
                .ok_or_else(|| violation(format!("qualityScore is not a number: {}", value)))?,
        }
        .clamp(MIN_QUALITY, MAX_QUALITY);

        Ok(LearningResource {
            id: self.id.as_ref().and_then(text_from).unwrap_or_default(),
            title,
            source: self.source.as_ref().and_then(text_from).unwrap_or_default(),
            resource_type,
            quality_score,
            duration: self.duration.as_ref().and_then(text_from).unwrap_or_default(),
            difficulty,
            summary: text_list(self.summary),
            url: self
                .url
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| "#".to_string()),
            views: self.views.as_ref().and_then(text_from),
            date: self.date.as_ref().and_then(text_from),
            tags: text_list(self.tags),
        })
    }
}

/// Reads a string or number as non-blank text
fn text_from(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Keeps the non-blank string and number entries of a list
fn text_list(values: Option<Vec<Value>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .iter()
        .filter_map(text_from)
        .collect()
}

/// Reads a number or numeric string as a finite float
fn number_from(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Locates the record array inside the reply text
fn locate_records(text: &str) -> Result<Vec<Value>, DecodeError> {
    let body = strip_code_fences(text);
    if body.is_empty() {
        return Err(DecodeError::EmptyResponse);
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(Value::Object(mut map)) => match map.remove("resources") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(DecodeError::InvalidJson(
                "expected an array of resources".to_string(),
            )),
        },
        Ok(other) => Err(DecodeError::InvalidJson(format!(
            "expected an array, got {}",
            other
        ))),
        Err(_) => {
            let span = extract_array_span(body).ok_or(DecodeError::NoArray)?;
            match serde_json::from_str::<Value>(span) {
                Ok(Value::Array(items)) => Ok(items),
                Ok(_) => Err(DecodeError::NoArray),
                Err(e) => Err(DecodeError::InvalidJson(e.to_string())),
            }
        }
    }
}

/// Decodes a model reply into a validated batch
///
/// Missing ids are backfilled and duplicate ids repaired with
/// `ai-<unix millis>-<index>`.
///
/// # Errors
///
/// Returns a [`DecodeError`] when the text holds no JSON array, the array is
/// empty, or any record violates the schema
///
/// # Examples
///
/// ```
/// use studyscout::prompts::decode_resources;
///
/// let text = r#"[{"title": "Intro", "type": "Video", "difficulty": "beginner"}]"#;
/// let batch = decode_resources(text).unwrap();
/// assert_eq!(batch[0].url, "#");
/// assert!(batch[0].id.starts_with("ai-"));
///
/// assert!(decode_resources("not json at all").is_err());
/// ```
pub fn decode_resources(text: &str) -> Result<Vec<LearningResource>, DecodeError> {
    decode_resources_with_stamp(text, Utc::now().timestamp_millis())
}

pub(crate) fn decode_resources_with_stamp(
    text: &str,
    stamp: i64,
) -> Result<Vec<LearningResource>, DecodeError> {
    let items = locate_records(text)?;
    if items.is_empty() {
        return Err(DecodeError::EmptyBatch);
    }

    let mut resources = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let raw: RawResource =
                serde_json::from_value(item).map_err(|e| DecodeError::SchemaViolation {
                    index,
                    reason: e.to_string(),
                })?;
            raw.validate(index)
        })
        .collect::<Result<Vec<_>, _>>()?;

    assign_unique_ids(&mut resources, stamp);
    Ok(resources)
}

fn assign_unique_ids(resources: &mut [LearningResource], stamp: i64) {
    let mut seen: HashSet<String> = HashSet::new();
    for (index, resource) in resources.iter_mut().enumerate() {
        if resource.id.is_empty() || seen.contains(&resource.id) {
            let mut candidate = format!("ai-{}-{}", stamp, index);
            let mut attempt = 1;
            while seen.contains(&candidate) {
                candidate = format!("ai-{}-{}-{}", stamp, index, attempt);
                attempt += 1;
            }
            tracing::debug!(
                "Assigned id {} to record {} (was {:?})",
                candidate,
                index,
                resource.id
            );
            resource.id = candidate;
        }
        seen.insert(resource.id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, resource_type: &str, difficulty: &str) -> Value {
        serde_json::json!({
            "id": id,
            "title": "Wave Functions",
            "source": "MIT OCW",
            "type": resource_type,
            "qualityScore": 4.6,
            "duration": "20 min",
            "difficulty": difficulty,
            "summary": ["a", "b", "c"],
            "url": "https://example.com",
            "views": "1.2M",
            "date": "2 years ago",
            "tags": ["Quantum"]
        })
    }

    #[test]
    fn test_prompt_describes_enums() {
        let prompt = generate_resource_prompt("Optics");
        assert!(prompt.contains("\"video\" | \"article\" | \"pdf\""));
        assert!(prompt.contains("\"Beginner\" | \"Intermediate\" | \"Advanced\""));
        assert!(prompt.starts_with("Generate 6 high-quality"));
    }

    #[test]
    fn test_decode_valid_batch() {
        let text = serde_json::to_string(&vec![
            record("r1", "video", "Beginner"),
            record("r2", "pdf", "Advanced"),
        ])
        .unwrap();
        let batch = decode_resources_with_stamp(&text, 7).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].id, "r1");
        assert_eq!(batch[1].resource_type, ResourceType::Pdf);
        assert_eq!(batch[0].views.as_deref(), Some("1.2M"));
        assert_eq!(batch[0].summary.len(), 3);
    }

    #[test]
    fn test_decode_coerces_enum_case() {
        let text = serde_json::to_string(&vec![record("x", "ARTICLE", "intermediate")]).unwrap();
        let batch = decode_resources_with_stamp(&text, 1).unwrap();
        assert_eq!(batch[0].resource_type, ResourceType::Article);
        assert_eq!(batch[0].difficulty, Difficulty::Intermediate);
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        let text = serde_json::to_string(&vec![
            record("a", "video", "Beginner"),
            record("b", "podcast", "Beginner"),
        ])
        .unwrap();
        let err = decode_resources_with_stamp(&text, 1).unwrap_err();
        assert!(matches!(err, DecodeError::SchemaViolation { index: 1, .. }));
    }

    #[test]
    fn test_decode_rejects_unknown_difficulty() {
        let text = serde_json::to_string(&vec![record("a", "video", "Expert")]).unwrap();
        assert!(decode_resources_with_stamp(&text, 1).is_err());
    }

    #[test]
    fn test_decode_backfills_missing_and_duplicate_ids() {
        let mut missing = record("", "video", "Beginner");
        missing.as_object_mut().unwrap().remove("id");
        let text = serde_json::to_string(&vec![
            missing,
            record("dup", "pdf", "Advanced"),
            record("dup", "article", "Intermediate"),
            record("", "video", "Beginner"),
        ])
        .unwrap();
        let batch = decode_resources_with_stamp(&text, 42).unwrap();
        let ids: Vec<_> = batch.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["ai-42-0", "dup", "ai-42-2", "ai-42-3"]);
    }

    #[test]
    fn test_decode_repair_avoids_collision_with_model_ids() {
        let text = serde_json::to_string(&vec![
            record("ai-5-1", "video", "Beginner"),
            record("ai-5-1", "video", "Beginner"),
        ])
        .unwrap();
        let batch = decode_resources_with_stamp(&text, 5).unwrap();
        assert_eq!(batch[0].id, "ai-5-1");
        assert_eq!(batch[1].id, "ai-5-1-1");
    }

    #[test]
    fn test_decode_numeric_id_and_string_score() {
        let text = r#"[{"id": 17, "title": "T", "type": "pdf", "difficulty": "Advanced", "qualityScore": "9.5"}]"#;
        let batch = decode_resources_with_stamp(text, 1).unwrap();
        assert_eq!(batch[0].id, "17");
        assert_eq!(batch[0].quality_score, 5.0);
        assert!(batch[0].tags.is_empty());
    }

    #[test]
    fn test_decode_rejects_non_finite_score() {
        for score in ["\"NaN\"", "\"inf\"", "\"-Infinity\""] {
            let text = format!(
                r#"[{{"title": "T", "type": "video", "difficulty": "Beginner", "qualityScore": {}}}]"#,
                score
            );
            let err = decode_resources_with_stamp(&text, 1).unwrap_err();
            assert!(
                matches!(err, DecodeError::SchemaViolation { index: 0, .. }),
                "score {} should be rejected, got {:?}",
                score,
                err
            );
        }
    }

    #[test]
    fn test_decoded_scores_stay_in_range() {
        let text = r#"[
            {"title": "A", "type": "video", "difficulty": "Beginner", "qualityScore": -3},
            {"title": "B", "type": "video", "difficulty": "Beginner", "qualityScore": 1e308},
            {"title": "C", "type": "video", "difficulty": "Beginner", "qualityScore": " 4.25 "}
        ]"#;
        let scores: Vec<f64> = decode_resources_with_stamp(text, 1)
            .unwrap()
            .iter()
            .map(|r| r.quality_score)
            .collect();
        assert_eq!(scores, vec![1.0, 5.0, 4.25]);
    }

    #[test]
    fn test_decode_numeric_text_fields() {
        let text = r#"[{"id": "a", "title": "Attention Is All You Need", "source": 42,
            "type": "pdf", "difficulty": "Advanced", "duration": 45, "date": 2017,
            "views": 1200, "summary": ["Transformers", 3, null, " "], "tags": ["NLP", 2017]}]"#;
        let batch = decode_resources_with_stamp(text, 1).unwrap();
        let resource = &batch[0];
        assert_eq!(resource.date.as_deref(), Some("2017"));
        assert_eq!(resource.views.as_deref(), Some("1200"));
        assert_eq!(resource.duration, "45");
        assert_eq!(resource.source, "42");
        assert_eq!(resource.summary, vec!["Transformers", "3"]);
        assert_eq!(resource.tags, vec!["NLP", "2017"]);
    }

    #[test]
    fn test_decode_fenced_and_wrapped_text() {
        let fenced = "```json\n[{\"title\": \"T\", \"type\": \"video\", \"difficulty\": \"Beginner\"}]\n```";
        assert_eq!(decode_resources_with_stamp(fenced, 1).unwrap().len(), 1);

        let chatty = "Sure! Here are resources: [{\"title\": \"T\", \"type\": \"video\", \"difficulty\": \"Beginner\"}] Hope it helps.";
        assert_eq!(decode_resources_with_stamp(chatty, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_decode_object_with_resources_key() {
        let text = r#"{"resources": [{"title": "T", "type": "video", "difficulty": "Beginner"}]}"#;
        assert_eq!(decode_resources_with_stamp(text, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_decode_failures() {
        assert_eq!(
            decode_resources_with_stamp("   ", 1).unwrap_err(),
            DecodeError::EmptyResponse
        );
        assert_eq!(
            decode_resources_with_stamp("[]", 1).unwrap_err(),
            DecodeError::EmptyBatch
        );
        assert_eq!(
            decode_resources_with_stamp("no records here", 1).unwrap_err(),
            DecodeError::NoArray
        );
        assert!(matches!(
            decode_resources_with_stamp("[{\"title\": }]", 1).unwrap_err(),
            DecodeError::InvalidJson(_)
        ));
        assert!(matches!(
            decode_resources_with_stamp("42", 1).unwrap_err(),
            DecodeError::InvalidJson(_)
        ));
    }

    #[test]
    fn test_decode_missing_title_is_violation() {
        let text = r#"[{"type": "video", "difficulty": "Beginner"}]"#;
        assert!(matches!(
            decode_resources_with_stamp(text, 1).unwrap_err(),
            DecodeError::SchemaViolation { index: 0, .. }
        ));
    }
}
