//! Learning resource records and client-side filtering
//!
//! A [`LearningResource`] is the unit returned by a search. Batches are
//! produced either by the live service (after decoding) or by the
//! [`fallback`](crate::fallback) generator, and always satisfy the same
//! invariants: unique ids within the batch and enumerated type/difficulty.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of learning material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Video lecture or clip
    Video,
    /// Written article or blog post
    Article,
    /// Downloadable document, usually a paper
    Pdf,
}

impl ResourceType {
    /// All variants in canonical order
    pub const ALL: [ResourceType; 3] = [Self::Video, Self::Article, Self::Pdf];

    /// Canonical lowercase spelling used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Article => "article",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = String;

    /// Parses case-insensitively, ignoring surrounding whitespace
    ///
    /// # Examples
    ///
    /// ```
    /// use studyscout::resource::ResourceType;
    ///
    /// assert_eq!("Video".parse::<ResourceType>(), Ok(ResourceType::Video));
    /// assert!("podcast".parse::<ResourceType>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "video" => Ok(Self::Video),
            "article" => Ok(Self::Article),
            "pdf" => Ok(Self::Pdf),
            other => Err(format!("unknown resource type '{}'", other)),
        }
    }
}

/// Difficulty level of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// All variants in ascending order
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Canonical capitalized spelling used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// A single learning resource as shown to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningResource {
    /// Unique within the batch it was returned in
    pub id: String,
    pub title: String,
    /// Publisher or channel, e.g. "YouTube / CrashCourse"
    pub source: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    /// Nominally 1.0 to 5.0
    pub quality_score: f64,
    /// Free text such as "12 min" or "15 min read"
    pub duration: String,
    pub difficulty: Difficulty,
    /// Short bullet points, nominally three
    pub summary: Vec<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub tags: Vec<String>,
}

/// Client-side narrowing of a fetched batch
///
/// A `None` constraint matches everything ("All").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    pub resource_type: Option<ResourceType>,
    pub difficulty: Option<Difficulty>,
}

impl ResourceFilter {
    /// Creates a filter from optional constraints
    pub fn new(resource_type: Option<ResourceType>, difficulty: Option<Difficulty>) -> Self {
        Self {
            resource_type,
            difficulty,
        }
    }

    /// Returns true if `resource` satisfies every set constraint
    pub fn matches(&self, resource: &LearningResource) -> bool {
        let type_ok = self
            .resource_type
            .map_or(true, |t| t == resource.resource_type);
        let difficulty_ok = self.difficulty.map_or(true, |d| d == resource.difficulty);
        type_ok && difficulty_ok
    }

    /// Returns the matching records in their original order
    ///
    /// # Examples
    ///
    /// ```
    /// use studyscout::fallback::generate_with_prefix;
    /// use studyscout::resource::{ResourceFilter, ResourceType};
    ///
    /// let batch = generate_with_prefix("rust", "t");
    /// let videos = ResourceFilter::new(Some(ResourceType::Video), None).apply(&batch);
    /// assert_eq!(videos.len(), 3);
    /// ```
    pub fn apply<'a>(&self, resources: &'a [LearningResource]) -> Vec<&'a LearningResource> {
        resources.iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str, resource_type: ResourceType, difficulty: Difficulty) -> LearningResource {
        LearningResource {
            id: id.to_string(),
            title: "Sample".to_string(),
            source: "Somewhere".to_string(),
            resource_type,
            quality_score: 4.0,
            duration: "5 min".to_string(),
            difficulty,
            summary: vec!["one".to_string()],
            url: "#".to_string(),
            views: None,
            date: None,
            tags: vec![],
        }
    }

    #[test]
    fn test_resource_type_parse_case_insensitive() {
        assert_eq!("PDF".parse::<ResourceType>(), Ok(ResourceType::Pdf));
        assert_eq!(" article ".parse::<ResourceType>(), Ok(ResourceType::Article));
        assert!("".parse::<ResourceType>().is_err());
    }

    #[test]
    fn test_difficulty_parse_and_display() {
        assert_eq!("advanced".parse::<Difficulty>(), Ok(Difficulty::Advanced));
        assert_eq!(Difficulty::Intermediate.to_string(), "Intermediate");
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_serializes_wire_field_names() {
        let resource = sample("a", ResourceType::Video, Difficulty::Beginner);
        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value["type"], "video");
        assert_eq!(value["difficulty"], "Beginner");
        assert_eq!(value["qualityScore"], 4.0);
        assert!(value.get("views").is_none());
    }

    #[test]
    fn test_filter_all_keeps_everything() {
        let batch = vec![
            sample("a", ResourceType::Video, Difficulty::Beginner),
            sample("b", ResourceType::Pdf, Difficulty::Advanced),
        ];
        assert_eq!(ResourceFilter::default().apply(&batch).len(), 2);
    }

    #[test]
    fn test_filter_combines_constraints() {
        let batch = vec![
            sample("a", ResourceType::Video, Difficulty::Beginner),
            sample("b", ResourceType::Video, Difficulty::Advanced),
            sample("c", ResourceType::Pdf, Difficulty::Advanced),
        ];
        let filter = ResourceFilter::new(Some(ResourceType::Video), Some(Difficulty::Advanced));
        let kept = filter.apply(&batch);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "b");
    }
}
