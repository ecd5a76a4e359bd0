//! Deterministic placeholder resources
//!
//! Used whenever the live service is unavailable: no credential configured,
//! a transport failure, or output that fails to decode. Generation is pure
//! and never fails.

use crate::resource::{Difficulty, LearningResource, ResourceType};
use chrono::Utc;

/// Number of records in every generated batch
pub const BATCH_SIZE: usize = 6;

/// Upper-cases the first character of a trimmed topic
///
/// # Examples
///
/// ```
/// use studyscout::fallback::capitalize_topic;
///
/// assert_eq!(capitalize_topic("  quantum physics "), "Quantum physics");
/// assert_eq!(capitalize_topic(""), "");
/// ```
pub fn capitalize_topic(topic: &str) -> String {
    let trimmed = topic.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Generates the placeholder batch for `topic` with time-based ids
///
/// Ids look like `gen-<unix millis>-<slot>`.
pub fn generate(topic: &str) -> Vec<LearningResource> {
    let millis = Utc::now().timestamp_millis();
    generate_with_prefix(topic, &format!("gen-{}", millis))
}

/// Generates the placeholder batch with ids `<prefix>-1` through `<prefix>-6`
///
/// Slot content is fixed so that every batch mixes all resource types and
/// all difficulties.
///
/// # Examples
///
/// ```
/// use studyscout::fallback::generate_with_prefix;
///
/// let batch = generate_with_prefix("rust", "demo");
/// assert_eq!(batch.len(), 6);
/// assert_eq!(batch[0].id, "demo-1");
/// assert!(batch[0].title.contains("Rust"));
/// ```
pub fn generate_with_prefix(topic: &str, prefix: &str) -> Vec<LearningResource> {
    let t = capitalize_topic(topic);
    let id = |slot: usize| format!("{}-{}", prefix, slot);

    vec![
        LearningResource {
            id: id(1),
            title: format!("Introduction to {}: A Comprehensive Guide", t),
            source: "YouTube / CrashCourse".to_string(),
            resource_type: ResourceType::Video,
            quality_score: 4.8,
            duration: "12 min".to_string(),
            difficulty: Difficulty::Beginner,
            summary: vec![
                format!("Core concepts of {} explained", t),
                format!("Real-world examples and applications of {}", t),
                format!("Historical context and future outlook for {}", t),
            ],
            url: "#".to_string(),
            views: Some("850k".to_string()),
            date: Some("1 year ago".to_string()),
            tags: [vec![t.clone()], text(&["Education", "Basics"])].concat(),
        },
        LearningResource {
            id: id(2),
            title: format!("Advanced {} Techniques and Best Practices", t),
            source: "Medium / TechDaily".to_string(),
            resource_type: ResourceType::Article,
            quality_score: 4.5,
            duration: "8 min read".to_string(),
            difficulty: Difficulty::Advanced,
            summary: vec![
                format!("Deep dive into complex {} methodologies", t),
                format!("Optimization strategies for {}", t),
                format!("Expert {} tips for professionals", t),
            ],
            url: "#".to_string(),
            views: Some("12k".to_string()),
            date: Some("3 weeks ago".to_string()),
            tags: [vec![t.clone()], text(&["Advanced", "Guide"])].concat(),
        },
        LearningResource {
            id: id(3),
            title: format!("Research Paper: The Future of {}", t),
            source: "University Research PDF".to_string(),
            resource_type: ResourceType::Pdf,
            quality_score: 4.9,
            duration: "35 min read".to_string(),
            difficulty: Difficulty::Intermediate,
            summary: vec![
                format!("Academic analysis of {} trends", t),
                format!("Statistical data and case studies on {}", t),
                format!("Peer-reviewed findings about {}", t),
            ],
            url: "#".to_string(),
            views: None,
            date: Some("2023".to_string()),
            tags: [vec![t.clone()], text(&["Research", "Academic"])].concat(),
        },
        LearningResource {
            id: id(4),
            title: format!("{} in 100 Seconds", t),
            source: "YouTube / Fireship".to_string(),
            resource_type: ResourceType::Video,
            quality_score: 4.7,
            duration: "2 min".to_string(),
            difficulty: Difficulty::Beginner,
            summary: vec![
                format!("Rapid-fire overview of {}", t),
                format!("Key {} syntax and concepts", t),
                format!("Quick start guide to {}", t),
            ],
            url: "#".to_string(),
            views: Some("1.5M".to_string()),
            date: Some("5 months ago".to_string()),
            tags: [vec![t.clone()], text(&["Quick", "Overview"])].concat(),
        },
        LearningResource {
            id: id(5),
            title: format!("Mastering {}: Full Course", t),
            source: "FreeCodeCamp".to_string(),
            resource_type: ResourceType::Video,
            quality_score: 4.9,
            duration: "4 hours".to_string(),
            difficulty: Difficulty::Intermediate,
            summary: vec![
                format!("Complete {} curriculum", t),
                format!("Hands-on {} projects", t),
                format!("{} certification preparation", t),
            ],
            url: "#".to_string(),
            views: Some("3.2M".to_string()),
            date: Some("2 years ago".to_string()),
            tags: [vec![t.clone()], text(&["Course", "Full"])].concat(),
        },
        LearningResource {
            id: id(6),
            title: format!("Critical Analysis of {} Theory", t),
            source: "Academic Journal".to_string(),
            resource_type: ResourceType::Article,
            quality_score: 4.4,
            duration: "15 min read".to_string(),
            difficulty: Difficulty::Advanced,
            summary: vec![
                format!("Critique of the theoretical framework behind {}", t),
                format!("Alternative perspectives on {}", t),
                format!("Summary of the modern {} debate", t),
            ],
            url: "#".to_string(),
            views: Some("5k".to_string()),
            date: Some("1 month ago".to_string()),
            tags: [vec![t.clone()], text(&["Theory", "Analysis"])].concat(),
        },
    ]
}

fn text(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Placeholder bullets returned when a summary cannot be requested live
pub fn simulated_summary() -> Vec<String> {
    vec![
        "Simulated AI summary point 1.".to_string(),
        "Simulated AI summary point 2.".to_string(),
        "Simulated AI summary point 3.".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_batch_has_six_unique_ids() {
        let batch = generate("graph theory");
        assert_eq!(batch.len(), BATCH_SIZE);
        let ids: HashSet<_> = batch.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), BATCH_SIZE);
        assert!(batch.iter().all(|r| r.id.starts_with("gen-")));
    }

    #[test]
    fn test_every_text_field_mentions_topic() {
        for topic in ["graph theory", "Rust", "machine learning", "x"] {
            let needle = capitalize_topic(topic).to_lowercase();
            for resource in generate(topic) {
                assert!(resource.title.to_lowercase().contains(&needle));
                assert!(resource.tags.iter().any(|t| t.to_lowercase().contains(&needle)));
                assert!(resource
                    .summary
                    .iter()
                    .all(|s| s.to_lowercase().contains(&needle)));
            }
        }
    }

    #[test]
    fn test_slot_policy_is_fixed() {
        let batch = generate_with_prefix("chemistry", "slot");
        let types: Vec<_> = batch.iter().map(|r| r.resource_type).collect();
        let difficulties: Vec<_> = batch.iter().map(|r| r.difficulty).collect();
        assert_eq!(
            types,
            vec![
                ResourceType::Video,
                ResourceType::Article,
                ResourceType::Pdf,
                ResourceType::Video,
                ResourceType::Video,
                ResourceType::Article,
            ]
        );
        assert_eq!(
            difficulties,
            vec![
                Difficulty::Beginner,
                Difficulty::Advanced,
                Difficulty::Intermediate,
                Difficulty::Beginner,
                Difficulty::Intermediate,
                Difficulty::Advanced,
            ]
        );
        assert_eq!(batch[3].title, "Chemistry in 100 Seconds");
        assert_eq!(batch[5].id, "slot-6");
    }

    #[test]
    fn test_batch_spans_all_types_and_difficulties() {
        let batch = generate("Quantum Physics");
        for t in ResourceType::ALL {
            assert!(batch.iter().any(|r| r.resource_type == t));
        }
        for d in Difficulty::ALL {
            assert!(batch.iter().any(|r| r.difficulty == d));
        }
    }

    #[test]
    fn test_quality_scores_in_nominal_range() {
        assert!(generate("art")
            .iter()
            .all(|r| (1.0..=5.0).contains(&r.quality_score)));
    }

    #[test]
    fn test_capitalize_topic_handles_unicode() {
        assert_eq!(capitalize_topic("ética"), "Ética");
        assert_eq!(capitalize_topic("   "), "");
    }
}
