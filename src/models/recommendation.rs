use serde::{Deserialize, Serialize};

use super::Course;

/// A recommended course with the scoring details that produced it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    #[serde(flatten)]
    pub course: Course,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_topics: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_skills: Vec<String>,
    /// Usernames of similar users who rated the course highly
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_by: Vec<String>,
    pub recommendation_reason: String,
}

impl Recommendation {
    pub fn new(course: Course, score: f64, reason: impl Into<String>) -> Self {
        Self {
            course,
            score,
            common_topics: Vec::new(),
            common_skills: Vec::new(),
            recommended_by: Vec::new(),
            recommendation_reason: reason.into(),
        }
    }
}

/// Outcome of a single recommendation request.
///
/// Lookups that cannot be served (unknown ids, empty history) come back as
/// `success: false` with a user-facing message instead of an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    pub success: bool,
    pub message: String,
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationResult {
    pub fn success(message: impl Into<String>, recommendations: Vec<Recommendation>) -> Self {
        Self {
            success: true,
            message: message.into(),
            recommendations,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            recommendations: Vec::new(),
        }
    }

    pub fn course_ids(&self) -> Vec<&str> {
        self.recommendations
            .iter()
            .map(|r| r.course.id.as_str())
            .collect()
    }
}
