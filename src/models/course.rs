use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::deserialize_id;

/// Course difficulty level, ordered from easiest to hardest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Mixed,
    Advanced,
    /// Missing or unrecognised level
    #[default]
    Unspecified,
}

impl Difficulty {
    /// Two courses share a level only when both declare the same known level
    pub fn same_level(self, other: Difficulty) -> bool {
        self != Difficulty::Unspecified && self == other
    }
}

impl From<String> for Difficulty {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "beginner" => Difficulty::Beginner,
            "intermediate" => Difficulty::Intermediate,
            "mixed" => Difficulty::Mixed,
            "advanced" => Difficulty::Advanced,
            _ => Difficulty::Unspecified,
        }
    }
}

impl From<Difficulty> for String {
    fn from(level: Difficulty) -> Self {
        level.to_string()
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Mixed => "Mixed",
            Difficulty::Advanced => "Advanced",
            Difficulty::Unspecified => "",
        };
        write!(f, "{}", label)
    }
}

/// A course in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, alias = "certificateType")]
    pub certificate_type: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub format: Vec<String>,
    /// Free-form enrollment figure such as "12,345 students"
    #[serde(default, alias = "studentsEnrolled", alias = "studentsEnrolledText")]
    pub students_enrolled: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Course {
    /// Numeric enrollment parsed out of the free-form text
    pub fn enrollment_count(&self) -> u64 {
        parse_enrollment_count(&self.students_enrolled)
    }
}

/// Extracts the number embedded in a free-form enrollment string.
///
/// Every non-digit character is dropped; an empty or overflowing result counts as zero.
pub fn parse_enrollment_count(text: &str) -> u64 {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Stored content-similarity results for a single course
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrecomputedSimilarity {
    #[serde(deserialize_with = "deserialize_id", alias = "courseId")]
    pub course_id: String,
    #[serde(default, alias = "similarCourses")]
    pub similar_courses: Vec<SimilarCourse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarCourse {
    #[serde(deserialize_with = "deserialize_id", alias = "courseId")]
    pub course_id: String,
    #[serde(alias = "similarityScore")]
    pub similarity_score: f64,
    #[serde(default, alias = "commonTopics")]
    pub common_topics: Vec<String>,
    #[serde(default, alias = "commonSkills")]
    pub common_skills: Vec<String>,
}
