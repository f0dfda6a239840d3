use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{deserialize_id, deserialize_optional_date};

/// A learner or teacher profile together with their course history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, alias = "teachingSubject")]
    pub teaching_subject: String,
    #[serde(default, alias = "preferredLearningStyle")]
    pub preferred_learning_style: String,
    #[serde(default, alias = "preferredLanguage")]
    pub preferred_language: String,
    #[serde(default, alias = "courseInteractions")]
    pub course_interactions: Vec<Interaction>,
}

/// One user's engagement with one course
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    #[serde(deserialize_with = "deserialize_id", alias = "courseId")]
    pub course_id: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default, alias = "completionPercentage")]
    pub completion_percentage: f64,
    #[serde(
        default,
        alias = "dateCompleted",
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_completed: Option<DateTime<Utc>>,
}

impl User {
    /// Distinct ids of every course in the interaction history, in first-seen order
    pub fn course_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.course_interactions
            .iter()
            .map(|i| i.course_id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    pub fn has_taken(&self, course_id: &str) -> bool {
        self.course_interactions
            .iter()
            .any(|i| i.course_id == course_id)
    }

    /// Interactions at or above the given completion percentage
    pub fn completed_interactions(&self, threshold: f64) -> Vec<&Interaction> {
        self.course_interactions
            .iter()
            .filter(|i| i.completion_percentage >= threshold)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interaction(course_id: &str, completion: f64) -> Interaction {
        Interaction {
            course_id: course_id.to_string(),
            rating: 4.0,
            completion_percentage: completion,
            date_completed: None,
        }
    }

    #[test]
    fn test_course_ids_deduplicates_in_order() {
        let user = User {
            id: "u1".to_string(),
            username: "ada".to_string(),
            interests: vec![],
            teaching_subject: String::new(),
            preferred_learning_style: String::new(),
            preferred_language: String::new(),
            course_interactions: vec![
                interaction("3", 100.0),
                interaction("1", 40.0),
                interaction("3", 100.0),
            ],
        };

        assert_eq!(user.course_ids(), vec!["3", "1"]);
        assert!(user.has_taken("1"));
        assert!(!user.has_taken("2"));
        assert_eq!(user.completed_interactions(90.0).len(), 2);
    }

    #[test]
    fn test_user_deserialization_camel_case() {
        let json = r#"{
            "id": 7,
            "username": "grace",
            "interests": ["math", "art"],
            "teachingSubject": "Mathematics",
            "preferredLearningStyle": "video",
            "preferredLanguage": "English",
            "courseInteractions": [
                { "courseId": "12", "rating": 5, "completionPercentage": 95, "dateCompleted": "2024-01-15" },
                { "courseId": 13, "rating": 3, "completionPercentage": 20 }
            ]
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "7");
        assert_eq!(user.teaching_subject, "Mathematics");
        assert_eq!(user.course_interactions.len(), 2);
        assert!(user.course_interactions[0].date_completed.is_some());
        assert_eq!(user.course_interactions[1].course_id, "13");
        assert_eq!(user.course_interactions[1].date_completed, None);
    }
}
