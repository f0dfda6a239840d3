use std::collections::HashSet;

use super::{rank_descending, weights::ContentWeights};
use crate::{
    catalog::Catalog,
    models::{Course, PrecomputedSimilarity, Recommendation, RecommendationResult},
};

pub const COURSE_NOT_FOUND: &str = "course not found";
const GENERATED: &str = "Content-based recommendations generated";

/// How closely one course resembles another
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatch {
    pub score: f64,
    pub common_topics: Vec<String>,
    pub common_skills: Vec<String>,
    pub same_difficulty: bool,
    pub same_organization: bool,
}

/// Scores `other` against `target` with the weighted-sum rule, clamped to `max_score`
pub fn similarity(target: &Course, other: &Course, weights: &ContentWeights) -> SimilarityMatch {
    let common_topics = shared(&target.topics, &other.topics);
    let common_skills = shared(&target.skills, &other.skills);
    let same_difficulty = target.difficulty.same_level(other.difficulty);
    let same_organization = target.organization == other.organization;
    let same_certificate = target.certificate_type == other.certificate_type;

    let mut score = common_topics.len() as f64 * weights.shared_topic
        + common_skills.len() as f64 * weights.shared_skill;
    if same_difficulty {
        score += weights.same_difficulty;
    }
    if same_organization {
        score += weights.same_organization;
    }
    if same_certificate {
        score += weights.same_certificate;
    }

    SimilarityMatch {
        score: score.min(weights.max_score),
        common_topics,
        common_skills,
        same_difficulty,
        same_organization,
    }
}

/// Distinct values of `left` that also appear in `right`, in `left` order
fn shared(left: &[String], right: &[String]) -> Vec<String> {
    let right: HashSet<&str> = right.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    left.iter()
        .filter(|v| right.contains(v.as_str()) && seen.insert(v.as_str()))
        .cloned()
        .collect()
}

/// Recommends courses similar to `course_id`.
///
/// Stored similarities for the course take precedence; otherwise every other
/// course is scored on the fly. Equal scores keep catalog order.
pub fn recommend(
    catalog: &Catalog,
    course_id: &str,
    limit: usize,
    weights: &ContentWeights,
) -> RecommendationResult {
    let Some(target) = catalog.course(course_id) else {
        tracing::debug!(course_id, "Content-based lookup for unknown course");
        return RecommendationResult::failure(COURSE_NOT_FOUND);
    };

    if let Some(stored) = catalog.similarity_for(course_id) {
        return from_precomputed(catalog, target, stored, limit);
    }

    let mut scored: Vec<(&Course, SimilarityMatch)> = catalog
        .courses
        .iter()
        .filter(|c| c.id != target.id)
        .map(|c| (c, similarity(target, c, weights)))
        .filter(|(_, m)| m.score > 0.0)
        .collect();

    rank_descending(&mut scored, |(_, m)| m.score);

    let recommendations = scored
        .into_iter()
        .take(limit)
        .map(|(course, m)| {
            let reason = describe_match(target, &m);
            Recommendation {
                score: m.score,
                common_topics: m.common_topics,
                common_skills: m.common_skills,
                ..Recommendation::new(course.clone(), 0.0, reason)
            }
        })
        .collect();

    RecommendationResult::success(GENERATED, recommendations)
}

fn from_precomputed(
    catalog: &Catalog,
    target: &Course,
    stored: &PrecomputedSimilarity,
    limit: usize,
) -> RecommendationResult {
    let mut similar: Vec<_> = stored
        .similar_courses
        .iter()
        .filter(|s| s.course_id != target.id)
        .collect();
    rank_descending(&mut similar, |s| s.similarity_score);

    let recommendations = similar
        .into_iter()
        .filter_map(|s| {
            let Some(course) = catalog.course(&s.course_id) else {
                tracing::warn!(course_id = %s.course_id, "Stored similarity references unknown course");
                return None;
            };
            let reason = format!(
                "Shares {} topics and {} skills with \"{}\"",
                s.common_topics.len(),
                s.common_skills.len(),
                target.title
            );
            Some(Recommendation {
                common_topics: s.common_topics.clone(),
                common_skills: s.common_skills.clone(),
                ..Recommendation::new(course.clone(), s.similarity_score, reason)
            })
        })
        .take(limit)
        .collect();

    RecommendationResult::success(GENERATED, recommendations)
}

fn describe_match(target: &Course, m: &SimilarityMatch) -> String {
    let mut parts = Vec::new();
    if !m.common_topics.is_empty() {
        parts.push(format!("shared topics: {}", m.common_topics.join(", ")));
    }
    if !m.common_skills.is_empty() {
        parts.push(format!("shared skills: {}", m.common_skills.join(", ")));
    }
    if m.same_difficulty {
        parts.push(format!("same {} level", target.difficulty));
    }
    if m.same_organization && !target.organization.is_empty() {
        parts.push(format!("also offered by {}", target.organization));
    }

    if parts.is_empty() {
        format!("Similar to \"{}\"", target.title)
    } else {
        format!("Similar to \"{}\" ({})", target.title, parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, SimilarCourse};
    use crate::services::recommendations::test_support::course;

    fn weights() -> ContentWeights {
        ContentWeights::default()
    }

    #[test]
    fn test_shared_topic_and_difficulty_scenario() {
        let mut a = course("54", &["AI", "ML"], &["python"]);
        a.difficulty = Difficulty::Intermediate;
        let mut b = course("60", &["AI"], &[]);
        b.difficulty = Difficulty::Intermediate;

        let m = similarity(&a, &b, &weights());
        assert!((m.score - 0.35).abs() < 1e-9);
        assert_eq!(m.common_topics, vec!["AI".to_string()]);
        assert!(m.common_skills.is_empty());
    }

    #[test]
    fn test_score_is_clamped_to_one() {
        let a = course("1", &["a", "b", "c", "d"], &["x", "y"]);
        let b = course("2", &["a", "b", "c", "d"], &["x", "y"]);

        let m = similarity(&a, &b, &weights());
        assert_eq!(m.score, 1.0);
    }

    #[test]
    fn test_organization_and_certificate_bonus() {
        let mut a = course("1", &[], &[]);
        a.organization = "MIT".to_string();
        a.certificate_type = "Professional".to_string();
        let mut b = a.clone();
        b.id = "2".to_string();

        let m = similarity(&a, &b, &weights());
        assert!((m.score - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_equal_blank_attributes_match() {
        let mut a = course("1", &[], &[]);
        a.organization.clear();
        a.certificate_type.clear();
        let mut b = course("2", &[], &[]);
        b.organization.clear();
        b.certificate_type.clear();

        let m = similarity(&a, &b, &weights());
        assert!((m.score - 0.15).abs() < 1e-9);
        assert!(m.same_organization);

        let catalog = Catalog {
            courses: vec![a, b],
            ..Default::default()
        };
        let result = recommend(&catalog, "1", 5, &weights());
        assert_eq!(result.course_ids(), vec!["2"]);
        assert_eq!(result.recommendations[0].recommendation_reason, "Similar to \"Course 1\"");
    }

    #[test]
    fn test_unknown_course_fails() {
        let catalog = Catalog::default();
        let result = recommend(&catalog, "missing", 5, &weights());
        assert!(!result.success);
        assert_eq!(result.message, COURSE_NOT_FOUND);
    }

    #[test]
    fn test_excludes_target_and_zero_scores() {
        let catalog = Catalog {
            courses: vec![
                course("1", &["rust"], &[]),
                course("2", &["rust"], &[]),
                course("3", &["cooking"], &[]),
                course("4", &[], &["rust"]),
            ],
            ..Default::default()
        };

        let result = recommend(&catalog, "1", 10, &weights());
        assert!(result.success);
        assert_eq!(result.course_ids(), vec!["2"]);
        assert!(result.recommendations[0]
            .recommendation_reason
            .contains("shared topics: rust"));
    }

    #[test]
    fn test_ranking_and_ties_keep_catalog_order() {
        let catalog = Catalog {
            courses: vec![
                course("t", &["a", "b"], &["s"]),
                course("x", &["a"], &[]),
                course("y", &["a", "b"], &["s"]),
                course("z", &["b"], &[]),
            ],
            ..Default::default()
        };

        let result = recommend(&catalog, "t", 5, &weights());
        assert_eq!(result.course_ids(), vec!["y", "x", "z"]);

        let limited = recommend(&catalog, "t", 2, &weights());
        assert_eq!(limited.course_ids(), vec!["y", "x"]);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let catalog = Catalog {
            courses: vec![
                course("1", &["a", "b"], &["s"]),
                course("2", &["a"], &["s"]),
                course("3", &["b"], &[]),
            ],
            ..Default::default()
        };

        assert_eq!(
            recommend(&catalog, "1", 5, &weights()),
            recommend(&catalog, "1", 5, &weights())
        );
    }

    #[test]
    fn test_precomputed_similarities_take_precedence() {
        let catalog = Catalog {
            courses: vec![
                course("1", &["a"], &[]),
                course("2", &["a"], &[]),
                course("3", &[], &[]),
            ],
            similarities: vec![PrecomputedSimilarity {
                course_id: "1".to_string(),
                similar_courses: vec![
                    SimilarCourse {
                        course_id: "2".to_string(),
                        similarity_score: 0.3,
                        common_topics: vec!["a".to_string()],
                        common_skills: vec![],
                    },
                    SimilarCourse {
                        course_id: "3".to_string(),
                        similarity_score: 0.9,
                        common_topics: vec!["x".to_string(), "y".to_string()],
                        common_skills: vec!["z".to_string()],
                    },
                    SimilarCourse {
                        course_id: "1".to_string(),
                        similarity_score: 1.0,
                        common_topics: vec![],
                        common_skills: vec![],
                    },
                ],
            }],
            ..Default::default()
        };

        let result = recommend(&catalog, "1", 5, &weights());
        assert_eq!(result.course_ids(), vec!["3", "2"]);
        assert_eq!(result.recommendations[0].score, 0.9);
        assert_eq!(
            result.recommendations[0].recommendation_reason,
            "Shares 2 topics and 1 skills with \"Course 1\""
        );
    }

    #[test]
    fn test_precomputed_limit_counts_only_known_courses() {
        let stored = |id: &str, score: f64| SimilarCourse {
            course_id: id.to_string(),
            similarity_score: score,
            common_topics: vec![],
            common_skills: vec![],
        };
        let catalog = Catalog {
            courses: vec![course("1", &[], &[]), course("2", &[], &[]), course("3", &[], &[])],
            similarities: vec![PrecomputedSimilarity {
                course_id: "1".to_string(),
                similar_courses: vec![stored("404", 0.9), stored("2", 0.5), stored("3", 0.4)],
            }],
            ..Default::default()
        };

        let result = recommend(&catalog, "1", 2, &weights());
        assert_eq!(result.course_ids(), vec!["2", "3"]);
    }

    #[test]
    fn test_precomputed_skips_unknown_courses() {
        let catalog = Catalog {
            courses: vec![course("1", &[], &[])],
            similarities: vec![PrecomputedSimilarity {
                course_id: "1".to_string(),
                similar_courses: vec![SimilarCourse {
                    course_id: "404".to_string(),
                    similarity_score: 0.8,
                    common_topics: vec![],
                    common_skills: vec![],
                }],
            }],
            ..Default::default()
        };

        let result = recommend(&catalog, "1", 5, &weights());
        assert!(result.success);
        assert!(result.recommendations.is_empty());
    }
}
