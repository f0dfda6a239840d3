use super::{collaborative::USER_NOT_FOUND, rank_descending, subjects::keyword_set, weights::TeacherWeights};
use crate::{
    catalog::Catalog,
    models::{Course, Difficulty, Recommendation, RecommendationResult, User},
};

const GENERATED: &str = "Teacher recommendations generated";
const DEFAULT_REASON: &str = "Recommended for your teaching profile";

/// Which profile signals fired for one course
#[derive(Debug, Default)]
struct ProfileMatch {
    score: f64,
    keywords: Vec<String>,
    interests: Vec<String>,
    language: Option<String>,
}

fn score_course(
    course: &Course,
    user: &User,
    keywords: &[String],
    weights: &TeacherWeights,
) -> ProfileMatch {
    let mut m = ProfileMatch::default();

    let title = course.title.to_lowercase();
    let description = course
        .description
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    for keyword in keywords {
        if title.contains(keyword.as_str()) || description.contains(keyword.as_str()) {
            m.score += weights.subject_keyword;
            m.keywords.push(keyword.clone());
        }
    }

    let topics: Vec<String> = course.topics.iter().map(|t| t.to_lowercase()).collect();
    for interest in &user.interests {
        let needle = interest.trim().to_lowercase();
        if !needle.is_empty() && topics.iter().any(|t| t.contains(&needle)) {
            m.score += weights.interest_topic;
            m.interests.push(interest.clone());
        }
    }

    if matches!(course.difficulty, Difficulty::Intermediate | Difficulty::Mixed) {
        m.score += weights.approachable_difficulty;
    }

    let style = user.preferred_learning_style.trim().to_lowercase();
    if !style.is_empty()
        && course
            .format
            .iter()
            .any(|f| f.to_lowercase().contains(&style))
    {
        m.score += weights.learning_style;
    }

    let language = user.preferred_language.trim();
    if !language.is_empty() && course.language.trim().to_lowercase() == language.to_lowercase() {
        m.score += weights.language;
        m.language = Some(course.language.clone());
    }

    m
}

fn describe(m: &ProfileMatch) -> String {
    let mut parts = Vec::new();
    if !m.keywords.is_empty() {
        parts.push(format!("Matches your subject ({})", m.keywords.join(", ")));
    }
    if !m.interests.is_empty() {
        parts.push(format!("Related to your interests ({})", m.interests.join(", ")));
    }
    if let Some(language) = &m.language {
        parts.push(format!("Taught in {}", language));
    }

    if parts.is_empty() {
        DEFAULT_REASON.to_string()
    } else {
        parts.join("; ")
    }
}

/// Keyword-matches a teacher's subject, interests and preferences against
/// courses they have not taken yet.
pub fn recommend(
    catalog: &Catalog,
    user_id: &str,
    limit: usize,
    weights: &TeacherWeights,
) -> RecommendationResult {
    let Some(user) = catalog.user(user_id) else {
        return RecommendationResult::failure(USER_NOT_FOUND);
    };

    let keywords = keyword_set(&user.teaching_subject);

    let mut scored: Vec<(&Course, ProfileMatch)> = catalog
        .courses
        .iter()
        .filter(|c| !user.has_taken(&c.id))
        .map(|c| (c, score_course(c, user, &keywords, weights)))
        .filter(|(_, m)| m.score > 0.0)
        .collect();

    rank_descending(&mut scored, |(_, m)| m.score);

    let recommendations = scored
        .into_iter()
        .take(limit)
        .map(|(course, m)| Recommendation::new(course.clone(), m.score, describe(&m)))
        .collect();

    RecommendationResult::success(GENERATED, recommendations)
}
