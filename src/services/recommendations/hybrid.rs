use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use super::{collaborative, content, rank_descending, weights::ScoringWeights};
use crate::{
    catalog::Catalog,
    models::{Interaction, Recommendation, RecommendationResult},
};

pub const POPULAR_REASON: &str = "Popular course among learners";
pub const POPULAR_FALLBACK: &str = "No completed courses yet; showing popular courses";
const GENERATED: &str = "Hybrid recommendations generated";

/// Blends collaborative and content-based results for `user_id`.
///
/// Users who have not completed anything get the most-enrolled courses instead.
pub fn recommend<R: Rng + ?Sized>(
    catalog: &Catalog,
    user_id: &str,
    limit: usize,
    weights: &ScoringWeights,
    rng: &mut R,
) -> RecommendationResult {
    let Some(user) = catalog.user(user_id) else {
        return RecommendationResult::failure(collaborative::USER_NOT_FOUND);
    };

    let completed = user.completed_interactions(weights.hybrid.completion_threshold);
    if completed.is_empty() {
        tracing::debug!(user_id, "No completed courses, serving popular courses");
        return RecommendationResult::success(POPULAR_FALLBACK, popular_courses(catalog, limit));
    }

    let seed = match most_recent_completion(&completed) {
        Some(latest) => latest.course_id.as_str(),
        None => match completed.choose(rng) {
            Some(picked) => picked.course_id.as_str(),
            None => return RecommendationResult::failure(collaborative::NO_HISTORY),
        },
    };

    let collaborative_limit = share_of(limit, weights.hybrid.collaborative_share);
    let content_limit = share_of(limit, weights.hybrid.content_share);

    tracing::debug!(
        user_id,
        seed_course = seed,
        collaborative_limit,
        content_limit,
        "Blending recommendations"
    );

    let from_peers = collaborative::recommend(catalog, user_id, collaborative_limit, weights, rng);
    let from_content = content::recommend(catalog, seed, content_limit, &weights.content);

    let blended = blend(from_peers.recommendations, from_content.recommendations, limit);
    RecommendationResult::success(GENERATED, blended)
}

/// `ceil(limit * share)`
fn share_of(limit: usize, share: f64) -> usize {
    (limit as f64 * share).ceil() as usize
}

/// Latest dated completion; the first one wins on equal dates
fn most_recent_completion<'a>(completed: &[&'a Interaction]) -> Option<&'a Interaction> {
    completed
        .iter()
        .copied()
        .filter(|i| i.date_completed.is_some())
        .fold(None::<&'a Interaction>, |latest, i| match latest {
            Some(l) if l.date_completed >= i.date_completed => Some(l),
            _ => Some(i),
        })
}

/// Collaborative results first, then content results not already present
fn blend(primary: Vec<Recommendation>, secondary: Vec<Recommendation>, limit: usize) -> Vec<Recommendation> {
    let mut seen: HashSet<String> = HashSet::new();
    primary
        .into_iter()
        .chain(secondary)
        .filter(|r| seen.insert(r.course.id.clone()))
        .take(limit)
        .collect()
}

/// Most-enrolled courses, using the number embedded in the enrollment text
pub fn popular_courses(catalog: &Catalog, limit: usize) -> Vec<Recommendation> {
    let mut ranked: Vec<(u64, _)> = catalog
        .courses
        .iter()
        .map(|c| (c.enrollment_count(), c))
        .collect();
    rank_descending(&mut ranked, |(count, _)| *count as f64);

    ranked
        .into_iter()
        .take(limit)
        .map(|(count, course)| Recommendation::new(course.clone(), count as f64, POPULAR_REASON))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::services::recommendations::test_support::{completed_on, course, rated, user};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn enrolled(id: &str, text: &str) -> crate::models::Course {
        let mut c = course(id, &[], &[]);
        c.students_enrolled = text.to_string();
        c
    }

    #[test]
    fn test_share_rounds_up() {
        assert_eq!(share_of(8, 0.6), 5);
        assert_eq!(share_of(8, 0.4), 4);
        assert_eq!(share_of(5, 0.6), 3);
        assert_eq!(share_of(1, 0.4), 1);
        assert_eq!(share_of(0, 0.6), 0);
    }

    #[test]
    fn test_unknown_user_fails() {
        let result = recommend(&Catalog::default(), "nobody", 8, &ScoringWeights::default(), &mut rng());
        assert!(!result.success);
    }

    #[test]
    fn test_popularity_fallback_without_completions() {
        let catalog = Catalog {
            courses: vec![
                enrolled("a", "1,200 students"),
                enrolled("b", "n/a"),
                enrolled("c", "45,000"),
                enrolled("d", "980"),
            ],
            users: vec![user("u1", &["math"], vec![rated("a", 5.0)])],
            ..Default::default()
        };

        let result = recommend(&catalog, "u1", 3, &ScoringWeights::default(), &mut rng());
        assert!(result.success);
        assert_eq!(result.message, POPULAR_FALLBACK);
        assert_eq!(result.course_ids(), vec!["c", "a", "d"]);
        assert!(result
            .recommendations
            .iter()
            .all(|r| r.recommendation_reason == POPULAR_REASON));
    }

    #[test]
    fn test_most_recent_completion_prefers_latest_date() {
        let undated = completed_on("1", None);
        let older = completed_on("2", Some("2023-01-01"));
        let newer = completed_on("3", Some("2024-06-30"));
        let tied = completed_on("4", Some("2024-06-30"));

        let picked = most_recent_completion(&[&undated, &older, &newer, &tied]).unwrap();
        assert_eq!(picked.course_id, "3");
        assert!(most_recent_completion(&[&undated]).is_none());
    }

    #[test]
    fn test_blend_prefers_primary_and_truncates() {
        let primary = vec![
            Recommendation::new(course("1", &[], &[]), 5.0, "peer"),
            Recommendation::new(course("2", &[], &[]), 4.0, "peer"),
        ];
        let secondary = vec![
            Recommendation::new(course("2", &[], &[]), 0.9, "content"),
            Recommendation::new(course("3", &[], &[]), 0.8, "content"),
            Recommendation::new(course("4", &[], &[]), 0.7, "content"),
        ];

        let blended = blend(primary, secondary, 3);
        let ids: Vec<&str> = blended.iter().map(|r| r.course.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(blended[1].recommendation_reason, "peer");
    }

    #[test]
    fn test_blends_collaborative_and_content() {
        let mut me: User = user("me", &["rust"], vec![completed_on("1", Some("2024-02-01"))]);
        me.course_interactions.push(completed_on("9", Some("2023-02-01")));

        let catalog = Catalog {
            courses: vec![
                course("1", &["systems"], &[]),
                course("2", &["systems"], &[]),
                course("3", &[], &[]),
                course("9", &[], &[]),
            ],
            users: vec![
                me,
                user("peer", &["rust"], vec![rated("1", 5.0), rated("3", 5.0)]),
            ],
            ..Default::default()
        };

        let result = recommend(&catalog, "me", 8, &ScoringWeights::default(), &mut rng());
        assert!(result.success);
        assert_eq!(result.message, GENERATED);
        // peer endorsement first, then courses similar to the latest completion
        assert_eq!(result.course_ids(), vec!["3", "2"]);
    }

    #[test]
    fn test_undated_completions_pick_from_completed() {
        let catalog = Catalog {
            courses: vec![course("1", &["x"], &[]), course("2", &["x"], &[])],
            users: vec![user("me", &[], vec![completed_on("1", None)])],
            ..Default::default()
        };

        let result = recommend(&catalog, "me", 4, &ScoringWeights::default(), &mut rng());
        assert!(result.success);
        assert_eq!(result.course_ids(), vec!["2"]);
    }
}
