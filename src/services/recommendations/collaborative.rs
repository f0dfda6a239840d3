use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

use super::{content, rank_descending, weights::ScoringWeights};
use crate::{
    catalog::Catalog,
    models::{Recommendation, RecommendationResult, User},
};

pub const USER_NOT_FOUND: &str = "user not found";
pub const NO_HISTORY: &str = "No course history available for this user";
pub const NO_SIMILAR_USERS: &str =
    "No similar users found; showing courses similar to one you have taken";
pub const NO_NEW_COURSES: &str = "No new courses found among similar users";
const GENERATED: &str = "Collaborative recommendations generated";

/// Another user together with how closely they resemble the target
#[derive(Debug, Clone, PartialEq)]
pub struct PeerSimilarity<'a> {
    pub user: &'a User,
    pub similarity: f64,
}

/// Blends interest overlap and course overlap, each normalised by the larger set
pub fn user_similarity(target: &User, other: &User, weights: &ScoringWeights) -> f64 {
    let w = &weights.collaborative;

    let target_interests: HashSet<&str> = target.interests.iter().map(String::as_str).collect();
    let other_interests: HashSet<&str> = other.interests.iter().map(String::as_str).collect();
    let interest_score = overlap_ratio(&target_interests, &other_interests) * w.interest_overlap;

    let target_courses: HashSet<&str> = target.course_ids().into_iter().collect();
    let other_courses: HashSet<&str> = other.course_ids().into_iter().collect();
    let course_score = overlap_ratio(&target_courses, &other_courses) * w.course_overlap;

    interest_score + course_score
}

fn overlap_ratio(left: &HashSet<&str>, right: &HashSet<&str>) -> f64 {
    let denominator = left.len().max(right.len());
    if denominator == 0 {
        return 0.0;
    }
    left.intersection(right).count() as f64 / denominator as f64
}

/// Every other user with positive similarity, most similar first
pub fn similar_users<'a>(
    catalog: &'a Catalog,
    target: &User,
    weights: &ScoringWeights,
) -> Vec<PeerSimilarity<'a>> {
    let mut peers: Vec<PeerSimilarity<'a>> = catalog
        .users
        .iter()
        .filter(|u| u.id != target.id)
        .map(|u| PeerSimilarity {
            user: u,
            similarity: user_similarity(target, u, weights),
        })
        .filter(|p| p.similarity > 0.0)
        .collect();

    rank_descending(&mut peers, |p| p.similarity);
    peers
}

struct Candidate<'a> {
    course_id: &'a str,
    score: f64,
    endorsed_by: Vec<&'a str>,
}

/// Recommends courses rated highly by users similar to `user_id`.
///
/// Without any similar user this falls back to content-based recommendations
/// seeded by a random course from the user's own history.
pub fn recommend<R: Rng + ?Sized>(
    catalog: &Catalog,
    user_id: &str,
    limit: usize,
    weights: &ScoringWeights,
    rng: &mut R,
) -> RecommendationResult {
    let Some(target) = catalog.user(user_id) else {
        return RecommendationResult::failure(USER_NOT_FOUND);
    };

    let peers = similar_users(catalog, target, weights);
    if peers.is_empty() {
        return fallback_to_content(catalog, target, limit, weights, rng);
    }

    tracing::debug!(user_id, peers = peers.len(), "Found similar users");

    let mut candidates: Vec<Candidate> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for peer in &peers {
        for interaction in &peer.user.course_interactions {
            if interaction.rating < weights.collaborative.min_peer_rating
                || target.has_taken(&interaction.course_id)
            {
                continue;
            }

            let slot = *index
                .entry(interaction.course_id.as_str())
                .or_insert_with(|| {
                    candidates.push(Candidate {
                        course_id: &interaction.course_id,
                        score: 0.0,
                        endorsed_by: Vec::new(),
                    });
                    candidates.len() - 1
                });

            let candidate = &mut candidates[slot];
            candidate.score += peer.similarity * interaction.rating;
            if !candidate.endorsed_by.contains(&peer.user.username.as_str()) {
                candidate.endorsed_by.push(&peer.user.username);
            }
        }
    }

    rank_descending(&mut candidates, |c| c.score);

    let recommendations: Vec<Recommendation> = candidates
        .into_iter()
        .filter_map(|c| {
            let course = catalog.course(c.course_id)?;
            let reason = format!(
                "Recommended by users with similar interests: {}",
                c.endorsed_by.join(", ")
            );
            Some(Recommendation {
                recommended_by: c.endorsed_by.iter().map(|s| s.to_string()).collect(),
                ..Recommendation::new(course.clone(), c.score, reason)
            })
        })
        .take(limit)
        .collect();

    if recommendations.is_empty() {
        return RecommendationResult::success(NO_NEW_COURSES, recommendations);
    }

    RecommendationResult::success(GENERATED, recommendations)
}

fn fallback_to_content<R: Rng + ?Sized>(
    catalog: &Catalog,
    target: &User,
    limit: usize,
    weights: &ScoringWeights,
    rng: &mut R,
) -> RecommendationResult {
    let history = target.course_ids();
    let Some(seed) = history.choose(rng) else {
        tracing::debug!(user_id = %target.id, "No similar users and no history");
        return RecommendationResult::failure(NO_HISTORY);
    };

    tracing::debug!(user_id = %target.id, seed_course = %seed, "Falling back to content-based");

    let fallback = content::recommend(catalog, seed, limit, &weights.content);
    if !fallback.success {
        return fallback;
    }

    RecommendationResult::success(NO_SIMILAR_USERS, fallback.recommendations)
}
