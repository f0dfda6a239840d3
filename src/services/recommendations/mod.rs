//! Course recommendation strategies
//!
//! Each strategy is a pure function over a `Catalog` snapshot. `Recommender`
//! wraps them with catalog loading, result memoization and the random source
//! used by the fallback branches.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::Arc;

use crate::{
    cache::{generate_key, ResultCache},
    catalog::{Catalog, CatalogSource},
    models::RecommendationResult,
};

pub mod collaborative;
pub mod content;
pub mod hybrid;
pub mod subjects;
pub mod teacher;
pub mod weights;

pub use weights::{
    CollaborativeWeights, ContentWeights, HybridWeights, ScoringWeights, TeacherWeights,
};

pub const DEFAULT_CONTENT_LIMIT: usize = 5;
pub const DEFAULT_COLLABORATIVE_LIMIT: usize = 5;
pub const DEFAULT_HYBRID_LIMIT: usize = 8;
pub const DEFAULT_TEACHER_LIMIT: usize = 5;

/// Stable sort, highest score first; equal scores keep their input order
pub(crate) fn rank_descending<T>(items: &mut [T], score: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| score(b).total_cmp(&score(a)));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    ContentBased,
    Collaborative,
    Hybrid,
    TeacherProfile,
}

impl Strategy {
    fn as_str(&self) -> &'static str {
        match self {
            Strategy::ContentBased => "content_based",
            Strategy::Collaborative => "collaborative",
            Strategy::Hybrid => "hybrid",
            Strategy::TeacherProfile => "teacher_profile",
        }
    }
}

#[derive(Serialize)]
struct KeyParams<'a> {
    id: &'a str,
    limit: usize,
}

/// Entry point for every recommendation strategy
pub struct Recommender {
    source: Arc<dyn CatalogSource>,
    cache: Arc<ResultCache<RecommendationResult>>,
    weights: ScoringWeights,
    rng: Mutex<StdRng>,
}

impl Recommender {
    /// Creates a recommender with default weights and an entropy-seeded RNG
    pub fn new(source: Arc<dyn CatalogSource>, cache: Arc<ResultCache<RecommendationResult>>) -> Self {
        Self {
            source,
            cache,
            weights: ScoringWeights::default(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Pins the fallback course picker to a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn cache(&self) -> &Arc<ResultCache<RecommendationResult>> {
        &self.cache
    }

    /// Loads a fresh snapshot; a storage failure degrades to an empty catalog
    pub async fn load_catalog(&self) -> Catalog {
        match self.source.load().await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!(
                    source = self.source.name(),
                    error = %e,
                    "Catalog load failed, continuing with empty data"
                );
                Catalog::default()
            }
        }
    }

    pub async fn content_based(&self, course_id: &str, limit: usize) -> RecommendationResult {
        self.memoized(Strategy::ContentBased, course_id, limit, |catalog, _, weights| {
            content::recommend(catalog, course_id, limit, &weights.content)
        })
        .await
    }

    pub async fn collaborative(&self, user_id: &str, limit: usize) -> RecommendationResult {
        self.memoized(Strategy::Collaborative, user_id, limit, |catalog, rng, weights| {
            collaborative::recommend(catalog, user_id, limit, weights, rng)
        })
        .await
    }

    pub async fn hybrid(&self, user_id: &str, limit: usize) -> RecommendationResult {
        self.memoized(Strategy::Hybrid, user_id, limit, |catalog, rng, weights| {
            hybrid::recommend(catalog, user_id, limit, weights, rng)
        })
        .await
    }

    pub async fn teacher_profile(&self, user_id: &str, limit: usize) -> RecommendationResult {
        self.memoized(Strategy::TeacherProfile, user_id, limit, |catalog, _, weights| {
            teacher::recommend(catalog, user_id, limit, &weights.teacher)
        })
        .await
    }

    /// Serves from cache when possible, otherwise computes on a fresh catalog.
    ///
    /// Only successful results are cached so a transient storage fault is not
    /// remembered for a whole TTL.
    async fn memoized<F>(&self, strategy: Strategy, id: &str, limit: usize, compute: F) -> RecommendationResult
    where
        F: FnOnce(&Catalog, &mut StdRng, &ScoringWeights) -> RecommendationResult,
    {
        let key = match generate_key(strategy.as_str(), &KeyParams { id, limit }) {
            Ok(key) => Some(key),
            Err(e) => {
                tracing::warn!(error = %e, "Could not build cache key, bypassing cache");
                None
            }
        };

        if let Some(hit) = key.as_deref().and_then(|k| self.cache.get(k)) {
            tracing::debug!(strategy = strategy.as_str(), id, limit, "Cache hit");
            return hit;
        }

        let catalog = self.load_catalog().await;
        let result = {
            let mut rng = self.rng.lock();
            compute(&catalog, &mut *rng, &self.weights)
        };

        tracing::info!(
            strategy = strategy.as_str(),
            id,
            limit,
            success = result.success,
            count = result.recommendations.len(),
            "Recommendations computed"
        );

        if let (true, Some(key)) = (result.success, key) {
            self.cache.set(key, result.clone());
        }

        result
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::models::{Course, Difficulty, Interaction, User};

    /// Course with its own organization and certificate, so only topics and
    /// skills overlap unless a test sets them
    pub fn course(id: &str, topics: &[&str], skills: &[&str]) -> Course {
        Course {
            id: id.to_string(),
            title: format!("Course {}", id),
            organization: format!("Org {}", id),
            difficulty: Difficulty::Unspecified,
            topics: topics.iter().map(|s| s.to_string()).collect(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            certificate_type: format!("Certificate {}", id),
            language: String::new(),
            format: vec![],
            students_enrolled: String::new(),
            description: None,
            url: None,
        }
    }

    pub fn user(id: &str, interests: &[&str], interactions: Vec<Interaction>) -> User {
        User {
            id: id.to_string(),
            username: id.to_string(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            teaching_subject: String::new(),
            preferred_learning_style: String::new(),
            preferred_language: String::new(),
            course_interactions: interactions,
        }
    }

    /// Partially watched course with the given rating
    pub fn rated(course_id: &str, rating: f64) -> Interaction {
        Interaction {
            course_id: course_id.to_string(),
            rating,
            completion_percentage: 50.0,
            date_completed: None,
        }
    }

    /// Fully completed course, optionally dated `YYYY-MM-DD`
    pub fn completed_on(course_id: &str, day: Option<&str>) -> Interaction {
        Interaction {
            course_id: course_id.to_string(),
            rating: 5.0,
            completion_percentage: 100.0,
            date_completed: day.map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    .and_utc()
            }),
        }
    }
}
