/// Hand-tuned scoring constants for every strategy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringWeights {
    pub content: ContentWeights,
    pub collaborative: CollaborativeWeights,
    pub hybrid: HybridWeights,
    pub teacher: TeacherWeights,
}

/// Weighted-sum rule for course-to-course similarity
#[derive(Debug, Clone, PartialEq)]
pub struct ContentWeights {
    /// Added once per shared topic
    pub shared_topic: f64,
    /// Added once per shared skill
    pub shared_skill: f64,
    pub same_difficulty: f64,
    pub same_organization: f64,
    pub same_certificate: f64,
    /// Upper clamp for the summed score
    pub max_score: f64,
}

impl Default for ContentWeights {
    fn default() -> Self {
        Self {
            shared_topic: 0.2,
            shared_skill: 0.3,
            same_difficulty: 0.15,
            same_organization: 0.1,
            same_certificate: 0.05,
            max_score: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollaborativeWeights {
    pub interest_overlap: f64,
    pub course_overlap: f64,
    /// Peer ratings below this do not count as endorsements
    pub min_peer_rating: f64,
}

impl Default for CollaborativeWeights {
    fn default() -> Self {
        Self {
            interest_overlap: 0.4,
            course_overlap: 0.6,
            min_peer_rating: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HybridWeights {
    /// Fraction of the limit requested from the collaborative scorer (rounded up)
    pub collaborative_share: f64,
    /// Fraction of the limit requested from the content-based scorer (rounded up)
    pub content_share: f64,
    /// Minimum completion percentage for a course to count as completed
    pub completion_threshold: f64,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            collaborative_share: 0.6,
            content_share: 0.4,
            completion_threshold: 90.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeacherWeights {
    pub subject_keyword: f64,
    pub interest_topic: f64,
    /// Bonus for Intermediate or Mixed courses
    pub approachable_difficulty: f64,
    pub learning_style: f64,
    pub language: f64,
}

impl Default for TeacherWeights {
    fn default() -> Self {
        Self {
            subject_keyword: 0.3,
            interest_topic: 0.4,
            approachable_difficulty: 0.2,
            learning_style: 0.1,
            language: 0.2,
        }
    }
}
