use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

mod course;
mod recommendation;
mod user;

pub use course::{parse_enrollment_count, Course, Difficulty, PrecomputedSimilarity, SimilarCourse};
pub use recommendation::{Recommendation, RecommendationResult};
pub use user::{Interaction, User};

/// Accepts identifiers stored either as JSON strings or as bare numbers
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(n) => n.to_string(),
    })
}

/// Parses a completion date written as RFC 3339 or as a plain `YYYY-MM-DD`.
///
/// Anything else is treated as "no date" rather than rejecting the record.
pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
