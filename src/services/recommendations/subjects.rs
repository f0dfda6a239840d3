use std::collections::HashSet;

/// Search keywords associated with a teaching subject
pub fn subject_keywords(subject: &str) -> &'static [&'static str] {
    match subject.trim().to_lowercase().as_str() {
        "computer science" => &[
            "programming",
            "algorithms",
            "data",
            "software",
            "coding",
            "computer",
        ],
        "mathematics" | "math" => &["math", "algebra", "calculus", "statistics", "geometry"],
        "physics" => &["physics", "mechanics", "quantum", "energy"],
        "chemistry" => &["chemistry", "chemical", "molecular", "organic"],
        "biology" => &["biology", "genetics", "ecology", "life science"],
        "english" | "literature" => &["writing", "literature", "grammar", "english"],
        "history" => &["history", "civilization", "historical"],
        "art" => &["art", "design", "drawing", "painting"],
        "music" => &["music", "composition", "instrument"],
        "business" => &["business", "management", "marketing", "finance"],
        "economics" => &["economics", "markets", "finance", "policy"],
        "psychology" => &["psychology", "behavior", "mind", "cognitive"],
        "data science" => &["data", "machine learning", "statistics", "analytics", "python"],
        _ => &[],
    }
}

/// The raw subject plus its table keywords, lowercased and de-duplicated.
///
/// A blank subject yields no keywords at all.
pub fn keyword_set(subject: &str) -> Vec<String> {
    let subject = subject.trim();
    if subject.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    std::iter::once(subject.to_lowercase())
        .chain(subject_keywords(subject).iter().map(|k| k.to_string()))
        .filter(|k| seen.insert(k.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_subject_includes_raw_subject() {
        let keywords = keyword_set("Computer Science");
        assert_eq!(keywords[0], "computer science");
        assert!(keywords.contains(&"algorithms".to_string()));
    }

    #[test]
    fn test_unknown_subject_falls_back_to_itself() {
        assert_eq!(keyword_set("Underwater Basketry"), vec!["underwater basketry"]);
    }

    #[test]
    fn test_duplicates_removed() {
        let keywords = keyword_set("Math");
        assert_eq!(keywords.iter().filter(|k| k.as_str() == "math").count(), 1);
    }

    #[test]
    fn test_blank_subject_has_no_keywords() {
        assert!(keyword_set("   ").is_empty());
    }
}
