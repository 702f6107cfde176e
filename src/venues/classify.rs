//! Sport classification from place names and search terms
//!
//! Matching is an explicit ordered table so the priority between
//! overlapping keywords stays auditable and testable on its own.

/// Keyword table evaluated top to bottom
///
/// The first row whose keyword is a substring of the lower-cased place
/// name or the lower-cased originating search term wins.
const SPORT_KEYWORDS: &[(&str, &str)] = &[
    ("tennis", "tennis"),
    ("basketball", "basketball"),
    ("soccer", "soccer"),
    ("football", "soccer"),
    ("swimming", "swimming"),
    ("pool", "swimming"),
    ("gym", "gym"),
    ("fitness", "gym"),
    ("golf", "golf"),
    ("baseball", "baseball"),
    ("volleyball", "volleyball"),
    ("boxing", "boxing"),
    ("martial", "martial arts"),
    ("yoga", "yoga"),
    ("dance", "dance"),
    ("climbing", "climbing"),
    ("bowling", "bowling"),
    ("hockey", "ice hockey"),
    ("skating", "skating"),
    ("track", "running"),
    ("stadium", "soccer"),
    ("arena", "soccer"),
];

/// Resolve the sport category for a place name and its originating search term
#[must_use]
pub fn classify_sport(name: &str, search_term: &str) -> &'static str {
    let name = name.to_lowercase();
    let term = search_term.to_lowercase();

    for (keyword, sport) in SPORT_KEYWORDS {
        if name.contains(keyword) || term.contains(keyword) {
            return sport;
        }
    }

    // Default based on the search term alone
    if term == "gym" || term == "fitness center" {
        "gym"
    } else {
        "sports"
    }
}

/// Fixed description template keyed by resolved sport category
#[must_use]
pub fn describe_sport(sport: &str) -> String {
    match sport {
        "gym" => {
            "Fitness center offering various workout equipment and training programs".to_string()
        }
        "tennis" => "Tennis facility with courts available for play".to_string(),
        "swimming" => "Swimming facility with pool access and aquatic programs".to_string(),
        "soccer" => "Football/soccer facility with fields available for play".to_string(),
        "basketball" => "Basketball facility with courts available for play".to_string(),
        "golf" => "Golf facility with course access and equipment".to_string(),
        _ => format!("Sports facility offering {sport} activities and programs"),
    }
}
