//! Sport-related search terms issued against the place-search provider

/// Ordered catalog of free-text venue queries
///
/// Only the first `SearchConfig::term_fan_out` entries are queried per
/// search, which bounds the provider fan-out. The rest of the catalog is
/// intentionally never reached.
pub const SPORT_SEARCH_TERMS: &[&str] = &[
    "gym",
    "fitness center",
    "sports club",
    "tennis court",
    "basketball court",
    "football field",
    "soccer field",
    "swimming pool",
    "sports center",
    "athletic facility",
    "recreation center",
    "sports complex",
    "stadium",
    "arena",
    "golf course",
    "bowling alley",
    "martial arts",
    "yoga studio",
    "boxing gym",
    "volleyball court",
    "baseball field",
    "hockey rink",
    "skating rink",
    "track and field",
    "climbing gym",
    "dance studio",
];

/// Default number of catalog terms queried concurrently per search
pub const DEFAULT_TERM_FAN_OUT: usize = 8;
