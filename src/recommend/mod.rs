mod engine;
mod flavor;
mod query;
mod similar;

pub use engine::{CascadeMode, MatchTier, Recommendation, RecommendationEngine};
pub use flavor::{flavor_lines, flavor_text};
pub use query::{normalize, LanguageFilter, MoodQuery, QueryError, ANY_LANGUAGE};
pub use similar::similar_moods;
