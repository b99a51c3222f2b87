use crate::catalog::Song;
use thiserror::Error;

/// Label reported back when no language filter applies.
pub const ANY_LANGUAGE: &str = "Any Language";

const ANY_LANGUAGE_ALIASES: &[&str] = &["any", "any language"];

pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Mood is required")]
    EmptyMood,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LanguageFilter {
    Any,
    /// Holds the normalized language name.
    Only(String),
}

impl LanguageFilter {
    pub fn parse(language: Option<&str>) -> LanguageFilter {
        let folded = language.map(normalize).unwrap_or_default();
        if folded.is_empty() || ANY_LANGUAGE_ALIASES.contains(&folded.as_str()) {
            LanguageFilter::Any
        } else {
            LanguageFilter::Only(folded)
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, LanguageFilter::Any)
    }

    pub fn accepts(&self, song: &Song) -> bool {
        match self {
            LanguageFilter::Any => true,
            LanguageFilter::Only(language) => song.has_language(language),
        }
    }
}

/// A normalized (mood, language) request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoodQuery {
    pub mood: String,
    pub language: LanguageFilter,
}

impl MoodQuery {
    /// Builds a query without validating it, a blank mood simply matches
    /// nothing in the exact tier.
    pub fn new(mood: &str, language: Option<&str>) -> MoodQuery {
        MoodQuery {
            mood: normalize(mood),
            language: LanguageFilter::parse(language),
        }
    }

    pub fn parse(mood: &str, language: Option<&str>) -> Result<MoodQuery, QueryError> {
        let query = MoodQuery::new(mood, language);
        if query.mood.is_empty() {
            return Err(QueryError::EmptyMood);
        }
        Ok(query)
    }
}
