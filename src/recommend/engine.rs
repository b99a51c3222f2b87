//! The recommendation cascade.
//!
//! A query is answered by collecting candidates through a sequence of
//! progressively looser tiers, then shuffling them and keeping the first
//! `count`. Which tiers run depends on the [`CascadeMode`].

use super::{similar_moods, LanguageFilter, MoodQuery};
use crate::catalog::{Catalog, Song};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CascadeMode {
    /// Stops at the first tier that finds something and never leaves the
    /// requested language.
    #[default]
    Strict,

    /// Keeps accumulating looser tiers until enough candidates are found.
    Widening,
}

/// The loosest tier that contributed candidates to a recommendation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchTier {
    Exact,
    SimilarMood,
    LanguageOnly,
    MoodAnyLanguage,
    AnyCatalog,
    NoMatch,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::SimilarMood => "similarMood",
            MatchTier::LanguageOnly => "languageOnly",
            MatchTier::MoodAnyLanguage => "moodAnyLanguage",
            MatchTier::AnyCatalog => "anyCatalog",
            MatchTier::NoMatch => "noMatch",
        }
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Recommendation<'a> {
    pub songs: Vec<&'a Song>,
    pub tier: MatchTier,
    /// How many distinct candidates were collected before sampling.
    pub candidates: usize,
}

/// Songs collected so far, unique by (title, artist).
struct Candidates<'a> {
    songs: Vec<&'a Song>,
    seen: HashSet<(&'a str, &'a str)>,
    tier: Option<MatchTier>,
}

impl<'a> Candidates<'a> {
    fn new() -> Candidates<'a> {
        Candidates {
            songs: vec![],
            seen: HashSet::new(),
            tier: None,
        }
    }

    fn len(&self) -> usize {
        self.songs.len()
    }

    fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Adds the songs not collected yet and returns how many were added.
    fn extend<I>(&mut self, tier: MatchTier, songs: I) -> usize
    where
        I: IntoIterator<Item = &'a Song>,
    {
        let before = self.songs.len();
        for song in songs {
            if self.seen.insert(song.identity()) {
                self.songs.push(song);
            }
        }
        let added = self.songs.len() - before;
        if added > 0 {
            self.tier = Some(self.tier.map_or(tier, |current| current.max(tier)));
        }
        debug!("Tier {}: {} new, {} total", tier, added, self.len());
        added
    }

    fn into_recommendation(self) -> Recommendation<'a> {
        Recommendation {
            candidates: self.songs.len(),
            tier: self.tier.unwrap_or(MatchTier::NoMatch),
            songs: self.songs,
        }
    }
}

pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
    mode: CascadeMode,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<Catalog>, mode: CascadeMode) -> RecommendationEngine {
        RecommendationEngine { catalog, mode }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn mode(&self) -> CascadeMode {
        self.mode
    }

    /// Songs of `mood` that pass the language filter.
    fn mood_matches<'a, 'q>(
        &'a self,
        mood: &'q str,
        language: &'q LanguageFilter,
    ) -> impl Iterator<Item = &'a Song> + 'q
    where
        'a: 'q,
    {
        self.catalog
            .iter()
            .filter(move |song| song.has_mood(mood) && language.accepts(song))
    }

    fn add_similar_moods<'a>(
        &'a self,
        candidates: &mut Candidates<'a>,
        query: &MoodQuery,
        count: usize,
    ) {
        self.add_neighbour_moods(
            candidates,
            similar_moods(&query.mood),
            &query.language,
            count,
        );
    }

    /// Adds songs of each neighbour mood in order, stopping once twice
    /// `count` songs are collected.
    fn add_neighbour_moods<'a>(
        &'a self,
        candidates: &mut Candidates<'a>,
        neighbours: &[&str],
        language: &LanguageFilter,
        count: usize,
    ) {
        for neighbour in neighbours {
            candidates.extend(
                MatchTier::SimilarMood,
                self.mood_matches(neighbour, language),
            );
            if candidates.len() >= count.saturating_mul(2) {
                break;
            }
        }
    }

    fn add_fallback<'a>(&'a self, candidates: &mut Candidates<'a>, query: &MoodQuery) {
        candidates.extend(
            MatchTier::MoodAnyLanguage,
            self.mood_matches(&query.mood, &LanguageFilter::Any),
        );
        if candidates.is_empty() {
            candidates.extend(MatchTier::AnyCatalog, self.catalog.iter());
        }
    }

    fn strict_candidates(&self, query: &MoodQuery, count: usize) -> Candidates<'_> {
        let mut candidates = Candidates::new();
        candidates.extend(
            MatchTier::Exact,
            self.mood_matches(&query.mood, &query.language),
        );

        match &query.language {
            LanguageFilter::Only(language) if candidates.is_empty() => {
                self.add_similar_moods(&mut candidates, query, count);
                if candidates.is_empty() {
                    info!(
                        "No songs for mood \"{}\" in language \"{}\"",
                        query.mood, language
                    );
                }
            }
            LanguageFilter::Any if candidates.is_empty() => {
                self.add_fallback(&mut candidates, query);
            }
            _ => {}
        }
        candidates
    }

    fn widening_candidates(&self, query: &MoodQuery, count: usize) -> Candidates<'_> {
        let mut candidates = Candidates::new();
        candidates.extend(
            MatchTier::Exact,
            self.mood_matches(&query.mood, &query.language),
        );

        if candidates.len() < count {
            self.add_similar_moods(&mut candidates, query, count);
        }

        if !query.language.is_any() && candidates.len() < count {
            candidates.extend(
                MatchTier::LanguageOnly,
                self.catalog
                    .iter()
                    .filter(|song| query.language.accepts(song)),
            );
        }

        if candidates.is_empty() {
            self.add_fallback(&mut candidates, query);
        }
        candidates
    }

    /// Every song the cascade would sample from, unshuffled.
    pub fn candidates(&self, query: &MoodQuery, count: usize) -> Recommendation<'_> {
        let candidates = match self.mode {
            CascadeMode::Strict => self.strict_candidates(query, count),
            CascadeMode::Widening => self.widening_candidates(query, count),
        };
        candidates.into_recommendation()
    }

    pub fn recommend_with_rng<R: Rng + ?Sized>(
        &self,
        query: &MoodQuery,
        count: usize,
        rng: &mut R,
    ) -> Recommendation<'_> {
        debug!(
            "Recommending for mood \"{}\", language {:?}, count {}",
            query.mood, query.language, count
        );
        let mut recommendation = self.candidates(query, count);
        recommendation.songs.shuffle(rng);
        recommendation.songs.truncate(count);
        info!(
            "Recommended {} of {} candidates, tier {}",
            recommendation.songs.len(),
            recommendation.candidates,
            recommendation.tier
        );
        recommendation
    }

    pub fn recommend_query(&self, query: &MoodQuery, count: usize) -> Recommendation<'_> {
        self.recommend_with_rng(query, count, &mut rand::rng())
    }

    /// Same as [`RecommendationEngine::recommend_query`], with raw inputs.
    pub fn recommend(
        &self,
        mood: &str,
        language: Option<&str>,
        count: usize,
    ) -> Recommendation<'_> {
        self.recommend_query(&MoodQuery::new(mood, language), count)
    }
}
