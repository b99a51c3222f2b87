use serde::Serialize;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_GENRE: &str = "Unknown";

const YOUTUBE_SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Relaxed,
    Romantic,
    Angry,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Energetic => "energetic",
            Mood::Relaxed => "relaxed",
            Mood::Romantic => "romantic",
            Mood::Angry => "angry",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Language {
    English,
    Hindi,
    Korean,
    Japanese,
    Spanish,
    French,
    German,
    Italian,
    Arabic,
    Russian,
    Chinese,
    Thai,
    Greek,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Korean => "Korean",
            Language::Japanese => "Japanese",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Arabic => "Arabic",
            Language::Russian => "Russian",
            Language::Chinese => "Chinese",
            Language::Thai => "Thai",
            Language::Greek => "Greek",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric descriptors attached to every song. Only `valence` and `energy`
/// come from the dataset, the rest are fixed placeholders.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AudioFeatures {
    pub valence: f64,
    pub energy: f64,
    pub danceability: f64,
    pub acousticness: f64,
    pub tempo: f64,
    pub loudness: f64,
}

impl AudioFeatures {
    pub fn new(valence: f64, energy: f64) -> AudioFeatures {
        AudioFeatures {
            valence,
            energy,
            danceability: 0.5,
            acousticness: 0.5,
            tempo: 120.0,
            loudness: -6.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub mood: Mood,
    pub language: Language,
    pub genre: String,
    pub tags: Vec<String>,
    #[serde(rename = "spotifyId")]
    pub external_id: String,
    pub features: AudioFeatures,
    #[serde(rename = "originalSeeds")]
    pub seeds: Vec<String>,
}

impl Song {
    /// A song is only worth serving when both title and artist are real values
    /// rather than the placeholders used for missing fields.
    pub fn is_identified(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.artist.trim().is_empty()
            && self.title != UNKNOWN_TITLE
            && self.artist != UNKNOWN_ARTIST
    }

    /// The (title, artist) pair used to tell songs apart.
    pub fn identity(&self) -> (&str, &str) {
        (&self.title, &self.artist)
    }

    /// `folded_mood` must already be trimmed and lower-cased.
    pub fn has_mood(&self, folded_mood: &str) -> bool {
        self.mood.as_str() == folded_mood
    }

    /// `folded_language` must already be trimmed and lower-cased.
    pub fn has_language(&self, folded_language: &str) -> bool {
        self.language.as_str().eq_ignore_ascii_case(folded_language)
    }

    pub fn youtube_url(&self) -> String {
        youtube_search_url(&self.title, &self.artist)
    }
}

pub fn youtube_search_url(title: &str, artist: &str) -> String {
    let query = format!("{} {} official music video", title, artist);
    format!("{}{}", YOUTUBE_SEARCH_URL, urlencoding::encode(&query))
}
