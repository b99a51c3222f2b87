use serde::Deserialize;

/// One row of the mood dataset, exactly as read from the CSV file.
///
/// Every column is optional: missing columns and empty cells both end up as
/// `None`, and the classifier falls back to defaults for them.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RawRecord {
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub seeds: Option<String>,
    #[serde(default)]
    pub valence_tags: Option<String>,
    #[serde(default)]
    pub arousal_tags: Option<String>,
    #[serde(default)]
    pub spotify_id: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// A literal `0` is a real score, only blank or unparseable cells (including
/// trailing garbage such as `0.8abc`) read as `None`.
fn parse_score(value: &Option<String>) -> Option<f64> {
    non_blank(value)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

impl RawRecord {
    pub fn track(&self) -> Option<&str> {
        non_blank(&self.track)
    }

    pub fn artist(&self) -> Option<&str> {
        non_blank(&self.artist)
    }

    pub fn genre(&self) -> Option<&str> {
        non_blank(&self.genre)
    }

    pub fn seeds(&self) -> Option<&str> {
        non_blank(&self.seeds)
    }

    pub fn spotify_id(&self) -> Option<&str> {
        non_blank(&self.spotify_id)
    }

    pub fn valence(&self) -> Option<f64> {
        parse_score(&self.valence_tags)
    }

    pub fn arousal(&self) -> Option<f64> {
        parse_score(&self.arousal_tags)
    }
}
