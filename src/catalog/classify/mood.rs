use crate::catalog::Mood;

/// Value assumed for a missing valence or arousal score.
pub const NEUTRAL_SCORE: f64 = 0.5;

const MOOD_KEYWORDS: &[(Mood, &[&str])] = &[
    (Mood::Happy, &["happy", "fun", "joyful", "uplifting"]),
    (Mood::Sad, &["sad", "melancholy", "emotional", "heartbreak"]),
    (
        Mood::Energetic,
        &["energetic", "aggressive", "intense", "powerful"],
    ),
    (Mood::Relaxed, &["relaxed", "calm", "chill", "peaceful"]),
    (Mood::Romantic, &["romantic", "sexy", "love", "intimate"]),
    (Mood::Angry, &["angry", "aggressive", "rebellious"]),
];

fn mood_from_keywords(folded_seeds: &[String]) -> Option<Mood> {
    MOOD_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            folded_seeds
                .iter()
                .any(|seed| keywords.contains(&seed.as_str()))
        })
        .map(|(mood, _)| *mood)
}

pub fn mood_from_scores(valence: f64, arousal: f64) -> Mood {
    if valence > 0.7 && arousal > 0.6 {
        Mood::Happy
    } else if valence < 0.4 && arousal < 0.5 {
        Mood::Sad
    } else if arousal > 0.7 {
        Mood::Energetic
    } else if arousal < 0.4 {
        Mood::Relaxed
    } else if valence > 0.5 && valence < 0.7 {
        Mood::Romantic
    } else {
        Mood::Energetic
    }
}

/// Seeds decide first, the numeric scores are only consulted when no seed
/// belongs to any of the keyword sets.
pub fn detect_mood<S: AsRef<str>>(seeds: &[S], valence: f64, arousal: f64) -> Mood {
    let folded: Vec<String> = seeds
        .iter()
        .map(|seed| seed.as_ref().trim().to_lowercase())
        .collect();
    mood_from_keywords(&folded).unwrap_or_else(|| mood_from_scores(valence, arousal))
}
