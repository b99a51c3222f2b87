const SIMILAR_MOODS: &[(&str, &[&str])] = &[
    ("happy", &["energetic", "joyful", "upbeat", "celebratory"]),
    ("energetic", &["happy", "party", "powerful", "driving"]),
    ("romantic", &["intimate", "passionate", "loving", "dreamy"]),
    ("sad", &["melancholy", "emotional", "heartbroken", "reflective"]),
    ("angry", &["intense", "aggressive", "rebellious", "furious"]),
    ("relaxed", &["calm", "peaceful", "chill", "mellow"]),
];

/// Moods to try, in order, when nothing matches `mood` exactly.
/// `mood` must be normalized.
pub fn similar_moods(mood: &str) -> &'static [&'static str] {
    SIMILAR_MOODS
        .iter()
        .find(|(key, _)| *key == mood)
        .map(|(_, similar)| *similar)
        .unwrap_or(&[])
}
