use super::normalize;
use rand::seq::IndexedRandom;
use rand::Rng;

const MOOD_LINES: &[(&str, &[&str])] = &[
    (
        "happy",
        &[
            "Feeling happy? Enjoy these uplifting tunes!",
            "A joyful vibe just for you!",
            "Spread the happiness with these songs!",
        ],
    ),
    (
        "sad",
        &[
            "Need some comfort? These songs understand...",
            "It's okay to feel sad. Let the music heal.",
            "Melancholy melodies for your mood",
        ],
    ),
    (
        "relaxed",
        &[
            "Time to unwind with these chill tunes!",
            "Perfect relaxation soundtrack",
            "Calm vibes for your peaceful moment",
        ],
    ),
    (
        "energetic",
        &[
            "Get ready to move! High-energy picks!",
            "Power up with these energetic beats!",
            "Feel the energy with these tracks!",
        ],
    ),
    (
        "romantic",
        &[
            "Love is in the air with these romantic tunes!",
            "Perfect songs for your special moments",
            "Heartfelt melodies for romance",
        ],
    ),
    (
        "angry",
        &[
            "Channel that energy with these powerful tracks!",
            "Turn frustration into motivation!",
            "Strong beats for strong feelings",
        ],
    ),
];

const DEFAULT_LINES: &[&str] = &[
    "Here are some recommendations for your mood!",
    "Curated picks just for you!",
    "Your personalized music selection",
];

pub fn flavor_lines(mood: &str) -> &'static [&'static str] {
    let key = normalize(mood);
    MOOD_LINES
        .iter()
        .find(|(mood, _)| *mood == key)
        .map(|(_, lines)| *lines)
        .unwrap_or(DEFAULT_LINES)
}

/// A short sentence introducing recommendations for `mood`.
pub fn flavor_text<R: Rng + ?Sized>(mood: &str, rng: &mut R) -> &'static str {
    flavor_lines(mood)
        .choose(rng)
        .copied()
        .unwrap_or(DEFAULT_LINES[0])
}
