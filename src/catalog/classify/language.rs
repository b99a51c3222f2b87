//! Language detection for dataset rows.
//!
//! Detection runs through a fixed sequence of tiers and the first tier that
//! produces an answer wins. Inside each tier the tables are scanned in
//! declaration order, so the position of an entry decides ties.

use crate::catalog::Language;
use lazy_static::lazy_static;
use regex::Regex;

/// Which tier decided the language of a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LanguageSource {
    KnownArtist,
    GenreKeyword,
    Script,
    EnglishWords,
    AsciiTitle,
    Default,
}

const ARTIST_LANGUAGES: &[(Language, &[&str])] = &[
    (
        Language::Hindi,
        &[
            "a.r. rahman",
            "arijit singh",
            "shreya ghoshal",
            "sunidhi chauhan",
            "kishore kumar",
            "lata mangeshkar",
            "raftaar",
            "badshah",
            "diljit",
            "neha kakkar",
            "tony kakkar",
            "jassie gill",
            "guru randhawa",
            "vishal",
            "aastha",
            "shankar",
            "sonu nigam",
            "kumar sanu",
            "alka yagnik",
        ],
    ),
    (
        Language::Korean,
        &[
            "bts",
            "blackpink",
            "exo",
            "twice",
            "red velvet",
            "iu",
            "bigbang",
            "seventeen",
            "nct",
            "got7",
            "monsta x",
            "stray kids",
            "itzy",
            "ateez",
        ],
    ),
    (
        Language::Japanese,
        &[
            "yoasobi",
            "kenshi yonezu",
            "hikaru utada",
            "aimer",
            "lisa",
            "official hige dandism",
            "vaundy",
            "eve",
            "ado",
            "kenshi",
            "radwimps",
            "babymetal",
            "one ok rock",
        ],
    ),
    (
        Language::Spanish,
        &[
            "bad bunny",
            "j balvin",
            "shakira",
            "maluma",
            "ozuna",
            "daddy yankee",
            "anuel aa",
            "karol g",
            "rosalía",
            "enrique iglesias",
            "ricky martin",
            "luis fonsi",
            "j lo",
            "jennifer lopez",
            "marc anthony",
        ],
    ),
    (
        Language::French,
        &[
            "stromae",
            "indila",
            "maître gims",
            "zaz",
            "christophe maé",
            "jain",
            "angele",
            "soprano",
            "black m",
        ],
    ),
    (
        Language::German,
        &[
            "rammstein",
            "tokio hotel",
            "nena",
            "helene fischer",
            "mark forster",
        ],
    ),
    (
        Language::Italian,
        &[
            "andrea bocelli",
            "laura pausini",
            "eros ramazzotti",
            "tiziano ferro",
        ],
    ),
];

const GENRE_LANGUAGES: &[(Language, &[&str])] = &[
    (
        Language::Hindi,
        &[
            "bollywood",
            "hindustani",
            "indian pop",
            "desi hip hop",
            "punjabi",
            "tamil",
            "telugu",
        ],
    ),
    (
        Language::Korean,
        &["k-pop", "korean pop", "k-rap", "korean hip hop"],
    ),
    (
        Language::Japanese,
        &["j-pop", "japanese pop", "anime", "j-rock", "japanese rock"],
    ),
    (
        Language::Spanish,
        &[
            "latin",
            "reggaeton",
            "salsa",
            "bachata",
            "flamenco",
            "mexican",
            "tango",
        ],
    ),
    (
        Language::French,
        &["french pop", "chanson française", "french hip hop"],
    ),
    (Language::German, &["german pop", "schlager", "german rock"]),
    (
        Language::Italian,
        &["italian pop", "opera italiana", "italian rock"],
    ),
];

const SCRIPT_PATTERNS: &[(Language, &str)] = &[
    (Language::Korean, r"[가-힣]"),
    (Language::Japanese, r"[一-龯ぁ-んァ-ン]"),
    (Language::Hindi, r"[\x{0900}-\x{097F}]"),
    (Language::Arabic, r"[\x{0600}-\x{06FF}]"),
    (Language::Russian, r"(?i)[а-яё]"),
    (Language::Chinese, r"[\x{4E00}-\x{9FFF}]"),
    (Language::Thai, r"[\x{0E00}-\x{0E7F}]"),
    (Language::Greek, r"(?i)[α-ω]"),
];

const COMMON_ENGLISH_WORDS: &[&str] = &[
    "the", "and", "you", "love", "baby", "night", "day", "time", "heart", "eyes", "hands", "world",
    "life", "dream", "fire", "water", "sky", "girl", "boy", "man", "woman", "city", "street",
    "home", "house",
];

lazy_static! {
    static ref SCRIPT_REGEXES: Vec<(Language, Regex)> = SCRIPT_PATTERNS
        .iter()
        .map(|(language, pattern)| {
            (
                *language,
                Regex::new(pattern).expect("Invalid script pattern."),
            )
        })
        .collect();
    static ref ENGLISH_WORD_REGEXES: Vec<Regex> = COMMON_ENGLISH_WORDS
        .iter()
        .map(|word| {
            Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
                .expect("Invalid english word pattern.")
        })
        .collect();
    static ref ASCII_TITLE_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9\s\-'!.?,&]+$").expect("Invalid ascii title pattern.");
}

fn first_substring_match(table: &[(Language, &[&str])], haystack: &str) -> Option<Language> {
    if haystack.is_empty() {
        return None;
    }
    table
        .iter()
        .find(|(_, needles)| needles.iter().any(|needle| haystack.contains(needle)))
        .map(|(language, _)| *language)
}

fn script_language(title: &str, artist: &str) -> Option<Language> {
    SCRIPT_REGEXES
        .iter()
        .find(|(_, regex)| regex.is_match(title) || regex.is_match(artist))
        .map(|(language, _)| *language)
}

/// Number of distinct common english words appearing as whole words in `title`.
pub fn english_word_score(title: &str) -> usize {
    ENGLISH_WORD_REGEXES
        .iter()
        .filter(|regex| regex.is_match(title))
        .count()
}

pub fn detect_language(title: &str, artist: &str, genre: &str) -> (Language, LanguageSource) {
    let title = title.trim().to_lowercase();
    let artist = artist.trim().to_lowercase();
    let genre = genre.trim().to_lowercase();

    if let Some(language) = first_substring_match(ARTIST_LANGUAGES, &artist) {
        return (language, LanguageSource::KnownArtist);
    }

    if let Some(language) = first_substring_match(GENRE_LANGUAGES, &genre) {
        return (language, LanguageSource::GenreKeyword);
    }

    if let Some(language) = script_language(&title, &artist) {
        return (language, LanguageSource::Script);
    }

    if english_word_score(&title) >= 1 {
        return (Language::English, LanguageSource::EnglishWords);
    }

    if ASCII_TITLE_REGEX.is_match(&title) {
        return (Language::English, LanguageSource::AsciiTitle);
    }

    (Language::English, LanguageSource::Default)
}
