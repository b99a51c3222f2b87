//! Shared constants for end-to-end tests
//!
//! When the fixture dataset changes, update only this file and `fixtures.rs`.

// ============================================================================
// Server
// ============================================================================

/// How long to wait for a spawned server to answer its health check
pub const SERVER_READY_TIMEOUT_MS: u64 = 5_000;

/// Delay between health check attempts
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;

/// Timeout applied to every request made by the test client
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Fixture Dataset
// ============================================================================

/// Songs that survive loading (rows without a title are dropped)
pub const TOTAL_SONGS: usize = 7;

/// English, happy
pub const HAPPY_TITLE: &str = "Happy";

/// Korean, happy, the only Korean song
pub const KOREAN_TITLE: &str = "Dynamite";

/// Hindi, sad, the only Hindi song
pub const HINDI_TITLE: &str = "Tum Hi Ho";
pub const HINDI_ARTIST: &str = "Arijit Singh";

/// English, relaxed, the only relaxed song
pub const RELAXED_TITLE: &str = "Weightless";
pub const RELAXED_SPOTIFY_ID: &str = "sp-weightless";

/// Number of sad songs, across all languages
pub const SAD_SONGS: usize = 3;
