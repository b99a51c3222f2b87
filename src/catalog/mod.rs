mod catalog;
pub mod classify;
mod load;
mod record;
mod song;

pub use catalog::{
    Catalog, CatalogBuildResult, CatalogBuilder, CatalogStats, Problem as LoadProblem,
};
pub use classify::classify;
pub use load::{load_catalog, CatalogLoadError};
pub use record::RawRecord;
pub use song::{
    youtube_search_url, AudioFeatures, Language, Mood, Song, UNKNOWN_ARTIST, UNKNOWN_GENRE,
    UNKNOWN_TITLE,
};
