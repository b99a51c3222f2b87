//! MoodTunes: a mood-driven song recommender over a CSV music dataset.

pub mod catalog;
pub mod config;
pub mod recommend;
pub mod server;
