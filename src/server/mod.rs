mod api;
pub mod config;
mod http_layers;
pub mod metrics;
pub mod server;
pub mod state;

pub use api::SongView;
pub use config::ServerConfig;
pub use http_layers::*;
pub use server::{make_app, run_server};
pub use state::{GuardedEngine, ServerState};
