//! Remote services and the read-through cache for cadenza.
//!
//! Wraps the catalog, lyrics and Wikipedia APIs behind traits and decides,
//! per data kind, whether a payload comes from the cache or the network.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod clients;
pub mod config;
pub mod cooldown;
pub mod error;
pub mod library;

pub use clients::{
    CatalogService, LyricsOvhClient, LyricsService, SpotifyClient, WikiService, WikimediaClient,
};
pub use config::Config;
pub use cooldown::Cooldown;
pub use error::{FetchError, FetchResult};
pub use library::{ChartSnapshot, HttpLibrary, Library, WikiSummary, CHARTS_LABEL};
