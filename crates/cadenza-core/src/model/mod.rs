pub mod artist;
pub mod payload;
pub mod registry;

pub use artist::{ArtistNumber, ArtistRecord};
pub use payload::{
    ArtistHit, ArtistSearch, AudioFeature, AudioFeatures, Charts, DailyViews, Discography,
    Release, TopTracks, Track, TrackArtist, WikiViews,
};
pub use registry::ArtistRegistry;
