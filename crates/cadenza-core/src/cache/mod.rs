//! Flat-file JSON cache for registry and catalog payloads.

pub mod key;
pub mod store;

pub use key::ArtifactKey;
pub use store::CacheStore;
