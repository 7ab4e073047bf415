//! Core domain model for cadenza.
//!
//! This crate defines the artist registry, the typed catalog payloads, the
//! flat-file JSON cache store, and the pure derivation functions that turn
//! cached payloads into comparable numbers.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod cache;
pub mod derive;
pub mod error;
pub mod model;

pub use cache::{ArtifactKey, CacheStore};
pub use error::{Error, Result};
