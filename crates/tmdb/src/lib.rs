//! Minimal TMDb REST client.
//!
//! Fetches movie details with US release certifications and converts them
//! into [`safewatch_core::movie::MovieMetadata`].

mod client;
mod error;
pub mod models;

pub use client::{TmdbClient, DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
pub use error::TmdbError;
pub use models::{Genre, MovieDetail, ReleaseCountry, Releases};

pub type Result<T> = std::result::Result<T, TmdbError>;
