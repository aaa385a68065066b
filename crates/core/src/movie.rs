//! Movie identifiers and the catalog metadata consumed by the safety scorer.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::CoreError;

/// Country whose certification drives the rating penalty.
pub const CERTIFICATION_COUNTRY: &str = "US";

/// Certification assumed when the catalog has none for [`CERTIFICATION_COUNTRY`].
pub const NOT_RATED: &str = "NR";

/// A validated catalog identifier (TMDb ids are positive integers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MovieId(u64);

impl MovieId {
    pub fn new(id: u64) -> Result<Self, CoreError> {
        if id == 0 {
            return Err(CoreError::Validation(
                "movie id must be a positive integer".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Parse a raw path segment into a [`MovieId`].
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        let id: u64 = trimmed.parse().map_err(|_| {
            CoreError::Validation(format!(
                "movie id must be a positive integer, got '{trimmed}'"
            ))
        })?;
        Self::new(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog metadata for a single title, fetched fresh for every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieMetadata {
    pub title: String,
    /// Synopsis text. Empty when the catalog has none.
    pub overview: String,
    /// Genre names in catalog order.
    pub genres: Vec<String>,
    /// Release certification keyed by ISO 3166-1 country code.
    pub certifications: BTreeMap<String, String>,
}

impl MovieMetadata {
    /// The US certification, or [`NOT_RATED`] when missing or blank.
    pub fn us_certification(&self) -> &str {
        self.certifications
            .get(CERTIFICATION_COUNTRY)
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .unwrap_or(NOT_RATED)
    }
}
