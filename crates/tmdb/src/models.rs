use std::collections::BTreeMap;

use safewatch_core::movie::MovieMetadata;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// A per-country release entry from `append_to_response=releases`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseCountry {
    pub iso_3166_1: String,
    #[serde(default)]
    pub certification: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub primary: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Releases {
    #[serde(default)]
    pub countries: Vec<ReleaseCountry>,
}

/// GET /movie/{movie_id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub releases: Option<Releases>,
}

/// Error payload TMDb returns alongside non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub status_message: Option<String>,
}

impl From<MovieDetail> for MovieMetadata {
    fn from(detail: MovieDetail) -> Self {
        let mut certifications = BTreeMap::new();
        for release in detail.releases.unwrap_or_default().countries {
            // First entry per country wins.
            certifications
                .entry(release.iso_3166_1)
                .or_insert(release.certification);
        }

        MovieMetadata {
            title: detail.title,
            overview: detail.overview.unwrap_or_default(),
            genres: detail.genres.into_iter().map(|g| g.name).collect(),
            certifications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_detail_with_releases() {
        let detail: MovieDetail = serde_json::from_str(
            r#"{
                "id": 550,
                "title": "Fight Club",
                "overview": "An insomniac office worker...",
                "genres": [{ "id": 18, "name": "Drama" }, { "id": 53, "name": "Thriller" }],
                "releases": { "countries": [
                    { "iso_3166_1": "DE", "certification": "18", "release_date": "1999-11-11" },
                    { "iso_3166_1": "US", "certification": "R", "primary": true },
                    { "iso_3166_1": "US", "certification": "" }
                ]}
            }"#,
        )
        .unwrap();

        let movie = MovieMetadata::from(detail);

        assert_eq!(movie.title, "Fight Club");
        assert_eq!(movie.genres, vec!["Drama", "Thriller"]);
        assert_eq!(movie.us_certification(), "R");
        assert_eq!(movie.certifications.get("DE").map(String::as_str), Some("18"));
    }

    #[test]
    fn missing_optional_fields_become_empty() {
        let detail: MovieDetail =
            serde_json::from_str(r#"{ "id": 1, "title": "Bare", "overview": null }"#).unwrap();

        let movie = MovieMetadata::from(detail);

        assert_eq!(movie.overview, "");
        assert!(movie.genres.is_empty());
        assert_eq!(movie.us_certification(), "NR");
    }
}
