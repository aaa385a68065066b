//! Child-safety scoring for catalog titles.
//!
//! Risk points accumulate from the US certification, risky genres and
//! flagged synopsis keywords, then invert into a safety score where higher
//! is safer. Scoring is a total function over [`MovieMetadata`].

use std::collections::HashSet;

use crate::movie::MovieMetadata;
use crate::safety_config::SafetyConfig;

/// Scores at or below this value fall into [`SafetyTier::Danger`].
pub const DANGER_MAX_SCORE: u32 = 20;
/// Scores at or below this value (and above [`DANGER_MAX_SCORE`]) fall into [`SafetyTier::Caution`].
pub const CAUTION_MAX_SCORE: u32 = 80;

/// Advisory emitted when nothing contributed risk.
pub const NO_FLAGS_NOTE: &str = "No specific safety flags found in official data.";

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyTier {
    Danger,
    Caution,
    Safe,
}

impl SafetyTier {
    pub fn from_score(score: u32) -> Self {
        if score <= DANGER_MAX_SCORE {
            SafetyTier::Danger
        } else if score <= CAUTION_MAX_SCORE {
            SafetyTier::Caution
        } else {
            SafetyTier::Safe
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SafetyTier::Danger => "danger",
            SafetyTier::Caution => "caution",
            SafetyTier::Safe => "safe",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            SafetyTier::Danger => {
                "🚨 DANGER: Highly unsuitable for children. Rated for adult themes/content."
            }
            SafetyTier::Caution => {
                "⚠️ CAUTION: Significant risk detected. Parental guidance is strongly advised."
            }
            SafetyTier::Safe => "✅ Appears safe for kids based on content analysis.",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            SafetyTier::Danger => "Do not show this content without deep parental review.",
            SafetyTier::Caution => "Proceed with caution. Content may be distressing.",
            SafetyTier::Safe => "Highly recommended for all ages.",
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Result of scanning one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Safety score in `0..=max_score`.
    pub normalized_score: u32,
    pub tier: SafetyTier,
    pub summary: String,
    pub recommendation: String,
    /// Never empty; holds [`NO_FLAGS_NOTE`] when nothing was flagged.
    pub advisory_notes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score `movie` against `config`.
pub fn compute_safety_report(movie: &MovieMetadata, config: &SafetyConfig) -> ScanReport {
    let penalties = config.penalties();
    let mut risk: u64 = 0;
    let mut notes = Vec::new();

    // Certification
    match movie.us_certification() {
        "R" => {
            risk += u64::from(penalties.r_rating);
            notes.push("Certification: A (Not suitable for children).".to_string());
        }
        "PG-13" => {
            risk += u64::from(penalties.pg13_rating);
            notes.push("Certification: U/A-13 (High parental guidance needed).".to_string());
        }
        "PG" => {
            risk += u64::from(penalties.pg_rating);
            notes.push(
                "Certification: U/A (Some material may be unsuitable for children).".to_string(),
            );
        }
        _ => {}
    }

    // Risky genres, capped at the PG-13 penalty.
    let mut seen = HashSet::new();
    let risky: Vec<&str> = movie
        .genres
        .iter()
        .map(String::as_str)
        .filter(|g| config.is_risky_genre(g) && seen.insert(*g))
        .collect();
    if !risky.is_empty() {
        let genre_risk = u64::from(penalties.risky_genre) * risky.len() as u64;
        risk += genre_risk.min(u64::from(penalties.pg13_rating));
        notes.push(format!("Genres flagged: {}.", risky.join(", ")));
    }

    // Synopsis keyword density
    let overview = movie.overview.to_lowercase();
    let mut flagged = Vec::new();
    for keyword in config.keywords() {
        let hits = keyword.count_in(&overview);
        if hits > 0 {
            risk += u64::from(penalties.keyword_hit) * hits as u64;
            flagged.push(format!("{} ({} times)", keyword.keyword(), hits));
        }
    }
    if !flagged.is_empty() {
        notes.push(format!("Synopsis flags: {}.", flagged.join(", ")));
    }

    let normalized_score = u64::from(config.max_score()).saturating_sub(risk) as u32;
    let tier = SafetyTier::from_score(normalized_score);

    if notes.is_empty() {
        notes.push(NO_FLAGS_NOTE.to_string());
    }

    ScanReport {
        normalized_score,
        tier,
        summary: tier.summary().to_string(),
        recommendation: tier.recommendation().to_string(),
        advisory_notes: notes,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
