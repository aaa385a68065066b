//! Safety scoring configuration: keyword list, risky genres and penalty table.
//!
//! [`SafetyRules`] is the serializable document (built-in defaults or a JSON
//! file supplied at startup). [`SafetyConfig`] is the validated, immutable
//! form handed to the scorer, with keyword patterns compiled once.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Synopsis keywords flagged by default, in scan order.
pub const DEFAULT_FLAGGED_KEYWORDS: &[&str] = &[
    "violence", "blood", "death", "kill", "murder", "gun", "drugs", "sex", "profanity", "nudity",
    "war", "crime", "terror",
];

/// Genre names considered risky by default.
pub const DEFAULT_RISKY_GENRES: &[&str] = &["Horror", "Crime", "Thriller", "Mystery", "War", "History"];

/// Default maximum safety score.
pub const DEFAULT_MAX_SCORE: u32 = 100;

// ---------------------------------------------------------------------------
// Serializable rules
// ---------------------------------------------------------------------------

/// Penalty points applied per risk event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PenaltyTable {
    pub r_rating: u32,
    pub pg13_rating: u32,
    pub pg_rating: u32,
    /// Per matched risky genre. The genre total is capped at `pg13_rating`.
    pub risky_genre: u32,
    /// Per keyword occurrence in the synopsis.
    pub keyword_hit: u32,
}

impl Default for PenaltyTable {
    fn default() -> Self {
        Self {
            r_rating: 80,
            pg13_rating: 50,
            pg_rating: 20,
            risky_genre: 15,
            keyword_hit: 10,
        }
    }
}

/// Unvalidated safety rules as loaded from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SafetyRules {
    pub flagged_keywords: Vec<String>,
    pub risky_genres: Vec<String>,
    #[serde(default)]
    pub penalties: PenaltyTable,
    #[serde(default = "default_max_score")]
    pub max_score: u32,
}

fn default_max_score() -> u32 {
    DEFAULT_MAX_SCORE
}

impl Default for SafetyRules {
    fn default() -> Self {
        Self {
            flagged_keywords: DEFAULT_FLAGGED_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            risky_genres: DEFAULT_RISKY_GENRES.iter().map(|s| s.to_string()).collect(),
            penalties: PenaltyTable::default(),
            max_score: DEFAULT_MAX_SCORE,
        }
    }
}

impl SafetyRules {
    /// Check the rules for values the scorer cannot work with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.flagged_keywords.is_empty() {
            return Err(CoreError::Validation(
                "flagged_keywords must contain at least one keyword".to_string(),
            ));
        }
        if let Some(pos) = self.flagged_keywords.iter().position(|k| k.trim().is_empty()) {
            return Err(CoreError::Validation(format!(
                "flagged_keywords[{pos}] must not be empty"
            )));
        }
        if let Some(pos) = self.risky_genres.iter().position(|g| g.trim().is_empty()) {
            return Err(CoreError::Validation(format!(
                "risky_genres[{pos}] must not be empty"
            )));
        }
        if self.max_score == 0 || self.max_score > DEFAULT_MAX_SCORE {
            return Err(CoreError::Validation(format!(
                "max_score must be between 1 and {DEFAULT_MAX_SCORE}, got {}",
                self.max_score
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Validated config
// ---------------------------------------------------------------------------

/// A flagged keyword with its compiled, case-insensitive literal pattern.
#[derive(Debug, Clone)]
pub struct KeywordPattern {
    keyword: String,
    pattern: Regex,
}

impl KeywordPattern {
    fn compile(keyword: &str) -> Result<Self, CoreError> {
        let pattern = RegexBuilder::new(&regex::escape(keyword))
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                CoreError::Validation(format!("keyword '{keyword}' cannot be compiled: {e}"))
            })?;
        Ok(Self {
            keyword: keyword.to_string(),
            pattern,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Number of non-overlapping occurrences in `text`.
    pub fn count_in(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }
}

/// Process-wide scoring configuration, immutable once built.
#[derive(Debug, Clone)]
pub struct SafetyConfig {
    keywords: Vec<KeywordPattern>,
    risky_genres: HashSet<String>,
    penalties: PenaltyTable,
    max_score: u32,
}

impl SafetyConfig {
    /// Validate `rules` and compile the keyword patterns.
    pub fn from_rules(rules: SafetyRules) -> Result<Self, CoreError> {
        rules.validate()?;

        let keywords = rules
            .flagged_keywords
            .iter()
            .map(|k| KeywordPattern::compile(k))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            keywords,
            risky_genres: rules.risky_genres.into_iter().collect(),
            penalties: rules.penalties,
            max_score: rules.max_score,
        })
    }

    /// Parse a JSON [`SafetyRules`] document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let rules: SafetyRules = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("invalid safety rules: {e}")))?;
        Self::from_rules(rules)
    }

    pub fn keywords(&self) -> &[KeywordPattern] {
        &self.keywords
    }

    pub fn is_risky_genre(&self, genre: &str) -> bool {
        self.risky_genres.contains(genre)
    }

    pub fn penalties(&self) -> &PenaltyTable {
        &self.penalties
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }
}

impl Default for SafetyConfig {
    fn default() -> Self {
        let rules = SafetyRules::default();
        Self {
            keywords: rules
                .flagged_keywords
                .iter()
                .filter_map(|k| KeywordPattern::compile(k).ok())
                .collect(),
            risky_genres: rules.risky_genres.into_iter().collect(),
            penalties: rules.penalties,
            max_score: rules.max_score,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
