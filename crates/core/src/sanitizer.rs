//! Embed page sanitizer.
//!
//! Streams the upstream HTML through [`lol_html`] to drop scripts, ad/popup
//! containers and inline pop-up handlers, then parses the result with
//! [`scraper`] to confirm a playable element survived.
//!
//! The id/class matching is a heuristic: ad markup that avoids the patterns
//! passes through, and innocent elements whose id or class merely contains
//! `ad` (`header`, `loading`) are dropped. All scripts are removed, including
//! any player bootstrap script.

use std::cell::Cell;

use lol_html::{element, rewrite_str, RewriteStrSettings};
use scraper::{Html, Selector};

/// User-facing message when no player element survives sanitization.
pub const PLAYER_NOT_FOUND_MESSAGE: &str = "Stream source is unstable or content not indexed.";

/// Elements removed as ad or popup containers.
const AD_SELECTORS: &[&str] = &[
    r#"[id*="ad"]"#,
    r#"[class*="ad"]"#,
    r#"[id*="popup"]"#,
    r#"[class*="popup"]"#,
    ".floating-ad",
];

/// Inline handlers used to trigger pop-ups and pop-unders.
const POPUP_ATTRIBUTES: &[&str] = &["onclick", "onmouseover"];

/// Candidate player elements, first match wins.
const PLAYER_SELECTOR: &str = "iframe[allowfullscreen], video";

#[derive(Debug, thiserror::Error)]
pub enum SanitizeError {
    /// The page was fetched but contains no usable player.
    #[error("{}", PLAYER_NOT_FOUND_MESSAGE)]
    PlayerNotFound,

    /// The HTML could not be rewritten or queried.
    #[error("HTML processing failed: {0}")]
    Html(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Iframe,
    Video,
}

impl PlayerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerKind::Iframe => "iframe",
            PlayerKind::Video => "video",
        }
    }
}

/// A sanitized embed page ready to relay to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedPage {
    pub html: String,
    pub player: PlayerKind,
    pub scripts_removed: usize,
    pub ad_elements_removed: usize,
}

/// Strip scripts, ad containers and pop-up handlers from `raw_html` and
/// verify that a player element remains.
pub fn sanitize_embed_page(raw_html: &str) -> Result<SanitizedPage, SanitizeError> {
    let scripts_removed = Cell::new(0usize);
    let ad_elements_removed = Cell::new(0usize);

    let mut handlers = vec![element!("script", |el| {
        el.remove();
        scripts_removed.set(scripts_removed.get() + 1);
        Ok(())
    })];

    for selector in AD_SELECTORS {
        handlers.push(element!(*selector, |el| {
            if !el.removed() {
                el.remove();
                ad_elements_removed.set(ad_elements_removed.get() + 1);
            }
            Ok(())
        }));
    }

    handlers.push(element!("*", |el| {
        for attr in POPUP_ATTRIBUTES {
            el.remove_attribute(attr);
        }
        Ok(())
    }));

    let html = rewrite_str(
        raw_html,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|e| SanitizeError::Html(e.to_string()))?;

    let player = find_player(&html)?.ok_or(SanitizeError::PlayerNotFound)?;

    Ok(SanitizedPage {
        html,
        player,
        scripts_removed: scripts_removed.get(),
        ad_elements_removed: ad_elements_removed.get(),
    })
}

fn find_player(html: &str) -> Result<Option<PlayerKind>, SanitizeError> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse(PLAYER_SELECTOR).map_err(|e| SanitizeError::Html(e.to_string()))?;

    Ok(document
        .select(&selector)
        .next()
        .map(|el| match el.value().name() {
            "video" => PlayerKind::Video,
            _ => PlayerKind::Iframe,
        }))
}
