// Link and page filtering for newsletter bodies.
//
// A newsletter body (plain text or HTML) carries the article links we care
// about plus a lot of noise: unsubscribe links, tracking pixels, social
// buttons, legal pages. This module pulls out the candidate article URLs
// and recognizes junk pages once they've been fetched.

use std::collections::HashSet;
use std::sync::OnceLock;

use percent_encoding::percent_decode_str;
use regex_lite::Regex;
use tracing::debug;
use url::Url;

use crate::article::RawArticle;

/// Query parameters that redirect wrappers use to carry the real target.
const REDIRECT_PARAMS: &[&str] = &[
    "url",
    "u",
    "redirect",
    "link",
    "target",
    "destination",
    "goto",
];

/// Substrings that mark a URL as something other than an article.
const JUNK_URL_PATTERNS: &[&str] = &[
    "unsubscribe",
    "tracking",
    "pixel",
    "beacon",
    "email-open",
    "facebook.com",
    "instagram.com",
    "twitter.com",
    "://x.com",
    "linkedin.com/login",
    "linkedin.com/in/",
    "linkedin.com/company",
    "youtube.com",
    "tiktok.com",
    "pinterest.com",
    "spotify.com",
    "/contact",
    "/privacy",
    "/terms",
    "/signin",
    "/login",
    "/signup",
    "/preferences",
    "/settings",
    "/account",
    "app-store",
    "play.google",
    "itunes.apple",
    "schema.org",
    "mailto:",
    "tel:",
    "sms:",
    "/feed",
    "/rss",
    "/sitemap",
];

/// Bare homepages of social networks, compared after stripping the scheme.
const SOCIAL_HOMEPAGES: &[&str] = &[
    "facebook.com",
    "instagram.com",
    "linkedin.com",
    "twitter.com",
    "youtube.com",
    "tiktok.com",
    "pinterest.com",
];

/// Title fragments of navigation, legal and social pages.
const JUNK_TITLE_PATTERNS: &[&str] = &[
    "contact us",
    "privacy policy",
    "cookie notice",
    "cookie policy",
    "sign in",
    "log in",
    "login",
    "register",
    "registration",
    "linkedin",
    "facebook",
    "instagram",
    "twitter",
    "youtube",
    "app store",
    "google play",
    "terms of use",
    "terms and conditions",
    "subscribe",
    "unsubscribe",
    "join now",
    "newsletter",
    "manage my account",
    "view all",
    "see all",
    "browse",
    "home page",
    "advertising",
    "partnerships",
];

/// Titles shorter than this are almost always navigation links.
pub const MIN_TITLE_CHARS: usize = 15;

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"https?://[A-Za-z0-9._~:/?#\[\]@!$&'()*+,;=%-]+"#)
            .expect("URL pattern is valid")
    })
}

/// Extract candidate article URLs from a newsletter body.
///
/// Works on both plain text and HTML (href attributes are matched like any
/// other URL). Redirect wrappers are unwrapped, junk links dropped, and the
/// result deduplicated in first-seen order.
pub fn extract_urls(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for found in url_regex().find_iter(text) {
        let raw = found
            .as_str()
            .trim_end_matches(|c: char| matches!(c, '.' | ',' | ')' | '\'' | ';'))
            .replace("&amp;", "&");

        let mut candidates = vec![percent_decode_str(&raw).decode_utf8_lossy().into_owned()];
        if let Some(wrapped) = unwrap_redirect(&raw) {
            candidates.push(wrapped);
        }

        for candidate in candidates {
            if is_junk_url(&candidate) {
                continue;
            }
            if seen.insert(candidate.clone()) {
                urls.push(candidate);
            }
        }
    }

    debug!(count = urls.len(), "Extracted article links");
    urls
}

/// If `raw` is a redirect wrapper (`...?url=https://...`), return the target.
pub fn unwrap_redirect(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    parsed
        .query_pairs()
        .find(|(key, value)| {
            REDIRECT_PARAMS.contains(&key.as_ref()) && value.starts_with("http")
        })
        .map(|(_, value)| value.into_owned())
}

/// Whether a URL points at something other than an article.
pub fn is_junk_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    if JUNK_URL_PATTERNS.iter().any(|p| lower.contains(p)) {
        return true;
    }

    let bare = lower
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    SOCIAL_HOMEPAGES.contains(&bare)
}

/// Whether a fetched page title looks like navigation rather than a story.
pub fn is_junk_title(title: &str) -> bool {
    let title = title.trim();
    if title.chars().count() < MIN_TITLE_CHARS {
        return true;
    }
    let lower = title.to_lowercase();
    JUNK_TITLE_PATTERNS.iter().any(|p| lower.contains(p))
}

/// Drop failed extractions and junk pages before deduplication.
pub fn retain_articles(articles: Vec<RawArticle>) -> Vec<RawArticle> {
    let before = articles.len();
    let kept: Vec<RawArticle> = articles
        .into_iter()
        .filter(|a| a.extraction_succeeded && !is_junk_title(&a.title))
        .collect();

    debug!(before, after = kept.len(), "Filtered junk articles");
    kept
}
