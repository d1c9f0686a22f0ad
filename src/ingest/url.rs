// URL normalization for the duplicate short-circuit.
//
// Newsletters decorate the same link differently: utm_* campaign tags,
// Mailchimp ids, a trailing slash here and there. Two links that normalize
// to the same string are treated as the same article.
//
// The bare `ref` parameter is kept: some sites route on it.

use url::{ParseError, Url};

/// Query parameters that only carry tracking data.
const TRACKING_PARAMS: &[&str] = &[
    "fbclid", "gclid", "mc_cid", "mc_eid", "ref_src", "cmpid", "mkt_tok", "_hsenc",
    "_hsmi", "igshid", "s_cid", "ocid",
];

fn is_tracking_param(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key.as_str())
}

/// Normalize a URL for equality comparison.
///
/// Drops the fragment, tracking query parameters, and any trailing slash.
/// Scheme and host are case-folded by the parser. A link without a scheme
/// (`www.example.com/story`) is read as `https`. Returns `None` for a blank
/// input; unparseable input falls back to its trimmed, lowercased text
/// without the fragment.
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parsed = match Url::parse(trimmed) {
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) if !trimmed.starts_with('/') => {
            match Url::parse(&format!("https://{trimmed}")) {
                Ok(url) => url,
                Err(_) => return Some(fallback(trimmed)),
            }
        }
        Err(_) => return Some(fallback(trimmed)),
    };

    parsed.set_fragment(None);

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(kept);
    }

    let path = parsed.path().trim_end_matches('/').to_string();
    parsed.set_path(&path);

    let normalized = parsed.to_string();
    if parsed.query().is_none() {
        // Special schemes always serialize a root "/" path
        Some(normalized.trim_end_matches('/').to_string())
    } else {
        Some(normalized)
    }
}

fn fallback(text: &str) -> String {
    let without_fragment = text.split('#').next().unwrap_or(text);
    without_fragment.trim_end_matches('/').to_lowercase()
}
