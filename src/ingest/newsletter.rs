// Newsletter detection from an email's sender, subject and body text.

/// Subject phrases newsletters put in their subject lines.
const SUBJECT_PHRASES: &[&str] = &[
    "newsletter",
    "digest",
    "daily brief",
    "morning brief",
    "weekly roundup",
    "today in",
    "this week",
    "breaking news",
    "daily update",
    "news roundup",
    "top stories",
];

/// Sender domains (and address fragments) of news publishers.
const NEWS_SENDERS: &[&str] = &[
    "nytimes.com",
    "wsj.com",
    "washingtonpost.com",
    "axios.com",
    "politico.com",
    "bloomberg.com",
    "reuters.com",
    "cnn.com",
    "bbc.com",
    "theguardian.com",
    "forbes.com",
    "economist.com",
    "substack.com",
    "medium.com",
    "news",
    "newsletter",
];

/// Whether an email looks like a newsletter.
///
/// Any one signal is enough: a newsletter phrase in the subject, a news
/// publisher in the sender, or an unsubscribe link in the body.
pub fn is_newsletter(sender: &str, subject: &str, body: &str) -> bool {
    let subject = subject.to_lowercase();
    if SUBJECT_PHRASES.iter().any(|p| subject.contains(p)) {
        return true;
    }

    let sender = sender.to_lowercase();
    if NEWS_SENDERS.iter().any(|d| sender.contains(d)) {
        return true;
    }

    body.to_lowercase().contains("unsubscribe")
}
