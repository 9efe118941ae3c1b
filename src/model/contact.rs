//! Contact channels detected in a resume.

use serde::{Deserialize, Serialize};

use super::Confidence;

/// The kind of contact channel a detected value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Email,
    Phone,
    LinkedIn,
    GitHub,
    Portfolio,
    Other,
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelKind::Email => write!(f, "email"),
            ChannelKind::Phone => write!(f, "phone"),
            ChannelKind::LinkedIn => write!(f, "LinkedIn"),
            ChannelKind::GitHub => write!(f, "GitHub"),
            ChannelKind::Portfolio => write!(f, "portfolio"),
            ChannelKind::Other => write!(f, "link"),
        }
    }
}

/// A detected email address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    /// The text as matched in the document.
    pub raw: String,
    /// Lowercased, trimmed address.
    pub normalized: String,
    /// Provenance-based confidence.
    pub confidence: Confidence,
}

impl Email {
    pub fn new(raw: impl Into<String>, confidence: Confidence) -> Self {
        let raw = raw.into();
        let normalized = raw.trim().trim_end_matches('.').to_ascii_lowercase();
        Self {
            raw,
            normalized,
            confidence,
        }
    }

    /// Domain part of the normalized address, if well-formed.
    pub fn domain(&self) -> Option<&str> {
        self.normalized.split_once('@').map(|(_, d)| d)
    }

    /// Local part of the normalized address, if well-formed.
    pub fn local_part(&self) -> Option<&str> {
        self.normalized.split_once('@').map(|(l, _)| l)
    }
}

/// A detected phone number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phone {
    /// The text as matched in the document.
    pub raw: String,
    /// Digits only, with a leading `+` preserved when present.
    pub normalized: String,
    /// Provenance-based confidence.
    pub confidence: Confidence,
}

impl Phone {
    pub fn new(raw: impl Into<String>, confidence: Confidence) -> Self {
        let raw = raw.into();
        let mut normalized = String::with_capacity(raw.len());
        for (i, c) in raw.trim().chars().enumerate() {
            if c.is_ascii_digit() || (c == '+' && i == 0) {
                normalized.push(c);
            }
        }
        Self {
            raw,
            normalized,
            confidence,
        }
    }

    /// Number of digits in the normalized form.
    pub fn digit_count(&self) -> usize {
        self.normalized.chars().filter(|c| c.is_ascii_digit()).count()
    }
}

/// A detected hyperlink, classified by domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// The text as matched in the document, or the annotation target.
    pub raw: String,
    /// Normalized URL (scheme added when missing).
    pub url: String,
    /// Channel classification from the URL's domain.
    pub kind: ChannelKind,
    /// Provenance-based confidence.
    pub confidence: Confidence,
}

impl Link {
    pub fn new(raw: impl Into<String>, confidence: Confidence) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim().trim_end_matches(['.', ',', ';', ')']);
        let url = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };
        let kind = classify_url(&url);
        Self {
            raw,
            url,
            kind,
            confidence,
        }
    }
}

/// Classify a URL into a channel kind by domain substring.
fn classify_url(url: &str) -> ChannelKind {
    let lower = url.to_ascii_lowercase();
    if lower.contains("linkedin.com") {
        ChannelKind::LinkedIn
    } else if lower.contains("github.com") {
        ChannelKind::GitHub
    } else if lower.contains("gitlab.com")
        || lower.contains("behance.net")
        || lower.contains("dribbble.com")
        || lower.contains(".dev")
        || lower.contains(".io")
        || lower.contains(".me")
    {
        ChannelKind::Portfolio
    } else {
        ChannelKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalization() {
        let email = Email::new("Jane.Doe@Example.COM.", Confidence::new(0.8));
        assert_eq!(email.normalized, "jane.doe@example.com");
        assert_eq!(email.domain(), Some("example.com"));
        assert_eq!(email.local_part(), Some("jane.doe"));
    }

    #[test]
    fn test_phone_normalization() {
        let phone = Phone::new("+1 (415) 555-0134", Confidence::new(0.7));
        assert_eq!(phone.normalized, "+14155550134");
        assert_eq!(phone.digit_count(), 11);
    }

    #[test]
    fn test_link_classification() {
        let link = Link::new("linkedin.com/in/janedoe", Confidence::new(0.9));
        assert_eq!(link.kind, ChannelKind::LinkedIn);
        assert_eq!(link.url, "https://linkedin.com/in/janedoe");

        let link = Link::new("https://github.com/janedoe", Confidence::new(0.9));
        assert_eq!(link.kind, ChannelKind::GitHub);

        let link = Link::new("https://www.example.com", Confidence::new(0.9));
        assert_eq!(link.kind, ChannelKind::Other);
    }

    #[test]
    fn test_link_trailing_punctuation() {
        let link = Link::new("github.com/janedoe.", Confidence::new(0.5));
        assert_eq!(link.url, "https://github.com/janedoe");
    }
}
