//! Contact channel extraction.
//!
//! Native PDF link annotations are consumed first: they are machine-
//! encoded and carry annotation-tier confidence. Everything else is
//! regex-recovered from the assembled lines at a confidence derated from
//! the source's base tier.

use std::sync::OnceLock;

use regex::Regex;

use crate::extract::{LinkAnnotation, SourceTag};
use crate::model::{Confidence, Email, Line, Link, Phone};

/// Regex-recovered facts run at this fraction of the source's base
/// confidence; always below the annotation tier.
const PATTERN_CONFIDENCE_FACTOR: f32 = 0.9;

/// Plausible phone numbers carry at least this many digits (filters out
/// year ranges) and at most this many.
const PHONE_MIN_DIGITS: usize = 9;
const PHONE_MAX_DIGITS: usize = 15;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap())
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\+?\d{1,3}[\s.\-]?\(?\d{2,4}\)?[\s.\-]?\d{3}[\s.\-]?\d{3,4}").unwrap()
    })
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?xi)
            https?://[^\s|,;"')]+
            | www\.[^\s|,;"')]+
            | \b(?:linkedin\.com|github\.com|gitlab\.com|behance\.net|dribbble\.com)/[^\s|,;"')]+
            "#,
        )
        .unwrap()
    })
}

/// Output of the contact scan.
pub struct ContactScan {
    pub emails: Vec<Email>,
    pub phones: Vec<Phone>,
    pub links: Vec<Link>,
}

/// Extract contact channels from lines and native annotations.
pub fn extract(lines: &[Line], annotations: &[LinkAnnotation], base: Confidence) -> ContactScan {
    let pattern_confidence = base.scaled(PATTERN_CONFIDENCE_FACTOR);
    let annotation_confidence = SourceTag::PdfAnnotation.base_confidence();

    let mut emails: Vec<Email> = Vec::new();
    let mut phones: Vec<Phone> = Vec::new();
    let mut links: Vec<Link> = Vec::new();

    // Annotations first: highest-confidence source, and the dedup below
    // lets them shadow the same value found by regex.
    for annotation in annotations {
        if let Some(address) = annotation.url.strip_prefix("mailto:") {
            push_email(&mut emails, Email::new(address, annotation_confidence));
        } else if annotation.url.strip_prefix("tel:").is_some() {
            let number = annotation.url.trim_start_matches("tel:");
            push_phone(&mut phones, Phone::new(number, annotation_confidence));
        } else {
            push_link(&mut links, Link::new(&annotation.url, annotation_confidence));
        }
    }

    for line in lines {
        for m in email_regex().find_iter(&line.text) {
            push_email(&mut emails, Email::new(m.as_str(), pattern_confidence));
        }

        for m in url_regex().find_iter(&line.text) {
            // An email's domain part can also look like a bare URL.
            if is_inside_email(&line.text, m.start()) {
                continue;
            }
            push_link(&mut links, Link::new(m.as_str(), pattern_confidence));
        }

        for m in phone_regex().find_iter(&line.text) {
            let candidate = Phone::new(m.as_str(), pattern_confidence);
            let digits = candidate.digit_count();
            if (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits) {
                push_phone(&mut phones, candidate);
            }
        }
    }

    ContactScan {
        emails,
        phones,
        links,
    }
}

/// True when the match position sits inside an email address on the line.
fn is_inside_email(text: &str, position: usize) -> bool {
    email_regex()
        .find_iter(text)
        .any(|m| m.start() <= position && position < m.end())
}

fn push_email(emails: &mut Vec<Email>, email: Email) {
    if !emails.iter().any(|e| e.normalized == email.normalized) {
        emails.push(email);
    }
}

fn push_phone(phones: &mut Vec<Phone>, phone: Phone) {
    let digits_of = |p: &Phone| {
        p.normalized
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect::<String>()
    };
    let new_digits = digits_of(&phone);
    if !phones
        .iter()
        .any(|p| digits_of(p).ends_with(&new_digits) || new_digits.ends_with(&digits_of(p)))
    {
        phones.push(phone);
    }
}

fn push_link(links: &mut Vec<Link>, link: Link) {
    let key = link.url.trim_end_matches('/').to_ascii_lowercase();
    if !links
        .iter()
        .any(|l| l.url.trim_end_matches('/').eq_ignore_ascii_case(&key))
    {
        links.push(link);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChannelKind;

    fn line(text: &str) -> Line {
        Line {
            text: text.to_string(),
            page: 1,
            source: SourceTag::PlainFallback,
        }
    }

    #[test]
    fn test_extract_email_and_phone() {
        let lines = vec![line("jane.doe@example.com | +1 (415) 555-0134")];
        let scan = extract(&lines, &[], Confidence::new(0.4));

        assert_eq!(scan.emails.len(), 1);
        assert_eq!(scan.emails[0].normalized, "jane.doe@example.com");
        assert_eq!(scan.phones.len(), 1);
        assert_eq!(scan.phones[0].normalized, "+14155550134");
    }

    #[test]
    fn test_year_ranges_are_not_phones() {
        let lines = vec![line("Acme Corp 2019 - 2023"), line("2020-2021")];
        let scan = extract(&lines, &[], Confidence::new(0.4));
        assert!(scan.phones.is_empty());
    }

    #[test]
    fn test_extract_links_classified() {
        let lines = vec![
            line("linkedin.com/in/janedoe"),
            line("https://github.com/janedoe"),
        ];
        let scan = extract(&lines, &[], Confidence::new(0.4));
        assert_eq!(scan.links.len(), 2);
        assert_eq!(scan.links[0].kind, ChannelKind::LinkedIn);
        assert_eq!(scan.links[1].kind, ChannelKind::GitHub);
    }

    #[test]
    fn test_annotations_shadow_regex_finds() {
        let lines = vec![line("linkedin.com/in/janedoe")];
        let annotations = vec![LinkAnnotation {
            url: "https://linkedin.com/in/janedoe".to_string(),
            page: 1,
        }];
        let scan = extract(&lines, &annotations, Confidence::new(0.8));

        assert_eq!(scan.links.len(), 1);
        // The surviving link carries annotation-tier confidence, above
        // anything a regex find can reach.
        assert!(scan.links[0].confidence >= SourceTag::PdfAnnotation.base_confidence());
    }

    #[test]
    fn test_mailto_annotation_is_email() {
        let annotations = vec![LinkAnnotation {
            url: "mailto:jane@example.com".to_string(),
            page: 1,
        }];
        let scan = extract(&[], &annotations, Confidence::new(0.8));
        assert_eq!(scan.emails.len(), 1);
        assert_eq!(scan.emails[0].normalized, "jane@example.com");
        assert!(scan.links.is_empty());
    }

    #[test]
    fn test_pattern_confidence_below_annotation_tier() {
        let lines = vec![line("jane@example.com")];
        let scan = extract(&lines, &[], Confidence::new(0.8));
        assert!(scan.emails[0].confidence < SourceTag::PdfAnnotation.base_confidence());
    }

    #[test]
    fn test_email_domain_not_double_counted_as_link() {
        let lines = vec![line("reach me at jane@example.com any time")];
        let scan = extract(&lines, &[], Confidence::new(0.4));
        assert!(scan.links.is_empty());
    }

    #[test]
    fn test_duplicate_emails_deduped() {
        let lines = vec![line("jane@example.com"), line("Jane@Example.com")];
        let scan = extract(&lines, &[], Confidence::new(0.4));
        assert_eq!(scan.emails.len(), 1);
    }
}
