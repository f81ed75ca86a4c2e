// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Spam heuristics for contact form submissions.
//!
//! Three independent checks, any one of which condemns the submission:
//! a fixed keyword list, a link anywhere in the message, and an
//! excessive-capitals ratio. No scoring or weighting. False positives
//! are an accepted trade-off; legitimate messages containing a URL are
//! rejected by rule.

use crate::submission::Submission;
use std::fmt;

const SPAM_KEYWORDS: &[&str] = &[
    "viagra",
    "cialis",
    "lottery",
    "winner",
    "congratulations",
    "urgent business",
    "nigerian prince",
    "bitcoin",
    "cryptocurrency",
    "free money",
    "click here",
    "act now",
    "limited time",
];

/// Which heuristic condemned the submission. Logged server-side only;
/// never returned to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpamReason {
    /// A known spam keyword appeared in the name, message or organization
    KeywordMatch,
    /// The message contains an http:// or https:// link
    ContainsLink,
    /// More than half the message is uppercase
    ExcessiveCaps,
}

impl fmt::Display for SpamReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeywordMatch => write!(f, "spam keyword match"),
            Self::ContainsLink => write!(f, "link in message body"),
            Self::ExcessiveCaps => write!(f, "excessive capital letters"),
        }
    }
}

/// Keyword/pattern spam classifier.
#[derive(Debug, Default, Clone)]
pub struct SpamFilter;

impl SpamFilter {
    pub fn new() -> Self {
        Self
    }

    /// Classify a sanitized submission. `None` means clean.
    pub fn classify(&self, submission: &Submission) -> Option<SpamReason> {
        let haystack = format!(
            "{} {} {}",
            submission.name, submission.message, submission.organization
        )
        .to_lowercase();

        if SPAM_KEYWORDS.iter().any(|kw| haystack.contains(kw)) {
            return Some(SpamReason::KeywordMatch);
        }

        if submission.message.contains("http://") || submission.message.contains("https://") {
            return Some(SpamReason::ContainsLink);
        }

        let len = submission.message.chars().count();
        if len > 20 {
            let caps = submission
                .message
                .chars()
                .filter(|c| c.is_ascii_uppercase())
                .count();
            if caps as f64 / len as f64 > 0.5 {
                return Some(SpamReason::ExcessiveCaps);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::{OrganizationType, ServiceKind, Urgency};

    fn submission(message: &str) -> Submission {
        Submission {
            name: "Jo Smith".to_string(),
            email: "jo@nhs.uk".to_string(),
            phone: None,
            organization: "City Hospital".to_string(),
            organization_type: OrganizationType::NhsTrust,
            service: ServiceKind::WaterTesting,
            urgency: Urgency::Routine,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_clean_message_passes() {
        let filter = SpamFilter::new();
        let s = submission("We need quarterly legionella sampling for our main building.");
        assert_eq!(filter.classify(&s), None);
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let filter = SpamFilter::new();
        for msg in [
            "You have won the LOTTERY, claim your prize today",
            "Invest in Bitcoin before it is too late, act fast",
            "CLICK HERE for an exclusive deal on water testing",
        ] {
            let s = submission(msg);
            assert_eq!(filter.classify(&s), Some(SpamReason::KeywordMatch), "{msg}");
        }
    }

    #[test]
    fn test_keyword_in_name_or_organization() {
        let filter = SpamFilter::new();

        let mut s = submission("A perfectly reasonable enquiry about sampling.");
        s.name = "Lottery Winner".to_string();
        assert_eq!(filter.classify(&s), Some(SpamReason::KeywordMatch));

        let mut s = submission("A perfectly reasonable enquiry about sampling.");
        s.organization = "Cryptocurrency Ventures Ltd".to_string();
        assert_eq!(filter.classify(&s), Some(SpamReason::KeywordMatch));
    }

    #[test]
    fn test_any_link_rejected() {
        let filter = SpamFilter::new();
        // Legitimate messages with URLs are rejected by rule
        let s = submission("Our tender documents are at https://citytrust.nhs.uk/tenders please review.");
        assert_eq!(filter.classify(&s), Some(SpamReason::ContainsLink));

        let s = submission("See http://example.com for details of our site.");
        assert_eq!(filter.classify(&s), Some(SpamReason::ContainsLink));
    }

    #[test]
    fn test_excessive_caps() {
        let filter = SpamFilter::new();

        let s = submission("PLEASE RESPOND IMMEDIATELY THIS IS VERY IMPORTANT");
        assert_eq!(filter.classify(&s), Some(SpamReason::ExcessiveCaps));

        // Short shouty messages are exempt (length <= 20)
        let s = submission("URGENT HELP NEEDED");
        assert_eq!(filter.classify(&s), None);
    }

    #[test]
    fn test_mixed_case_passes() {
        let filter = SpamFilter::new();
        let s = submission("Urgent: our HTM 04-01 audit flagged the East Wing TMVs.");
        assert_eq!(filter.classify(&s), None);
    }
}
