//! Authenticity Classifier. Pure and total: every combination of signals
//! maps to exactly one verdict, first matching rule wins.

use crate::models::Verdict;

use super::types::{AuthenticitySignals, Resolution};

/// Classify a resolution. A found record always carries its expiry facts.
pub fn classify(resolution: Resolution<'_>) -> Verdict {
    classify_signals(&AuthenticitySignals::from(resolution))
}

pub fn classify_signals(signals: &AuthenticitySignals) -> Verdict {
    if !signals.found {
        Verdict::NotFound
    } else if signals.is_expired && !signals.expires_today {
        Verdict::Expired
    } else if signals.expires_today {
        Verdict::ExpiresToday
    } else if signals.blockchain_verified {
        Verdict::VerifiedActive
    } else if signals.accepted_from_manufacturer {
        Verdict::AcceptedActive
    } else {
        Verdict::Unverified
    }
}
