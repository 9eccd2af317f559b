use crate::models::Verdict;

pub const NOT_FOUND_MESSAGE: &str =
    "Batch not found in system. This medicine may be counterfeit or unregistered.";
pub const EXPIRED_MESSAGE: &str = "This medicine has expired. Do not use.";
pub const EXPIRES_TODAY_MESSAGE: &str =
    "This medicine expires today. Use immediately or return it to the pharmacy.";
pub const VERIFIED_ACTIVE_MESSAGE: &str =
    "Authentic medicine. Registration verified on the blockchain.";
pub const ACCEPTED_ACTIVE_MESSAGE: &str =
    "Authentic medicine. Accepted into pharmacy inventory from the manufacturer.";
pub const UNVERIFIED_MESSAGE: &str =
    "Batch found but not verified on the blockchain or accepted by a pharmacy. Proceed with caution.";

/// The one user-facing message for each verdict.
pub fn verdict_message(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::NotFound => NOT_FOUND_MESSAGE,
        Verdict::Expired => EXPIRED_MESSAGE,
        Verdict::ExpiresToday => EXPIRES_TODAY_MESSAGE,
        Verdict::VerifiedActive => VERIFIED_ACTIVE_MESSAGE,
        Verdict::AcceptedActive => ACCEPTED_ACTIVE_MESSAGE,
        Verdict::Unverified => UNVERIFIED_MESSAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_verdict_has_a_distinct_message() {
        let all = [
            Verdict::NotFound,
            Verdict::Expired,
            Verdict::ExpiresToday,
            Verdict::VerifiedActive,
            Verdict::AcceptedActive,
            Verdict::Unverified,
        ];
        let messages: HashSet<_> = all.iter().map(|v| verdict_message(*v)).collect();
        assert_eq!(messages.len(), all.len());
    }

    #[test]
    fn expiry_messages_are_distinguishable() {
        assert!(verdict_message(Verdict::Expired).contains("Do not use"));
        assert!(verdict_message(Verdict::ExpiresToday).contains("expires today"));
        assert!(verdict_message(Verdict::NotFound).starts_with("Batch not found in system"));
    }
}
