//! Expiry Classifier.
//!
//! Both sides are compared as calendar days. A batch is expired on its
//! expiry day itself; `expires_today` singles that day out. A batch that is
//! still usable but expires within `near_expiry_days` is flagged
//! `near_expiry`.

use chrono::NaiveDate;

use crate::models::DateLike;

use super::dates::parse_calendar_day;
use super::types::{ExpiryStatus, VerificationError};

/// Classify a raw expiry value against `reference_day`.
/// A missing or unparsable value is an error, never "active".
pub fn classify_expiry(
    expiry: Option<&DateLike>,
    reference_day: NaiveDate,
    near_expiry_days: u32,
) -> Result<ExpiryStatus, VerificationError> {
    let value = expiry.ok_or_else(|| VerificationError::InvalidDate {
        field: "expiry".into(),
        value: String::new(),
    })?;
    let expiry_day = parse_calendar_day(value).ok_or_else(|| VerificationError::InvalidDate {
        field: "expiry".into(),
        value: value.to_string(),
    })?;
    Ok(classify_expiry_day(expiry_day, reference_day, near_expiry_days))
}

/// Classify an already-parsed expiry day. A threshold of 0 disables
/// `near_expiry`.
pub fn classify_expiry_day(
    expiry_day: NaiveDate,
    reference_day: NaiveDate,
    near_expiry_days: u32,
) -> ExpiryStatus {
    let days_remaining = (expiry_day - reference_day).num_days();
    let is_expired = expiry_day <= reference_day;
    ExpiryStatus {
        expiry_day,
        is_expired,
        expires_today: days_remaining == 0,
        near_expiry: !is_expired && days_remaining <= i64::from(near_expiry_days),
        days_remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn future_expiry_is_active() {
        let status = classify_expiry(Some(&"2026-06-30".into()), day(2025, 6, 1), 30).unwrap();
        assert!(!status.is_expired);
        assert!(!status.expires_today);
        assert_eq!(status.days_remaining, 394);
    }

    #[test]
    fn same_day_is_expired_and_today() {
        let status = classify_expiry(Some(&"2025-06-01".into()), day(2025, 6, 1), 30).unwrap();
        assert!(status.is_expired);
        assert!(status.expires_today);
        assert_eq!(status.days_remaining, 0);
    }

    #[test]
    fn time_of_day_does_not_shift_the_day() {
        let status =
            classify_expiry(Some(&"2025-06-01T23:59:59Z".into()), day(2025, 6, 1), 30).unwrap();
        assert!(status.expires_today);

        let tomorrow =
            classify_expiry(Some(&"2025-06-02T00:00:01Z".into()), day(2025, 6, 1), 30).unwrap();
        assert!(!tomorrow.is_expired);
        assert_eq!(tomorrow.days_remaining, 1);
    }

    #[test]
    fn past_expiry_has_negative_days() {
        let status = classify_expiry(Some(&"2024-05-20".into()), day(2025, 6, 1), 30).unwrap();
        assert!(status.is_expired);
        assert!(!status.expires_today);
        assert_eq!(status.days_remaining, -377);
    }

    #[test]
    fn missing_expiry_is_invalid_date() {
        let err = classify_expiry(None, day(2025, 6, 1), 30).unwrap_err();
        assert!(matches!(err, VerificationError::InvalidDate { ref field, .. } if field == "expiry"));
    }

    #[test]
    fn unparsable_expiry_is_invalid_date() {
        let err = classify_expiry(Some(&"soon".into()), day(2025, 6, 1), 30).unwrap_err();
        assert_eq!(
            err,
            VerificationError::InvalidDate {
                field: "expiry".into(),
                value: "soon".into()
            }
        );
    }

    #[test]
    fn expires_today_implies_expired() {
        let reference = day(2025, 6, 1);
        for offset in -400..=400 {
            let status = classify_expiry_day(reference + chrono::Duration::days(offset), reference, 30);
            if status.expires_today {
                assert!(status.is_expired);
            }
            assert_eq!(status.days_remaining, offset);
        }
    }

    #[test]
    fn near_expiry_window_boundaries() {
        let reference = day(2025, 6, 1);
        let at = |days: i64| {
            classify_expiry_day(reference + chrono::Duration::days(days), reference, 30)
        };

        assert!(at(1).near_expiry);
        assert!(at(30).near_expiry);
        assert!(!at(31).near_expiry);
        // Today and past are expired, not near expiry.
        assert!(!at(0).near_expiry);
        assert!(!at(-1).near_expiry);
    }

    #[test]
    fn zero_threshold_disables_near_expiry() {
        let reference = day(2025, 6, 1);
        let tomorrow = classify_expiry_day(day(2025, 6, 2), reference, 0);
        assert!(!tomorrow.near_expiry);
        assert!(!tomorrow.is_expired);
    }

    #[test]
    fn increasing_days_never_flips_to_expired() {
        let reference = day(2025, 6, 1);
        let mut previously_expired = true;
        for offset in -30..=30 {
            let status = classify_expiry_day(reference + chrono::Duration::days(offset), reference, 30);
            // Once active, later expiry days stay active.
            assert!(previously_expired || !status.is_expired);
            previously_expired = status.is_expired;
        }
    }
}
