use serde::{Deserialize, Serialize};

use super::ParseEnumError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serde uses the same string as `as_str`, so wire values and labels never drift.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseEnumError {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(
    /// Which collaborator a batch record was fetched from.
    RecordSource {
        Manufacturer => "manufacturer",
        Pharmacy => "pharmacy",
    }
);

str_enum!(
    /// Closed set of authenticity verdicts.
    Verdict {
        NotFound => "not_found",
        Expired => "expired",
        ExpiresToday => "expires_today",
        VerifiedActive => "verified_active",
        AcceptedActive => "accepted_active",
        Unverified => "unverified",
    }
);

str_enum!(
    /// Day-granularity expiry status, most urgent first.
    ExpiryState {
        Expired => "expired",
        ExpiresToday => "expires_today",
        NearExpiry => "near_expiry",
        Active => "active",
    }
);

str_enum!(
    /// Lifecycle stages on the provenance timeline, declared in their
    /// tie-break order.
    TimelineEventType {
        Manufactured => "manufactured",
        BlockchainRegistered => "blockchain_registered",
        PharmacyAccepted => "pharmacy_accepted",
        Verified => "verified",
        CurrentVerification => "current_verification",
    }
);

impl Verdict {
    /// Only active batches with either on-chain or pharmacy provenance are authentic.
    pub fn is_authentic(&self) -> bool {
        matches!(self, Self::VerifiedActive | Self::AcceptedActive)
    }

    /// Short status label shown next to the verdict.
    pub fn status_label(&self) -> &'static str {
        match self {
            Self::NotFound => "Not Found",
            Self::Expired => "Expired",
            Self::ExpiresToday => "Expires Today",
            Self::VerifiedActive => "Verified",
            Self::AcceptedActive => "Accepted",
            Self::Unverified => "Unverified",
        }
    }
}

impl TimelineEventType {
    /// Position in the semantic lifecycle; used to break timestamp ties.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Manufactured => 0,
            Self::BlockchainRegistered => 1,
            Self::PharmacyAccepted => 2,
            Self::Verified => 3,
            Self::CurrentVerification => 4,
        }
    }

    /// Icon name rendered by the dashboard.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Manufactured => "factory",
            Self::BlockchainRegistered => "link",
            Self::PharmacyAccepted => "store",
            Self::Verified => "shield-check",
            Self::CurrentVerification => "search",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn expiry_state_wire_names() {
        assert_eq!(ExpiryState::NearExpiry.as_str(), "near_expiry");
        assert_eq!(
            serde_json::to_string(&ExpiryState::ExpiresToday).unwrap(),
            "\"expires_today\""
        );
        assert_eq!(ExpiryState::from_str("active").unwrap(), ExpiryState::Active);
        assert!(ExpiryState::from_str("near-expiry").is_err());
    }

    #[test]
    fn verdict_round_trip() {
        for (variant, s) in [
            (Verdict::NotFound, "not_found"),
            (Verdict::Expired, "expired"),
            (Verdict::ExpiresToday, "expires_today"),
            (Verdict::VerifiedActive, "verified_active"),
            (Verdict::AcceptedActive, "accepted_active"),
            (Verdict::Unverified, "unverified"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Verdict::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn verdict_serializes_as_label() {
        let json = serde_json::to_string(&Verdict::ExpiresToday).unwrap();
        assert_eq!(json, "\"expires_today\"");
        let back: Verdict = serde_json::from_str("\"accepted_active\"").unwrap();
        assert_eq!(back, Verdict::AcceptedActive);
    }

    #[test]
    fn only_active_provenance_verdicts_are_authentic() {
        assert!(Verdict::VerifiedActive.is_authentic());
        assert!(Verdict::AcceptedActive.is_authentic());
        assert!(!Verdict::NotFound.is_authentic());
        assert!(!Verdict::Expired.is_authentic());
        assert!(!Verdict::ExpiresToday.is_authentic());
        assert!(!Verdict::Unverified.is_authentic());
    }

    #[test]
    fn timeline_rank_follows_lifecycle() {
        let ordered = [
            TimelineEventType::Manufactured,
            TimelineEventType::BlockchainRegistered,
            TimelineEventType::PharmacyAccepted,
            TimelineEventType::Verified,
            TimelineEventType::CurrentVerification,
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn record_source_round_trip() {
        assert_eq!(RecordSource::from_str("pharmacy").unwrap(), RecordSource::Pharmacy);
        assert_eq!(RecordSource::Manufacturer.to_string(), "manufacturer");
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(Verdict::from_str("VERIFIED").is_err());
        assert!(RecordSource::from_str("").is_err());
        let err = TimelineEventType::from_str("shipped").unwrap_err();
        assert_eq!(err.field, "TimelineEventType");
        assert_eq!(err.value, "shipped");
    }
}
