use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::{CalendarDate, ClockTime};
use crate::ValidationError;

/// Upstream identifier of a scheduled release series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseId(pub i64);

impl Display for ReleaseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw release record as produced by the fetch layer: deduplicated,
/// date-filtered, immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRelease {
    pub release_id: ReleaseId,
    pub raw_name: String,
    pub date: CalendarDate,
}

impl RawRelease {
    pub fn new(
        release_id: ReleaseId,
        raw_name: impl Into<String>,
        date: CalendarDate,
    ) -> Result<Self, ValidationError> {
        let raw_name = raw_name.into();
        if raw_name.trim().is_empty() {
            return Err(ValidationError::EmptyReleaseName);
        }

        Ok(Self {
            release_id,
            raw_name,
            date,
        })
    }
}

/// Importance tier of a release, serialized as its numeric level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Importance {
    High,
    Medium,
    Routine,
}

impl Importance {
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Routine];

    /// Numeric tier on the 1-5 star scale.
    pub const fn tier(self) -> u8 {
        match self {
            Self::High => 5,
            Self::Medium => 3,
            Self::Routine => 2,
        }
    }

    pub fn from_tier(value: u8) -> Result<Self, ValidationError> {
        match value {
            5 => Ok(Self::High),
            3 => Ok(Self::Medium),
            2 => Ok(Self::Routine),
            other => Err(ValidationError::InvalidImportance { value: other }),
        }
    }

    /// Star rating used by the table renderer, padded to five.
    pub fn stars(self) -> String {
        let tier = usize::from(self.tier());
        let mut stars = "★".repeat(tier);
        stars.push_str(&"☆".repeat(5 - tier));
        stars
    }
}

impl Serialize for Importance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.tier())
    }
}

impl<'de> Deserialize<'de> for Importance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::from_tier(value).map_err(D::Error::custom)
    }
}

/// Display-ready calendar entry, one per raw release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub date: CalendarDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<ClockTime>,
    pub currency: String,
    pub importance: Importance,
    pub indicator: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_release_name() {
        let date: CalendarDate = "2025-08-13".parse().expect("must parse");
        let err = RawRelease::new(ReleaseId(10), "   ", date).expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyReleaseName));
    }

    #[test]
    fn importance_tier_stays_within_star_scale() {
        for importance in Importance::ALL {
            assert!((1..=5).contains(&importance.tier()));
        }
    }

    #[test]
    fn stars_pad_to_five() {
        assert_eq!(Importance::High.stars(), "★★★★★");
        assert_eq!(Importance::Medium.stars(), "★★★☆☆");
        assert_eq!(Importance::Routine.stars(), "★★☆☆☆");
    }

    #[test]
    fn importance_round_trips_as_number() {
        let json = serde_json::to_string(&Importance::Medium).expect("must serialize");
        assert_eq!(json, "3");
        let back: Importance = serde_json::from_str(&json).expect("must deserialize");
        assert_eq!(back, Importance::Medium);
    }

    #[test]
    fn rejects_unknown_tier() {
        let err = Importance::from_tier(4).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidImportance { value: 4 }));
    }

    #[test]
    fn display_record_omits_absent_time() {
        let record = DisplayRecord {
            date: "2025-08-13".parse().expect("must parse"),
            time: None,
            currency: String::from("USD"),
            importance: Importance::Routine,
            indicator: String::from("Beige Book"),
        };
        let json = serde_json::to_value(&record).expect("must serialize");
        assert!(json.get("time").is_none());
    }
}
