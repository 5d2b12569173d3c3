//! Release-time inference from free-text release names.

use crate::domain::{CalendarDate, ClockTime, JapanMoment};
use crate::rules::Pattern;
use crate::zone::eastern_to_japan;

/// One inference rule: if any pattern fires, the release is scheduled at
/// the given Eastern clock time.
struct TimeRule {
    patterns: &'static [Pattern],
    eastern_hour: u8,
    eastern_minute: u8,
}

/// Canonical US release times, most specific indicators first. The bulk of
/// the majors print at 08:30 ET; the broad ISM/PMI bucket and the FOMC sit
/// last so they cannot shadow a more specific match.
const TIME_RULES: &[TimeRule] = &[
    TimeRule {
        patterns: &[Pattern::Phrase("consumer price index"), Pattern::Word("cpi")],
        eastern_hour: 8,
        eastern_minute: 30,
    },
    TimeRule {
        patterns: &[
            Pattern::Phrase("nonfarm"),
            Pattern::Phrase("payroll"),
            Pattern::Phrase("employment situation"),
        ],
        eastern_hour: 8,
        eastern_minute: 30,
    },
    TimeRule {
        patterns: &[
            Pattern::Phrase("gross domestic product"),
            Pattern::Word("gdp"),
        ],
        eastern_hour: 8,
        eastern_minute: 30,
    },
    TimeRule {
        patterns: &[
            Pattern::Phrase("pce"),
            Pattern::Phrase("personal consumption expenditures"),
        ],
        eastern_hour: 8,
        eastern_minute: 30,
    },
    TimeRule {
        patterns: &[Pattern::Phrase("retail sales")],
        eastern_hour: 8,
        eastern_minute: 30,
    },
    TimeRule {
        patterns: &[Pattern::Phrase("unemployment rate")],
        eastern_hour: 8,
        eastern_minute: 30,
    },
    TimeRule {
        patterns: &[
            Pattern::Phrase("housing starts"),
            Pattern::Phrase("building permits"),
        ],
        eastern_hour: 8,
        eastern_minute: 30,
    },
    TimeRule {
        patterns: &[Pattern::Phrase("industrial production")],
        eastern_hour: 9,
        eastern_minute: 15,
    },
    TimeRule {
        patterns: &[
            Pattern::Phrase("ism"),
            Pattern::Phrase("pmi"),
            Pattern::Phrase("purchasing managers"),
            Pattern::Phrase("manufacturing"),
            Pattern::Phrase("services"),
        ],
        eastern_hour: 10,
        eastern_minute: 0,
    },
    TimeRule {
        patterns: &[
            Pattern::Phrase("fomc"),
            Pattern::Phrase("federal open market"),
            Pattern::Phrase("interest rate decision"),
            Pattern::Phrase("fed funds rate"),
        ],
        eastern_hour: 14,
        eastern_minute: 0,
    },
];

/// Infers the Japan-local release moment for a named release on the given
/// Eastern calendar date. Rules are evaluated case-insensitively, first
/// match wins; unmatched names yield `None` and the caller leaves the time
/// blank. The returned date may roll past the input date.
pub fn infer_release_time(date: CalendarDate, raw_name: &str) -> Option<JapanMoment> {
    let name = raw_name.to_lowercase();
    let rule = TIME_RULES
        .iter()
        .find(|rule| rule.patterns.iter().any(|pattern| pattern.matches(&name)))?;

    let eastern = ClockTime::new(rule.eastern_hour, rule.eastern_minute)
        .expect("rule table times are valid");
    Some(eastern_to_japan(date, eastern))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> CalendarDate {
        raw.parse().expect("valid test date")
    }

    fn time(raw: &str) -> ClockTime {
        raw.parse().expect("valid test time")
    }

    #[test]
    fn cpi_release_converts_from_eastern_morning() {
        let moment =
            infer_release_time(date("2025-06-18"), "Consumer Price Index").expect("must match");
        // ET 08:30 + 13h daylight shift.
        assert_eq!(moment.date, date("2025-06-18"));
        assert_eq!(moment.time, time("21:30"));
    }

    #[test]
    fn untracked_release_has_no_time() {
        assert!(infer_release_time(date("2025-06-18"), "Some Untracked Release").is_none());
        assert!(infer_release_time(date("2025-06-18"), "Beige Book").is_none());
    }

    #[test]
    fn fomc_afternoon_rolls_to_next_japan_day() {
        let moment =
            infer_release_time(date("2025-06-18"), "FOMC Press Conference").expect("must match");
        assert_eq!(moment.date, date("2025-06-19"));
        assert_eq!(moment.time, time("03:00"));
    }

    #[test]
    fn industrial_production_prints_mid_morning() {
        let moment = infer_release_time(date("2025-01-17"), "G.17 Industrial Production")
            .expect("must match");
        // ET 09:15 + 14h standard shift.
        assert_eq!(moment.time, time("23:15"));
    }

    #[test]
    fn first_match_wins_over_later_rules() {
        // "Manufacturing" alone is the 10:00 ISM bucket, but a CPI name
        // containing it must still take the earlier 08:30 rule.
        let moment = infer_release_time(
            date("2025-06-18"),
            "CPI for Manufacturing Industries",
        )
        .expect("must match");
        assert_eq!(moment.time, time("21:30"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(infer_release_time(date("2025-06-18"), "RETAIL SALES").is_some());
        assert!(infer_release_time(date("2025-06-18"), "Housing Starts").is_some());
    }

    #[test]
    fn cpi_acronym_is_word_bounded() {
        assert!(infer_release_time(date("2025-06-18"), "Recpitulation Survey").is_none());
    }
}
