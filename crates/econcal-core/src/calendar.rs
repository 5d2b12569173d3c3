//! Calendar normalization: raw release records to sorted display records.

use serde::{Deserialize, Serialize};

use crate::classify::classify;
use crate::domain::{DisplayRecord, RawRelease};
use crate::rules::Pattern;
use crate::schedule::infer_release_time;

/// The feed covers US statistics only.
pub const CALENDAR_CURRENCY: &str = "USD";

/// Caller-facing options threaded through the normalizer. The major-only
/// flag is an explicit parameter here; persistence lives with the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    pub major_only: bool,
}

/// Allow-list restricting display to the curated major-indicator
/// categories. Matched case-insensitively against the translated label,
/// orthogonal to the importance tier.
const MAJOR_ALLOWLIST: &[Pattern] = &[
    Pattern::Phrase("消費者物価指数"),
    Pattern::Phrase("cpi"),
    Pattern::Phrase("雇用統計"),
    Pattern::Phrase("非農業部門雇用者数"),
    Pattern::Phrase("nfp"),
    Pattern::Phrase("国内総生産"),
    Pattern::Phrase("gdp"),
    Pattern::Phrase("政策金利"),
    Pattern::Phrase("fomc"),
    Pattern::Phrase("金利決定"),
    Pattern::Phrase("フェデラルファンド"),
    Pattern::Phrase("個人消費支出"),
    Pattern::Phrase("pce"),
    Pattern::Phrase("小売売上高"),
    Pattern::Phrase("失業率"),
    Pattern::Phrase("鉱工業生産"),
    Pattern::Phrase("工業生産"),
    Pattern::Phrase("ism"),
    Pattern::Phrase("pmi"),
    Pattern::Phrase("景況指数"),
    Pattern::Phrase("耐久財受注"),
    Pattern::Phrase("住宅着工"),
    Pattern::Phrase("建築許可"),
    Pattern::Phrase("消費者信頼感"),
    Pattern::Phrase("ミシガン大学"),
    Pattern::Phrase("消費者態度指数"),
];

fn is_major(label: &str) -> bool {
    let label = label.to_lowercase();
    MAJOR_ALLOWLIST
        .iter()
        .any(|pattern| pattern.matches(&label))
}

/// Transforms raw releases into display-ready records: classify, infer the
/// Japan release moment, then stable-sort ascending by effective date and
/// time. An inferred moment overwrites the record's effective date, so
/// Eastern-evening releases move to the next Japan calendar day. Ties keep
/// original input order. Empty input yields empty output.
pub fn normalize(raw: &[RawRelease], options: &NormalizeOptions) -> Vec<DisplayRecord> {
    let mut records: Vec<DisplayRecord> = raw
        .iter()
        .map(|release| {
            let classified = classify(&release.raw_name);
            let (date, time) = match infer_release_time(release.date, &release.raw_name) {
                Some(moment) => (moment.date, Some(moment.time)),
                None => (release.date, None),
            };

            DisplayRecord {
                date,
                time,
                currency: String::from(CALENDAR_CURRENCY),
                importance: classified.importance,
                indicator: classified.label,
            }
        })
        .collect();

    if options.major_only {
        records.retain(|record| is_major(&record.indicator));
    }

    records.sort_by_key(|record| (record.date, record.time));
    records
}
