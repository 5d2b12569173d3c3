//! Indicator classification: Japanese display labels and importance tiers.

use serde::{Deserialize, Serialize};

use crate::domain::Importance;
use crate::rules::Pattern;

/// Classification derived from a raw release name. Recomputed on demand,
/// never stored independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedIndicator {
    pub label: String,
    pub importance: Importance,
}

struct LabelRule {
    patterns: &'static [Pattern],
    label: &'static str,
}

/// Fixed translation table, first match wins. Unmatched names pass through
/// untranslated.
const LABEL_RULES: &[LabelRule] = &[
    LabelRule {
        patterns: &[Pattern::Phrase("consumer price index"), Pattern::Word("cpi")],
        label: "消費者物価指数（CPI）",
    },
    LabelRule {
        patterns: &[Pattern::Phrase("producer price index"), Pattern::Word("ppi")],
        label: "生産者物価指数（PPI）",
    },
    LabelRule {
        patterns: &[
            Pattern::Phrase("employment situation"),
            Pattern::Phrase("nonfarm"),
            Pattern::Phrase("payroll"),
        ],
        label: "雇用統計（非農業部門雇用者数）",
    },
    LabelRule {
        patterns: &[Pattern::Phrase("unemployment rate")],
        label: "失業率",
    },
    LabelRule {
        patterns: &[
            Pattern::Phrase("gross domestic product"),
            Pattern::Word("gdp"),
        ],
        label: "国内総生産（GDP）",
    },
    LabelRule {
        patterns: &[
            Pattern::Phrase("personal consumption expenditures"),
            Pattern::Word("pce"),
        ],
        label: "個人消費支出（PCE）",
    },
    LabelRule {
        patterns: &[Pattern::Phrase("retail sales")],
        label: "小売売上高",
    },
    LabelRule {
        patterns: &[Pattern::Phrase("housing starts")],
        label: "住宅着工件数",
    },
    LabelRule {
        patterns: &[Pattern::Phrase("building permits")],
        label: "建築許可件数",
    },
    LabelRule {
        patterns: &[Pattern::Phrase("industrial production")],
        label: "鉱工業生産",
    },
    LabelRule {
        patterns: &[Pattern::AnyThen(
            &["ism", "institute for supply management", "pmi"],
            "manufacturing",
        )],
        label: "ISM製造業景況指数（PMI）",
    },
    LabelRule {
        patterns: &[Pattern::AnyThen(
            &["ism", "institute for supply management", "pmi"],
            "services",
        )],
        label: "ISM非製造業景況指数（PMI）",
    },
    LabelRule {
        patterns: &[Pattern::Phrase("durable goods")],
        label: "耐久財受注",
    },
    LabelRule {
        patterns: &[
            Pattern::Phrase("consumer confidence"),
            Pattern::Phrase("conference board"),
        ],
        label: "消費者信頼感指数",
    },
    LabelRule {
        patterns: &[
            Pattern::Phrase("university of michigan"),
            Pattern::Phrase("michigan sentiment"),
            Pattern::Phrase("consumer sentiment"),
        ],
        label: "ミシガン大学消費者態度指数",
    },
    LabelRule {
        patterns: &[
            Pattern::Phrase("federal open market committee"),
            Pattern::Word("fomc"),
            Pattern::Phrase("fed funds"),
            Pattern::Phrase("interest rate decision"),
        ],
        label: "FOMC／政策金利関連",
    },
    LabelRule {
        patterns: &[
            Pattern::Phrase("jobless claims"),
            Pattern::Phrase("initial claims"),
        ],
        label: "新規失業保険申請件数",
    },
];

/// Importance keyword sets: plain substring membership, high checked before
/// mid, everything else Routine.
const HIGH_KEYWORDS: &[&str] = &[
    "consumer price index",
    "cpi",
    "nonfarm payroll",
    "payroll",
    "gdp",
    "gross domestic product",
    "federal funds",
    "fed funds",
    "unemployment rate",
    "core",
];

const MID_KEYWORDS: &[&str] = &[
    "industrial production",
    "housing starts",
    "retail",
    "pmi",
    "ism",
    "confidence",
    "sentiment",
    "durable",
];

/// Classifies a raw release name into a display label and importance tier.
/// Pure and deterministic; "no rule matched" is a defined fallback, not an
/// error.
pub fn classify(raw_name: &str) -> ClassifiedIndicator {
    let name = raw_name.to_lowercase();

    let label = LABEL_RULES
        .iter()
        .find(|rule| rule.patterns.iter().any(|pattern| pattern.matches(&name)))
        .map(|rule| rule.label.to_owned())
        .unwrap_or_else(|| raw_name.to_owned());

    let importance = if HIGH_KEYWORDS.iter().any(|keyword| name.contains(keyword)) {
        Importance::High
    } else if MID_KEYWORDS.iter().any(|keyword| name.contains(keyword)) {
        Importance::Medium
    } else {
        Importance::Routine
    };

    ClassifiedIndicator { label, importance }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonfarm_payrolls_is_top_tier_employment() {
        let classified = classify("Nonfarm Payrolls");
        assert_eq!(classified.label, "雇用統計（非農業部門雇用者数）");
        assert_eq!(classified.importance, Importance::High);
    }

    #[test]
    fn industrial_production_is_mid_tier() {
        let classified = classify("Industrial Production Index");
        assert_eq!(classified.label, "鉱工業生産");
        assert_eq!(classified.importance, Importance::Medium);
    }

    #[test]
    fn untracked_release_passes_through() {
        let classified = classify("Some Untracked Release");
        assert_eq!(classified.label, "Some Untracked Release");
        assert_eq!(classified.importance, Importance::Routine);
    }

    #[test]
    fn cpi_acronym_translates_but_not_inside_words() {
        assert_eq!(classify("CPI for All Urban Consumers").label, "消費者物価指数（CPI）");
        assert_eq!(classify("Recpitulation Weekly").label, "Recpitulation Weekly");
    }

    #[test]
    fn ism_sector_rules_pick_the_trailing_sector() {
        assert_eq!(
            classify("ISM Report on Business: Manufacturing").label,
            "ISM製造業景況指数（PMI）"
        );
        assert_eq!(
            classify("PMI Services Flash").label,
            "ISM非製造業景況指数（PMI）"
        );
    }

    #[test]
    fn employment_situation_outranks_unemployment_rule_order() {
        // "Employment Situation" hits the employment rule before the
        // unemployment-rate rule can be reached.
        assert_eq!(classify("Employment Situation").label, "雇用統計（非農業部門雇用者数）");
        assert_eq!(classify("Unemployment Rate").label, "失業率");
    }

    #[test]
    fn core_prefix_lifts_importance_to_high() {
        let classified = classify("Core PCE Price Index");
        assert_eq!(classified.importance, Importance::High);
        assert_eq!(classified.label, "個人消費支出（PCE）");
    }

    #[test]
    fn jobless_claims_translate_without_mid_keywords() {
        let classified = classify("Initial Jobless Claims");
        assert_eq!(classified.label, "新規失業保険申請件数");
        assert_eq!(classified.importance, Importance::Routine);
    }

    #[test]
    fn classification_is_deterministic() {
        let first = classify("Retail Sales Advance Report");
        let second = classify("Retail Sales Advance Report");
        assert_eq!(first, second);
        assert_eq!(first.label, "小売売上高");
        assert_eq!(first.importance, Importance::Medium);
    }
}
