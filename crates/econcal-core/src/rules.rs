//! Keyword patterns for the ordered rule tables.
//!
//! Rules are fixed-order (pattern, result) lists evaluated first-match-wins
//! over the lowercased release name. Three match shapes cover the tables:
//! plain substrings, word-bounded acronyms (so "cpi" never fires inside an
//! unrelated word), and ordered keyword pairs for the ISM/PMI sector rules.

/// A single case-insensitive predicate over a lowercased name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Substring match anywhere in the name.
    Phrase(&'static str),
    /// Substring match bounded by non-alphanumeric characters.
    Word(&'static str),
    /// Any of the lead keywords followed later by the trailing keyword.
    AnyThen(&'static [&'static str], &'static str),
}

impl Pattern {
    /// Whether this pattern fires on the given name. Callers lowercase the
    /// name once before walking a rule table.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Phrase(phrase) => name.contains(phrase),
            Self::Word(word) => contains_word(name, word),
            Self::AnyThen(leads, trailing) => leads
                .iter()
                .any(|lead| follows(name, lead, trailing)),
        }
    }
}

/// Substring containment with word boundaries on both sides.
fn contains_word(name: &str, word: &str) -> bool {
    let mut search_from = 0;
    while let Some(found) = name[search_from..].find(word) {
        let start = search_from + found;
        let end = start + word.len();

        let bounded_left = name[..start]
            .chars()
            .next_back()
            .map_or(true, |ch| !ch.is_ascii_alphanumeric());
        let bounded_right = name[end..]
            .chars()
            .next()
            .map_or(true, |ch| !ch.is_ascii_alphanumeric());

        if bounded_left && bounded_right {
            return true;
        }
        search_from = start + 1;
    }
    false
}

/// Whether `trailing` occurs after the end of some occurrence of `lead`.
fn follows(name: &str, lead: &str, trailing: &str) -> bool {
    match name.find(lead) {
        Some(position) => name[position + lead.len()..].contains(trailing),
        None => false,
    }
}
