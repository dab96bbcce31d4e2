//! Letter-grade and star-rating rule tables.
//!
//! Both tables are ordered; the first rule whose predicate holds wins. Slots
//! are window positions, oldest first: Y1 = slot 0 ... Y5 = slot 4.

use std::fmt;

use serde::{Deserialize, Serialize};

use regrade_core::constants::{UNKNOWN_GRADE, WINDOW_YEARS};

use super::window::YearAggregate;

/// Forbidden flags per slot, oldest first.
type Flags = [bool; WINDOW_YEARS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterRule {
    /// No inspection fell inside the window.
    #[serde(rename = "RULE_UNKNOWN_NO_DATA")]
    UnknownNoData,
    /// Y5 or Y4 forbidden.
    #[serde(rename = "RULE_1_LOWEST_RECENT")]
    LowestRecent,
    /// Y3 forbidden, Y4 and Y5 not.
    #[serde(rename = "RULE_2_B_2023_ONLY")]
    BMiddleYearOnly,
    /// Y1 or Y2 forbidden, Y3..Y5 not.
    #[serde(rename = "RULE_3_A_OLD_ONLY")]
    AOldOnly,
    /// Nothing forbidden.
    #[serde(rename = "RULE_4_A_ALL_CLEAN")]
    AAllClean,
    /// Anything the rules above do not cover.
    #[serde(rename = "RULE_FALLBACK_LOWEST")]
    FallbackLowest,
}

impl LetterRule {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::UnknownNoData => "RULE_UNKNOWN_NO_DATA",
            Self::LowestRecent => "RULE_1_LOWEST_RECENT",
            Self::BMiddleYearOnly => "RULE_2_B_2023_ONLY",
            Self::AOldOnly => "RULE_3_A_OLD_ONLY",
            Self::AAllClean => "RULE_4_A_ALL_CLEAN",
            Self::FallbackLowest => "RULE_FALLBACK_LOWEST",
        }
    }

    /// Letter this rule assigns, given the configured lowest grade.
    pub fn letter(self, lowest_grade: &str) -> String {
        match self {
            Self::UnknownNoData => UNKNOWN_GRADE.to_string(),
            Self::LowestRecent | Self::FallbackLowest => lowest_grade.to_string(),
            Self::BMiddleYearOnly => "B".to_string(),
            Self::AOldOnly | Self::AAllClean => "A".to_string(),
        }
    }
}

impl fmt::Display for LetterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarRule {
    /// Y5 forbidden.
    #[serde(rename = "STARS_1_RECENT_FORBIDDEN")]
    RecentForbidden,
    /// Y1..Y5 inspected and clean.
    #[serde(rename = "STARS_4_CLEAN_SINCE_2021")]
    CleanFiveYears,
    /// Y2..Y5 inspected and clean.
    #[serde(rename = "STARS_3_CLEAN_SINCE_2022")]
    CleanFourYears,
    /// Y3..Y5 inspected and clean.
    #[serde(rename = "STARS_2_CLEAN_SINCE_2023")]
    CleanThreeYears,
    /// Y4..Y5 inspected and clean.
    #[serde(rename = "STARS_2_CLEAN_SINCE_2024")]
    CleanTwoYears,
    #[serde(rename = "STARS_2_DEFAULT")]
    Default,
}

impl StarRule {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::RecentForbidden => "STARS_1_RECENT_FORBIDDEN",
            Self::CleanFiveYears => "STARS_4_CLEAN_SINCE_2021",
            Self::CleanFourYears => "STARS_3_CLEAN_SINCE_2022",
            Self::CleanThreeYears => "STARS_2_CLEAN_SINCE_2023",
            Self::CleanTwoYears => "STARS_2_CLEAN_SINCE_2024",
            Self::Default => "STARS_2_DEFAULT",
        }
    }

    pub const fn stars(self) -> u8 {
        match self {
            Self::RecentForbidden => 1,
            Self::CleanFiveYears => 4,
            Self::CleanFourYears => 3,
            Self::CleanThreeYears | Self::CleanTwoYears | Self::Default => 2,
        }
    }
}

impl fmt::Display for StarRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One row of the letter table.
struct LetterRow {
    rule: LetterRule,
    applies: fn(&Flags) -> bool,
}

fn lowest_recent(f: &Flags) -> bool {
    f[4] || f[3]
}

fn middle_year_only(f: &Flags) -> bool {
    f[2] && !f[3] && !f[4]
}

fn old_only(f: &Flags) -> bool {
    (f[1] || f[0]) && !(f[2] || f[3] || f[4])
}

fn all_clean(f: &Flags) -> bool {
    !f.iter().any(|&flag| flag)
}

const LETTER_TABLE: &[LetterRow] = &[
    LetterRow {
        rule: LetterRule::LowestRecent,
        applies: lowest_recent,
    },
    LetterRow {
        rule: LetterRule::BMiddleYearOnly,
        applies: middle_year_only,
    },
    LetterRow {
        rule: LetterRule::AOldOnly,
        applies: old_only,
    },
    LetterRow {
        rule: LetterRule::AAllClean,
        applies: all_clean,
    },
];

/// Pick the letter rule for a non-empty aggregate.
pub fn letter_rule(years: &YearAggregate) -> LetterRule {
    let flags = years.statuses().map(|s| s.is_forbidden());
    LETTER_TABLE
        .iter()
        .find(|row| (row.applies)(&flags))
        .map_or(LetterRule::FallbackLowest, |row| row.rule)
}

/// Star rows after the recent-forbidden check: (rule, first slot that must be clean).
const CLEAN_SINCE_TABLE: &[(StarRule, usize)] = &[
    (StarRule::CleanFiveYears, 0),
    (StarRule::CleanFourYears, 1),
    (StarRule::CleanThreeYears, 2),
    (StarRule::CleanTwoYears, 3),
];

/// Pick the star rule for a non-empty aggregate.
pub fn star_rule(years: &YearAggregate) -> StarRule {
    if years.statuses()[WINDOW_YEARS - 1].is_forbidden() {
        return StarRule::RecentForbidden;
    }
    CLEAN_SINCE_TABLE
        .iter()
        .find(|(_, slot)| years.clean_since(*slot))
        .map_or(StarRule::Default, |(rule, _)| *rule)
}
