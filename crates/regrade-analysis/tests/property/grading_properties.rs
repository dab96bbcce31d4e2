use proptest::prelude::*;

use regrade_analysis::grading::{GradingEngine, LetterRule};
use regrade_core::config::GradingConfig;
use regrade_core::types::InspectionRecord;

fn engine() -> GradingEngine {
    GradingEngine::from_config(&GradingConfig::default()).unwrap()
}

const PESTS: &[&str] = &["rat", "rats", "mouse", "mice", "rodent", "roach", "vermin"];

/// Filler words that are neither pests nor negations.
fn filler() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!["kitchen", "storage", "sink", "floor", "observed", "near", "area"]),
        0..6,
    )
    .prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn out_of_window_inspections_grade_unknown(
        years in prop::collection::vec(prop_oneof![1990i32..2021, 2026i32..2100], 0..8),
        text in ".{0,80}",
    ) {
        let inspections: Vec<_> = years.iter().map(|&y| InspectionRecord::in_year(y, text.clone())).collect();
        let result = engine().evaluate(&inspections);
        prop_assert_eq!(result.letter.as_str(), "Unknown");
        prop_assert_eq!(result.stars, 2);
        prop_assert_eq!(result.letter_rule, LetterRule::UnknownNoData);
    }

    #[test]
    fn unnegated_term_flags_year(
        year in 2021i32..=2025,
        term in prop::sample::select(PESTS.to_vec()),
        after in filler(),
    ) {
        let text = format!("Evidence of {term} {after}");
        let result = engine().evaluate([InspectionRecord::in_year(year, text)]);
        prop_assert_eq!(result.forbidden_years(true)[&year.to_string()], Some(true));
    }

    #[test]
    fn negation_prefix_suppresses_term(
        year in 2021i32..=2025,
        term in prop::sample::select(PESTS.to_vec()),
        after in filler(),
    ) {
        let text = format!("No {term} {after}");
        let result = engine().evaluate([InspectionRecord::in_year(year, text)]);
        prop_assert!(result.forbidden_hits.is_empty());
        prop_assert!(!result.negations.is_empty());
        prop_assert_eq!(result.forbidden_years(true)[&year.to_string()], Some(false));
    }

    #[test]
    fn embedded_term_never_matches(
        prefix in "[a-z]{1,5}",
        suffix in "[a-z]{1,5}",
        term in prop::sample::select(PESTS.to_vec()),
    ) {
        let word = format!("{prefix}{term}{suffix}");
        let outcome = engine().scanner().scan(&word, 2024);
        prop_assert!(outcome.is_empty(), "unexpected hit in {}", word);
    }

    #[test]
    fn four_stars_imply_letter_a(
        flags in prop::collection::vec(prop::option::of(any::<bool>()), 5),
    ) {
        let inspections: Vec<_> = flags
            .iter()
            .enumerate()
            .filter_map(|(slot, flag)| {
                flag.map(|forbidden| {
                    let text = if forbidden { "Rat seen" } else { "Routine" };
                    InspectionRecord::in_year(2021 + slot as i32, text)
                })
            })
            .collect();
        let result = engine().evaluate(&inspections);
        if result.stars == 4 {
            prop_assert_eq!(result.letter.as_str(), "A");
        }
        prop_assert!((1..=4).contains(&result.stars));
    }

    #[test]
    fn recent_forbidden_always_lowest(
        older in prop::collection::vec(any::<bool>(), 3),
    ) {
        let mut inspections: Vec<_> = older
            .iter()
            .enumerate()
            .map(|(slot, &forbidden)| {
                InspectionRecord::in_year(2021 + slot as i32, if forbidden { "Roach found" } else { "Routine" })
            })
            .collect();
        inspections.push(InspectionRecord::in_year(2025, "Mouse in pantry"));
        let result = engine().evaluate(&inspections);
        prop_assert_eq!(result.letter_rule, LetterRule::LowestRecent);
        prop_assert_eq!(result.stars, 1);
    }
}
