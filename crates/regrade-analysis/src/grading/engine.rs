//! Folds one restaurant's inspections into a `GradeResult`.

use regrade_core::config::GradingConfig;
use regrade_core::constants::DEFAULT_LOWEST_GRADE;
use regrade_core::errors::GradingError;
use regrade_core::types::{Inspection, Restaurant};

use super::rules::{self, LetterRule, StarRule};
use super::scanner::TextScanner;
use super::types::GradeResult;
use super::window::{YearAggregate, YearWindow};

/// Deterministic grader. Holds only immutable, pre-compiled state, so one
/// engine can grade any number of restaurants from any number of threads.
#[derive(Debug, Clone)]
pub struct GradingEngine {
    scanner: TextScanner,
    lowest_grade: String,
    window: YearWindow,
}

impl GradingEngine {
    /// Build an engine over the default 2021–2025 window.
    ///
    /// A blank or missing `lowest_grade` falls back to "C".
    pub fn new<F, N>(
        forbidden_terms: &[F],
        negation_terms: &[N],
        lowest_grade: Option<&str>,
    ) -> Result<Self, GradingError>
    where
        F: AsRef<str>,
        N: AsRef<str>,
    {
        let scanner = TextScanner::new(forbidden_terms, negation_terms)?;
        let lowest_grade = lowest_grade
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .unwrap_or(DEFAULT_LOWEST_GRADE)
            .to_string();

        tracing::debug!(
            forbidden_terms = forbidden_terms.len(),
            negation_terms = negation_terms.len(),
            lowest_grade = %lowest_grade,
            "grading engine built"
        );

        Ok(Self {
            scanner,
            lowest_grade,
            window: YearWindow::default(),
        })
    }

    /// Build an engine from resolved configuration, defaults applied.
    pub fn from_config(config: &GradingConfig) -> Result<Self, GradingError> {
        let lowest_grade = config.effective_lowest_grade();
        let engine = Self::new(
            &config.effective_forbidden_terms(),
            &config.effective_negation_terms(),
            Some(lowest_grade.as_str()),
        )?;
        let window = YearWindow::ending(config.effective_latest_year())?;
        Ok(engine.with_window(window))
    }

    pub fn with_window(mut self, window: YearWindow) -> Self {
        self.window = window;
        self
    }

    pub fn window(&self) -> &YearWindow {
        &self.window
    }

    pub fn lowest_grade(&self) -> &str {
        &self.lowest_grade
    }

    pub fn scanner(&self) -> &TextScanner {
        &self.scanner
    }

    /// Grade one restaurant's inspections. Order does not matter; undated
    /// and out-of-window inspections are ignored.
    pub fn evaluate<I>(&self, inspections: I) -> GradeResult
    where
        I: IntoIterator,
        I::Item: Inspection,
    {
        let mut years = YearAggregate::new(self.window);
        let mut forbidden_hits = Vec::new();
        let mut negations = Vec::new();
        let mut counted = 0usize;

        for inspection in inspections {
            let Some(year) = inspection.year() else {
                tracing::trace!("skipping undated inspection");
                continue;
            };
            if !self.window.contains(year) {
                continue;
            }
            counted += 1;

            let outcome = self.scanner.scan(&inspection.composed_text(), year);
            years.record(year, outcome.has_forbidden());
            forbidden_hits.extend(outcome.forbidden);
            negations.extend(outcome.negated);
        }

        if counted == 0 {
            tracing::debug!("no inspection data available for grading");
            return self.no_data_result(years);
        }

        let letter_rule = rules::letter_rule(&years);
        let star_rule = rules::star_rule(&years);

        let result = GradeResult {
            letter: letter_rule.letter(&self.lowest_grade),
            stars: star_rule.stars(),
            letter_rule,
            star_rule,
            years,
            forbidden_hits,
            negations,
        };

        tracing::debug!(
            letter_rule = %result.letter_rule,
            star_rule = %result.star_rule,
            letter = %result.letter,
            stars = result.stars,
            inspections = counted,
            "grading result"
        );

        result
    }

    /// Grade a restaurant and log the outcome against its identifiers.
    pub fn grade_restaurant(&self, restaurant: &Restaurant) -> GradeResult {
        let result = self.evaluate(&restaurant.inspections);
        tracing::info!(
            restaurant_id = restaurant.id,
            restaurant_camis = %restaurant.camis,
            restaurant_name = %restaurant.name,
            rules_applied = ?result.rules_applied(),
            forbidden_years = ?result.forbidden_years(true),
            "restaurant graded"
        );
        result
    }

    fn no_data_result(&self, years: YearAggregate) -> GradeResult {
        let letter_rule = LetterRule::UnknownNoData;
        let star_rule = StarRule::Default;
        GradeResult {
            letter: letter_rule.letter(&self.lowest_grade),
            stars: star_rule.stars(),
            letter_rule,
            star_rule,
            years,
            forbidden_hits: Vec::new(),
            negations: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regrade_core::types::InspectionRecord;

    fn engine() -> GradingEngine {
        GradingEngine::from_config(&GradingConfig::default()).unwrap()
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GradingEngine>();
    }

    #[test]
    fn test_blank_lowest_grade_falls_back() {
        let engine = GradingEngine::new(&["rat"], &["no"], Some("  ")).unwrap();
        assert_eq!(engine.lowest_grade(), "C");
        let engine = GradingEngine::new(&["rat"], &["no"], None).unwrap();
        assert_eq!(engine.lowest_grade(), "C");
    }

    #[test]
    fn test_undated_inspections_are_skipped() {
        let undated = InspectionRecord {
            date: None,
            summary: "Rats everywhere".into(),
            ..Default::default()
        };
        let result = engine().evaluate([undated]);
        assert_eq!(result.letter_rule, LetterRule::UnknownNoData);
        assert_eq!(result.stars, 2);
    }

    #[test]
    fn test_action_text_is_scanned() {
        let inspection = InspectionRecord::in_year(2025, "Routine inspection")
            .with_action("Closed due to roach activity");
        let result = engine().evaluate([inspection]);
        assert_eq!(result.letter_rule, LetterRule::LowestRecent);
        assert_eq!(result.forbidden_hits[0].term, "roach");
    }

    #[test]
    fn test_out_of_range_latest_year_fails_construction() {
        for year in [i32::MIN, i32::MAX] {
            let config = GradingConfig {
                latest_year: Some(year),
                ..Default::default()
            };
            let err = GradingEngine::from_config(&config).unwrap_err();
            assert!(matches!(err, GradingError::LatestYearOutOfRange { .. }));
        }
    }

    #[test]
    fn test_custom_window_shifts_years() {
        let config = GradingConfig {
            latest_year: Some(2026),
            ..Default::default()
        };
        let engine = GradingEngine::from_config(&config).unwrap();
        assert_eq!(engine.window().oldest(), 2022);

        let result = engine.evaluate([InspectionRecord::in_year(2021, "Rat seen")]);
        assert_eq!(result.letter, "Unknown");
    }
}
