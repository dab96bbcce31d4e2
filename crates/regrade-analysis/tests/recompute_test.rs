//! Batch recompute over in-memory restaurants.

use std::collections::BTreeMap;

use regrade_analysis::grading::{GradeRecord, GradingEngine};
use regrade_analysis::recompute::{grade_restaurants, GradeSink, RecomputeFilter, Recomputer};
use regrade_core::config::{GradingConfig, RecomputeConfig};
use regrade_core::errors::RecomputeError;
use regrade_core::types::{InspectionRecord, Restaurant};

fn engine() -> GradingEngine {
    GradingEngine::from_config(&GradingConfig::default()).unwrap()
}

fn restaurant(id: u64, camis: &str, year: i32, summary: &str) -> Restaurant {
    Restaurant::new(id, camis, format!("Restaurant {id}"))
        .with_inspection(InspectionRecord::in_year(year, summary))
}

fn fixtures() -> Vec<Restaurant> {
    vec![
        restaurant(1, "123456789", 2024, "Rat droppings"),
        restaurant(2, "987654321", 2024, "No issues"),
        restaurant(3, "", 2023, "Old issue"),
    ]
}

/// Sink that fails on a given restaurant id.
struct FailingSink {
    fail_on: u64,
    persisted: Vec<u64>,
}

impl GradeSink for FailingSink {
    fn persist(&mut self, restaurant: &Restaurant, _record: &GradeRecord) -> Result<(), RecomputeError> {
        if restaurant.id == self.fail_on {
            return Err(RecomputeError::Sink {
                restaurant_id: restaurant.id,
                message: "database is locked".into(),
            });
        }
        self.persisted.push(restaurant.id);
        Ok(())
    }
}

#[test]
fn test_recompute_all_restaurants() {
    let engine = engine();
    let mut sink = BTreeMap::new();
    let summary = grade_restaurants(&engine, &fixtures(), &mut sink).unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.processed, 3);
    assert_eq!(sink[&1].regraded_letter, "C");
    assert_eq!(sink[&2].regraded_letter, "A");
    assert_eq!(sink[&2].star_rating, 2);
    assert_eq!(sink[&3].regraded_letter, "A");
}

#[test]
fn test_recompute_by_camis() {
    let engine = engine();
    let mut sink = BTreeMap::new();
    let filter = RecomputeFilter::default().with_camis(["123456789"]);
    let summary = Recomputer::new(&engine).run(&fixtures(), &filter, &mut sink).unwrap();

    assert_eq!(summary.processed, 1);
    assert!(sink.contains_key(&1));
    assert!(!sink.contains_key(&2));
}

#[test]
fn test_recompute_by_ids() {
    let engine = engine();
    let mut sink = BTreeMap::new();
    let filter = RecomputeFilter::default().with_ids([1, 3]);
    Recomputer::new(&engine).run(&fixtures(), &filter, &mut sink).unwrap();

    assert_eq!(sink.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
}

#[test]
fn test_recompute_since_date() {
    let engine = engine();
    let mut sink = BTreeMap::new();
    let since = RecomputeFilter::parse_since("2024-01-01").unwrap();
    let filter = RecomputeFilter::default().with_since(since);
    Recomputer::new(&engine).run(&fixtures(), &filter, &mut sink).unwrap();

    assert_eq!(sink.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn test_recompute_invalid_since_date() {
    let result = RecomputeFilter::parse_since("invalid-date");
    assert!(matches!(result, Err(RecomputeError::InvalidSince { .. })));
}

#[test]
fn test_recompute_no_matching_restaurants() {
    let engine = engine();
    let mut sink: BTreeMap<u64, GradeRecord> = BTreeMap::new();
    let filter = RecomputeFilter::default().with_camis(["999999999"]);
    let summary = Recomputer::new(&engine).run(&fixtures(), &filter, &mut sink).unwrap();

    assert_eq!(summary.total, 0);
    assert_eq!(summary.batches, 0);
    assert!(sink.is_empty());
}

#[test]
fn test_recompute_custom_batch_size() {
    let engine = engine();
    let restaurants: Vec<Restaurant> = (1..=5)
        .map(|id| restaurant(id, "", 2024, "Routine"))
        .collect();
    let mut sink = BTreeMap::new();
    let summary = Recomputer::new(&engine)
        .with_batch_size(2)
        .unwrap()
        .run(&restaurants, &RecomputeFilter::default(), &mut sink)
        .unwrap();

    assert_eq!(summary.processed, 5);
    assert_eq!(summary.batches, 3);
    assert_eq!(sink.len(), 5);
}

#[test]
fn test_zero_batch_size_rejected() {
    let engine = engine();
    let result = Recomputer::new(&engine).with_batch_size(0);
    assert!(matches!(result, Err(RecomputeError::InvalidBatchSize(0))));
}

#[test]
fn test_dedicated_pool_matches_global_pool() {
    let engine = engine();
    let config = RecomputeConfig {
        batch_size: Some(2),
        threads: Some(2),
    };
    let mut pooled = BTreeMap::new();
    Recomputer::from_config(&engine, &config)
        .unwrap()
        .run(&fixtures(), &RecomputeFilter::default(), &mut pooled)
        .unwrap();

    let mut global = BTreeMap::new();
    grade_restaurants(&engine, &fixtures(), &mut global).unwrap();

    assert_eq!(pooled, global);
}

#[test]
fn test_sink_failure_aborts_run() {
    let engine = engine();
    let mut sink = FailingSink {
        fail_on: 2,
        persisted: Vec::new(),
    };
    let result = Recomputer::new(&engine).run(&fixtures(), &RecomputeFilter::default(), &mut sink);

    assert!(matches!(result, Err(RecomputeError::Sink { restaurant_id: 2, .. })));
    assert_eq!(sink.persisted, vec![1]);
}
