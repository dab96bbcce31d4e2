//! Batched, parallel recompute over a restaurant selection.

use rayon::prelude::*;

use regrade_core::config::RecomputeConfig;
use regrade_core::constants::DEFAULT_BATCH_SIZE;
use regrade_core::errors::RecomputeError;
use regrade_core::types::Restaurant;

use super::filter::RecomputeFilter;
use super::sink::GradeSink;
use crate::grading::{GradeRecord, GradingEngine};

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecomputeSummary {
    /// Restaurants selected by the filter.
    pub total: usize,
    /// Restaurants graded and persisted.
    pub processed: usize,
    pub batches: usize,
}

/// Drives a `GradingEngine` over many restaurants.
///
/// Each batch is graded in parallel, then persisted sequentially in id order.
pub struct Recomputer<'e> {
    engine: &'e GradingEngine,
    batch_size: usize,
    pool: Option<rayon::ThreadPool>,
}

impl<'e> Recomputer<'e> {
    pub fn new(engine: &'e GradingEngine) -> Self {
        Self {
            engine,
            batch_size: DEFAULT_BATCH_SIZE,
            pool: None,
        }
    }

    pub fn from_config(
        engine: &'e GradingEngine,
        config: &RecomputeConfig,
    ) -> Result<Self, RecomputeError> {
        let recomputer = Self::new(engine).with_batch_size(config.effective_batch_size())?;
        match config.threads {
            Some(threads) => recomputer.with_threads(threads),
            None => Ok(recomputer),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Result<Self, RecomputeError> {
        if batch_size == 0 {
            return Err(RecomputeError::InvalidBatchSize(batch_size));
        }
        self.batch_size = batch_size;
        Ok(self)
    }

    /// Grade on a dedicated pool of `threads` workers instead of rayon's global pool.
    pub fn with_threads(mut self, threads: usize) -> Result<Self, RecomputeError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("regrade-worker-{i}"))
            .build()
            .map_err(|e| RecomputeError::ThreadPool(e.to_string()))?;
        self.pool = Some(pool);
        Ok(self)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Recompute every restaurant selected by `filter` and persist to `sink`.
    ///
    /// Stops at the first sink failure; restaurants already persisted stay
    /// persisted.
    pub fn run<S>(
        &self,
        restaurants: &[Restaurant],
        filter: &RecomputeFilter,
        sink: &mut S,
    ) -> Result<RecomputeSummary, RecomputeError>
    where
        S: GradeSink + ?Sized,
    {
        let selected = filter.select(restaurants);
        let total = selected.len();
        let mut summary = RecomputeSummary {
            total,
            ..Default::default()
        };

        if total == 0 {
            tracing::warn!("no restaurants matched the selection criteria");
            return Ok(summary);
        }

        tracing::info!(total, batch_size = self.batch_size, "recomputing grades");

        for batch in selected.chunks(self.batch_size) {
            let records = self.grade_batch(batch);
            for (restaurant, record) in batch.iter().zip(&records) {
                sink.persist(restaurant, record)?;
            }
            summary.processed += batch.len();
            summary.batches += 1;
            tracing::info!(
                processed = summary.processed,
                total,
                "processed {}/{} restaurants",
                summary.processed,
                total
            );
        }

        tracing::info!(processed = summary.processed, batches = summary.batches, "grade recomputation completed");
        Ok(summary)
    }

    fn grade_batch(&self, batch: &[&Restaurant]) -> Vec<GradeRecord> {
        let grade = || -> Vec<GradeRecord> {
            batch
                .par_iter()
                .map(|restaurant| self.engine.grade_restaurant(restaurant).to_record())
                .collect()
        };
        match &self.pool {
            Some(pool) => pool.install(grade),
            None => grade(),
        }
    }
}

/// Grade every restaurant (de-duplicated by id) with default batching.
pub fn grade_restaurants<S>(
    engine: &GradingEngine,
    restaurants: &[Restaurant],
    sink: &mut S,
) -> Result<RecomputeSummary, RecomputeError>
where
    S: GradeSink + ?Sized,
{
    Recomputer::new(engine).run(restaurants, &RecomputeFilter::default(), sink)
}
