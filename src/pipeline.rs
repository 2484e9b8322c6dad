use crate::aggregate::DistanceTotals;
use crate::error::Rejection;
use crate::model::{NavigationalStatus, Record};
use crate::motion::{MotionValidator, DEFAULT_MAX_SPEED_KMH};
use crate::ranking::{self, RankingResult};
use crate::sanitize::Sanitizer;
use crate::trajectory::{group_by_vessel, Trajectory};
use anyhow::{Context, Result};
use log::{debug, trace};
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Implied-speed ceiling in km/h, inclusive.
    pub max_speed_kmh: f64,
    pub excluded_statuses: Vec<NavigationalStatus>,
    /// Worker threads; `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            max_speed_kmh: DEFAULT_MAX_SPEED_KMH,
            excluded_statuses: NavigationalStatus::NOT_UNDERWAY.to_vec(),
            threads: None,
        }
    }
}

/// Counts of what was kept and dropped, per rule.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    pub accepted_records: usize,
    pub not_underway: usize,
    pub malformed: usize,
    pub out_of_range: usize,
    pub non_positive_speed: usize,
    pub vessels: usize,
    pub segments: usize,
    pub accepted_segments: usize,
    pub non_positive_elapsed: usize,
    pub implausible_speed: usize,
}

impl PipelineStats {
    pub fn record(&mut self, rejection: &Rejection) {
        match rejection {
            Rejection::NotUnderway(_) => self.not_underway += 1,
            Rejection::MalformedRecord { .. } => self.malformed += 1,
            Rejection::OutOfRangeCoordinate { .. } => self.out_of_range += 1,
            Rejection::NonPositiveSpeed(_) => self.non_positive_speed += 1,
            Rejection::NonPositiveElapsedTime(_) => self.non_positive_elapsed += 1,
            Rejection::ImplausibleSpeed { .. } => self.implausible_speed += 1,
        }
    }

    pub fn rejected_records(&self) -> usize {
        self.not_underway + self.malformed + self.out_of_range + self.non_positive_speed
    }

    pub fn rejected_segments(&self) -> usize {
        self.non_positive_elapsed + self.implausible_speed
    }

    pub fn merge(self, other: PipelineStats) -> PipelineStats {
        PipelineStats {
            accepted_records: self.accepted_records + other.accepted_records,
            not_underway: self.not_underway + other.not_underway,
            malformed: self.malformed + other.malformed,
            out_of_range: self.out_of_range + other.out_of_range,
            non_positive_speed: self.non_positive_speed + other.non_positive_speed,
            vessels: self.vessels + other.vessels,
            segments: self.segments + other.segments,
            accepted_segments: self.accepted_segments + other.accepted_segments,
            non_positive_elapsed: self.non_positive_elapsed + other.non_positive_elapsed,
            implausible_speed: self.implausible_speed + other.implausible_speed,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Outcome {
    pub totals: DistanceTotals,
    pub stats: PipelineStats,
}

impl Outcome {
    pub fn leader(&self) -> Option<RankingResult> {
        ranking::leader(&self.totals)
    }

    pub fn ranking(&self) -> Vec<RankingResult> {
        ranking::rank(&self.totals)
    }

    /// Every vessel sharing the top total.
    pub fn leaders(&self) -> Vec<RankingResult> {
        ranking::leaders(&self.totals)
    }
}

/// Execution context for one run. Owns the worker pool, which is torn down
/// when the pipeline is dropped.
pub struct Pipeline {
    sanitizer: Sanitizer,
    validator: MotionValidator,
    pool: rayon::ThreadPool,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let mut builder =
            rayon::ThreadPoolBuilder::new().thread_name(|i| format!("vessel-route-{i}"));
        if let Some(threads) = config.threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build().context("failed to start worker pool")?;

        debug!(
            "pipeline ready: {} threads, max speed {} km/h, excluded {:?}",
            pool.current_num_threads(),
            config.max_speed_kmh,
            config.excluded_statuses
        );

        Ok(Pipeline {
            sanitizer: Sanitizer::new(config.excluded_statuses),
            validator: MotionValidator::new(config.max_speed_kmh),
            pool,
        })
    }

    /// Runs `op` on this pipeline's workers.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    pub fn run(&self, records: Vec<Record>) -> Outcome {
        self.install(|| {
            // collect keeps input order, which the stable sort relies on
            let sanitized: Vec<_> = records
                .into_par_iter()
                .map(|record| self.sanitizer.sanitize(record))
                .collect();

            let mut stats = PipelineStats::default();
            let reports = sanitized.into_iter().filter_map(|result| match result {
                Ok(report) => {
                    stats.accepted_records += 1;
                    Some(report)
                }
                Err(rejection) => {
                    trace!("record dropped: {rejection}");
                    stats.record(&rejection);
                    None
                }
            });
            let trajectories = group_by_vessel(reports);
            stats.vessels = trajectories.len();

            let (totals, segment_stats) = trajectories
                .into_par_iter()
                .map(|trajectory| self.measure(&trajectory))
                .reduce(
                    || (DistanceTotals::default(), PipelineStats::default()),
                    |(t1, s1), (t2, s2)| (t1.merge(t2), s1.merge(s2)),
                );

            Outcome {
                totals,
                stats: stats.merge(segment_stats),
            }
        })
    }

    /// Walks one trajectory in time order and sums its accepted segments.
    fn measure(&self, trajectory: &Trajectory) -> (DistanceTotals, PipelineStats) {
        let mut totals = DistanceTotals::default();
        let mut stats = PipelineStats::default();

        for segment in trajectory.segments() {
            stats.segments += 1;
            match self.validator.validate(&segment) {
                Ok(distance_km) => {
                    stats.accepted_segments += 1;
                    totals.add(&trajectory.mmsi, distance_km);
                }
                Err(rejection) => {
                    trace!("{}: segment dropped: {rejection}", trajectory.mmsi);
                    stats.record(&rejection);
                }
            }
        }

        (totals, stats)
    }
}
