use std::collections::BTreeMap;

use player_registry::{EntityDirectory, NameResolver, PositionGroup};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::{
    aggregator::AccuracyAggregator,
    alignment::{align, AlignmentScore},
    config::AccuracyConfig,
    error::{AccuracyError, Result},
    love_hate::LoveHateScorer,
    models::{
        HitCounts, LoveHateCall, PredictedRanking, RawLoveHateCall, SkipReason, SkippedCall, Week,
    },
    percentile::PointsDistribution,
    report::CumulativeReporter,
    snapshot::WeekSnapshot,
};

/// Rankings and love/hate calls published for one week
#[derive(Debug, Clone, Default)]
pub struct WeekInputs {
    /// Predicted order per group; a missing group had no rankings file
    pub predicted: BTreeMap<PositionGroup, Vec<String>>,
    /// Love/hate calls; None when the week has no love/hate file
    pub love_hate: Option<Vec<RawLoveHateCall>>,
}

/// What happened to one group in one week
#[derive(Debug, Clone, Serialize)]
pub enum GroupWeekStatus {
    Scored(AlignmentScore),
    MissingRankings,
    Failed(AccuracyError),
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupWeekOutcome {
    pub group: PositionGroup,
    pub week: Week,
    pub status: GroupWeekStatus,
}

/// Love/hate results for one week
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoveHateWeekOutcome {
    pub scored: Vec<LoveHateCall>,
    pub skipped: Vec<SkippedCall>,
    pub by_group: Vec<(PositionGroup, HitCounts)>,
    pub totals: HitCounts,
}

/// Everything produced while processing one week
#[derive(Debug, Clone, Serialize)]
pub struct WeekOutcome {
    pub week: Week,
    pub groups: Vec<GroupWeekOutcome>,
    pub love_hate: Option<LoveHateWeekOutcome>,
}

/// A season run: owns the resolver, the aggregator and the love/hate counters
///
/// Weeks are processed one at a time; each group is fully scored before the next.
pub struct SeasonRun {
    config: AccuracyConfig,
    directory: EntityDirectory,
    resolver: NameResolver,
    aggregator: AccuracyAggregator,
    love_hate: LoveHateScorer,
}

impl SeasonRun {
    pub fn new(config: AccuracyConfig, directory: EntityDirectory) -> Self {
        info!("Starting season run for {} with {} known players", config.season, directory.len());
        Self {
            config,
            directory,
            resolver: NameResolver::new(),
            aggregator: AccuracyAggregator::new(),
            love_hate: LoveHateScorer::new(),
        }
    }

    pub fn config(&self) -> &AccuracyConfig {
        &self.config
    }

    pub fn directory(&self) -> &EntityDirectory {
        &self.directory
    }

    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    pub fn aggregator(&self) -> &AccuracyAggregator {
        &self.aggregator
    }

    pub fn love_hate(&self) -> &LoveHateScorer {
        &self.love_hate
    }

    /// Register every player that appears in the week's stats
    pub fn ingest(&mut self, snapshot: &WeekSnapshot) {
        let before = self.resolver.len();
        for performance in snapshot.performances() {
            if let Some(entity) = self.directory.get(&performance.entity_id) {
                let name = self.resolver.canonical_name_for(entity);
                self.resolver.resolve(&name, &entity.entity_id);
            }
        }
        info!("Week {}: registered {} new names", snapshot.week(), self.resolver.len() - before);
    }

    /// Score one group's predicted ranking and record the result
    pub fn score_group(
        &mut self,
        snapshot: &WeekSnapshot,
        predicted: &PredictedRanking,
    ) -> Result<AlignmentScore> {
        let observed = snapshot.observed_ranking(predicted.group, &self.directory, &self.resolver);
        let score = align(predicted, &observed.names())?;

        self.aggregator.record(score.to_record())?;
        for (name, delta) in &score.entity_deltas {
            self.aggregator.record_entity_delta(predicted.group, name, predicted.week, *delta);
        }

        info!(
            "Results for {}s in week {} (# players = {}): coefficient {}, average difference {:.4}",
            predicted.group,
            predicted.week,
            score.common_count(),
            score.coefficient.map_or_else(|| "undefined".to_string(), |c| format!("{c:.3}")),
            score.avg_difference
        );
        Ok(score)
    }

    /// Score a week's love/hate calls against the week's percentiles
    pub fn score_love_hate(
        &mut self,
        snapshot: &WeekSnapshot,
        calls: &[RawLoveHateCall],
    ) -> LoveHateWeekOutcome {
        let week = snapshot.week();
        let mut distributions: BTreeMap<PositionGroup, PointsDistribution> = self
            .config
            .love_hate_groups
            .iter()
            .map(|&g| (g, snapshot.distribution(g)))
            .collect();
        let mut outcome = LoveHateWeekOutcome::default();

        for call in calls {
            let skip = |reason: SkipReason| SkippedCall { call: call.clone(), week, reason };

            let entity_id = match self.resolver.lookup(&call.name) {
                Ok(id) => id.to_string(),
                Err(e) => {
                    warn!("Week {}: {}", week, e);
                    outcome.skipped.push(skip(SkipReason::UnresolvedEntity));
                    continue;
                }
            };

            let Some(points) = snapshot.points_for(&entity_id) else {
                warn!("{} doesn't have stats for week {}", call.name, week);
                outcome.skipped.push(skip(SkipReason::NoPerformanceData));
                continue;
            };

            if self.aggregator.has_call(&entity_id, week) {
                warn!("{} already has a call in week {}; keeping the first", call.name, week);
                outcome.skipped.push(skip(SkipReason::DuplicateCall));
                continue;
            }

            let distribution = distributions
                .entry(call.group)
                .or_insert_with(|| snapshot.distribution(call.group));
            let percentile = match distribution.percentile(points) {
                Ok(p) => p,
                Err(e) => {
                    warn!("Week {} {} call on {}: {}", week, call.group, call.name, e);
                    outcome.skipped.push(skip(SkipReason::NoPerformanceData));
                    continue;
                }
            };

            let correct = self.love_hate.score(call.group, call.direction, percentile);
            let scored = LoveHateCall {
                entity_id,
                name: call.name.clone(),
                group: call.group,
                week,
                direction: call.direction,
                points,
                percentile,
                correct,
            };
            self.aggregator.record_call(scored.clone());
            outcome.scored.push(scored);
        }

        outcome.by_group = self
            .config
            .love_hate_groups
            .iter()
            .map(|&g| (g, self.aggregator.week_counts(g, week)))
            .collect();
        outcome.totals = self.aggregator.week_totals(week);

        info!(
            "Week {} love/hate: {} of {} loves, {} of {} hates ({} skipped)",
            week,
            outcome.totals.love_correct,
            outcome.totals.love_total,
            outcome.totals.hate_correct,
            outcome.totals.hate_total,
            outcome.skipped.len()
        );
        outcome
    }

    /// Process one week: register names, score every group, then love/hate
    ///
    /// A failure in one group never stops the others.
    pub fn process_week(&mut self, snapshot: &WeekSnapshot, inputs: WeekInputs) -> WeekOutcome {
        let week = snapshot.week();
        self.ingest(snapshot);

        let mut groups = Vec::with_capacity(PositionGroup::ALL.len());
        let mut predicted = inputs.predicted;
        for group in PositionGroup::ALL {
            let status = match predicted.remove(&group) {
                None => {
                    warn!("No rankings file found for {}s in week {}...skipping", group, week);
                    GroupWeekStatus::MissingRankings
                }
                Some(names) => {
                    let ranking = PredictedRanking::new(group, week, names);
                    match self.score_group(snapshot, &ranking) {
                        Ok(score) => GroupWeekStatus::Scored(score),
                        Err(e) => {
                            if e.is_fatal() {
                                error!("Skipping {}s in week {}: {}", group, week, e);
                            } else {
                                warn!("Skipping {}s in week {}: {}", group, week, e);
                            }
                            GroupWeekStatus::Failed(e)
                        }
                    }
                }
            };
            groups.push(GroupWeekOutcome { group, week, status });
        }

        let love_hate = match inputs.love_hate {
            Some(calls) => Some(self.score_love_hate(snapshot, &calls)),
            None => {
                info!("No love/hate file found for week {}...skipping", week);
                None
            }
        };

        WeekOutcome { week, groups, love_hate }
    }

    /// Read-only view for the cumulative report
    pub fn reporter(&self) -> CumulativeReporter<'_> {
        CumulativeReporter::new(&self.aggregator, &self.love_hate, self.config.report_top_n)
    }
}
