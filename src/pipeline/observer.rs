//! Pipeline observer hooks for timing and debugging
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing intermediate
//! artifacts for debugging, and emitting structured telemetry.

use crate::graph::dense::SimilarityGraph;
use crate::pagerank::PageRankResult;
use crate::types::ReviewSentence;
use std::time::{Duration, Instant};

pub const STAGE_VECTORIZE: &str = "vectorize";
pub const STAGE_GRAPH: &str = "graph";
pub const STAGE_RANK: &str = "rank";
pub const STAGE_SELECT: &str = "select";

/// Wall-clock timer for one stage
#[derive(Debug, Clone, Copy)]
pub struct StageClock(Instant);

impl StageClock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// What a stage did, reported when it finishes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    pub elapsed: Duration,
    /// Sentences (graph nodes) handled by the stage
    pub nodes: Option<usize>,
    /// Non-zero graph edges
    pub edges: Option<usize>,
    pub iterations: Option<usize>,
    pub converged: Option<bool>,
    /// Final L1 delta of the ranker
    pub residual: Option<f64>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }
}

/// Fluent construction of a [`StageReport`]
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn nodes(mut self, nodes: usize) -> Self {
        self.report.nodes = Some(nodes);
        self
    }

    pub fn edges(mut self, edges: usize) -> Self {
        self.report.edges = Some(edges);
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.report.iterations = Some(iterations);
        self
    }

    pub fn converged(mut self, converged: bool) -> Self {
        self.report.converged = Some(converged);
        self
    }

    pub fn residual(mut self, residual: f64) -> Self {
        self.report.residual = Some(residual);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Callbacks invoked by the pipeline runner
///
/// Every method has an empty default, so observers only implement the
/// hooks they care about.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    fn on_sentences(&mut self, _sentences: &[ReviewSentence]) {}

    fn on_graph(&mut self, _graph: &SimilarityGraph) {}

    fn on_rank(&mut self, _result: &PageRankResult) {}
}

/// Observer that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that records the report of every finished stage
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished stages in execution order
    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, report)| report)
    }

    pub fn total_elapsed(&self) -> Duration {
        self.reports.iter().map(|(_, report)| report.elapsed).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder() {
        let report = StageReportBuilder::new(Duration::from_millis(5))
            .nodes(10)
            .edges(42)
            .iterations(17)
            .converged(true)
            .residual(1e-7)
            .build();

        assert_eq!(report.elapsed, Duration::from_millis(5));
        assert_eq!(report.nodes, Some(10));
        assert_eq!(report.edges, Some(42));
        assert_eq!(report.iterations, Some(17));
        assert_eq!(report.converged, Some(true));
        assert_eq!(report.residual, Some(1e-7));
    }

    #[test]
    fn test_plain_report_has_no_stats() {
        let report = StageReport::new(Duration::ZERO);

        assert!(report.nodes.is_none());
        assert!(report.converged.is_none());
    }

    #[test]
    fn test_timing_observer_records_in_order() {
        let mut observer = StageTimingObserver::new();
        observer.on_stage_start(STAGE_GRAPH);
        observer.on_stage_end(STAGE_GRAPH, &StageReport::new(Duration::from_millis(2)));
        observer.on_stage_end(STAGE_RANK, &StageReport::new(Duration::from_millis(3)));

        let names: Vec<_> = observer.reports().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec![STAGE_GRAPH, STAGE_RANK]);
        assert_eq!(observer.total_elapsed(), Duration::from_millis(5));
        assert!(observer.report(STAGE_SELECT).is_none());
    }

    #[test]
    fn test_noop_observer_as_trait_object() {
        let mut observer: Box<dyn PipelineObserver> = Box::new(NoopObserver);
        observer.on_stage_start(STAGE_VECTORIZE);
        observer.on_sentences(&[]);
    }
}
