//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing intermediate
//! artifacts for debugging, and emitting structured telemetry.

use crate::graph::csr::CsrGraph;
use crate::pipeline::artifacts::{ScoreVector, Summary};
use crate::types::Document;
use std::time::{Duration, Instant};

/// Sentence segmentation
pub const STAGE_SEGMENT: &str = "segment";
/// Similarity graph construction
pub const STAGE_GRAPH: &str = "graph";
/// Sentence scoring
pub const STAGE_RANK: &str = "rank";
/// Top-k selection
pub const STAGE_ASSEMBLE: &str = "assemble";
/// Output string formatting
pub const STAGE_FORMAT: &str = "format";

// ============================================================================
// StageClock / StageReport
// ============================================================================

/// Wall-clock timer for one stage
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// What a stage reports when it finishes.
///
/// Only `elapsed` is always present; the graph stage fills in nodes/edges and
/// the rank stage fills in iteration diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    elapsed: Duration,
    nodes: Option<usize>,
    edges: Option<usize>,
    iterations: Option<usize>,
    converged: Option<bool>,
    residual: Option<f64>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn nodes(&self) -> Option<usize> {
        self.nodes
    }

    pub fn edges(&self) -> Option<usize> {
        self.edges
    }

    pub fn iterations(&self) -> Option<usize> {
        self.iterations
    }

    pub fn converged(&self) -> Option<bool> {
        self.converged
    }

    pub fn residual(&self) -> Option<f64> {
        self.residual
    }
}

/// Builder for reports that carry stage metrics
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

// ============================================================================
// PipelineObserver
// ============================================================================

/// Stage-boundary and artifact callbacks. Every method defaults to a no-op.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    fn on_document(&mut self, _document: &Document) {}

    fn on_graph(&mut self, _graph: &CsrGraph) {}

    fn on_scores(&mut self, _scores: &ScoreVector) {}

    fn on_summary(&mut self, _summary: &Summary) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that records one report per finished stage, in order
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Report for a stage, if it ran
    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, report)| report)
    }

    /// Sum of all stage durations
    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}
