//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! A [`Summarizer`] owns the request-independent resources (stopword set,
//! sentence segmenter) behind `Arc`s and runs each request through
//! `segment → graph → rank → assemble`, notifying an optional
//! [`PipelineObserver`] at each boundary. Every artifact is created fresh
//! per call, so one `Summarizer` can serve many threads at once.
//!
//! # Static dispatch
//!
//! `Summarizer` is generic over its [`Preprocessor`]. The default
//! [`NoopPreprocessor`] is zero-sized and adds no runtime cost.

use crate::errors::{Result, SummaryError};
use crate::extraction::TextExtractor;
use crate::nlp::segmenter::SentenceSegmenter;
use crate::nlp::stopwords::StopwordFilter;
use crate::pipeline::artifacts::{ScoreVector, Summary, SummaryOutcome};
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_ASSEMBLE,
    STAGE_FORMAT, STAGE_GRAPH, STAGE_RANK, STAGE_SEGMENT,
};
use crate::pipeline::traits::{NoopPreprocessor, Preprocessor};
use crate::summarizer::selector::SentenceSelector;
use crate::types::{ScoringMode, SummaryConfig};
use crate::variants::frequency::FrequencyRank;
use crate::variants::lexrank::LexRank;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// Summarizer
// ============================================================================

/// Extractive summarizer with shared, read-only resources.
///
/// Cloning is cheap: the stopword set and segmenter are reference-counted.
#[derive(Debug, Clone)]
pub struct Summarizer<P = NoopPreprocessor> {
    config: SummaryConfig,
    stopwords: Arc<StopwordFilter>,
    segmenter: Arc<SentenceSegmenter>,
    preprocessor: P,
}

impl Summarizer {
    /// Validate `config` and load the stopword set it names.
    pub fn new(config: SummaryConfig) -> Result<Self> {
        let stopwords =
            StopwordFilter::for_language_with_extras(&config.language, &config.extra_stopwords);
        Self::with_resources(config, Arc::new(stopwords), Arc::new(SentenceSegmenter::new()))
    }

    /// Build around resources loaded elsewhere, typically once at startup.
    ///
    /// `config.language` and `config.extra_stopwords` are ignored here; the
    /// given filter is used as-is.
    pub fn with_resources(
        config: SummaryConfig,
        stopwords: Arc<StopwordFilter>,
        segmenter: Arc<SentenceSegmenter>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            stopwords,
            segmenter,
            preprocessor: NoopPreprocessor,
        })
    }
}

impl<P: Preprocessor> Summarizer<P> {
    /// Swap in a different preprocessor, keeping the shared resources
    pub fn with_preprocessor<Q: Preprocessor>(self, preprocessor: Q) -> Summarizer<Q> {
        Summarizer {
            config: self.config,
            stopwords: self.stopwords,
            segmenter: self.segmenter,
            preprocessor,
        }
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    pub fn stopwords(&self) -> &Arc<StopwordFilter> {
        &self.stopwords
    }

    pub fn segmenter(&self) -> &Arc<SentenceSegmenter> {
        &self.segmenter
    }

    /// Summarize `text` with the configured settings.
    ///
    /// # Errors
    ///
    /// - [`SummaryError::EmptyInput`] for empty or whitespace-only text
    /// - [`SummaryError::InsufficientContent`] when fewer than two sentences
    ///   have at least `min_sentence_tokens` words
    pub fn summarize(&self, text: &str) -> Result<Summary> {
        self.summarize_with_observer(text, &mut NoopObserver)
    }

    /// Summarize `text`, reporting each stage to `observer`.
    ///
    /// Stages run in order:
    /// 1. Segment (preprocess, split, tokenize)
    /// 2. Build the similarity graph (graph centrality only)
    /// 3. Rank, falling back to frequency scoring if the time budget runs out
    /// 4. Assemble the top sentences in document order
    pub fn summarize_with_observer(
        &self,
        text: &str,
        observer: &mut impl PipelineObserver,
    ) -> Result<Summary> {
        let cfg = &self.config;
        if text.trim().is_empty() {
            return Err(SummaryError::EmptyInput);
        }
        // A budget too large to represent is the same as no budget
        let deadline = cfg
            .time_budget()
            .and_then(|budget| Instant::now().checked_add(budget));

        // Stage 1: Segment
        trace_stage!(STAGE_SEGMENT);
        observer.on_stage_start(STAGE_SEGMENT);
        let clock = StageClock::start();
        let prepared = self.preprocessor.preprocess(text, cfg);
        let document = self.segmenter.segment(prepared.into_owned(), &self.stopwords);
        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(document.len())
            .build();
        observer.on_stage_end(STAGE_SEGMENT, &report);
        observer.on_document(&document);

        let usable = document.usable_sentences(cfg.min_sentence_tokens);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            sentences = document.len(),
            usable,
            vocabulary = document.vocabulary_size(),
            "segmented document"
        );
        if usable < 2 {
            return Err(SummaryError::InsufficientContent {
                usable,
                text: text.to_string(),
            });
        }

        let scores = match cfg.scoring_mode {
            ScoringMode::GraphCentrality => {
                let lexrank = LexRank::with_config(cfg.clone());

                // Stage 2: Build graph
                trace_stage!(STAGE_GRAPH);
                observer.on_stage_start(STAGE_GRAPH);
                let clock = StageClock::start();
                let graph = lexrank.build_graph(&document);
                let report = StageReportBuilder::new(clock.elapsed())
                    .nodes(graph.num_nodes)
                    .edges(graph.num_edges() / 2)
                    .build();
                observer.on_stage_end(STAGE_GRAPH, &report);
                observer.on_graph(&graph);

                // Stage 3: Rank
                trace_stage!(STAGE_RANK);
                observer.on_stage_start(STAGE_RANK);
                let clock = StageClock::start();
                let result = lexrank.rank_graph(&graph, deadline);
                let report = StageReportBuilder::new(clock.elapsed())
                    .iterations(result.iterations)
                    .converged(result.converged)
                    .residual(result.delta)
                    .build();
                let scores = if result.timed_out {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        iterations = result.iterations,
                        budget_ms = ?cfg.time_budget_ms,
                        "time budget exhausted, falling back to frequency scoring"
                    );
                    FrequencyRank::with_config(cfg).rank(&document)
                } else {
                    ScoreVector::from_pagerank(result)
                };
                observer.on_stage_end(STAGE_RANK, &report);
                scores
            }
            ScoringMode::Frequency => {
                // Stage 3: Rank
                trace_stage!(STAGE_RANK);
                observer.on_stage_start(STAGE_RANK);
                let clock = StageClock::start();
                let scores = FrequencyRank::with_config(cfg).rank(&document);
                let report = StageReport::new(clock.elapsed());
                observer.on_stage_end(STAGE_RANK, &report);
                scores
            }
        };
        observer.on_scores(&scores);

        // Stage 4: Assemble
        trace_stage!(STAGE_ASSEMBLE);
        observer.on_stage_start(STAGE_ASSEMBLE);
        let clock = StageClock::start();
        let summary = SentenceSelector::new()
            .with_num_sentences(cfg.sentence_count)
            .assemble(&document, &scores)
            .with_delimiters(cfg.bullet.clone(), cfg.separator.clone());
        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(summary.len())
            .build();
        observer.on_stage_end(STAGE_ASSEMBLE, &report);
        observer.on_summary(&summary);

        Ok(summary)
    }

    /// Summarize and render with the configured bullet and separator
    pub fn summarize_to_string(&self, text: &str) -> Result<String> {
        self.summarize_to_string_with_observer(text, &mut NoopObserver)
    }

    /// Like [`Summarizer::summarize_to_string`], with a final `format` stage
    /// reported to `observer`
    pub fn summarize_to_string_with_observer(
        &self,
        text: &str,
        observer: &mut impl PipelineObserver,
    ) -> Result<String> {
        let summary = self.summarize_with_observer(text, observer)?;

        // Stage 5: Format
        trace_stage!(STAGE_FORMAT);
        observer.on_stage_start(STAGE_FORMAT);
        let clock = StageClock::start();
        let rendered = summary.format(&self.config.bullet, &self.config.separator);
        let report = StageReport::new(clock.elapsed());
        observer.on_stage_end(STAGE_FORMAT, &report);

        Ok(rendered)
    }

    /// Summarize, or hand back the raw text when there is too little of it.
    ///
    /// Only `InsufficientContent` is absorbed; every other error propagates.
    pub fn summarize_or_raw(&self, text: &str) -> Result<SummaryOutcome> {
        match self.summarize(text) {
            Ok(summary) => Ok(SummaryOutcome::Summarized(summary)),
            Err(SummaryError::InsufficientContent { text, .. }) => {
                Ok(SummaryOutcome::Unsummarized(text))
            }
            Err(err) => Err(err),
        }
    }

    /// Summarize independent texts in parallel; results keep input order
    pub fn summarize_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Result<Summary>> {
        texts
            .par_iter()
            .map(|text| self.summarize(text.as_ref()))
            .collect()
    }

    /// Run an extractor over document bytes, then summarize its text
    pub fn summarize_extracted(
        &self,
        extractor: &dyn TextExtractor,
        bytes: &[u8],
    ) -> Result<Summary> {
        let extracted = extractor.extract(bytes)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            source = ?extracted.source,
            pages = extracted.pages.len(),
            non_empty = extracted.non_empty_pages(),
            "extracted document text"
        );
        self.summarize(&extracted.into_plain_text())
    }
}

/// Convenience function to summarize text with a one-off configuration
pub fn summarize_text(text: &str, config: &SummaryConfig) -> Result<Summary> {
    Summarizer::new(config.clone())?.summarize(text)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{ExtractedText, PlainTextExtractor, SourceKind};
    use crate::graph::csr::CsrGraph;
    use crate::pipeline::observer::StageTimingObserver;
    use crate::pipeline::traits::ExtractionCleanup;
    use crate::types::Document;
    use std::time::Duration;

    const SCENARIO: &str = "Alice went to the market. She bought apples and bread. \
        Bob called her on the way home. They discussed dinner plans. \
        Alice arrived home happy.";

    fn summarizer(config: SummaryConfig) -> Summarizer {
        Summarizer::new(config).unwrap()
    }

    #[test]
    fn test_scenario_selects_two_in_order() {
        let summary = summarizer(SummaryConfig::default().with_sentence_count(2))
            .summarize(SCENARIO)
            .unwrap();

        assert_eq!(summary.len(), 2);
        assert!(summary.indices()[0] < summary.indices()[1]);
        assert_eq!(summary.mode(), ScoringMode::GraphCentrality);
        for sentence in summary.sentences() {
            assert!(SCENARIO.contains(sentence.as_str()));
        }
    }

    #[test]
    fn test_empty_input() {
        let s = summarizer(SummaryConfig::default());

        assert!(matches!(s.summarize(""), Err(SummaryError::EmptyInput)));
        assert!(matches!(s.summarize(" \n\t "), Err(SummaryError::EmptyInput)));
    }

    #[test]
    fn test_single_long_sentence_is_insufficient() {
        let text = "this run-on line keeps going without any terminal punctuation at all \
                    and simply continues on and on";
        let err = summarizer(SummaryConfig::default()).summarize(text).unwrap_err();

        match err {
            SummaryError::InsufficientContent { usable, text: raw } => {
                assert_eq!(usable, 1);
                assert_eq!(raw, text);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_sentences_are_not_usable() {
        let err = summarizer(SummaryConfig::default())
            .summarize("Hi there. Yes. This one has enough words in it.")
            .unwrap_err();

        assert!(err.is_recoverable());
        assert!(matches!(err, SummaryError::InsufficientContent { usable: 1, .. }));
    }

    #[test]
    fn test_summarize_or_raw() {
        let s = summarizer(SummaryConfig::default().with_sentence_count(2));

        let outcome = s.summarize_or_raw("Too short.").unwrap();
        assert_eq!(outcome, SummaryOutcome::Unsummarized("Too short.".to_string()));

        assert!(s.summarize_or_raw(SCENARIO).unwrap().is_summarized());
        assert!(s.summarize_or_raw("").is_err());
    }

    #[test]
    fn test_frequency_mode() {
        let summary = summarizer(
            SummaryConfig::default()
                .with_sentence_count(2)
                .with_scoring_mode(ScoringMode::Frequency),
        )
        .summarize(SCENARIO)
        .unwrap();

        assert_eq!(summary.len(), 2);
        assert_eq!(summary.mode(), ScoringMode::Frequency);
    }

    #[test]
    fn test_unrepresentable_budget_runs_lexrank() {
        let config = SummaryConfig::default()
            .with_sentence_count(2)
            .with_time_budget(Duration::MAX);
        let summary = summarizer(config).summarize(SCENARIO).unwrap();

        assert_eq!(summary.mode(), ScoringMode::GraphCentrality);
        assert_eq!(summary.len(), 2);
    }

    #[test]
    fn test_exhausted_budget_falls_back_to_frequency() {
        let config = SummaryConfig::default()
            .with_sentence_count(2)
            .with_time_budget(Duration::ZERO);
        let summary = summarizer(config.clone()).summarize(SCENARIO).unwrap();

        assert_eq!(summary.mode(), ScoringMode::Frequency);

        let frequency = summarizer(config.with_scoring_mode(ScoringMode::Frequency))
            .summarize(SCENARIO)
            .unwrap();
        assert_eq!(summary.indices(), frequency.indices());
    }

    #[test]
    fn test_deterministic() {
        let s = summarizer(SummaryConfig::default().with_sentence_count(3));
        assert_eq!(s.summarize(SCENARIO).unwrap(), s.summarize(SCENARIO).unwrap());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = Summarizer::new(SummaryConfig::default().with_damping_factor(1.0)).unwrap_err();
        assert!(matches!(err, SummaryError::InvalidConfig(_)));
    }

    #[test]
    fn test_timing_observer_sees_every_stage() {
        let s = summarizer(SummaryConfig::default().with_sentence_count(2));
        let mut obs = StageTimingObserver::new();

        let rendered = s.summarize_to_string_with_observer(SCENARIO, &mut obs).unwrap();
        assert!(rendered.starts_with("• "));

        let names: Vec<&str> = obs.reports().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![STAGE_SEGMENT, STAGE_GRAPH, STAGE_RANK, STAGE_ASSEMBLE, STAGE_FORMAT]
        );

        let graph = obs.report(STAGE_GRAPH).unwrap();
        assert_eq!(graph.nodes(), Some(5));
        assert!(graph.edges().is_some());

        let rank = obs.report(STAGE_RANK).unwrap();
        assert!(rank.iterations().is_some());
        assert_eq!(rank.converged(), Some(true));
        assert!(rank.residual().is_some());
    }

    #[test]
    fn test_frequency_mode_skips_graph_stage() {
        let s = summarizer(SummaryConfig::default().with_scoring_mode(ScoringMode::Frequency));
        let mut obs = StageTimingObserver::new();

        s.summarize_with_observer(SCENARIO, &mut obs).unwrap();

        assert!(obs.report(STAGE_GRAPH).is_none());
        assert_eq!(obs.reports().len(), 3);
    }

    /// Observer that records which artifacts it was shown
    #[derive(Default)]
    struct ArtifactObserver {
        sentences: usize,
        graph_nodes: usize,
        score_sum: f64,
        selected: usize,
    }

    impl PipelineObserver for ArtifactObserver {
        fn on_document(&mut self, document: &Document) {
            self.sentences = document.len();
        }
        fn on_graph(&mut self, graph: &CsrGraph) {
            self.graph_nodes = graph.num_nodes;
        }
        fn on_scores(&mut self, scores: &ScoreVector) {
            self.score_sum = scores.scores().iter().sum();
        }
        fn on_summary(&mut self, summary: &Summary) {
            self.selected = summary.len();
        }
    }

    #[test]
    fn test_pipeline_calls_all_artifact_observers() {
        let s = summarizer(SummaryConfig::default().with_sentence_count(2));
        let mut obs = ArtifactObserver::default();

        s.summarize_with_observer(SCENARIO, &mut obs).unwrap();

        assert_eq!(obs.sentences, 5);
        assert_eq!(obs.graph_nodes, 5);
        assert!((obs.score_sum - 1.0).abs() < 1e-9);
        assert_eq!(obs.selected, 2);
    }

    #[test]
    fn test_custom_delimiters() {
        let s = summarizer(
            SummaryConfig::default()
                .with_sentence_count(2)
                .with_delimiters("- ", "\n"),
        );

        let rendered = s.summarize_to_string(SCENARIO).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.starts_with("- ")));
        assert_eq!(s.summarize(SCENARIO).unwrap().to_string(), rendered);
    }

    #[test]
    fn test_batch_keeps_input_order() {
        let s = summarizer(SummaryConfig::default().with_sentence_count(1));
        let texts = vec![SCENARIO, "", "Too short."];

        let results = s.summarize_batch(&texts);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(SummaryError::EmptyInput)));
        assert!(matches!(results[2], Err(SummaryError::InsufficientContent { .. })));
    }

    #[test]
    fn test_clones_share_resources() {
        let s = summarizer(SummaryConfig::default());
        let clone = s.clone();

        assert!(Arc::ptr_eq(s.stopwords(), clone.stopwords()));
        assert!(Arc::ptr_eq(s.segmenter(), clone.segmenter()));
    }

    #[test]
    fn test_summarize_extracted() {
        let s = summarizer(SummaryConfig::default().with_sentence_count(2));

        let summary = s.summarize_extracted(&PlainTextExtractor, SCENARIO.as_bytes()).unwrap();
        assert_eq!(summary.len(), 2);
    }

    struct PagedPdf;

    impl TextExtractor for PagedPdf {
        fn extract(&self, _bytes: &[u8]) -> Result<ExtractedText> {
            Ok(ExtractedText::new(
                vec![
                    "Alice went to the market and bought fresh ap-\nples.".into(),
                    String::new(),
                    "Bob called her on the way home from the market.".into(),
                ],
                SourceKind::Pdf,
            ))
        }
    }

    struct BrokenOcr;

    impl TextExtractor for BrokenOcr {
        fn extract(&self, _bytes: &[u8]) -> Result<ExtractedText> {
            Err(SummaryError::extraction("image could not be decoded"))
        }
    }

    #[test]
    fn test_extracted_pages_are_normalized() {
        let s = summarizer(SummaryConfig::default().with_sentence_count(5));

        let summary = s.summarize_extracted(&PagedPdf, b"%PDF").unwrap();
        assert_eq!(summary.len(), 2);
        assert!(summary.sentences()[0].ends_with("fresh apples."));
    }

    #[test]
    fn test_extraction_failure_propagates() {
        let s = summarizer(SummaryConfig::default());
        let err = s.summarize_extracted(&BrokenOcr, b"").unwrap_err();

        assert!(matches!(err, SummaryError::Extraction { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_cleanup_preprocessor() {
        let s = summarizer(SummaryConfig::default().with_sentence_count(5))
            .with_preprocessor(ExtractionCleanup);

        let summary = s
            .summarize("Alice went to the market and bought fresh ap-\r\nples.\r\n\r\nBob called her on the way home.")
            .unwrap();
        assert_eq!(summary.sentences()[0], "Alice went to the market and bought fresh apples.");
    }

    #[test]
    fn test_summarize_text_helper() {
        let summary = summarize_text(SCENARIO, &SummaryConfig::default().with_sentence_count(1)).unwrap();
        assert_eq!(summary.len(), 1);
    }
}
