//! # rapid_summary
//!
//! Extractive summarization for text pulled out of PDFs and scanned images.
//!
//! Text is split into sentences, sentences are linked by the cosine
//! similarity of their term-frequency vectors, and a damped PageRank over
//! that graph (LexRank) picks the most central ones. A lighter
//! term-frequency mode needs no graph and doubles as the fallback when the
//! ranker runs out of time.
//!
//! ```no_run
//! use rapid_summary::{Summarizer, SummaryConfig};
//!
//! let summarizer = Summarizer::new(SummaryConfig::default().with_sentence_count(3))?;
//! let summary = summarizer.summarize("First sentence here. Second one follows. A third closes.")?;
//! println!("{summary}");
//! # Ok::<(), rapid_summary::SummaryError>(())
//! ```
//!
//! ## Modules
//!
//! - [`nlp`]: tokenizer, stopwords, sentence segmenter
//! - [`extraction`]: the boundary to OCR and PDF text extractors
//! - [`graph`]: sentence similarity graph (builder + CSR)
//! - [`pagerank`]: power-iteration centrality
//! - [`variants`]: LexRank and frequency scoring
//! - [`summarizer`]: term vectors and top-k selection
//! - [`pipeline`]: the [`Summarizer`] runner, artifacts and observers

pub mod errors;
pub mod extraction;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod pipeline;
pub mod summarizer;
pub mod types;
pub mod variants;

pub use errors::{Result, SummaryError};
pub use extraction::{ExtractedText, PlainTextExtractor, SourceKind, TextExtractor};
pub use pipeline::artifacts::{ScoreVector, Summary, SummaryOutcome};
pub use pipeline::observer::{NoopObserver, PipelineObserver, StageTimingObserver};
pub use pipeline::runner::{summarize_text, Summarizer};
pub use summarizer::selector::assemble;
pub use types::{Document, ScoringMode, Sentence, SummaryConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
