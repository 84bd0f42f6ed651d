//! Natural Language Processing components
//!
//! This module provides word tokenization, stopword filtering and
//! rule-based sentence segmentation.

pub mod segmenter;
pub mod stopwords;
pub mod tokenizer;
