//! Deterministic extractive summarization for DocDraft.
//!
//! - [`keywords`]: frequency-ranked, stopword-filtered themes
//! - [`sentences`]: sentence splitting, scoring, and per-document bullet summaries
//! - [`synthesis`]: cross-document summary with themes, insights, and risks
//!
//! Every function here is total: empty or unparseable input yields an empty
//! result, never an error.

pub mod keywords;
pub mod sentences;
pub mod synthesis;

pub use keywords::{Keyword, extract_keywords, is_stopword, rank_keywords};
pub use sentences::{DEFAULT_MAX_BULLETS, SentenceScore, score_sentences, split_sentences, summarize_document};
pub use synthesis::{DEFAULT_MAX_WORDS, combined_text, limit_to_word_count, summarize_documents};
