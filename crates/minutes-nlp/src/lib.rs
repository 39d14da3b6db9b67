//! minutes-nlp
//!
//! Heuristic text analysis for meeting transcripts: follow-up detection,
//! RAKE key points, TF-IDF topics, lexicon sentiment, and the extractive
//! summary strategies used when no model is available.

pub mod action_items;
pub mod extractive;
pub mod keyphrases;
pub mod sentiment;
pub mod stopwords;
pub mod topics;

pub use action_items::extract_action_items;
pub use extractive::{LeadStrategy, TextRankStrategy, TextRankSummarizer};
pub use keyphrases::{extract_key_points, KeyphraseExtractor};
pub use sentiment::sentiment_scores;
pub use stopwords::StopwordFilter;
pub use topics::{topic_terms, TopicExtractor};
