/// This crate recommends calls for papers using a TF-IDF relevance engine.
pub mod analyzer;
pub mod config;
pub mod error;
pub mod recommend;
pub mod utils;
pub mod vectorizer;

/// Call Recommender
/// The top-level struct of this crate.
/// It fits a TF-IDF model over a fixed corpus of calls once, then answers
/// keyword, title and abstract queries with scored, explained matches.
///
/// Internally, it holds:
/// - The corpus documents
/// - The keyword list of each document
/// - The fitted TF-IDF model
/// - The text normalizer
/// - The configuration
///
/// `CallRecommender<D, T, L, E>` has the following generic parameters:
/// - `D`: Document type (anything implementing `Document`, e.g. `Call`)
/// - `T`: Tokenizer (default `UnicodeTokenizer`)
/// - `L`: Lemmatizer (default `RuleLemmatizer`)
/// - `E`: TF-IDF calculation engine type (default `DefaultTFIDFEngine`)
///
/// # Thread Safety
/// After construction the engine is read-only; queries take `&self` and may
/// run concurrently.
pub use recommend::CallRecommender;

/// Document trait and the stock call-for-papers record.
pub use recommend::document::{Call, Document};

/// Recommendation result structures
/// - `Recommendations`: the matches of one query, sortable by relevancy
/// - `Recommendation`: one matched document with relevancy, modality and explanation
pub use recommend::hits::{Criteria, Modality, Recommendation, Recommendations};

/// Fitted TF-IDF Model
/// Vocabulary, counts, IDF and the normalized weighted matrix of a corpus.
///
/// # Serialization
/// Supported, as a CBOR snapshot.
pub use vectorizer::FittedModel;

/// TF IDF Calculation Engine Trait
/// A trait that defines how IDF and weighted rows are computed.
/// `DefaultTFIDFEngine` uses smoothed IDF and L2-normalized rows.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Text normalization pieces.
pub use analyzer::{KeywordList, Lemmatizer, Normalizer, StopWords, Tokenizer};

pub use config::RecommenderConfig;
pub use error::{RecommendError, Result};
