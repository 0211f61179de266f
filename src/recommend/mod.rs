pub mod document;
pub mod explain;
pub mod hits;

use std::{
    io::{Read, Write},
    sync::Arc,
};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    analyzer::{KeywordList, Lemmatizer, Normalizer, RuleLemmatizer, Tokenizer, UnicodeTokenizer},
    config::RecommenderConfig,
    error::{RecommendError, Result},
    vectorizer::{
        term::Vocabulary,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        FittedModel,
    },
};

use document::Document;
use hits::{Criteria, Recommendation, Recommendations};

/// Ranks a fixed corpus of calls against keyword, title or abstract queries.
///
/// Construction normalizes every document and fits the TF-IDF model once;
/// afterwards the engine is read-only and can be queried from many threads.
#[derive(Debug)]
pub struct CallRecommender<D, T = UnicodeTokenizer, L = RuleLemmatizer, E = DefaultTFIDFEngine> {
    documents: Vec<D>,
    /// keyword list of each document, used for explanations
    keywords: Vec<KeywordList>,
    model: FittedModel<E>,
    normalizer: Normalizer<T, L>,
    config: RecommenderConfig,
}

impl<D> CallRecommender<D>
where
    D: Document + Sync,
{
    /// Fit over `documents` with the default configuration.
    pub fn new(documents: Vec<D>) -> Result<Self> {
        Self::with_config(documents, RecommenderConfig::default())
    }

    pub fn with_config(documents: Vec<D>, config: RecommenderConfig) -> Result<Self> {
        let normalizer = default_normalizer(&config);
        Self::with_normalizer(documents, normalizer, config)
    }

    /// Rebuild an engine from a snapshot written by [`CallRecommender::save_model`]
    /// without refitting.
    ///
    /// `documents` must be the corpus the snapshot was fitted on, in the same
    /// order, and `config` must carry the same `extra_stopwords`. Keywords are
    /// normalized again and checked against the stored count rows; any
    /// difference fails with [`RecommendError::SnapshotKeywords`].
    pub fn from_snapshot<R: Read>(documents: Vec<D>, reader: R, config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        if documents.is_empty() {
            return Err(RecommendError::EmptyCorpus);
        }
        let model = FittedModel::from_reader(reader)?;
        if model.doc_num() != documents.len() {
            return Err(RecommendError::SnapshotMismatch {
                expected: documents.len(),
                found: model.doc_num(),
            });
        }
        let normalizer = default_normalizer(&config);
        let keywords = normalize_corpus(&documents, &normalizer, config.parallel);
        for (index, (doc, list)) in documents.iter().zip(&keywords).enumerate() {
            let recounted = model.vocabulary().count(list.as_slice());
            if model.counts().row(index) != Some(&recounted) {
                return Err(RecommendError::SnapshotKeywords(doc.id().to_string()));
            }
        }
        Ok(Self { documents, keywords, model, normalizer, config })
    }
}

impl<D, T, L, E> CallRecommender<D, T, L, E>
where
    D: Document + Sync,
    T: Tokenizer,
    L: Lemmatizer,
    E: TFIDFEngine,
{
    /// Fit over `documents` with a caller-supplied normalizer.
    ///
    /// Fails with [`RecommendError::EmptyCorpus`] when there are no documents.
    pub fn with_normalizer(
        documents: Vec<D>,
        normalizer: Normalizer<T, L>,
        config: RecommenderConfig,
    ) -> Result<Self> {
        config.validate()?;
        if documents.is_empty() {
            return Err(RecommendError::EmptyCorpus);
        }
        let keywords = normalize_corpus(&documents, &normalizer, config.parallel);
        for (doc, list) in documents.iter().zip(&keywords) {
            if list.is_empty() {
                warn!("Document {} has no keywords; it will never be recommended", doc.id());
            }
        }
        let model = FittedModel::fit(&keywords)?;
        Ok(Self { documents, keywords, model, normalizer, config })
    }

    /// Recommend documents sharing topic with a list of keywords.
    ///
    /// `threshold` defaults to the configured minimum relevancy; a document
    /// is kept only when its relevancy is strictly greater.
    pub fn recommend_by_keywords<S>(&self, keywords: &[S], threshold: Option<f64>) -> Recommendations<'_, D>
    where
        S: AsRef<str>,
    {
        let terms = keyword_terms(&self.normalizer, keywords);
        let criteria = Criteria::Keywords(keywords.iter().map(|k| k.as_ref().to_string()).collect());
        self.assemble(&terms, criteria, threshold, |index| {
            explain::keyword_explanation(keywords, &self.keywords[index])
        })
    }

    /// Recommend documents similar to a title. Title words are not lemmatized.
    pub fn recommend_by_title(&self, title: &str, threshold: Option<f64>) -> Recommendations<'_, D> {
        let terms = self.normalizer.title_keywords(title);
        let explanation = explain::title_explanation(title);
        self.assemble(terms.as_slice(), Criteria::Title(title.to_string()), threshold, |_| explanation.clone())
    }

    /// Recommend documents similar to an abstract.
    pub fn recommend_by_abstract(&self, text: &str, threshold: Option<f64>) -> Recommendations<'_, D> {
        let terms = self.normalizer.keywords(text);
        let explanation = explain::abstract_explanation(text, self.config.abstract_preview_words);
        self.assemble(terms.as_slice(), Criteria::Abstract(text.to_string()), threshold, |_| explanation.clone())
    }

    /// Relevancy of every document to the given terms, in corpus order.
    pub fn relevance<S>(&self, terms: &[S]) -> Vec<f64>
    where
        S: AsRef<str>,
    {
        self.model.relevance(terms, self.config.parallel)
    }

    /// Write the fitted model as a CBOR snapshot.
    pub fn save_model<W: Write>(&self, writer: W) -> Result<()> {
        self.model.to_writer(writer)
    }

    fn assemble<S, F>(
        &self,
        terms: &[S],
        criteria: Criteria,
        threshold: Option<f64>,
        explain: F,
    ) -> Recommendations<'_, D>
    where
        S: AsRef<str>,
        F: Fn(usize) -> String,
    {
        let threshold = self.config.threshold(threshold);
        let modality = criteria.modality();
        let criteria = Arc::new(criteria);
        let list: Vec<Recommendation<'_, D>> = self
            .relevance(terms)
            .into_iter()
            .enumerate()
            .filter(|&(_, relevancy)| relevancy > threshold)
            .map(|(index, relevancy)| Recommendation {
                document: &self.documents[index],
                index,
                relevancy,
                modality,
                criteria: Arc::clone(&criteria),
                explanation: explain(index),
            })
            .collect();
        debug!(
            "{} query with {} terms matched {} of {} documents above {}",
            modality,
            terms.len(),
            list.len(),
            self.documents.len(),
            threshold
        );
        Recommendations::new(list)
    }
}

impl<D, T, L, E> CallRecommender<D, T, L, E> {
    pub fn documents(&self) -> &[D] {
        &self.documents
    }

    /// Keyword list computed for the document at `index`.
    pub fn keywords(&self, index: usize) -> Option<&KeywordList> {
        self.keywords.get(index)
    }

    pub fn model(&self) -> &FittedModel<E> {
        &self.model
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.model.vocabulary()
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

fn default_normalizer(config: &RecommenderConfig) -> Normalizer {
    let mut normalizer = Normalizer::new();
    normalizer.stopwords_mut().extend(&config.extra_stopwords);
    normalizer
}

fn normalize_corpus<D, T, L>(documents: &[D], normalizer: &Normalizer<T, L>, parallel: bool) -> Vec<KeywordList>
where
    D: Document + Sync,
    T: Tokenizer,
    L: Lemmatizer,
{
    if parallel {
        documents
            .par_iter()
            .map(|doc| normalizer.keywords(doc.long_text()))
            .collect()
    } else {
        documents
            .iter()
            .map(|doc| normalizer.keywords(doc.long_text()))
            .collect()
    }
}

/// Vectorizer terms of caller keywords: each keyword tokenized on word
/// boundaries and lowercased, not lemmatized.
fn keyword_terms<S, T, L>(normalizer: &Normalizer<T, L>, keywords: &[S]) -> Vec<String>
where
    S: AsRef<str>,
    T: Tokenizer,
    L: Lemmatizer,
{
    keywords
        .iter()
        .flat_map(|k| normalizer.terms(k.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::{document::Call, hits::Modality};

    fn calls() -> Vec<Call> {
        vec![
            Call::new("ethics", "Privacy, data and ethics."),
            Call::new("sonnets", "Poetry: the form of the sonnet."),
            Call::new("surveillance", "Surveillance, privacy and data."),
        ]
    }

    #[test]
    fn construction_normalizes_every_document() {
        let engine = CallRecommender::new(calls()).unwrap();
        assert_eq!(engine.len(), 3);
        assert_eq!(engine.keywords(0).unwrap().as_slice(), ["privacy", "data", "ethic"]);
        assert_eq!(engine.keywords(1).unwrap().as_slice(), ["poetry", "form", "sonnet"]);
        assert_eq!(engine.keywords(2).unwrap().as_slice(), ["surveillance", "privacy", "data"]);
        assert_eq!(engine.vocabulary().len(), 7);
    }

    #[test]
    fn empty_corpus_fails_fast() {
        let result = CallRecommender::<Call>::new(Vec::new());
        assert!(matches!(result, Err(RecommendError::EmptyCorpus)));
    }

    #[test]
    fn invalid_config_fails_fast() {
        let config = RecommenderConfig { abstract_preview_words: 0, ..Default::default() };
        assert!(CallRecommender::with_config(calls(), config).is_err());
    }

    #[test]
    fn keyword_terms_are_lowercased_and_split() {
        let normalizer = Normalizer::new();
        assert_eq!(keyword_terms(&normalizer, &["Privacy", "data  Ethics "]), ["privacy", "data", "ethics"]);
        assert_eq!(keyword_terms(&normalizer, &["privacy,", "(data)."]), ["privacy", "data"]);
    }

    #[test]
    fn keyword_query_matches_and_explains() {
        let engine = CallRecommender::new(calls()).unwrap();
        let recs = engine.recommend_by_keywords(&["privacy", "data"], None);
        assert_eq!(recs.indices(), vec![0, 2]);
        for rec in &recs {
            assert_eq!(rec.modality, Modality::Keyword);
            assert_eq!(rec.explanation, "Based on your search for keywords privacy and data.");
            assert_eq!(*rec.criteria, Criteria::Keywords(vec!["privacy".into(), "data".into()]));
        }
    }

    #[test]
    fn title_query_uses_unlemmatized_words() {
        let engine = CallRecommender::new(calls()).unwrap();
        let recs = engine.recommend_by_title("The Sonnet as Form", None);
        assert_eq!(recs.indices(), vec![1]);
        assert_eq!(recs.list[0].explanation, "Based on the title \"The Sonnet as Form\".");
        assert_eq!(recs.list[0].modality, Modality::Title);
    }

    #[test]
    fn abstract_query_quotes_its_opening() {
        let engine = CallRecommender::new(calls()).unwrap();
        let text = "We examine surveillance of private lives and the data it produces.";
        let recs = engine.recommend_by_abstract(text, None);
        assert_eq!(recs.indices(), vec![0, 2]);
        assert_eq!(
            recs.list[0].explanation,
            "Based on the abstract beginning \"We examine surveillance of private lives...\""
        );
        assert_eq!(*recs.list[1].criteria, Criteria::Abstract(text.to_string()));
    }

    #[test]
    fn extra_stopwords_from_config_apply() {
        let config = RecommenderConfig { extra_stopwords: vec!["privacy".into()], ..Default::default() };
        let engine = CallRecommender::with_config(calls(), config).unwrap();
        assert_eq!(engine.keywords(0).unwrap().as_slice(), ["data", "ethic"]);
    }

    #[test]
    fn sequential_mode_gives_identical_results() {
        let parallel = CallRecommender::new(calls()).unwrap();
        let config = RecommenderConfig { parallel: false, ..Default::default() };
        let sequential = CallRecommender::with_config(calls(), config).unwrap();
        assert_eq!(parallel.model(), sequential.model());
        assert_eq!(
            parallel.relevance(&["privacy", "sonnet"]),
            sequential.relevance(&["privacy", "sonnet"])
        );
    }

    #[test]
    fn snapshot_round_trip_through_the_engine() {
        let engine = CallRecommender::new(calls()).unwrap();
        let mut buf = Vec::new();
        engine.save_model(&mut buf).unwrap();

        let restored = CallRecommender::from_snapshot(calls(), buf.as_slice(), RecommenderConfig::default()).unwrap();
        assert_eq!(restored.model(), engine.model());
        assert_eq!(
            restored.recommend_by_keywords(&["data"], None).indices(),
            engine.recommend_by_keywords(&["data"], None).indices()
        );

        let changed = RecommenderConfig { extra_stopwords: vec!["privacy".into()], ..Default::default() };
        let result = CallRecommender::from_snapshot(calls(), buf.as_slice(), changed);
        assert!(matches!(result, Err(RecommendError::SnapshotKeywords(id)) if id == "ethics"));

        let mut swapped = calls();
        swapped.swap(0, 1);
        let result = CallRecommender::from_snapshot(swapped, buf.as_slice(), RecommenderConfig::default());
        assert!(matches!(result, Err(RecommendError::SnapshotKeywords(_))));

        let short = calls().into_iter().take(2).collect();
        let result = CallRecommender::from_snapshot(short, buf.as_slice(), RecommenderConfig::default());
        assert!(matches!(result, Err(RecommendError::SnapshotMismatch { expected: 2, found: 3 })));
    }
}
