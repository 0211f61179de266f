use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::recommend::document::Document;

/// Which form the query was given in. Affects only the explanation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Keyword,
    Title,
    Abstract,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Modality::Keyword => "keyword",
            Modality::Title => "title",
            Modality::Abstract => "abstract",
        };
        f.write_str(name)
    }
}

/// The exact query input a recommendation was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criteria {
    Keywords(Vec<String>),
    Title(String),
    Abstract(String),
}

impl Criteria {
    pub fn modality(&self) -> Modality {
        match self {
            Criteria::Keywords(_) => Modality::Keyword,
            Criteria::Title(_) => Modality::Title,
            Criteria::Abstract(_) => Modality::Abstract,
        }
    }
}

/// One matched document with its score and reason.
#[derive(Debug)]
pub struct Recommendation<'a, D> {
    pub document: &'a D,
    /// position of the document in the corpus
    pub index: usize,
    pub relevancy: f64,
    pub modality: Modality,
    /// shared by every recommendation of one query
    pub criteria: Arc<Criteria>,
    pub explanation: String,
}

impl<D> Clone for Recommendation<'_, D> {
    fn clone(&self) -> Self {
        Self {
            document: self.document,
            index: self.index,
            relevancy: self.relevancy,
            modality: self.modality,
            criteria: Arc::clone(&self.criteria),
            explanation: self.explanation.clone(),
        }
    }
}

impl<D> PartialEq for Recommendation<'_, D> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document)
            && self.index == other.index
            && self.relevancy == other.relevancy
            && self.modality == other.modality
            && self.criteria == other.criteria
            && self.explanation == other.explanation
    }
}

/// Matches of one query, in corpus order until sorted.
#[derive(Debug)]
pub struct Recommendations<'a, D> {
    pub list: Vec<Recommendation<'a, D>>,
}

impl<'a, D> Recommendations<'a, D> {
    pub fn new(list: Vec<Recommendation<'a, D>>) -> Self {
        Recommendations { list }
    }

    /// Sort by descending relevancy. Ties keep corpus order.
    pub fn sort_by_relevancy(&mut self) -> &mut Self {
        self.list.sort_by(|a, b| b.relevancy.total_cmp(&a.relevancy));
        self
    }

    /// Keep only the first `k` entries.
    pub fn top(mut self, k: usize) -> Self {
        self.list.truncate(k);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recommendation<'a, D>> {
        self.list.iter()
    }

    /// Corpus positions of the matched documents, in list order.
    pub fn indices(&self) -> Vec<usize> {
        self.list.iter().map(|r| r.index).collect()
    }
}

impl<D> Clone for Recommendations<'_, D> {
    fn clone(&self) -> Self {
        Self { list: self.list.clone() }
    }
}

impl<D> PartialEq for Recommendations<'_, D> {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl<'a, D> IntoIterator for Recommendations<'a, D> {
    type Item = Recommendation<'a, D>;
    type IntoIter = std::vec::IntoIter<Recommendation<'a, D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<'r, 'a, D> IntoIterator for &'r Recommendations<'a, D> {
    type Item = &'r Recommendation<'a, D>;
    type IntoIter = std::slice::Iter<'r, Recommendation<'a, D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

impl<D: Document> fmt::Display for Recommendations<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rec in &self.list {
            writeln!(
                f,
                "{}\t{:.4}\t{}",
                rec.document.id(),
                rec.relevancy,
                rec.explanation
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::document::Call;

    fn rec<'a>(call: &'a Call, index: usize, relevancy: f64) -> Recommendation<'a, Call> {
        Recommendation {
            document: call,
            index,
            relevancy,
            modality: Modality::Keyword,
            criteria: Arc::new(Criteria::Keywords(vec!["data".to_string()])),
            explanation: "Based on your search for keyword data.".to_string(),
        }
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let calls: Vec<Call> = (0..4).map(|i| Call::new(format!("c{i}"), "")).collect();
        let mut recs = Recommendations::new(vec![
            rec(&calls[0], 0, 1.0),
            rec(&calls[1], 1, 5.0),
            rec(&calls[2], 2, 1.0),
            rec(&calls[3], 3, 3.0),
        ]);
        recs.sort_by_relevancy();
        assert_eq!(recs.indices(), vec![1, 3, 0, 2]);
        assert_eq!(recs.top(2).indices(), vec![1, 3]);
    }

    #[test]
    fn display_lists_id_score_and_reason() {
        let call = Call::new("c0", "");
        let recs = Recommendations::new(vec![rec(&call, 0, 2.5)]);
        assert_eq!(recs.to_string(), "c0\t2.5000\tBased on your search for keyword data.\n");
    }

    #[test]
    fn criteria_knows_its_modality() {
        assert_eq!(Criteria::Title("t".into()).modality(), Modality::Title);
        assert_eq!(Criteria::Abstract("a".into()).modality().to_string(), "abstract");
    }
}
