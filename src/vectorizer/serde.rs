use std::io::{Read, Write};

use crate::{
    error::{RecommendError, Result},
    vectorizer::{tfidf::TFIDFEngine, FittedModel},
};

/// CBOR snapshot of a fitted model.
///
/// The snapshot carries vocabulary, counts, IDF and weighted rows, so a
/// restored model answers queries exactly like the one that was saved
/// without refitting.
impl<E> FittedModel<E>
where
    E: TFIDFEngine,
{
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_cbor::to_writer(writer, self)?;
        Ok(())
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_cbor::to_vec(self)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let model: Self = serde_cbor::from_reader(reader)?;
        model.check_shape()?;
        Ok(model)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let model: Self = serde_cbor::from_slice(bytes)?;
        model.check_shape()?;
        Ok(model)
    }

    fn check_shape(&self) -> Result<()> {
        let dim = self.vocabulary.len();
        if self.idf.len() != dim || self.counts.dim() != dim {
            return Err(corrupt(format!(
                "vocabulary has {} terms but idf has {} and counts have {} columns",
                dim,
                self.idf.len(),
                self.counts.dim()
            )));
        }
        if self.counts.doc_num() != self.weighted.len() {
            return Err(corrupt(format!(
                "{} count rows but {} weighted rows",
                self.counts.doc_num(),
                self.weighted.len()
            )));
        }
        if self.idf.doc_num != self.counts.doc_num() as u64 {
            return Err(corrupt(format!(
                "idf was fitted over {} documents but there are {} rows",
                self.idf.doc_num,
                self.counts.doc_num()
            )));
        }
        if !self.idf.idf_vec.iter().all(|w| w.is_finite()) {
            return Err(corrupt("non-finite idf weight".to_string()));
        }
        for (doc, (counts, weighted)) in self.counts.rows().iter().zip(&self.weighted).enumerate() {
            if !counts.is_well_formed(dim) {
                return Err(corrupt(format!("malformed count row {doc}")));
            }
            if !weighted.is_well_formed(dim) {
                return Err(corrupt(format!("malformed weighted row {doc}")));
            }
            if !weighted.is_finite() {
                return Err(corrupt(format!("non-finite weight in row {doc}")));
            }
        }
        Ok(())
    }
}

#[inline]
fn corrupt(reason: String) -> RecommendError {
    RecommendError::CorruptSnapshot(reason)
}

#[cfg(test)]
mod tests {
    use serde_cbor::Value;

    use super::*;
    use crate::vectorizer::tfidf::DefaultTFIDFEngine;

    fn model() -> FittedModel {
        FittedModel::fit(&[vec!["privacy", "data", "ethic"], vec!["poetry", "form", "sonnet"]]).unwrap()
    }

    #[test]
    fn snapshot_restores_an_equal_model() {
        let model = model();
        let bytes = model.to_vec().unwrap();
        let restored: FittedModel = FittedModel::from_slice(&bytes).unwrap();
        assert_eq!(restored, model);
        assert_eq!(
            restored.relevance(&["privacy", "data"], false),
            model.relevance(&["privacy", "data"], false)
        );
    }

    #[test]
    fn snapshot_through_reader_and_writer() {
        let model = model();
        let mut buf = Vec::new();
        model.to_writer(&mut buf).unwrap();
        let restored: FittedModel = FittedModel::from_reader(buf.as_slice()).unwrap();
        assert_eq!(restored, model);
    }

    #[test]
    fn garbage_is_a_snapshot_error() {
        let result: Result<FittedModel> = FittedModel::from_slice(b"not cbor at all");
        assert!(matches!(result, Err(RecommendError::Snapshot(_))));
    }

    /// Re-encode `model` after editing the stored values of its first weighted row.
    fn with_first_row_values(model: &FittedModel, edit: impl FnOnce(&mut Vec<Value>)) -> Vec<u8> {
        let mut value = serde_cbor::value::to_value(model).unwrap();
        let Value::Map(fields) = &mut value else { panic!("model is not a map") };
        let Some(Value::Array(rows)) = fields.get_mut(&Value::Text("weighted".to_string())) else {
            panic!("no weighted rows")
        };
        let Value::Map(row) = &mut rows[0] else { panic!("row is not a map") };
        let Some(Value::Array(vals)) = row.get_mut(&Value::Text("vals".to_string())) else {
            panic!("row has no values")
        };
        edit(vals);
        serde_cbor::to_vec(&value).unwrap()
    }

    #[test]
    fn untouched_reencoding_still_loads() {
        let model = model();
        let bytes = with_first_row_values(&model, |_| {});
        assert_eq!(FittedModel::<DefaultTFIDFEngine>::from_slice(&bytes).unwrap(), model);
    }

    #[test]
    fn ragged_row_is_rejected() {
        let bytes = with_first_row_values(&model(), |vals| {
            vals.pop();
        });
        let result: Result<FittedModel> = FittedModel::from_slice(&bytes);
        assert!(matches!(result, Err(RecommendError::CorruptSnapshot(_))));
    }

    #[test]
    fn non_finite_weight_is_rejected() {
        let bytes = with_first_row_values(&model(), |vals| vals[0] = Value::Float(f64::NAN));
        let result: Result<FittedModel> = FittedModel::from_slice(&bytes);
        assert!(matches!(result, Err(RecommendError::CorruptSnapshot(_))));

        let bytes = with_first_row_values(&model(), |vals| vals[1] = Value::Float(f64::INFINITY));
        let result: Result<FittedModel> = FittedModel::from_slice(&bytes);
        assert!(matches!(result, Err(RecommendError::CorruptSnapshot(_))));
    }

    #[test]
    fn idf_document_count_must_match_rows() {
        let mut model = model();
        model.idf.doc_num += 1;
        let bytes = model.to_vec().unwrap();
        let result: Result<FittedModel> = FittedModel::from_slice(&bytes);
        assert!(matches!(result, Err(RecommendError::CorruptSnapshot(_))));
    }

    #[test]
    fn inconsistent_shapes_are_rejected() {
        let mut model = model();
        model.idf.idf_vec.pop();
        let bytes = model.to_vec().unwrap();
        let result: Result<FittedModel> = FittedModel::from_slice(&bytes);
        assert!(matches!(result, Err(RecommendError::CorruptSnapshot(_))));
    }
}
