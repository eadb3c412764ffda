//! Extract evaluation schemas

use sea_orm::entity::prelude::{DateTimeWithTimeZone, Json};
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::patch_opt;
use crate::db::models::{ExtractEval, ExtractEvalActiveModel};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExtractEvalCreate {
    pub extract_id: i32,
    pub extractor_id: i32,
    pub ground_truth_id: i32,

    pub evaluated_at: Option<DateTimeWithTimeZone>,

    pub title_exact_match: Option<bool>,
    #[validate(range(min = 0))]
    pub title_levenshtein_distance: Option<i32>,
    pub title_semantic_similarity: Option<f64>,
    pub title_length_ratio: Option<f64>,

    pub doi_exact_match: Option<bool>,
    pub doi_is_valid: Option<bool>,

    pub abstract_rouge_l: Option<f64>,
    pub abstract_bert_score: Option<f64>,

    pub keywords_jaccard_index: Option<f64>,
    pub keywords_f1: Option<f64>,
    pub keywords_precision: Option<f64>,
    pub keywords_recall: Option<f64>,
    pub keywords_avg_jaro_winkler: Option<f64>,

    pub notes: Option<String>,
    pub evaluation_details: Option<Json>,
}

impl ExtractEvalCreate {
    /// Scores left empty, to be filled in field by field
    pub fn new(extract_id: i32, extractor_id: i32, ground_truth_id: i32) -> Self {
        Self {
            extract_id,
            extractor_id,
            ground_truth_id,
            evaluated_at: None,
            title_exact_match: None,
            title_levenshtein_distance: None,
            title_semantic_similarity: None,
            title_length_ratio: None,
            doi_exact_match: None,
            doi_is_valid: None,
            abstract_rouge_l: None,
            abstract_bert_score: None,
            keywords_jaccard_index: None,
            keywords_f1: None,
            keywords_precision: None,
            keywords_recall: None,
            keywords_avg_jaro_winkler: None,
            notes: None,
            evaluation_details: None,
        }
    }

    pub fn into_active_model(self) -> ExtractEvalActiveModel {
        ExtractEvalActiveModel {
            id: NotSet,
            extract_id: Set(self.extract_id),
            extractor_id: Set(self.extractor_id),
            ground_truth_id: Set(self.ground_truth_id),
            evaluated_at: Set(self.evaluated_at),
            title_exact_match: Set(self.title_exact_match),
            title_levenshtein_distance: Set(self.title_levenshtein_distance),
            title_semantic_similarity: Set(self.title_semantic_similarity),
            title_length_ratio: Set(self.title_length_ratio),
            doi_exact_match: Set(self.doi_exact_match),
            doi_is_valid: Set(self.doi_is_valid),
            abstract_rouge_l: Set(self.abstract_rouge_l),
            abstract_bert_score: Set(self.abstract_bert_score),
            keywords_jaccard_index: Set(self.keywords_jaccard_index),
            keywords_f1: Set(self.keywords_f1),
            keywords_precision: Set(self.keywords_precision),
            keywords_recall: Set(self.keywords_recall),
            keywords_avg_jaro_winkler: Set(self.keywords_avg_jaro_winkler),
            notes: Set(self.notes),
            evaluation_details: Set(self.evaluation_details),
            created_at: NotSet,
            updated_at: NotSet,
        }
    }
}

/// Scores only; the evaluated extract and its references are fixed
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ExtractEvalUpdate {
    pub evaluated_at: Option<DateTimeWithTimeZone>,

    pub title_exact_match: Option<bool>,
    #[validate(range(min = 0))]
    pub title_levenshtein_distance: Option<i32>,
    pub title_semantic_similarity: Option<f64>,
    pub title_length_ratio: Option<f64>,

    pub doi_exact_match: Option<bool>,
    pub doi_is_valid: Option<bool>,

    pub abstract_rouge_l: Option<f64>,
    pub abstract_bert_score: Option<f64>,

    pub keywords_jaccard_index: Option<f64>,
    pub keywords_f1: Option<f64>,
    pub keywords_precision: Option<f64>,
    pub keywords_recall: Option<f64>,
    pub keywords_avg_jaro_winkler: Option<f64>,

    pub notes: Option<String>,
    pub evaluation_details: Option<Json>,
}

impl ExtractEvalUpdate {
    pub fn apply(self, model: &mut ExtractEvalActiveModel) {
        patch_opt(&mut model.evaluated_at, self.evaluated_at);
        patch_opt(&mut model.title_exact_match, self.title_exact_match);
        patch_opt(&mut model.title_levenshtein_distance, self.title_levenshtein_distance);
        patch_opt(&mut model.title_semantic_similarity, self.title_semantic_similarity);
        patch_opt(&mut model.title_length_ratio, self.title_length_ratio);
        patch_opt(&mut model.doi_exact_match, self.doi_exact_match);
        patch_opt(&mut model.doi_is_valid, self.doi_is_valid);
        patch_opt(&mut model.abstract_rouge_l, self.abstract_rouge_l);
        patch_opt(&mut model.abstract_bert_score, self.abstract_bert_score);
        patch_opt(&mut model.keywords_jaccard_index, self.keywords_jaccard_index);
        patch_opt(&mut model.keywords_f1, self.keywords_f1);
        patch_opt(&mut model.keywords_precision, self.keywords_precision);
        patch_opt(&mut model.keywords_recall, self.keywords_recall);
        patch_opt(&mut model.keywords_avg_jaro_winkler, self.keywords_avg_jaro_winkler);
        patch_opt(&mut model.notes, self.notes);
        patch_opt(&mut model.evaluation_details, self.evaluation_details);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractEvalRead {
    pub id: i32,
    pub extract_id: i32,
    pub extractor_id: i32,
    pub ground_truth_id: i32,
    pub evaluated_at: Option<DateTimeWithTimeZone>,
    pub title_exact_match: Option<bool>,
    pub title_levenshtein_distance: Option<i32>,
    pub title_semantic_similarity: Option<f64>,
    pub title_length_ratio: Option<f64>,
    pub doi_exact_match: Option<bool>,
    pub doi_is_valid: Option<bool>,
    pub abstract_rouge_l: Option<f64>,
    pub abstract_bert_score: Option<f64>,
    pub keywords_jaccard_index: Option<f64>,
    pub keywords_f1: Option<f64>,
    pub keywords_precision: Option<f64>,
    pub keywords_recall: Option<f64>,
    pub keywords_avg_jaro_winkler: Option<f64>,
    pub notes: Option<String>,
    pub evaluation_details: Option<Json>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<ExtractEval> for ExtractEvalRead {
    fn from(e: ExtractEval) -> Self {
        Self {
            id: e.id,
            extract_id: e.extract_id,
            extractor_id: e.extractor_id,
            ground_truth_id: e.ground_truth_id,
            evaluated_at: e.evaluated_at,
            title_exact_match: e.title_exact_match,
            title_levenshtein_distance: e.title_levenshtein_distance,
            title_semantic_similarity: e.title_semantic_similarity,
            title_length_ratio: e.title_length_ratio,
            doi_exact_match: e.doi_exact_match,
            doi_is_valid: e.doi_is_valid,
            abstract_rouge_l: e.abstract_rouge_l,
            abstract_bert_score: e.abstract_bert_score,
            keywords_jaccard_index: e.keywords_jaccard_index,
            keywords_f1: e.keywords_f1,
            keywords_precision: e.keywords_precision,
            keywords_recall: e.keywords_recall,
            keywords_avg_jaro_winkler: e.keywords_avg_jaro_winkler,
            notes: e.notes,
            evaluation_details: e.evaluation_details,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractEvalSummary {
    pub id: i32,
    pub extract_id: i32,
    pub extractor_id: i32,
    pub ground_truth_id: i32,
    pub evaluated_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<ExtractEval> for ExtractEvalSummary {
    fn from(e: ExtractEval) -> Self {
        Self {
            id: e.id,
            extract_id: e.extract_id,
            extractor_id: e.extractor_id,
            ground_truth_id: e.ground_truth_id,
            evaluated_at: e.evaluated_at,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_references() {
        assert!(serde_json::from_str::<ExtractEvalCreate>(r#"{"extract_id": 1}"#).is_err());

        let create: ExtractEvalCreate = serde_json::from_str(
            r#"{"extract_id": 1, "extractor_id": 2, "ground_truth_id": 3, "keywords_f1": 0.5}"#,
        )
        .unwrap();
        assert_eq!(create.keywords_f1, Some(0.5));
        assert!(create.validate().is_ok());
    }

    #[test]
    fn test_negative_distance_rejected() {
        let mut create = ExtractEvalCreate::new(1, 2, 3);
        create.title_levenshtein_distance = Some(-1);
        assert!(create.validate().is_err());
    }

    #[test]
    fn test_update_keeps_unspecified_scores() {
        let mut model = ExtractEvalCreate::new(1, 2, 3).into_active_model();
        model.abstract_rouge_l = Set(Some(0.42));

        ExtractEvalUpdate {
            doi_is_valid: Some(true),
            ..Default::default()
        }
        .apply(&mut model);

        assert_eq!(model.abstract_rouge_l, Set(Some(0.42)));
        assert_eq!(model.doi_is_valid, Set(Some(true)));
    }
}
