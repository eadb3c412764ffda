//! SeaORM entity models
//!
//! Database entities for PaperCheck: papers, datasets (with their
//! membership table), extractors, ground truths, extracts and extract
//! evaluations.

mod paper;
mod dataset;
mod dataset_paper;
pub mod extractor;
mod ground_truth;
pub mod extract;
mod extract_eval;

use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::ActiveValue::{self, Set};

pub use paper::{
    Entity as PaperEntity,
    Model as Paper,
    ActiveModel as PaperActiveModel,
    Column as PaperColumn,
};

pub use dataset::{
    Entity as DatasetEntity,
    Model as Dataset,
    ActiveModel as DatasetActiveModel,
    Column as DatasetColumn,
};

pub use dataset_paper::{
    Entity as DatasetPaperEntity,
    Model as DatasetPaper,
    ActiveModel as DatasetPaperActiveModel,
    Column as DatasetPaperColumn,
};

pub use extractor::{
    Entity as ExtractorEntity,
    Model as Extractor,
    ActiveModel as ExtractorActiveModel,
    Column as ExtractorColumn,
    display_name,
    UNNAMED_EXTRACTOR,
};

pub use ground_truth::{
    Entity as GroundTruthEntity,
    Model as GroundTruth,
    ActiveModel as GroundTruthActiveModel,
    Column as GroundTruthColumn,
};

pub use extract::{
    Entity as ExtractEntity,
    Model as Extract,
    ActiveModel as ExtractActiveModel,
    Column as ExtractColumn,
    ExtractStatus,
};

pub use extract_eval::{
    Entity as ExtractEvalEntity,
    Model as ExtractEval,
    ActiveModel as ExtractEvalActiveModel,
    Column as ExtractEvalColumn,
};

/// Set `created_at` on insert and refresh `updated_at` on every save
pub(crate) fn stamp_timestamps(
    created_at: &mut ActiveValue<DateTimeWithTimeZone>,
    updated_at: &mut ActiveValue<DateTimeWithTimeZone>,
    insert: bool,
) {
    let now = chrono::Utc::now().fixed_offset();
    if insert {
        *created_at = Set(now);
    }
    *updated_at = Set(now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue::NotSet;

    #[test]
    fn test_insert_sets_both_timestamps() {
        let mut created: ActiveValue<DateTimeWithTimeZone> = NotSet;
        let mut updated: ActiveValue<DateTimeWithTimeZone> = NotSet;
        stamp_timestamps(&mut created, &mut updated, true);
        assert!(created.is_set());
        assert!(updated.is_set());
    }

    #[test]
    fn test_update_leaves_created_at_alone() {
        let original = chrono::Utc::now().fixed_offset() - chrono::Duration::days(3);
        let mut created = ActiveValue::Unchanged(original);
        let mut updated = ActiveValue::Unchanged(original);
        stamp_timestamps(&mut created, &mut updated, false);
        assert_eq!(created, ActiveValue::Unchanged(original));
        match updated {
            ActiveValue::Set(ts) => assert!(ts > original),
            other => panic!("updated_at not refreshed: {:?}", other),
        }
    }
}
