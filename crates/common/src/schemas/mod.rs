//! Request/response schemas
//!
//! Each entity has four views:
//! - `XCreate`: validated input for inserts, with column defaults applied
//! - `XUpdate`: every field optional; `None` leaves the stored value alone
//! - `XRead`: identifier, timestamps and all fields
//! - `XSummary`: the minimal subset shown in list views

mod dataset;
mod extract;
mod extract_eval;
mod extractor;
mod ground_truth;
mod paper;

pub use dataset::{DatasetCreate, DatasetRead, DatasetSummary, DatasetUpdate};
pub use extract::{ExtractCreate, ExtractRead, ExtractSummary, ExtractUpdate};
pub use extract_eval::{ExtractEvalCreate, ExtractEvalRead, ExtractEvalSummary, ExtractEvalUpdate};
pub use extractor::{ExtractorCreate, ExtractorRead, ExtractorSummary, ExtractorUpdate};
pub use ground_truth::{GroundTruthCreate, GroundTruthRead, GroundTruthSummary, GroundTruthUpdate};
pub use paper::{PaperCreate, PaperRead, PaperSummary, PaperUpdate};

use sea_orm::ActiveValue::{self, Set};
use sea_orm::Value;

/// Overwrite a required column when a new value was supplied
pub(crate) fn patch<V>(target: &mut ActiveValue<V>, value: Option<V>)
where
    V: Into<Value>,
{
    if let Some(v) = value {
        *target = Set(v);
    }
}

/// Overwrite a nullable column when a new value was supplied
pub(crate) fn patch_opt<V>(target: &mut ActiveValue<Option<V>>, value: Option<V>)
where
    Option<V>: Into<Value>,
{
    if let Some(v) = value {
        *target = Set(Some(v));
    }
}

fn default_true() -> bool {
    true
}
