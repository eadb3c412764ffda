use super::{observe, Repository};
use crate::db::models::*;
use crate::errors::{AppError, Result};
use crate::schemas::{ExtractEvalCreate, ExtractEvalUpdate};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::info;
use validator::Validate;

impl Repository {
    pub async fn create_extract_eval(&self, input: ExtractEvalCreate) -> Result<ExtractEval> {
        input.validate()?;
        observe("extract_eval", "create", async {
            let eval = input.into_active_model().insert(self.conn()).await?;
            info!(eval_id = eval.id, extract_id = eval.extract_id, "Extract evaluation created");
            Ok(eval)
        })
        .await
    }

    pub async fn find_extract_eval(&self, id: i32) -> Result<Option<ExtractEval>> {
        observe("extract_eval", "find", async {
            ExtractEvalEntity::find_by_id(id)
                .one(self.conn())
                .await
                .map_err(Into::into)
        })
        .await
    }

    pub async fn evals_for_extract(&self, extract_id: i32) -> Result<Vec<ExtractEval>> {
        observe("extract_eval", "list", async {
            ExtractEvalEntity::find()
                .filter(ExtractEvalColumn::ExtractId.eq(extract_id))
                .order_by_asc(ExtractEvalColumn::Id)
                .all(self.conn())
                .await
                .map_err(Into::into)
        })
        .await
    }

    pub async fn update_extract_eval(&self, id: i32, input: ExtractEvalUpdate) -> Result<ExtractEval> {
        input.validate()?;
        observe("extract_eval", "update", async {
            let mut eval: ExtractEvalActiveModel = self
                .find_extract_eval(id)
                .await?
                .ok_or_else(|| AppError::not_found("extract_eval", id))?
                .into();
            input.apply(&mut eval);
            eval.update(self.conn()).await.map_err(Into::into)
        })
        .await
    }

    /// Evaluations have no dependents
    pub async fn delete_extract_eval(&self, id: i32) -> Result<bool> {
        observe("extract_eval", "delete", async {
            let result = ExtractEvalEntity::delete_by_id(id).exec(self.conn()).await?;
            Ok(result.rows_affected > 0)
        })
        .await
    }
}
