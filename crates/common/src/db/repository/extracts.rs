use super::{observe, Repository};
use crate::db::models::*;
use crate::errors::{AppError, Result};
use crate::schemas::{ExtractCreate, ExtractUpdate};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::info;
use validator::Validate;

impl Repository {
    /// Record an extraction run; paper and extractor must exist
    pub async fn create_extract(&self, input: ExtractCreate) -> Result<Extract> {
        input.validate()?;
        observe("extract", "create", async {
            let extract = input.into_active_model().insert(self.conn()).await?;
            info!(
                extract_id = extract.id,
                paper_id = extract.paper_id,
                extractor_id = extract.extractor_id,
                status = %extract.status,
                "Extract created"
            );
            Ok(extract)
        })
        .await
    }

    pub async fn find_extract(&self, id: i32) -> Result<Option<Extract>> {
        observe("extract", "find", async {
            ExtractEntity::find_by_id(id)
                .one(self.conn())
                .await
                .map_err(Into::into)
        })
        .await
    }

    pub async fn extracts_for_paper(&self, paper_id: i32) -> Result<Vec<Extract>> {
        observe("extract", "list", async {
            ExtractEntity::find()
                .filter(ExtractColumn::PaperId.eq(paper_id))
                .order_by_asc(ExtractColumn::Id)
                .all(self.conn())
                .await
                .map_err(Into::into)
        })
        .await
    }

    pub async fn update_extract(&self, id: i32, input: ExtractUpdate) -> Result<Extract> {
        input.validate()?;
        observe("extract", "update", async {
            let mut extract: ExtractActiveModel = self
                .find_extract(id)
                .await?
                .ok_or_else(|| AppError::not_found("extract", id))?
                .into();
            input.apply(&mut extract);
            extract.update(self.conn()).await.map_err(Into::into)
        })
        .await
    }

    /// Delete an extract and its evaluations
    pub async fn delete_extract(&self, id: i32) -> Result<bool> {
        let deleted = observe(
            "extract",
            "delete",
            self.pool.session(move |txn| {
                Box::pin(async move {
                    ExtractEvalEntity::delete_many()
                        .filter(ExtractEvalColumn::ExtractId.eq(id))
                        .exec(txn)
                        .await?;
                    let result = ExtractEntity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected > 0)
                })
            }),
        )
        .await?;

        if deleted {
            info!(extract_id = id, "Extract deleted");
        }
        Ok(deleted)
    }
}
