use super::{observe, page_size, Repository};
use crate::db::models::*;
use crate::errors::{AppError, Result};
use crate::schemas::{DatasetCreate, DatasetSummary, DatasetUpdate};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, Set,
};
use tracing::{debug, info};
use validator::Validate;

impl Repository {
    /// Create a new dataset; names are unique
    pub async fn create_dataset(&self, input: DatasetCreate) -> Result<Dataset> {
        input.validate()?;
        observe("dataset", "create", async {
            let dataset = input.into_active_model().insert(self.conn()).await?;
            info!(dataset_id = dataset.id, name = %dataset.name, "Dataset created");
            Ok(dataset)
        })
        .await
    }

    pub async fn find_dataset(&self, id: i32) -> Result<Option<Dataset>> {
        observe("dataset", "find", async {
            DatasetEntity::find_by_id(id)
                .one(self.conn())
                .await
                .map_err(Into::into)
        })
        .await
    }

    pub async fn find_dataset_by_name(&self, name: &str) -> Result<Option<Dataset>> {
        observe("dataset", "find", async {
            DatasetEntity::find()
                .filter(DatasetColumn::Name.eq(name))
                .one(self.conn())
                .await
                .map_err(Into::into)
        })
        .await
    }

    /// List datasets by name with pagination
    pub async fn list_datasets(&self, offset: u64, limit: u64) -> Result<(Vec<DatasetSummary>, u64)> {
        observe("dataset", "list", async {
            let limit = page_size(limit);
            let total = DatasetEntity::find().count(self.conn()).await?;
            let datasets = DatasetEntity::find()
                .order_by_asc(DatasetColumn::Name)
                .offset(offset)
                .limit(limit)
                .all(self.conn())
                .await?;

            Ok((datasets.into_iter().map(Into::into).collect(), total))
        })
        .await
    }

    pub async fn update_dataset(&self, id: i32, input: DatasetUpdate) -> Result<Dataset> {
        input.validate()?;
        observe("dataset", "update", async {
            let mut dataset: DatasetActiveModel = self
                .find_dataset(id)
                .await?
                .ok_or_else(|| AppError::not_found("dataset", id))?
                .into();
            input.apply(&mut dataset);
            dataset.update(self.conn()).await.map_err(Into::into)
        })
        .await
    }

    /// Delete a dataset and its membership rows; member papers are kept
    pub async fn delete_dataset(&self, id: i32) -> Result<bool> {
        let deleted = observe(
            "dataset",
            "delete",
            self.pool.session(move |txn| {
                Box::pin(async move {
                    DatasetPaperEntity::delete_many()
                        .filter(DatasetPaperColumn::DatasetId.eq(id))
                        .exec(txn)
                        .await?;
                    let result = DatasetEntity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected > 0)
                })
            }),
        )
        .await?;

        if deleted {
            info!(dataset_id = id, "Dataset deleted");
        }
        Ok(deleted)
    }

    /// Add a paper to a dataset. Returns `false` when it was already a member.
    pub async fn add_paper_to_dataset(&self, dataset_id: i32, paper_id: i32) -> Result<bool> {
        observe("dataset_paper", "create", async {
            let membership = DatasetPaperActiveModel {
                dataset_id: Set(dataset_id),
                paper_id: Set(paper_id),
            };
            let rows = DatasetPaperEntity::insert(membership)
                .on_conflict(
                    OnConflict::columns([DatasetPaperColumn::DatasetId, DatasetPaperColumn::PaperId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(self.conn())
                .await?;

            debug!(dataset_id, paper_id, added = rows > 0, "Dataset membership");
            Ok(rows > 0)
        })
        .await
    }

    /// Remove a paper from a dataset. Returns `false` when it was not a member.
    pub async fn remove_paper_from_dataset(&self, dataset_id: i32, paper_id: i32) -> Result<bool> {
        observe("dataset_paper", "delete", async {
            let result = DatasetPaperEntity::delete_many()
                .filter(DatasetPaperColumn::DatasetId.eq(dataset_id))
                .filter(DatasetPaperColumn::PaperId.eq(paper_id))
                .exec(self.conn())
                .await?;
            Ok(result.rows_affected > 0)
        })
        .await
    }

    pub async fn papers_in_dataset(&self, dataset_id: i32) -> Result<Vec<Paper>> {
        observe("dataset_paper", "list", async {
            let members = DatasetPaperEntity::find()
                .select_only()
                .column(DatasetPaperColumn::PaperId)
                .filter(DatasetPaperColumn::DatasetId.eq(dataset_id))
                .into_query();

            PaperEntity::find()
                .filter(PaperColumn::Id.in_subquery(members))
                .order_by_asc(PaperColumn::Id)
                .all(self.conn())
                .await
                .map_err(Into::into)
        })
        .await
    }

    pub async fn datasets_for_paper(&self, paper_id: i32) -> Result<Vec<Dataset>> {
        observe("dataset_paper", "list", async {
            let memberships = DatasetPaperEntity::find()
                .select_only()
                .column(DatasetPaperColumn::DatasetId)
                .filter(DatasetPaperColumn::PaperId.eq(paper_id))
                .into_query();

            DatasetEntity::find()
                .filter(DatasetColumn::Id.in_subquery(memberships))
                .order_by_asc(DatasetColumn::Name)
                .all(self.conn())
                .await
                .map_err(Into::into)
        })
        .await
    }
}
