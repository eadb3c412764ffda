use super::{observe, Repository};
use crate::db::models::*;
use crate::errors::{AppError, Result};
use crate::schemas::{GroundTruthCreate, GroundTruthUpdate};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};
use tracing::info;
use validator::Validate;

impl Repository {
    /// Attach ground truth to a paper; a paper holds at most one
    pub async fn create_ground_truth(&self, input: GroundTruthCreate) -> Result<GroundTruth> {
        input.validate()?;
        observe("ground_truth", "create", async {
            let ground_truth = input.into_active_model().insert(self.conn()).await?;
            info!(
                ground_truth_id = ground_truth.id,
                paper_id = ground_truth.paper_id,
                "Ground truth created"
            );
            Ok(ground_truth)
        })
        .await
    }

    pub async fn find_ground_truth_for_paper(&self, paper_id: i32) -> Result<Option<GroundTruth>> {
        observe("ground_truth", "find", async {
            GroundTruthEntity::find()
                .filter(GroundTruthColumn::PaperId.eq(paper_id))
                .one(self.conn())
                .await
                .map_err(Into::into)
        })
        .await
    }

    pub async fn update_ground_truth(&self, id: i32, input: GroundTruthUpdate) -> Result<GroundTruth> {
        input.validate()?;
        observe("ground_truth", "update", async {
            let mut ground_truth: GroundTruthActiveModel = GroundTruthEntity::find_by_id(id)
                .one(self.conn())
                .await?
                .ok_or_else(|| AppError::not_found("ground_truth", id))?
                .into();
            input.apply(&mut ground_truth);
            ground_truth.update(self.conn()).await.map_err(Into::into)
        })
        .await
    }

    /// Delete ground truth and the evaluations scored against it
    pub async fn delete_ground_truth(&self, id: i32) -> Result<bool> {
        let deleted = observe(
            "ground_truth",
            "delete",
            self.pool.session(move |txn| {
                Box::pin(async move {
                    ExtractEvalEntity::delete_many()
                        .filter(ExtractEvalColumn::GroundTruthId.eq(id))
                        .exec(txn)
                        .await?;
                    let result = GroundTruthEntity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected > 0)
                })
            }),
        )
        .await?;

        if deleted {
            info!(ground_truth_id = id, "Ground truth deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_delete_ground_truth_order() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([affected(2), affected(1)]),
        );

        assert!(repo.delete_ground_truth(8).await.unwrap());

        let log = into_log(repo);
        assert_in_order(
            &log,
            &[
                "BEGIN",
                r#"DELETE FROM \"extract_evals\""#,
                r#"DELETE FROM \"ground_truths\""#,
                "COMMIT",
            ],
        );
    }

    #[tokio::test]
    async fn test_update_keeps_paper() {
        let stored = GroundTruth {
            id: 8,
            paper_id: 3,
            title: "Old title".to_string(),
            doi: None,
            authors: None,
            refs: None,
            xrefs: None,
            abstract_text: None,
            keywords: None,
            description: None,
            created_at: ts(),
            updated_at: ts(),
        };
        let updated = GroundTruth {
            title: "New title".to_string(),
            ..stored.clone()
        };
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![stored], vec![updated]]),
        );

        let result = repo
            .update_ground_truth(
                8,
                GroundTruthUpdate {
                    title: Some("New title".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(result.title, "New title");
        assert_eq!(result.paper_id, 3);

        let log = into_log(repo);
        let update = format!("{:?}", log[1]);
        let set_clause = update.split("RETURNING").next().unwrap();
        assert!(!set_clause.contains(r#"\"paper_id\""#));
    }
}
