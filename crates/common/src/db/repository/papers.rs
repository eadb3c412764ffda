use super::{observe, page_size, Repository};
use crate::db::models::*;
use crate::errors::{AppError, Result};
use crate::schemas::{PaperCreate, PaperRead, PaperSummary, PaperUpdate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait,
};
use tracing::info;
use validator::Validate;

impl Repository {
    /// Create a new paper
    pub async fn create_paper(&self, input: PaperCreate) -> Result<Paper> {
        input.validate()?;
        observe("paper", "create", async {
            let paper = input.into_active_model().insert(self.conn()).await?;
            info!(paper_id = paper.id, "Paper created");
            Ok(paper)
        })
        .await
    }

    /// Find paper by ID
    pub async fn find_paper(&self, id: i32) -> Result<Option<Paper>> {
        observe("paper", "find", async {
            PaperEntity::find_by_id(id)
                .one(self.conn())
                .await
                .map_err(Into::into)
        })
        .await
    }

    /// Find paper by PDF content hash
    pub async fn find_paper_by_hash(&self, pdf_hash: &str) -> Result<Option<Paper>> {
        observe("paper", "find", async {
            PaperEntity::find()
                .filter(PaperColumn::PdfHash.eq(pdf_hash))
                .one(self.conn())
                .await
                .map_err(Into::into)
        })
        .await
    }

    /// List papers with pagination, oldest first. Returns the page and the
    /// total number of papers.
    pub async fn list_papers(&self, offset: u64, limit: u64) -> Result<(Vec<PaperSummary>, u64)> {
        observe("paper", "list", async {
            let limit = page_size(limit);
            let total = PaperEntity::find().count(self.conn()).await?;
            let papers = PaperEntity::find()
                .order_by_asc(PaperColumn::Id)
                .offset(offset)
                .limit(limit)
                .all(self.conn())
                .await?;

            Ok((papers.into_iter().map(Into::into).collect(), total))
        })
        .await
    }

    /// Paper with its extracts, ground truth and datasets
    pub async fn get_paper_read(&self, id: i32) -> Result<PaperRead> {
        observe("paper", "read", async {
            let paper = self
                .find_paper(id)
                .await?
                .ok_or_else(|| AppError::not_found("paper", id))?;
            let extracts = self.extracts_for_paper(id).await?;
            let ground_truth = self.find_ground_truth_for_paper(id).await?;
            let datasets = self.datasets_for_paper(id).await?;

            Ok(PaperRead::assemble(paper, extracts, ground_truth, datasets))
        })
        .await
    }

    /// Apply a partial update
    pub async fn update_paper(&self, id: i32, input: PaperUpdate) -> Result<Paper> {
        input.validate()?;
        observe("paper", "update", async {
            let mut paper: PaperActiveModel = self
                .find_paper(id)
                .await?
                .ok_or_else(|| AppError::not_found("paper", id))?
                .into();
            input.apply(&mut paper);
            paper.update(self.conn()).await.map_err(Into::into)
        })
        .await
    }

    /// Delete a paper with its ground truth, extracts, their evaluations and
    /// its dataset memberships. Datasets and other papers are untouched.
    pub async fn delete_paper(&self, id: i32) -> Result<bool> {
        let deleted = observe(
            "paper",
            "delete",
            self.pool.session(move |txn| {
                Box::pin(async move {
                    let extracts = ExtractEntity::find()
                        .select_only()
                        .column(ExtractColumn::Id)
                        .filter(ExtractColumn::PaperId.eq(id))
                        .into_query();
                    let ground_truths = GroundTruthEntity::find()
                        .select_only()
                        .column(GroundTruthColumn::Id)
                        .filter(GroundTruthColumn::PaperId.eq(id))
                        .into_query();

                    ExtractEvalEntity::delete_many()
                        .filter(
                            Condition::any()
                                .add(ExtractEvalColumn::ExtractId.in_subquery(extracts))
                                .add(ExtractEvalColumn::GroundTruthId.in_subquery(ground_truths)),
                        )
                        .exec(txn)
                        .await?;
                    ExtractEntity::delete_many()
                        .filter(ExtractColumn::PaperId.eq(id))
                        .exec(txn)
                        .await?;
                    GroundTruthEntity::delete_many()
                        .filter(GroundTruthColumn::PaperId.eq(id))
                        .exec(txn)
                        .await?;
                    DatasetPaperEntity::delete_many()
                        .filter(DatasetPaperColumn::PaperId.eq(id))
                        .exec(txn)
                        .await?;

                    let result = PaperEntity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected > 0)
                })
            }),
        )
        .await?;

        if deleted {
            info!(paper_id = id, "Paper deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::metrics::test_recorder::CapturingRecorder;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn paper(id: i32) -> Paper {
        Paper {
            id,
            pdf_path: Some(format!("papers/{}.pdf", id)),
            pdf_url: None,
            pdf_hash: None,
            pdf_actual_start_page: 1,
            pdf_actual_last_page: None,
            source: Some("arXiv".to_string()),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    #[tokio::test]
    async fn test_create_paper_validates_first() {
        let repo = repo(MockDatabase::new(DatabaseBackend::Postgres));
        let input: PaperCreate =
            serde_json::from_str(r#"{"pdf_hash": "not-a-digest"}"#).unwrap();

        let err = repo.create_paper(input).await.unwrap_err();
        assert_eq!(err.field(), Some("pdf_hash"));
        assert!(into_log(repo).is_empty());
    }

    #[tokio::test]
    async fn test_create_paper_inserts() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![paper(1)]]),
        );
        let input: PaperCreate =
            serde_json::from_str(r#"{"pdf_path": "papers/1.pdf", "source": "arXiv"}"#).unwrap();

        let created = repo.create_paper(input).await.unwrap();
        assert_eq!(created.id, 1);

        let log = into_log(repo);
        assert_in_order(&log, &[r#"INSERT INTO \"papers\""#]);
    }

    #[tokio::test]
    async fn test_update_paper_sets_only_supplied_columns() {
        let mut updated = paper(4);
        updated.source = Some("manual upload".to_string());
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![paper(4)], vec![updated]]),
        );

        let result = repo
            .update_paper(
                4,
                PaperUpdate {
                    source: Some("manual upload".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(result.source.as_deref(), Some("manual upload"));

        let log = into_log(repo);
        let update = format!("{:?}", log[1]);
        let set_clause = update.split("RETURNING").next().unwrap();
        assert!(set_clause.contains(r#"\"source\""#));
        assert!(set_clause.contains(r#"\"updated_at\""#));
        assert!(!set_clause.contains(r#"\"pdf_path\""#));
        assert!(!set_clause.contains(r#"\"created_at\""#));
    }

    #[tokio::test]
    async fn test_update_missing_paper_is_not_found() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([Vec::<Paper>::new()]),
        );
        let err = repo.update_paper(9, PaperUpdate::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_paper_removes_children_first() {
        let repo = repo(MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([
            affected(2),
            affected(1),
            affected(1),
            affected(3),
            affected(1),
        ]));

        assert!(repo.delete_paper(5).await.unwrap());

        let log = into_log(repo);
        assert_eq!(log.len(), 1, "cascade must run in one transaction");
        assert_in_order(
            &log,
            &[
                "BEGIN",
                r#"DELETE FROM \"extract_evals\""#,
                r#"DELETE FROM \"extracts\""#,
                r#"DELETE FROM \"ground_truths\""#,
                r#"DELETE FROM \"dataset_papers\""#,
                r#"DELETE FROM \"papers\""#,
                "COMMIT",
            ],
        );
        let rendered = format!("{:?}", log);
        assert!(!rendered.contains(r#"DELETE FROM \"datasets\""#));
    }

    #[tokio::test]
    async fn test_delete_unknown_paper_returns_false() {
        let repo = repo(MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([
            affected(0),
            affected(0),
            affected(0),
            affected(0),
            affected(0),
        ]));
        assert!(!repo.delete_paper(42).await.unwrap());
    }

    #[test]
    fn test_reads_are_timed_and_counted() {
        let recorder = CapturingRecorder::default();
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![paper(1)]])
                .append_query_results([Vec::<Paper>::new()]),
        );

        ::metrics::with_local_recorder(&recorder, || {
            tokio_test::block_on(async {
                assert!(repo.find_paper(1).await.unwrap().is_some());
                assert!(repo.find_paper_by_hash(&"a".repeat(64)).await.unwrap().is_none());
            })
        });

        let touched = recorder.touched();
        let finds = touched
            .iter()
            .filter(|m| *m == "papercheck_db_operations_total{entity=paper,operation=find}")
            .count();
        assert_eq!(finds, 2);
        assert!(touched
            .contains(&"papercheck_db_operation_duration_seconds{entity=paper,operation=find}".to_string()));
    }

    #[tokio::test]
    async fn test_list_papers_returns_total() {
        let count = BTreeMap::from([("num_items", Value::BigInt(Some(3)))]);
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![count]])
                .append_query_results([vec![paper(1), paper(2)]]),
        );

        let (page, total) = repo.list_papers(0, 2).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].source.as_deref(), Some("arXiv"));
    }

    #[tokio::test]
    async fn test_get_paper_read_nests_relations() {
        let dataset = Dataset {
            id: 7,
            name: "pubmed-sample".to_string(),
            description: None,
            version: Some("1.0".to_string()),
            source: None,
            license: None,
            folder_path: None,
            created_at: ts(),
            updated_at: ts(),
        };
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![paper(1)]])
                .append_query_results([Vec::<Extract>::new()])
                .append_query_results([Vec::<GroundTruth>::new()])
                .append_query_results([vec![dataset]]),
        );

        let read = repo.get_paper_read(1).await.unwrap();
        assert_eq!(read.id, 1);
        assert!(read.extracts.is_empty());
        assert!(read.ground_truth.is_none());
        assert_eq!(read.datasets[0].name, "pubmed-sample");
    }
}
