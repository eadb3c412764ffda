use super::{observe, Repository};
use crate::db::models::*;
use crate::errors::{AppError, Result};
use crate::schemas::{ExtractorCreate, ExtractorUpdate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait,
};
use tracing::info;
use validator::Validate;

impl Repository {
    /// Register an extractor. A second extractor with the same type, version,
    /// variant and config hashes is rejected as a duplicate by the database.
    pub async fn create_extractor(&self, input: ExtractorCreate) -> Result<Extractor> {
        input.validate()?;
        observe("extractor", "create", async {
            let extractor = input.into_active_model().insert(self.conn()).await?;
            info!(extractor_id = extractor.id, name = %extractor.name(), "Extractor created");
            Ok(extractor)
        })
        .await
    }

    pub async fn find_extractor(&self, id: i32) -> Result<Option<Extractor>> {
        observe("extractor", "find", async {
            ExtractorEntity::find_by_id(id)
                .one(self.conn())
                .await
                .map_err(Into::into)
        })
        .await
    }

    /// All extractors, or only those with `is_enabled` set
    pub async fn list_extractors(&self, enabled_only: bool) -> Result<Vec<Extractor>> {
        observe("extractor", "list", async {
            let mut query = ExtractorEntity::find();
            if enabled_only {
                query = query.filter(ExtractorColumn::IsEnabled.eq(true));
            }

            query
                .order_by_asc(ExtractorColumn::ExtractorType)
                .order_by_asc(ExtractorColumn::Id)
                .all(self.conn())
                .await
                .map_err(Into::into)
        })
        .await
    }

    pub async fn update_extractor(&self, id: i32, input: ExtractorUpdate) -> Result<Extractor> {
        input.validate()?;
        observe("extractor", "update", async {
            let mut extractor: ExtractorActiveModel = self
                .find_extractor(id)
                .await?
                .ok_or_else(|| AppError::not_found("extractor", id))?
                .into();
            input.apply(&mut extractor);
            extractor.update(self.conn()).await.map_err(Into::into)
        })
        .await
    }

    /// Delete an extractor with its extracts and every evaluation that
    /// references either
    pub async fn delete_extractor(&self, id: i32) -> Result<bool> {
        let deleted = observe(
            "extractor",
            "delete",
            self.pool.session(move |txn| {
                Box::pin(async move {
                    let extracts = ExtractEntity::find()
                        .select_only()
                        .column(ExtractColumn::Id)
                        .filter(ExtractColumn::ExtractorId.eq(id))
                        .into_query();

                    ExtractEvalEntity::delete_many()
                        .filter(
                            Condition::any()
                                .add(ExtractEvalColumn::ExtractorId.eq(id))
                                .add(ExtractEvalColumn::ExtractId.in_subquery(extracts)),
                        )
                        .exec(txn)
                        .await?;
                    ExtractEntity::delete_many()
                        .filter(ExtractColumn::ExtractorId.eq(id))
                        .exec(txn)
                        .await?;

                    let result = ExtractorEntity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected > 0)
                })
            }),
        )
        .await?;

        if deleted {
            info!(extractor_id = id, "Extractor deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::DbPool;
    use crate::schemas::ExtractCreate;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};

    #[tokio::test]
    async fn test_invalid_hash_never_reaches_database() {
        let repo = repo(MockDatabase::new(DatabaseBackend::Postgres));
        let mut input = ExtractorCreate::new("grobid");
        input.config_hash = Some("abc".to_string());

        let err = repo.create_extractor(input).await.unwrap_err();
        assert_eq!(err.field(), Some("config_hash"));
        assert!(into_log(repo).is_empty());
    }

    #[tokio::test]
    async fn test_storage_error_on_insert_propagates() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_errors([DbErr::Query(
                RuntimeErr::Internal("relation \"extractors\" does not exist".to_string()),
            )]),
        );

        let err = repo.create_extractor(ExtractorCreate::new("grobid")).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_list_enabled_filters() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([Vec::<Extractor>::new()]),
        );
        repo.list_extractors(true).await.unwrap();

        let log = into_log(repo);
        assert_in_order(&log, &[r#"\"is_enabled\" = "#]);
    }

    #[tokio::test]
    async fn test_delete_extractor_order() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([affected(3), affected(2), affected(1)]),
        );

        assert!(repo.delete_extractor(2).await.unwrap());

        let log = into_log(repo);
        assert_in_order(
            &log,
            &[
                "BEGIN",
                r#"DELETE FROM \"extract_evals\""#,
                r#"DELETE FROM \"extracts\""#,
                r#"DELETE FROM \"extractors\""#,
                "COMMIT",
            ],
        );
        assert!(!format!("{:?}", log).contains(r#"DELETE FROM \"papers\""#));
    }

    /// Unique and foreign-key violations are classified from the Postgres
    /// driver's error, which the mock backend cannot produce. Runs only when
    /// `PAPERCHECK_TEST_DATABASE_URL` points at a scratch database.
    #[tokio::test]
    async fn test_constraint_violations_against_live_database() {
        let Ok(url) = std::env::var("PAPERCHECK_TEST_DATABASE_URL") else {
            return;
        };
        let config = DatabaseConfig {
            url: Some(url),
            ..Default::default()
        };
        let pool = DbPool::connect(&config, false).await.unwrap();
        pool.migrate().await.unwrap();
        let repo = Repository::new(pool);

        // version and variant stay NULL; the index still treats the rows as equal
        let mut input = ExtractorCreate::new("constraint-check");
        input.config_hash = Some("d".repeat(64));
        let first = repo.create_extractor(input.clone()).await;
        let second = repo.create_extractor(input).await;
        assert!(matches!(second, Err(AppError::Duplicate { .. })), "{:?}", second);
        if let Ok(created) = first {
            repo.delete_extractor(created.id).await.unwrap();
        }

        let dangling: ExtractCreate =
            serde_json::from_str(r#"{"paper_id": 2147483647, "extractor_id": 2147483647}"#).unwrap();
        let err = repo.create_extract(dangling).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidReference { .. }), "{:?}", err);
    }
}
