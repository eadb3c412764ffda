//! Schema migrations
//!
//! One migration per table, ordered so that every foreign key target exists
//! before the table that references it.

use sea_orm_migration::prelude::*;

mod m20250301_000001_create_papers_table;
mod m20250301_000002_create_datasets_table;
mod m20250301_000003_create_dataset_papers_table;
mod m20250301_000004_create_extractors_table;
mod m20250301_000005_create_ground_truths_table;
mod m20250301_000006_create_extracts_table;
mod m20250301_000007_create_extract_evals_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_papers_table::Migration),
            Box::new(m20250301_000002_create_datasets_table::Migration),
            Box::new(m20250301_000003_create_dataset_papers_table::Migration),
            Box::new(m20250301_000004_create_extractors_table::Migration),
            Box::new(m20250301_000005_create_ground_truths_table::Migration),
            Box::new(m20250301_000006_create_extracts_table::Migration),
            Box::new(m20250301_000007_create_extract_evals_table::Migration),
        ]
    }
}
