//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240301_000001_create_users_table;
mod m20240302_000001_create_recycling_items_table;
mod m20240303_000001_create_collection_tables;
mod m20240304_000001_create_engagement_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_users_table::Migration),
            Box::new(m20240302_000001_create_recycling_items_table::Migration),
            Box::new(m20240303_000001_create_collection_tables::Migration),
            Box::new(m20240304_000001_create_engagement_tables::Migration),
        ]
    }
}
