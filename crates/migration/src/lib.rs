//! Migrator for the company tracker schema.
pub use sea_orm_migration::prelude::*;

mod m20200401_000001_create_company;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20200401_000001_create_company::Migration)]
    }
}
