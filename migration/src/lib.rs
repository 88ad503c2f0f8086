pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20250301_000001_leads_table;
mod m20250301_000002_users_table;
mod m20250308_000001_tracking_tables;
mod m20250315_000001_lead_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_leads_table::Migration),
            Box::new(m20250301_000002_users_table::Migration),
            Box::new(m20250308_000001_tracking_tables::Migration),
            Box::new(m20250315_000001_lead_indexes::Migration),
        ]
    }
}
